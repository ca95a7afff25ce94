//! The [`Grid`] type: a 2D grid of [`Cell`]s with slice semantics.
//!
//! A `Grid` is a *view* into a shared backing buffer. Cloning a `Grid` yields
//! another view of the **same** storage. Use [`slice`](Grid::slice) to obtain
//! sub-grid views for panels and widgets.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::Cell;
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Internal shared buffer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct GridBuffer {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl GridBuffer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![Cell::default(); width * height],
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some((y as usize) * self.width + (x as usize))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A 2D grid of [`Cell`]s backed by shared storage.
///
/// Positions passed to [`at`](Grid::at) and [`set`](Grid::set) are relative
/// to the grid's own top-left corner, so a widget can draw at (0, 0) into
/// whatever slice it is given.
#[derive(Debug, Clone)]
pub struct Grid {
    buffer: Rc<RefCell<GridBuffer>>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with default cells.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Self {
            buffer: Rc::new(RefCell::new(GridBuffer::new(w, h))),
            bounds: Range::new(0, 0, width.max(0), height.max(0)),
        }
    }

    /// The bounding range of this grid / sub-grid, in root coordinates.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// The grid's own range, `(0, 0)` to its size.
    #[inline]
    pub fn range(&self) -> Range {
        Range::new(0, 0, self.width(), self.height())
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether the relative position `p` is inside this grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range().contains(p)
    }

    /// Get a sub-grid view sharing the same buffer. `r` is relative to this
    /// grid and is clipped to it.
    pub fn slice(&self, r: Range) -> Grid {
        Grid {
            buffer: Rc::clone(&self.buffer),
            bounds: self.bounds.intersect(r + self.bounds.min),
        }
    }

    /// Read the cell at `p`. Returns `Cell::default()` outside the grid.
    pub fn at(&self, p: Point) -> Cell {
        if !self.contains(p) {
            return Cell::default();
        }
        let q = p + self.bounds.min;
        let buf = self.buffer.borrow();
        buf.index(q.x, q.y)
            .map(|i| buf.cells[i])
            .unwrap_or_default()
    }

    /// Set the cell at `p`. No-op outside the grid.
    pub fn set(&self, p: Point, cell: Cell) {
        self.patch(p, |_| cell);
    }

    /// Replace the cell at `p` with `f(current)`. No-op outside the grid.
    pub fn patch(&self, p: Point, f: impl FnOnce(Cell) -> Cell) {
        if !self.contains(p) {
            return;
        }
        let q = p + self.bounds.min;
        let mut buf = self.buffer.borrow_mut();
        if let Some(i) = buf.index(q.x, q.y) {
            buf.cells[i] = f(buf.cells[i]);
        }
    }

    /// Fill every cell in the grid with `cell`.
    pub fn fill(&self, cell: Cell) {
        let mut buf = self.buffer.borrow_mut();
        for p in self.bounds.iter() {
            if let Some(i) = buf.index(p.x, p.y) {
                buf.cells[i] = cell;
            }
        }
    }

    /// Copy cells from `src` into `self`, aligning `src.bounds.min` with
    /// `self.bounds.min`. Returns the size actually copied.
    pub fn copy_from(&self, src: &Grid) -> Point {
        let sw = src.bounds.width().min(self.bounds.width());
        let sh = src.bounds.height().min(self.bounds.height());
        let src_buf = src.buffer.borrow();
        let mut dst_buf = self.buffer.borrow_mut();
        for dy in 0..sh {
            for dx in 0..sw {
                let sp = Point::new(src.bounds.min.x + dx, src.bounds.min.y + dy);
                let dp = Point::new(self.bounds.min.x + dx, self.bounds.min.y + dy);
                if let (Some(si), Some(di)) =
                    (src_buf.index(sp.x, sp.y), dst_buf.index(dp.x, dp.y))
                {
                    dst_buf.cells[di] = src_buf.cells[si];
                }
            }
        }
        Point::new(sw, sh)
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// A set of cell changes (a diff frame).
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the difference between two same-sized grids.
///
/// Returns a [`Frame`] containing only the cells that differ.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let bounds = curr.range();
    let mut cells = Vec::new();
    for p in bounds.iter() {
        let cc = curr.at(p);
        if prev.at(p) != cc {
            cells.push(FrameCell { cell: cc, pos: p });
        }
    }
    Frame {
        cells,
        width: bounds.width(),
        height: bounds.height(),
    }
}
