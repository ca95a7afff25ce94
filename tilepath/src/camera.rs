//! Mapping between world cells and terminal cells.

use tilepath_core::{Point, Range};

/// Terminal columns used by one world cell, so cells look roughly square.
pub const CELL_WIDTH: i32 = 2;

/// A pannable window onto the world, drawn into `viewport` (screen cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    /// World cell shown at the top-left corner of the viewport.
    offset: Point,
    viewport: Range,
}

impl Camera {
    /// A camera with the world origin in the middle of `viewport`.
    pub fn centered(viewport: Range) -> Self {
        let mut cam = Self {
            offset: Point::ZERO,
            viewport,
        };
        let (cols, rows) = cam.visible_size();
        cam.offset = Point::new(-cols / 2, -rows / 2);
        cam
    }

    #[inline]
    pub fn viewport(&self) -> Range {
        self.viewport
    }

    #[inline]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Change the screen area, keeping the world cell at its centre.
    pub fn set_viewport(&mut self, viewport: Range) {
        let (cols, rows) = self.visible_size();
        let center = self.offset.shift(cols / 2, rows / 2);
        self.viewport = viewport;
        let (cols, rows) = self.visible_size();
        self.offset = center.shift(-cols / 2, -rows / 2);
    }

    /// World cells across and down the viewport.
    pub fn visible_size(&self) -> (i32, i32) {
        (self.viewport.width() / CELL_WIDTH, self.viewport.height())
    }

    /// World range currently on screen.
    pub fn visible(&self) -> Range {
        let (cols, rows) = self.visible_size();
        Range::new(
            self.offset.x,
            self.offset.y,
            self.offset.x + cols,
            self.offset.y + rows,
        )
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.offset = self.offset.shift(dx, dy);
    }

    /// World cell under a screen position, if it is inside the viewport.
    pub fn screen_to_world(&self, screen: Point) -> Option<Point> {
        if !self.viewport.contains(screen) {
            return None;
        }
        let rel = screen - self.viewport.min;
        let world = Point::new(self.offset.x + rel.x / CELL_WIDTH, self.offset.y + rel.y);
        self.visible().contains(world).then_some(world)
    }

    /// Left screen column of a world cell, if the whole cell is visible.
    pub fn world_to_screen(&self, world: Point) -> Option<Point> {
        if !self.visible().contains(world) {
            return None;
        }
        let rel = world - self.offset;
        Some(self.viewport.min + Point::new(rel.x * CELL_WIDTH, rel.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_camera_puts_origin_mid_screen() {
        let cam = Camera::centered(Range::new(0, 0, 20, 10));
        assert_eq!(cam.visible_size(), (10, 10));
        assert_eq!(cam.world_to_screen(Point::ZERO), Some(Point::new(10, 5)));
        assert_eq!(cam.screen_to_world(Point::new(10, 5)), Some(Point::ZERO));
        assert_eq!(cam.screen_to_world(Point::new(11, 5)), Some(Point::ZERO));
    }

    #[test]
    fn outside_viewport_maps_to_none() {
        let cam = Camera::centered(Range::new(0, 0, 9, 4));
        // Odd width: the last column holds only half a world cell.
        assert_eq!(cam.screen_to_world(Point::new(8, 0)), None);
        assert_eq!(cam.screen_to_world(Point::new(9, 0)), None);
        assert_eq!(cam.world_to_screen(Point::new(100, 0)), None);
    }

    #[test]
    fn pan_moves_world_under_screen() {
        let mut cam = Camera::centered(Range::new(0, 0, 20, 10));
        let before = cam.screen_to_world(Point::new(4, 4));
        cam.pan(3, -1);
        let after = cam.screen_to_world(Point::new(4, 4));
        assert_eq!(after, before.map(|p| p.shift(3, -1)));
    }

    #[test]
    fn resize_keeps_centre() {
        let mut cam = Camera::centered(Range::new(0, 0, 20, 10));
        cam.set_viewport(Range::new(0, 0, 40, 20));
        assert_eq!(cam.world_to_screen(Point::ZERO), Some(Point::new(20, 10)));
    }

    #[test]
    fn offset_viewport() {
        let cam = Camera::centered(Range::new(4, 2, 8, 4));
        let w = cam.screen_to_world(Point::new(6, 3));
        assert_eq!(w.and_then(|w| cam.world_to_screen(w)), Some(Point::new(6, 3)));
    }
}
