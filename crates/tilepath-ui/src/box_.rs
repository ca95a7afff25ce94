use tilepath_core::{Cell, Grid, Point, Range, Style};

use crate::StyledText;

/// Alignment for box title text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Center,
    Left,
    Right,
}

/// Decoration for a box drawn around a widget.
#[derive(Debug, Clone)]
pub struct BoxDecor {
    /// Style for the box border characters.
    pub style: Style,
    /// Title text drawn on the top border.
    pub title: StyledText,
    /// Alignment of the title on the top border.
    pub align_title: Alignment,
}

impl BoxDecor {
    /// Create a new box decoration with default style and no title.
    pub fn new() -> Self {
        Self {
            style: Style::default(),
            title: StyledText::text(""),
            align_title: Alignment::Center,
        }
    }

    /// Draw the box border into the grid and return the inner range.
    pub fn draw(&self, grid: &Grid) -> Range {
        let w = grid.width();
        let h = grid.height();
        if w < 2 || h < 2 {
            return grid.range();
        }

        let s = self.style;
        let set = |p: Point, ch: char| grid.set(p, Cell::new(ch, s));

        set(Point::new(0, 0), '\u{250c}');
        set(Point::new(w - 1, 0), '\u{2510}');
        set(Point::new(0, h - 1), '\u{2514}');
        set(Point::new(w - 1, h - 1), '\u{2518}');
        for x in 1..(w - 1) {
            set(Point::new(x, 0), '\u{2500}');
            set(Point::new(x, h - 1), '\u{2500}');
        }
        for y in 1..(h - 1) {
            set(Point::new(0, y), '\u{2502}');
            set(Point::new(w - 1, y), '\u{2502}');
        }

        if !self.title.content().is_empty() {
            let top_line = grid.slice(Range::new(1, 0, w - 1, 1));
            let tw = self.title.size().x;
            let lw = top_line.width();
            let offset = match self.align_title {
                Alignment::Left => 0,
                Alignment::Right => (lw - tw).max(0),
                Alignment::Center => ((lw - tw) / 2).max(0),
            };
            self.title
                .draw(&top_line.slice(Range::new(offset, 0, lw, 1)));
        }

        Range::new(1, 1, w - 1, h - 1)
    }
}

impl Default for BoxDecor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_and_centered_title() {
        let g = Grid::new(8, 3);
        let decor = BoxDecor {
            title: StyledText::text("ab"),
            ..BoxDecor::new()
        };
        let inner = decor.draw(&g);
        assert_eq!(inner, Range::new(1, 1, 7, 2));
        assert_eq!(g.at(Point::new(0, 0)).ch, '\u{250c}');
        assert_eq!(g.at(Point::new(7, 2)).ch, '\u{2518}');
        // Six border columns between the corners, title centred in them.
        assert_eq!(g.at(Point::new(3, 0)).ch, 'a');
        assert_eq!(g.at(Point::new(4, 0)).ch, 'b');
    }
}
