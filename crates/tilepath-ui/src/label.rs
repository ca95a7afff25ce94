use tilepath_core::{Grid, Range};

use crate::{BoxDecor, StyledText};

/// A simple label widget that displays styled text, optionally inside a box.
#[derive(Debug, Clone)]
pub struct Label {
    /// The content to display.
    pub content: StyledText,
    /// Optional box decoration.
    pub box_: Option<BoxDecor>,
}

impl Label {
    pub fn new(content: StyledText) -> Self {
        Self {
            content,
            box_: None,
        }
    }

    /// Set the text content, keeping the style.
    pub fn set_text(&mut self, text: &str) {
        self.content = self.content.clone().with_text(text);
    }

    /// Draw the label into the grid. Returns the range of cells used.
    pub fn draw(&self, grid: &Grid) -> Range {
        if let Some(ref box_decor) = self.box_ {
            let inner = box_decor.draw(grid);
            self.content.draw(&grid.slice(inner));
            grid.range()
        } else {
            self.content.draw(grid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepath_core::Point;

    #[test]
    fn boxed_label_draws_inside_border() {
        let g = Grid::new(6, 3);
        let mut label = Label::new(StyledText::text("old"));
        label.set_text("hi");
        label.box_ = Some(BoxDecor::new());
        assert_eq!(label.draw(&g), g.range());
        assert_eq!(g.at(Point::new(1, 1)).ch, 'h');
        assert_eq!(g.at(Point::new(2, 1)).ch, 'i');
    }
}
