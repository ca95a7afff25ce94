use std::collections::HashMap;

use tilepath_core::{Cell, Grid, Point, Range, Style};

/// Text with optional per-character style markups.
///
/// Markup characters in the text (e.g. `@`) switch the style for the
/// following characters according to a markup map.
#[derive(Debug, Clone)]
pub struct StyledText {
    text: String,
    style: Style,
    markups: Option<HashMap<char, Style>>,
}

impl StyledText {
    /// Create a styled text from a plain string with default style.
    pub fn text(s: &str) -> Self {
        Self::new(s, Style::default())
    }

    /// Create a styled text with the given text and style.
    pub fn new(text: &str, style: Style) -> Self {
        Self {
            text: text.to_string(),
            style,
            markups: None,
        }
    }

    /// Set the text content.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Add a single markup: when `marker` is encountered in the text, switch
    /// to `style` for subsequent characters.
    pub fn with_markup(mut self, marker: char, style: Style) -> Self {
        self.markups
            .get_or_insert_with(HashMap::new)
            .insert(marker, style);
        self
    }

    /// Return the raw text content.
    pub fn content(&self) -> &str {
        &self.text
    }

    /// Return the base style.
    pub fn style(&self) -> Style {
        self.style
    }

    /// Iterate over styled characters, calling `callback` for each with its
    /// position and cell. Returns the point one past the last character.
    pub fn iter(&self, mut callback: impl FnMut(Point, Cell)) -> Point {
        let mut x: i32 = 0;
        let mut y: i32 = 0;
        let mut current_style = self.style;

        for ch in self.text.chars() {
            if let Some(&s) = self.markups.as_ref().and_then(|m| m.get(&ch)) {
                current_style = s;
                continue;
            }
            if ch == '\n' {
                x = 0;
                y += 1;
                continue;
            }
            callback(Point::new(x, y), Cell::new(ch, current_style));
            x += 1;
        }
        Point::new(x, y)
    }

    /// Return the minimum bounding size required to display this text.
    pub fn size(&self) -> Point {
        let mut max = Point::ZERO;
        self.iter(|p, _| {
            max.x = max.x.max(p.x + 1);
            max.y = max.y.max(p.y + 1);
        });
        max
    }

    /// Draw the styled text into the given grid starting at (0,0).
    /// Returns the range of cells that were written.
    pub fn draw(&self, grid: &Grid) -> Range {
        let mut drawn = Range::default();
        self.iter(|p, cell| {
            if grid.contains(p) {
                grid.set(p, cell);
                drawn = drawn.union(Range::cell(p));
            }
        });
        drawn
    }
}
