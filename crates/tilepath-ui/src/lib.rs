//! Small widgets for drawing the tilepath side panel.

mod box_;
mod label;
mod styled_text;

pub use box_::{Alignment, BoxDecor};
pub use label::Label;
pub use styled_text::StyledText;
