//! **tilepath-core**: grid-based terminal UI core types.
//!
//! This crate provides the foundational types used across the workspace:
//! geometry primitives, styled cells, a shared-buffer grid with frame
//! diffing, input messages, and the Elm-architecture application loop.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Driver, Effect, Model};
pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::Grid;
pub use messages::*;
pub use style::{AttrMask, Color, Style};
