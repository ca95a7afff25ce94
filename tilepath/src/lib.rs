//! **tilepath**: paint a grid with walls and weighted obstacles, place a
//! start and a goal, and watch a best-first search expand one node per tick.
//!
//! The demo runs on the [`tilepath_core`] application loop: a
//! [`PathfindingModel`] owns the sparse [`TileMap`], the paint [`ToolState`],
//! a [`SearchRunner`] pacing a [`tilepath_paths::StepSearch`], and the side
//! panel drawn with [`tilepath_ui`] widgets.

pub mod camera;
pub mod colors;
pub mod config;
pub mod error;
pub mod model;
pub mod runner;
pub mod tiles;
pub mod tool;
pub mod ui;

pub use config::{Cli, Config};
pub use error::{AppError, StartError};
pub use model::PathfindingModel;
pub use runner::{RunState, SearchRunner, TileAdapter};
pub use tiles::{Tile, TileKind, TileMap};
pub use tool::{ToolState, MAX_WEIGHT};
