//! Stepwise pathfinding for grid demos.
//!
//! [`StepSearch`] runs a best-first search one expansion at a time so callers
//! can pace it and draw the frontier between steps. Neighbors and their
//! traversal costs come from a [`NeighborSource`], which can be any type or a
//! plain closure.
//!
//! ```
//! use tilepath_core::Point;
//! use tilepath_paths::{SearchNode, StepSearch};
//!
//! let corridor = |node: &SearchNode, buf: &mut Vec<SearchNode>| {
//!     let next = node.position.shift(1, 0);
//!     if next.x <= 4 {
//!         buf.push(SearchNode::new(next, 0.0));
//!     }
//! };
//!
//! let mut search = StepSearch::new();
//! search.start(Point::new(0, 0), Point::new(4, 0));
//! while !search.finished() {
//!     search.tick(&corridor);
//! }
//! assert_eq!(search.path().map(|p| p.len()), Some(5));
//! ```

mod distance;
mod search;
mod traits;

pub use distance::manhattan;
pub use search::StepSearch;
pub use traits::{NeighborSource, SearchNode};
