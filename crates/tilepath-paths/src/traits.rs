use tilepath_core::Point;

/// A position handed to or produced by a [`NeighborSource`].
///
/// `cost` is the extra price of entering `position` on top of the unit step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNode {
    pub position: Point,
    pub cost: f32,
}

impl SearchNode {
    pub fn new(position: Point, cost: f32) -> Self {
        Self { position, cost }
    }
}

/// Supplies the traversable neighbors of a node.
///
/// Blocked cells are simply not pushed. The caller clears `buf` before
/// calling.
pub trait NeighborSource {
    fn neighbors(&self, node: &SearchNode, buf: &mut Vec<SearchNode>);
}

impl<F> NeighborSource for F
where
    F: Fn(&SearchNode, &mut Vec<SearchNode>),
{
    fn neighbors(&self, node: &SearchNode, buf: &mut Vec<SearchNode>) {
        self(node, buf)
    }
}
