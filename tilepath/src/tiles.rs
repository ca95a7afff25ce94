//! Tiles and the sparse tile map they are painted into.

use std::collections::HashMap;

use tilepath_core::{Point, Range};

/// What a painted tile represents. Also the paint mode of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Obstacle,
    Wall,
    Start,
    Goal,
}

impl TileKind {
    /// Every kind, in the order the mode selector lists them.
    pub const ALL: [TileKind; 4] = [
        TileKind::Obstacle,
        TileKind::Wall,
        TileKind::Start,
        TileKind::Goal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TileKind::Obstacle => "Obstacle",
            TileKind::Wall => "Wall",
            TileKind::Start => "Start",
            TileKind::Goal => "Goal",
        }
    }

    /// Position in [`TileKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            TileKind::Obstacle => 0,
            TileKind::Wall => 1,
            TileKind::Start => 2,
            TileKind::Goal => 3,
        }
    }

    /// Whether tiles of this kind live in the [`TileMap`] rather than as the
    /// single start or goal marker.
    pub fn is_terrain(self) -> bool {
        matches!(self, TileKind::Obstacle | TileKind::Wall)
    }
}

/// A user-placed annotation on one world cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Point,
    pub kind: TileKind,
    /// Extra cost of entering the cell. Only meaningful for obstacles.
    pub weight: f32,
}

impl Tile {
    pub fn new(position: Point, kind: TileKind, weight: f32) -> Self {
        Self {
            position,
            kind,
            weight,
        }
    }
}

/// Unbounded sparse storage of tiles keyed by world position.
///
/// A stored cell always holds exactly one tile whose `position` matches its
/// key; free cells are simply absent and read back as an empty slice.
#[derive(Debug, Clone, Default)]
pub struct TileMap {
    cells: HashMap<Point, Vec<Tile>>,
}

impl TileMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `tile` at `pos` if the cell is free. Returns whether it was
    /// placed; an occupied cell keeps its tile.
    pub fn insert(&mut self, pos: Point, tile: Tile) -> bool {
        if self.cells.contains_key(&pos) {
            return false;
        }
        self.cells.insert(pos, vec![Tile { position: pos, ..tile }]);
        true
    }

    /// Empty the cell at `pos`. Returns whether anything was removed.
    pub fn clear(&mut self, pos: Point) -> bool {
        self.cells.remove(&pos).is_some()
    }

    /// The contents of the cell at `pos`, empty when free.
    pub fn get(&self, pos: Point) -> &[Tile] {
        self.cells.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The four cardinal neighbours of `pos` (up, right, down, left) with
    /// their contents.
    pub fn neighbors(&self, pos: Point) -> impl Iterator<Item = (Point, &[Tile])> + '_ {
        pos.neighbors_4().into_iter().map(|p| (p, self.get(p)))
    }

    /// Visit every occupied cell, in no particular order.
    pub fn for_each(&self, mut visitor: impl FnMut(Point, &Tile)) {
        for (pos, tiles) in &self.cells {
            for tile in tiles {
                visitor(*pos, tile);
            }
        }
    }

    /// Every stored tile, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.values().flatten()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear_all(&mut self) {
        self.cells.clear();
    }

    /// Bounding range of all occupied cells, `None` when the map is empty.
    pub fn bounds(&self) -> Option<Range> {
        if self.cells.is_empty() {
            return None;
        }
        Some(Range::bounding(self.cells.keys().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(x: i32, y: i32) -> Tile {
        Tile::new(Point::new(x, y), TileKind::Wall, 1.0)
    }

    fn obstacle(x: i32, y: i32, weight: f32) -> Tile {
        Tile::new(Point::new(x, y), TileKind::Obstacle, weight)
    }

    #[test]
    fn insert_into_occupied_cell_keeps_original() {
        let mut map = TileMap::new();
        let p = Point::new(3, -2);
        assert!(map.insert(p, obstacle(3, -2, 4.0)));
        assert!(!map.insert(p, wall(3, -2)));
        assert_eq!(map.get(p), &[obstacle(3, -2, 4.0)]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn clearing_free_cell_is_noop() {
        let mut map = TileMap::new();
        assert!(!map.clear(Point::new(0, 0)));
        assert!(map.is_empty());
        assert!(map.get(Point::new(0, 0)).is_empty());
    }

    #[test]
    fn get_follows_insert_and_clear_history() {
        let mut map = TileMap::new();
        let p = Point::new(1, 1);
        map.insert(p, wall(1, 1));
        map.clear(p);
        map.insert(p, obstacle(1, 1, 2.5));
        map.insert(p, wall(1, 1));
        assert_eq!(map.get(p)[0].kind, TileKind::Obstacle);
        map.clear(p);
        assert!(map.get(p).is_empty());
        assert!(map.bounds().is_none());
    }

    #[test]
    fn stored_position_matches_key() {
        let mut map = TileMap::new();
        let p = Point::new(7, 7);
        map.insert(p, wall(0, 0));
        assert_eq!(map.get(p)[0].position, p);
    }

    #[test]
    fn neighbors_in_cardinal_order() {
        let mut map = TileMap::new();
        map.insert(Point::new(1, 0), wall(1, 0));
        let n: Vec<_> = map.neighbors(Point::new(0, 0)).collect();
        assert_eq!(n.len(), 4);
        assert_eq!(n[0].0, Point::new(0, -1));
        assert_eq!(n[1].0, Point::new(1, 0));
        assert_eq!(n[1].1.len(), 1);
        assert_eq!(n[2].0, Point::new(0, 1));
        assert_eq!(n[3].0, Point::new(-1, 0));
        assert!(n[3].1.is_empty());
    }

    #[test]
    fn bounds_cover_all_tiles() {
        let mut map = TileMap::new();
        map.insert(Point::new(-3, 2), wall(-3, 2));
        map.insert(Point::new(4, -1), wall(4, -1));
        assert_eq!(map.bounds(), Some(Range::new(-3, -1, 5, 3)));

        let mut seen = 0;
        map.for_each(|pos, tile| {
            assert_eq!(pos, tile.position);
            seen += 1;
        });
        assert_eq!(seen, 2);
        assert_eq!(map.iter().count(), 2);

        map.clear_all();
        assert!(map.is_empty());
    }

    #[test]
    fn mode_order_and_labels() {
        for (i, kind) in TileKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(TileKind::Goal.label(), "Goal");
        assert!(TileKind::Wall.is_terrain());
        assert!(!TileKind::Start.is_terrain());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn tile_serde_roundtrip() {
        let t = obstacle(2, 5, 3.5);
        let json = serde_json::to_string(&t).unwrap();
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
