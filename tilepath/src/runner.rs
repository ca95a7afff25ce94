//! Drives a [`StepSearch`] over the tile map at a fixed tick rate.

use std::time::{Duration, Instant};

use tilepath_core::{Point, Range};
use tilepath_paths::{NeighborSource, SearchNode, StepSearch};

use crate::error::StartError;
use crate::tiles::{Tile, TileKind, TileMap};

pub const DEFAULT_MARGIN: i32 = 16;
/// One free ring around the painted area admits every detour the unbounded
/// grid would.
pub const MIN_MARGIN: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

/// Feeds the tile map to the search: walls and cells outside `bounds` are
/// skipped, free cells cost nothing extra, obstacles cost their weight.
pub struct TileAdapter<'a> {
    tiles: &'a TileMap,
    bounds: Range,
}

impl<'a> TileAdapter<'a> {
    pub fn new(tiles: &'a TileMap, bounds: Range) -> Self {
        Self { tiles, bounds }
    }
}

impl NeighborSource for TileAdapter<'_> {
    fn neighbors(&self, node: &SearchNode, buf: &mut Vec<SearchNode>) {
        for (pos, contents) in self.tiles.neighbors(node.position) {
            if !self.bounds.contains(pos) {
                continue;
            }
            let cost = match contents.first() {
                None => 0.0,
                Some(t) if t.kind == TileKind::Wall => continue,
                Some(t) => t.weight,
            };
            buf.push(SearchNode::new(pos, cost));
        }
    }
}

/// Range the search may visit: everything painted plus both endpoints,
/// grown by `margin` cells.
pub fn search_bounds(tiles: &TileMap, start: Point, goal: Point, margin: i32) -> Range {
    let painted = tiles.bounds().unwrap_or_default();
    painted
        .union(Range::cell(start))
        .union(Range::cell(goal))
        .grow(margin.max(MIN_MARGIN))
}

#[derive(Debug)]
pub struct SearchRunner {
    search: StepSearch,
    state: RunState,
    margin: i32,
    bounds: Range,
    last_tick: Option<Instant>,
    path: Option<Vec<Point>>,
}

impl SearchRunner {
    pub fn new(margin: i32) -> Self {
        Self {
            search: StepSearch::new(),
            state: RunState::Idle,
            margin: margin.max(MIN_MARGIN),
            bounds: Range::default(),
            last_tick: None,
            path: None,
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// The underlying search, for drawing its open and closed lists.
    #[inline]
    pub fn search(&self) -> &StepSearch {
        &self.search
    }

    /// The last path found, start first and goal last.
    pub fn path(&self) -> Option<&[Point]> {
        self.path.as_deref()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Begin a new search from `start` to `goal`, discarding any search in
    /// progress. Both endpoints must be placed.
    pub fn start(
        &mut self,
        tiles: &TileMap,
        start: Option<&Tile>,
        goal: Option<&Tile>,
        now: Instant,
    ) -> Result<(), StartError> {
        let (Some(start), Some(goal)) = (start, goal) else {
            log::warn!("start requested without both endpoints placed");
            return Err(StartError::MissingEndpoints);
        };

        self.bounds = search_bounds(tiles, start.position, goal.position, self.margin);
        self.search.start(start.position, goal.position);
        self.state = RunState::Running;
        self.last_tick = Some(now);
        self.path = None;
        log::info!(
            "search started {} -> {} within {}",
            start.position,
            goal.position,
            self.bounds
        );
        Ok(())
    }

    /// Per-frame update. Ticks at most once, and only when `interval` has
    /// elapsed since the previous tick. Returns `true` on the frame the
    /// search is seen to be finished.
    pub fn frame(&mut self, tiles: &TileMap, now: Instant, interval: Duration) -> bool {
        if self.state != RunState::Running {
            return false;
        }

        if self.search.finished() {
            self.state = RunState::Idle;
            if self.search.found_path() {
                let end = self.search.current().unwrap_or(self.search.goal_pos());
                let path = self.search.construct_path(end);
                log::info!(
                    "path found: {} cells after {} ticks",
                    path.len(),
                    self.search.ticks()
                );
                self.path = Some(path);
            } else {
                log::info!("no path after {} ticks", self.search.ticks());
            }
            return true;
        }

        let due = self
            .last_tick
            .is_none_or(|last| now.saturating_duration_since(last) >= interval);
        if due {
            self.search.tick(&TileAdapter::new(tiles, self.bounds));
            self.last_tick = Some(now);
        }
        false
    }

    /// Forget the current search and its path.
    pub fn reset(&mut self) {
        self.search = StepSearch::new();
        self.state = RunState::Idle;
        self.last_tick = None;
        self.path = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: Duration = Duration::ZERO;

    fn tile(x: i32, y: i32, kind: TileKind) -> Tile {
        Tile::new(Point::new(x, y), kind, 1.0)
    }

    fn run_to_end(runner: &mut SearchRunner, tiles: &TileMap) -> usize {
        let t0 = Instant::now();
        let mut frames = 0;
        while runner.is_running() {
            frames += 1;
            runner.frame(tiles, t0 + Duration::from_millis(frames as u64), FAST);
            assert!(frames < 100_000, "search did not terminate");
        }
        frames
    }

    #[test]
    fn adapter_excludes_walls_and_prices_obstacles() {
        let mut tiles = TileMap::new();
        tiles.insert(Point::new(1, 0), tile(1, 0, TileKind::Wall));
        tiles.insert(
            Point::new(0, 1),
            Tile::new(Point::new(0, 1), TileKind::Obstacle, 3.5),
        );
        let adapter = TileAdapter::new(&tiles, Range::new(-5, -5, 5, 5));
        let mut buf = Vec::new();
        adapter.neighbors(&SearchNode::new(Point::ZERO, 0.0), &mut buf);

        assert_eq!(buf.len(), 3);
        assert!(buf.iter().all(|n| n.position != Point::new(1, 0)));
        let below = buf.iter().find(|n| n.position == Point::new(0, 1));
        assert_eq!(below.map(|n| n.cost), Some(3.5));
        let above = buf.iter().find(|n| n.position == Point::new(0, -1));
        assert_eq!(above.map(|n| n.cost), Some(0.0));
    }

    #[test]
    fn adapter_respects_bounds() {
        let tiles = TileMap::new();
        let adapter = TileAdapter::new(&tiles, Range::new(0, 0, 2, 1));
        let mut buf = Vec::new();
        adapter.neighbors(&SearchNode::new(Point::ZERO, 0.0), &mut buf);
        assert_eq!(buf, vec![SearchNode::new(Point::new(1, 0), 0.0)]);
    }

    #[test]
    fn start_without_endpoints_stays_idle() {
        let tiles = TileMap::new();
        let mut runner = SearchRunner::new(DEFAULT_MARGIN);
        let s = tile(0, 0, TileKind::Start);
        let now = Instant::now();
        assert_eq!(
            runner.start(&tiles, Some(&s), None, now),
            Err(StartError::MissingEndpoints)
        );
        assert_eq!(runner.state(), RunState::Idle);
        assert_eq!(
            runner.start(&tiles, None, None, now),
            Err(StartError::MissingEndpoints)
        );
        assert_eq!(runner.state(), RunState::Idle);
    }

    #[test]
    fn wall_between_start_and_goal_is_routed_around() {
        let mut tiles = TileMap::new();
        tiles.insert(Point::new(1, 0), tile(1, 0, TileKind::Wall));
        let s = tile(0, 0, TileKind::Start);
        let g = tile(2, 0, TileKind::Goal);

        let mut runner = SearchRunner::new(DEFAULT_MARGIN);
        runner
            .start(&tiles, Some(&s), Some(&g), Instant::now())
            .unwrap();
        assert_eq!(runner.state(), RunState::Running);
        run_to_end(&mut runner, &tiles);

        let path = runner.path().unwrap();
        assert!(path.len() > 3);
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(2, 0)));
        assert!(!path.contains(&Point::new(1, 0)));
    }

    #[test]
    fn zero_margin_still_leaves_room_to_detour() {
        let mut tiles = TileMap::new();
        tiles.insert(Point::new(1, 0), tile(1, 0, TileKind::Wall));
        let s = tile(0, 0, TileKind::Start);
        let g = tile(2, 0, TileKind::Goal);

        let mut runner = SearchRunner::new(0);
        runner
            .start(&tiles, Some(&s), Some(&g), Instant::now())
            .unwrap();
        assert_eq!(runner.bounds(), Range::new(-1, -1, 4, 2));
        run_to_end(&mut runner, &tiles);

        assert!(runner.search().found_path());
        let path = runner.path().unwrap();
        assert_eq!(path.len(), 5);
        assert!(!path.contains(&Point::new(1, 0)));
        assert_eq!(search_bounds(&tiles, s.position, g.position, -3), runner.bounds());
    }

    #[test]
    fn enclosed_goal_exhausts_without_path() {
        let mut tiles = TileMap::new();
        for p in Point::new(5, 5).neighbors_4() {
            tiles.insert(p, tile(p.x, p.y, TileKind::Wall));
        }
        let s = tile(0, 0, TileKind::Start);
        let g = tile(5, 5, TileKind::Goal);
        let mut runner = SearchRunner::new(2);
        runner
            .start(&tiles, Some(&s), Some(&g), Instant::now())
            .unwrap();
        run_to_end(&mut runner, &tiles);

        assert!(runner.search().finished());
        assert!(!runner.search().found_path());
        assert!(runner.path().is_none());
    }

    #[test]
    fn ticks_are_paced_by_interval() {
        let tiles = TileMap::new();
        let s = tile(0, 0, TileKind::Start);
        let g = tile(10, 0, TileKind::Goal);
        let mut runner = SearchRunner::new(DEFAULT_MARGIN);
        let t0 = Instant::now();
        runner.start(&tiles, Some(&s), Some(&g), t0).unwrap();

        let interval = Duration::from_millis(100);
        runner.frame(&tiles, t0 + Duration::from_millis(50), interval);
        assert_eq!(runner.search().ticks(), 0);
        runner.frame(&tiles, t0 + Duration::from_millis(100), interval);
        assert_eq!(runner.search().ticks(), 1);
        // Several intervals overdue still yields a single tick.
        runner.frame(&tiles, t0 + Duration::from_millis(1000), interval);
        assert_eq!(runner.search().ticks(), 2);
    }

    #[test]
    fn restart_discards_previous_path() {
        let tiles = TileMap::new();
        let s = tile(0, 0, TileKind::Start);
        let g = tile(1, 0, TileKind::Goal);
        let mut runner = SearchRunner::new(DEFAULT_MARGIN);
        runner
            .start(&tiles, Some(&s), Some(&g), Instant::now())
            .unwrap();
        run_to_end(&mut runner, &tiles);
        assert_eq!(runner.path().map(<[Point]>::len), Some(2));

        runner
            .start(&tiles, Some(&s), Some(&g), Instant::now())
            .unwrap();
        assert!(runner.path().is_none());
        assert!(runner.is_running());

        runner.reset();
        assert_eq!(runner.state(), RunState::Idle);
    }

    #[test]
    fn bounds_include_tiles_endpoints_and_margin() {
        let mut tiles = TileMap::new();
        tiles.insert(Point::new(-4, 0), tile(-4, 0, TileKind::Wall));
        let r = search_bounds(&tiles, Point::new(0, 0), Point::new(3, 2), 1);
        assert_eq!(r, Range::new(-5, -1, 5, 4));
    }
}
