use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tilepath_core::Point;

use crate::distance::manhattan;
use crate::traits::{NeighborSource, SearchNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy)]
struct Record {
    g: f32,
    cost: f32,
    parent: Option<Point>,
    state: NodeState,
}

/// Heap entry, ordered so `BinaryHeap` (a max-heap) pops the lowest `f`
/// first, then the lowest heuristic, then the oldest entry.
#[derive(Debug, Clone, Copy)]
struct Entry {
    f: f32,
    h: f32,
    g: f32,
    seq: u64,
    pos: Point,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Incremental best-first grid search that advances one expansion per
/// [`tick`](StepSearch::tick).
///
/// Entering a node costs `1 + node.cost`; the priority is that accumulated
/// cost plus the Manhattan distance to the goal. Because every step costs at
/// least 1 the heuristic is consistent and a closed node is never reopened.
///
/// A fresh `StepSearch` is idle: [`finished`](StepSearch::finished) is `true`
/// and no path exists until [`start`](StepSearch::start) is called.
#[derive(Debug, Clone)]
pub struct StepSearch {
    start: Point,
    goal: Point,
    records: HashMap<Point, Record>,
    heap: BinaryHeap<Entry>,
    open_count: usize,
    current: Option<Point>,
    found_path: bool,
    finished: bool,
    seq: u64,
    ticks: usize,
    nbuf: Vec<SearchNode>,
}

impl Default for StepSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl StepSearch {
    pub fn new() -> Self {
        Self {
            start: Point::ZERO,
            goal: Point::ZERO,
            records: HashMap::new(),
            heap: BinaryHeap::new(),
            open_count: 0,
            current: None,
            found_path: false,
            finished: true,
            seq: 0,
            ticks: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Reset all state and seed the frontier with `start`.
    pub fn start(&mut self, start: Point, goal: Point) {
        self.start = start;
        self.goal = goal;
        self.records.clear();
        self.heap.clear();
        self.current = None;
        self.found_path = false;
        self.finished = false;
        self.seq = 0;
        self.ticks = 0;

        self.records.insert(
            start,
            Record {
                g: 0.0,
                cost: 0.0,
                parent: None,
                state: NodeState::Open,
            },
        );
        self.open_count = 1;
        self.push(start, 0.0);
    }

    /// Advance the search by one expansion. Does nothing once finished.
    ///
    /// Returns `true` if a node was expanded or the goal was reached.
    pub fn tick<S: NeighborSource + ?Sized>(&mut self, source: &S) -> bool {
        if self.finished {
            return false;
        }

        let Some(pos) = self.pop_open() else {
            self.finished = true;
            return false;
        };
        self.ticks += 1;
        self.current = Some(pos);

        let Some(record) = self.records.get_mut(&pos) else {
            return false;
        };
        record.state = NodeState::Closed;
        self.open_count -= 1;
        let node = SearchNode::new(pos, record.cost);
        let g = record.g;

        if pos == self.goal {
            self.found_path = true;
            self.finished = true;
            return true;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        source.neighbors(&node, &mut nbuf);

        for n in nbuf.iter() {
            let tentative = g + 1.0 + n.cost.max(0.0);
            match self.records.get_mut(&n.position) {
                Some(r) if r.state == NodeState::Closed => continue,
                Some(r) => {
                    if tentative >= r.g {
                        continue;
                    }
                    r.g = tentative;
                    r.cost = n.cost;
                    r.parent = Some(pos);
                }
                None => {
                    self.records.insert(
                        n.position,
                        Record {
                            g: tentative,
                            cost: n.cost,
                            parent: Some(pos),
                            state: NodeState::Open,
                        },
                    );
                    self.open_count += 1;
                }
            }
            self.push(n.position, tentative);
        }
        self.nbuf = nbuf;

        if self.open_count == 0 {
            self.finished = true;
        }
        true
    }

    /// Tick until finished, giving up after `max_ticks` expansions.
    ///
    /// Returns whether a path was found.
    pub fn solve<S: NeighborSource + ?Sized>(&mut self, source: &S, max_ticks: usize) -> bool {
        for _ in 0..max_ticks {
            if self.finished {
                break;
            }
            self.tick(source);
        }
        self.found_path
    }

    /// Whether the goal was reached or the frontier ran dry.
    #[inline]
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Whether the goal was reached.
    #[inline]
    pub fn found_path(&self) -> bool {
        self.found_path
    }

    /// The node expanded by the latest tick.
    #[inline]
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    #[inline]
    pub fn start_pos(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal_pos(&self) -> Point {
        self.goal
    }

    /// Number of expansions since the last `start`.
    #[inline]
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Discovered but not yet expanded positions, in no particular order.
    pub fn open_list(&self) -> impl Iterator<Item = Point> + '_ {
        self.records
            .iter()
            .filter(|(_, r)| r.state == NodeState::Open)
            .map(|(p, _)| *p)
    }

    /// Expanded positions, in no particular order.
    pub fn closed_list(&self) -> impl Iterator<Item = Point> + '_ {
        self.records
            .iter()
            .filter(|(_, r)| r.state == NodeState::Closed)
            .map(|(p, _)| *p)
    }

    #[inline]
    pub fn open_len(&self) -> usize {
        self.open_count
    }

    #[inline]
    pub fn closed_len(&self) -> usize {
        self.records.len() - self.open_count
    }

    /// Best known accumulated cost of reaching `p`.
    pub fn cost_to(&self, p: Point) -> Option<f32> {
        self.records.get(&p).map(|r| r.g)
    }

    /// Walk parent links from `end` back to the start.
    ///
    /// The result runs start → `end`; it is empty if `end` was never
    /// discovered.
    pub fn construct_path(&self, end: Point) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(end);
        while let Some(p) = cur {
            let Some(r) = self.records.get(&p) else {
                break;
            };
            path.push(p);
            cur = r.parent;
        }
        path.reverse();
        path
    }

    /// The start → goal path, only once the goal has been reached.
    pub fn path(&self) -> Option<Vec<Point>> {
        self.found_path.then(|| self.construct_path(self.goal))
    }

    fn push(&mut self, pos: Point, g: f32) {
        let h = manhattan(pos, self.goal) as f32;
        self.seq += 1;
        self.heap.push(Entry {
            f: g + h,
            h,
            g,
            seq: self.seq,
            pos,
        });
    }

    /// Pop the best live entry, skipping ones superseded by a cheaper push.
    fn pop_open(&mut self) -> Option<Point> {
        while let Some(e) = self.heap.pop() {
            match self.records.get(&e.pos) {
                Some(r) if r.state == NodeState::Open && r.g == e.g => return Some(e.pos),
                _ => continue,
            }
        }
        None
    }
}
