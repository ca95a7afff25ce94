//! Paint mode, brush weight and search speed as edited from the side panel.

use std::time::Duration;

use tilepath_core::Point;

use crate::tiles::{Tile, TileKind};

/// Heaviest weight an obstacle can carry.
pub const MAX_WEIGHT: f32 = 10.0;
/// Weight change per control step.
pub const WEIGHT_STEP: f32 = 0.1;
pub const MIN_TICKS_PER_SECOND: u32 = 1;
pub const MAX_TICKS_PER_SECOND: u32 = 1000;

pub const DEFAULT_WEIGHT: f32 = 1.0;
pub const DEFAULT_TICKS_PER_SECOND: u32 = 60;

/// Clamp a weight into `[0, MAX_WEIGHT]`, snapped to one decimal so repeated
/// steps do not drift.
pub fn clamp_weight(w: f32) -> f32 {
    if w.is_nan() {
        return DEFAULT_WEIGHT;
    }
    ((w * 10.0).round() / 10.0).clamp(0.0, MAX_WEIGHT)
}

pub fn clamp_ticks(t: i64) -> u32 {
    t.clamp(MIN_TICKS_PER_SECOND as i64, MAX_TICKS_PER_SECOND as i64) as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    mode: TileKind,
    weight: f32,
    ticks_per_second: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT, DEFAULT_TICKS_PER_SECOND)
    }
}

impl ToolState {
    pub fn new(weight: f32, ticks_per_second: u32) -> Self {
        Self {
            mode: TileKind::Obstacle,
            weight: clamp_weight(weight),
            ticks_per_second: clamp_ticks(ticks_per_second as i64),
        }
    }

    #[inline]
    pub fn mode(&self) -> TileKind {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TileKind) {
        if self.mode != mode {
            log::debug!("paint mode: {}", mode.label());
        }
        self.mode = mode;
    }

    /// Select the next mode, wrapping around. `back` walks the other way.
    pub fn cycle_mode(&mut self, back: bool) {
        let n = TileKind::ALL.len();
        let i = self.mode.index();
        let next = if back { (i + n - 1) % n } else { (i + 1) % n };
        self.set_mode(TileKind::ALL[next]);
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn adjust_weight(&mut self, delta: f32) {
        self.weight = clamp_weight(self.weight + delta);
    }

    #[inline]
    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    pub fn adjust_ticks(&mut self, delta: i32) {
        self.ticks_per_second = clamp_ticks(self.ticks_per_second as i64 + delta as i64);
    }

    /// Minimum time between two search ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second as f64)
    }

    /// The tile the current tool paints at `pos`.
    pub fn tile_at(&self, pos: Point) -> Tile {
        Tile::new(pos, self.mode, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_is_clamped_and_snapped() {
        let mut tool = ToolState::default();
        for _ in 0..5 {
            tool.adjust_weight(WEIGHT_STEP);
        }
        assert_eq!(tool.weight(), 1.5);
        tool.adjust_weight(100.0);
        assert_eq!(tool.weight(), MAX_WEIGHT);
        tool.adjust_weight(-100.0);
        assert_eq!(tool.weight(), 0.0);
        assert_eq!(clamp_weight(f32::NAN), DEFAULT_WEIGHT);
    }

    #[test]
    fn ticks_are_clamped() {
        let mut tool = ToolState::new(1.0, 0);
        assert_eq!(tool.ticks_per_second(), MIN_TICKS_PER_SECOND);
        tool.adjust_ticks(-10);
        assert_eq!(tool.ticks_per_second(), 1);
        tool.adjust_ticks(5000);
        assert_eq!(tool.ticks_per_second(), MAX_TICKS_PER_SECOND);
        assert_eq!(tool.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn mode_cycles_both_ways() {
        let mut tool = ToolState::default();
        assert_eq!(tool.mode(), TileKind::Obstacle);
        tool.cycle_mode(false);
        assert_eq!(tool.mode(), TileKind::Wall);
        tool.cycle_mode(true);
        tool.cycle_mode(true);
        assert_eq!(tool.mode(), TileKind::Goal);
        tool.cycle_mode(false);
        assert_eq!(tool.mode(), TileKind::Obstacle);
    }

    #[test]
    fn tile_at_uses_current_tool() {
        let mut tool = ToolState::new(2.5, 60);
        tool.set_mode(TileKind::Wall);
        let t = tool.tile_at(Point::new(4, 5));
        assert_eq!(t, Tile::new(Point::new(4, 5), TileKind::Wall, 2.5));
    }
}
