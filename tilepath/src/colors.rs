//! Palette and glyphs for the map and the side panel.

use tilepath_core::{AttrMask, Cell, Color, Style};

use crate::tiles::{Tile, TileKind};
use crate::tool::MAX_WEIGHT;

// -- Search overlay --

pub const CLOSED_BG: Color = Color::from_rgb(40, 120, 60);
pub const OPEN_BG: Color = Color::from_rgb(50, 80, 170);
pub const PATH_FG: Color = Color::from_rgb(255, 85, 85);

// -- Tiles --

pub const WALL_BG: Color = Color::from_rgb(235, 235, 235);
/// Obstacle shade at weight 0. Pure black would read as the terminal default.
pub const OBSTACLE_LIGHT: Color = Color::from_rgb(20, 20, 20);
pub const OBSTACLE_HEAVY: Color = Color::from_rgb(245, 245, 245);
pub const START_BG: Color = Color::from_rgb(80, 200, 80);
pub const GOAL_BG: Color = Color::from_rgb(220, 200, 60);
pub const MARKER_FG: Color = Color::from_rgb(10, 10, 10);
pub const EMPTY_FG: Color = Color::from_rgb(60, 62, 70);

// -- Panel --

pub const PANEL_FG: Color = Color::from_rgb(200, 200, 200);
pub const PANEL_DIM: Color = Color::from_rgb(120, 122, 130);
pub const PANEL_ACCENT: Color = Color::from_rgb(100, 160, 255);
pub const ERROR_FG: Color = Color::from_rgb(255, 85, 85);
pub const BUTTON_BG: Color = Color::from_rgb(50, 55, 75);

pub const EMPTY_GLYPH: [char; 2] = ['\u{00b7}', ' '];
pub const PATH_GLYPH: [char; 2] = ['\u{2022}', '\u{2022}'];
pub const START_GLYPH: [char; 2] = ['S', '>'];
pub const GOAL_GLYPH: [char; 2] = ['G', '!'];

pub const fn style(fg: Color, bg: Color) -> Style {
    Style {
        fg,
        bg,
        attrs: AttrMask::NONE,
    }
}

pub const EMPTY: Style = style(EMPTY_FG, Color::DEFAULT);
pub const CLOSED: Style = style(EMPTY_FG, CLOSED_BG);
pub const OPEN: Style = style(EMPTY_FG, OPEN_BG);

/// Background shade of an obstacle, lighter for heavier weights.
pub fn obstacle_color(weight: f32) -> Color {
    OBSTACLE_LIGHT.lerp(OBSTACLE_HEAVY, weight / MAX_WEIGHT)
}

/// The two terminal cells that draw `tile`.
pub fn tile_cells(tile: &Tile) -> [Cell; 2] {
    let (glyph, st) = match tile.kind {
        TileKind::Wall => ([' ', ' '], style(MARKER_FG, WALL_BG)),
        TileKind::Obstacle => ([' ', ' '], style(MARKER_FG, obstacle_color(tile.weight))),
        TileKind::Start => (
            START_GLYPH,
            style(MARKER_FG, START_BG).with_attrs(AttrMask::BOLD),
        ),
        TileKind::Goal => (
            GOAL_GLYPH,
            style(MARKER_FG, GOAL_BG).with_attrs(AttrMask::BOLD),
        ),
    };
    [Cell::new(glyph[0], st), Cell::new(glyph[1], st)]
}
