//! The application model: input handling, search pacing and drawing.

use std::time::Instant;

use tilepath_core::{
    app::{Effect, Model},
    grid::Grid,
    messages::{Key, ModMask, MouseAction, Msg},
    Cell, Point, Style,
};

use crate::camera::{Camera, CELL_WIDTH};
use crate::colors;
use crate::config::Config;
use crate::runner::SearchRunner;
use crate::tiles::{Tile, TileKind, TileMap};
use crate::tool::{ToolState, WEIGHT_STEP};
use crate::ui::{draw_panel, PanelAction, PanelLayout, PanelView, UiState};

/// World cells panned per key press or wheel notch.
const PAN_STEP: i32 = 2;

pub struct PathfindingModel {
    tiles: TileMap,
    start: Option<Tile>,
    goal: Option<Tile>,
    tool: ToolState,
    runner: SearchRunner,
    camera: Camera,
    layout: PanelLayout,
    ui: UiState,
}

impl PathfindingModel {
    pub fn new(config: &Config, width: i32, height: i32) -> Self {
        let layout = PanelLayout::new(width, height);
        Self {
            tiles: TileMap::new(),
            start: None,
            goal: None,
            tool: ToolState::new(config.weight, config.ticks_per_second),
            runner: SearchRunner::new(config.margin),
            camera: Camera::centered(layout.map_viewport()),
            layout,
            ui: UiState::default(),
        }
    }

    pub fn tiles(&self) -> &TileMap {
        &self.tiles
    }

    pub fn start_tile(&self) -> Option<&Tile> {
        self.start.as_ref()
    }

    pub fn goal_tile(&self) -> Option<&Tile> {
        self.goal.as_ref()
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn runner(&self) -> &SearchRunner {
        &self.runner
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    fn resize(&mut self, width: i32, height: i32) {
        self.layout = PanelLayout::new(width, height);
        self.camera.set_viewport(self.layout.map_viewport());
        self.refresh_hover();
    }

    fn refresh_hover(&mut self) {
        let Some(pos) = self.ui.mouse else {
            return;
        };
        self.ui.gui_active = self.ui.gui_captured || self.layout.panel().contains(pos);
        self.ui.hovered = self.camera.screen_to_world(pos);
    }

    /// Try to begin a search. Missing endpoints are reported on screen.
    pub fn start_search(&mut self, now: Instant) {
        match self
            .runner
            .start(&self.tiles, self.start.as_ref(), self.goal.as_ref(), now)
        {
            Ok(()) => self.ui.clear_error(),
            Err(e) => self.ui.set_error(e.to_string()),
        }
    }

    fn paint(&mut self, pos: Point) {
        let tile = self.tool.tile_at(pos);
        match tile.kind {
            TileKind::Obstacle | TileKind::Wall => {
                if self.tiles.insert(pos, tile) {
                    log::trace!("{} placed at {pos}", tile.kind.label());
                }
            }
            TileKind::Start => self.start = Some(tile),
            TileKind::Goal => self.goal = Some(tile),
        }
    }

    fn erase(&mut self, pos: Point) {
        self.tiles.clear(pos);
        if self.start.is_some_and(|t| t.position == pos) {
            self.start = None;
        }
        if self.goal.is_some_and(|t| t.position == pos) {
            self.goal = None;
        }
    }

    fn clear_all(&mut self) {
        log::info!("clearing {} tiles", self.tiles.len());
        self.tiles.clear_all();
        self.start = None;
        self.goal = None;
        self.runner.reset();
    }

    fn apply(&mut self, action: PanelAction, now: Instant) {
        match action {
            PanelAction::WeightDown => self.tool.adjust_weight(-WEIGHT_STEP),
            PanelAction::WeightUp => self.tool.adjust_weight(WEIGHT_STEP),
            PanelAction::TicksDown => self.tool.adjust_ticks(-1),
            PanelAction::TicksUp => self.tool.adjust_ticks(1),
            PanelAction::SelectMode(kind) => self.tool.set_mode(kind),
            PanelAction::Start => self.start_search(now),
        }
    }

    fn on_mouse(&mut self, action: MouseAction, pos: Point, mods: ModMask, now: Instant) {
        self.ui.mouse = Some(pos);
        self.refresh_hover();

        match action {
            MouseAction::Main => {
                if self.ui.gui_active {
                    self.ui.gui_captured = true;
                    if let Some(a) = self.layout.hit(pos, self.runner.is_running()) {
                        self.apply(a, now);
                    }
                } else {
                    self.ui.left_held = true;
                    if let Some(w) = self.ui.hovered {
                        self.paint(w);
                    }
                }
            }
            MouseAction::Secondary => {
                if self.ui.gui_active {
                    self.ui.gui_captured = true;
                } else {
                    self.ui.right_held = true;
                    if let Some(w) = self.ui.hovered {
                        self.erase(w);
                    }
                }
            }
            MouseAction::Move => {
                if let (false, Some(w)) = (self.ui.gui_active, self.ui.hovered) {
                    if self.ui.left_held {
                        self.paint(w);
                    } else if self.ui.right_held {
                        self.erase(w);
                    }
                }
            }
            MouseAction::Release => {
                self.ui.left_held = false;
                self.ui.right_held = false;
                self.ui.gui_captured = false;
                self.refresh_hover();
            }
            MouseAction::WheelUp | MouseAction::WheelDown => {
                let d = if action == MouseAction::WheelUp {
                    -PAN_STEP
                } else {
                    PAN_STEP
                };
                if mods.contains(ModMask::SHIFT) {
                    self.camera.pan(d, 0);
                } else {
                    self.camera.pan(0, d);
                }
                self.refresh_hover();
            }
            MouseAction::Auxiliary => {}
        }
    }

    fn on_key(&mut self, key: Key, mods: ModMask, now: Instant) -> Option<Effect> {
        match key {
            Key::Escape | Key::Char('q') => return Some(Effect::End),
            Key::Enter | Key::Space => self.start_search(now),
            Key::Tab => self.tool.cycle_mode(mods.contains(ModMask::SHIFT)),
            Key::BackTab => self.tool.cycle_mode(true),
            Key::Char(c @ '1'..='4') => {
                let i = c as usize - '1' as usize;
                self.tool.set_mode(TileKind::ALL[i]);
            }
            Key::Char('-') => self.apply(PanelAction::WeightDown, now),
            Key::Char('+') | Key::Char('=') => self.apply(PanelAction::WeightUp, now),
            Key::Char('[') => self.tool.adjust_ticks(-1),
            Key::Char(']') => self.tool.adjust_ticks(1),
            Key::Char('{') => self.tool.adjust_ticks(-10),
            Key::Char('}') => self.tool.adjust_ticks(10),
            Key::Char('c') => self.clear_all(),
            Key::ArrowUp | Key::Char('w') => self.camera.pan(0, -PAN_STEP),
            Key::ArrowDown | Key::Char('s') => self.camera.pan(0, PAN_STEP),
            Key::ArrowLeft | Key::Char('a') => self.camera.pan(-PAN_STEP, 0),
            Key::ArrowRight | Key::Char('d') => self.camera.pan(PAN_STEP, 0),
            _ => return None,
        }
        self.refresh_hover();
        None
    }

    /// Paint the two terminal cells of world cell `world`, if visible.
    fn put(&self, grid: &Grid, world: Point, cells: [Cell; 2]) {
        if let Some(s) = self.camera.world_to_screen(world) {
            grid.set(s, cells[0]);
            grid.set(s.shift(1, 0), cells[1]);
        }
    }

    fn fill_bg(&self, grid: &Grid, world: Point, style: Style) {
        let g = colors::EMPTY_GLYPH;
        self.put(grid, world, [Cell::new(g[0], style), Cell::new(g[1], style)]);
    }

    fn draw_map(&self, grid: &Grid) {
        let visible = self.camera.visible();
        for p in visible.iter() {
            self.fill_bg(grid, p, colors::EMPTY);
        }

        let search = self.runner.search();
        for p in search.closed_list().filter(|p| visible.contains(*p)) {
            self.fill_bg(grid, p, colors::CLOSED);
        }
        for p in search.open_list().filter(|p| visible.contains(*p)) {
            self.fill_bg(grid, p, colors::OPEN);
        }

        self.tiles.for_each(|pos, tile| {
            if visible.contains(pos) {
                self.put(grid, pos, colors::tile_cells(tile));
            }
        });

        if let Some(path) = self.runner.path() {
            for &p in path {
                let Some(s) = self.camera.world_to_screen(p) else {
                    continue;
                };
                for dx in 0..CELL_WIDTH {
                    grid.patch(s.shift(dx, 0), |c| {
                        let st = c.style.with_fg(colors::PATH_FG);
                        Cell::new(colors::PATH_GLYPH[dx as usize], st)
                    });
                }
            }
        }

        for t in self.start.iter().chain(self.goal.iter()) {
            self.put(grid, t.position, colors::tile_cells(t));
        }

        if !self.ui.gui_active {
            if let Some(w) = self.ui.hovered {
                self.put(grid, w, colors::tile_cells(&self.tool.tile_at(w)));
            }
        }
    }
}

impl Model for PathfindingModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                log::info!("started, map viewport {}", self.layout.map_viewport());
                None
            }
            Msg::Screen { width, height, .. } => {
                self.resize(width, height);
                None
            }
            Msg::Mouse {
                action,
                pos,
                modifiers,
                time,
            } => {
                self.on_mouse(action, pos, modifiers, time);
                None
            }
            Msg::KeyDown {
                key,
                modifiers,
                time,
            } => self.on_key(key, modifiers, time),
            Msg::Frame { time } => {
                self.ui.frame(time);
                self.runner
                    .frame(&self.tiles, time, self.tool.tick_interval());
                None
            }
            Msg::Quit => Some(Effect::End),
        }
    }

    fn draw(&self, grid: &Grid) {
        self.draw_map(grid);
        draw_panel(
            grid,
            &self.layout,
            &PanelView {
                ui: &self.ui,
                tool: &self.tool,
                runner: &self.runner,
            },
        );
    }
}
