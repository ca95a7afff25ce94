//! Per-frame interface state and the side panel: layout, hit-testing and
//! drawing.

use std::time::{Duration, Instant};

use tilepath_core::{Color, Grid, Point, Range, Style};
use tilepath_ui::{Alignment, BoxDecor, Label, StyledText};

use crate::colors::{self, style};
use crate::runner::SearchRunner;
use crate::tiles::TileKind;
use crate::tool::ToolState;

/// Width of the side panel in terminal columns, border included.
pub const PANEL_WIDTH: i32 = 30;
pub const MIN_SCREEN_WIDTH: i32 = PANEL_WIDTH + 16;
pub const MIN_SCREEN_HEIGHT: i32 = 20;

pub const TITLE: &str = "Pathfinding Demo";

// Rows inside the panel border.
const ROW_CELL: i32 = 0;
const ROW_DT: i32 = 1;
const ROW_WEIGHT: i32 = 3;
const ROW_TICKS: i32 = 4;
const ROW_MODE_TITLE: i32 = 6;
const ROW_MODES: i32 = 7;
const ROW_START: i32 = 12;
const ROW_STATS: i32 = 14;
const ROW_PATH: i32 = 15;
const ROW_ERROR: i32 = 17;
const ERROR_LINES: i32 = 3;
const ROW_HELP: i32 = 21;

const START_LABEL: &str = "[ Start! ]";

const HELP_TEXT: &str = "\
lmb paint  rmb erase
1-4 mode   tab cycle
-/+ weight [ ] { } speed
enter start  c clear
arrows/wasd pan  q quit";

/// Explicit UI state, refreshed from input and once per frame.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Last pointer position in screen cells.
    pub mouse: Option<Point>,
    /// World cell under the pointer, if it is over the map.
    pub hovered: Option<Point>,
    /// Pointer is over the panel, or a press that began on it is still held.
    /// Map painting and the hover preview are off.
    pub gui_active: bool,
    /// A button press began on the panel and has not been released.
    pub gui_captured: bool,
    pub left_held: bool,
    pub right_held: bool,
    /// Time between the last two frames.
    pub dt: Duration,
    last_frame: Option<Instant>,
    error: Option<String>,
}

impl UiState {
    pub fn frame(&mut self, now: Instant) {
        if let Some(last) = self.last_frame {
            self.dt = now.saturating_duration_since(last);
        }
        self.last_frame = Some(now);
    }

    #[inline]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// A clickable panel control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    WeightDown,
    WeightUp,
    TicksDown,
    TicksUp,
    SelectMode(TileKind),
    Start,
}

/// Screen placement of the map viewport, the panel and its controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    screen: Range,
    panel: Range,
    inner: Range,
}

impl PanelLayout {
    pub fn new(width: i32, height: i32) -> Self {
        let screen = Range::new(0, 0, width.max(0), height.max(0));
        let panel = Range::new(width - PANEL_WIDTH, 0, width, height).intersect(screen);
        Self {
            screen,
            panel,
            inner: panel.shift(1, 1, -1, -1),
        }
    }

    #[inline]
    pub fn panel(&self) -> Range {
        self.panel
    }

    /// Screen area left of the panel where the world is drawn.
    pub fn map_viewport(&self) -> Range {
        Range::new(0, 0, self.panel.min.x, self.screen.max.y).intersect(self.screen)
    }

    fn row(&self, y: i32) -> Range {
        self.inner.line(y)
    }

    fn right_button(&self, y: i32, slot: i32) -> Range {
        let w = self.inner.width();
        let x0 = w - 7 + slot * 4;
        self.row(y).columns(x0, x0 + 3)
    }

    pub fn weight_minus(&self) -> Range {
        self.right_button(ROW_WEIGHT, 0)
    }

    pub fn weight_plus(&self) -> Range {
        self.right_button(ROW_WEIGHT, 1)
    }

    pub fn ticks_minus(&self) -> Range {
        self.right_button(ROW_TICKS, 0)
    }

    pub fn ticks_plus(&self) -> Range {
        self.right_button(ROW_TICKS, 1)
    }

    pub fn mode_row(&self, kind: TileKind) -> Range {
        self.row(ROW_MODES + kind.index() as i32)
    }

    pub fn start_button(&self) -> Range {
        self.row(ROW_START).columns(0, START_LABEL.chars().count() as i32)
    }

    /// The control under `p`. The start button is absent while a search
    /// runs.
    pub fn hit(&self, p: Point, running: bool) -> Option<PanelAction> {
        if !self.panel.contains(p) {
            return None;
        }
        let buttons = [
            (self.weight_minus(), PanelAction::WeightDown),
            (self.weight_plus(), PanelAction::WeightUp),
            (self.ticks_minus(), PanelAction::TicksDown),
            (self.ticks_plus(), PanelAction::TicksUp),
        ];
        if let Some((_, action)) = buttons.iter().find(|(r, _)| r.contains(p)) {
            return Some(*action);
        }
        if let Some(kind) = TileKind::ALL
            .into_iter()
            .find(|k| self.mode_row(*k).contains(p))
        {
            return Some(PanelAction::SelectMode(kind));
        }
        if !running && self.start_button().contains(p) {
            return Some(PanelAction::Start);
        }
        None
    }
}

/// Break `text` on spaces into lines at most `width` characters long.
/// Words longer than a line are split.
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        let needed = if line.is_empty() {
            word.len()
        } else {
            line.chars().count() + 1 + word.len()
        };
        if needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("\n")
}

/// Everything the panel shows.
pub struct PanelView<'a> {
    pub ui: &'a UiState,
    pub tool: &'a ToolState,
    pub runner: &'a SearchRunner,
}

pub fn draw_panel(grid: &Grid, layout: &PanelLayout, view: &PanelView<'_>) {
    if layout.panel.is_empty() {
        return;
    }
    let text = style(colors::PANEL_FG, Color::DEFAULT);
    let dim = style(colors::PANEL_DIM, Color::DEFAULT);
    let accent = style(colors::PANEL_ACCENT, Color::DEFAULT);
    let button = style(colors::PANEL_FG, colors::BUTTON_BG);

    let decor = BoxDecor {
        style: dim,
        title: StyledText::new(TITLE, accent),
        align_title: Alignment::Center,
    };
    decor.draw(&grid.slice(layout.panel));

    let line = |y: i32, s: &str, st: Style| {
        StyledText::new(s, st).draw(&grid.slice(layout.row(y)));
    };

    let cell = match view.ui.hovered {
        Some(p) => format!("Cell     {p}"),
        None => "Cell     -".to_string(),
    };
    line(ROW_CELL, &cell, text);
    line(
        ROW_DT,
        &format!("DT       {:.1} ms", view.ui.dt.as_secs_f64() * 1000.0),
        text,
    );

    line(ROW_WEIGHT, &format!("Weight   {:.1}", view.tool.weight()), text);
    line(
        ROW_TICKS,
        &format!("Ticks/s  {}", view.tool.ticks_per_second()),
        text,
    );
    for r in [layout.weight_minus(), layout.ticks_minus()] {
        StyledText::new("[-]", button).draw(&grid.slice(r));
    }
    for r in [layout.weight_plus(), layout.ticks_plus()] {
        StyledText::new("[+]", button).draw(&grid.slice(r));
    }

    line(ROW_MODE_TITLE, "Mode", dim);
    for (i, kind) in TileKind::ALL.into_iter().enumerate() {
        let selected = kind == view.tool.mode();
        let mark = if selected { '*' } else { ' ' };
        let label = format!("({mark}) {} {}", i + 1, kind.label());
        let st = if selected { accent } else { text };
        StyledText::new(&label, st).draw(&grid.slice(layout.mode_row(kind)));
    }

    let runner = view.runner;
    if runner.is_running() {
        line(
            ROW_START,
            &format!("Running  tick {}", runner.search().ticks()),
            dim,
        );
    } else {
        Label::new(StyledText::new(START_LABEL, button)).draw(&grid.slice(layout.start_button()));
    }

    let search = runner.search();
    line(
        ROW_STATS,
        &format!("Open {}  Closed {}", search.open_len(), search.closed_len()),
        text,
    );
    let path = match runner.path() {
        Some(p) => format!("Path     {} cells", p.len()),
        None if runner.is_running() => "Path     searching".to_string(),
        None if search.ticks() > 0 => "Path     no path".to_string(),
        None => "Path     -".to_string(),
    };
    line(ROW_PATH, &path, text);

    if let Some(err) = view.ui.error() {
        let width = layout.inner.width().max(1) as usize;
        let area = layout.inner.intersect(Range::new(
            layout.inner.min.x,
            layout.inner.min.y + ROW_ERROR,
            layout.inner.max.x,
            layout.inner.min.y + ROW_ERROR + ERROR_LINES,
        ));
        let msg = wrap(&format!("Error: {err}"), width);
        StyledText::new(&msg, style(colors::ERROR_FG, Color::DEFAULT))
            .draw(&grid.slice(area));
    }

    let help = layout.inner.shift(0, ROW_HELP, 0, 0);
    StyledText::new(HELP_TEXT, dim).draw(&grid.slice(help));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::DEFAULT_MARGIN;

    fn row_text(grid: &Grid, r: Range) -> String {
        r.iter().map(|p| grid.at(p).ch).collect()
    }

    #[test]
    fn layout_splits_screen() {
        let l = PanelLayout::new(80, 30);
        assert_eq!(l.panel(), Range::new(50, 0, 80, 30));
        assert_eq!(l.map_viewport(), Range::new(0, 0, 50, 30));
        assert_eq!(l.weight_minus(), Range::new(72, 4, 75, 5));
        assert_eq!(l.weight_plus(), Range::new(76, 4, 79, 5));
    }

    #[test]
    fn narrow_screen_has_no_map() {
        let l = PanelLayout::new(20, 10);
        assert_eq!(l.panel(), Range::new(0, 0, 20, 10));
        assert!(l.map_viewport().is_empty());
    }

    #[test]
    fn hit_testing() {
        let l = PanelLayout::new(80, 30);
        assert_eq!(l.hit(Point::new(73, 4), false), Some(PanelAction::WeightDown));
        assert_eq!(l.hit(Point::new(78, 5), false), Some(PanelAction::TicksUp));
        let wall_row = l.mode_row(TileKind::Wall);
        assert_eq!(
            l.hit(wall_row.min, false),
            Some(PanelAction::SelectMode(TileKind::Wall))
        );
        let start = l.start_button().min;
        assert_eq!(l.hit(start, false), Some(PanelAction::Start));
        assert_eq!(l.hit(start, true), None);
        assert_eq!(l.hit(Point::new(10, 4), false), None);
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(wrap("Start and Goal must be placed", 10), "Start and\nGoal must\nbe placed");
        assert_eq!(wrap("abcdefgh", 3), "abc\ndef\ngh");
        assert_eq!(wrap("", 5), "");
    }

    #[test]
    fn frame_measures_delta() {
        let mut ui = UiState::default();
        let t0 = Instant::now();
        ui.frame(t0);
        assert_eq!(ui.dt, Duration::ZERO);
        ui.frame(t0 + Duration::from_millis(16));
        assert_eq!(ui.dt, Duration::from_millis(16));
    }

    #[test]
    fn panel_shows_controls_and_error() {
        let grid = Grid::new(80, 30);
        let layout = PanelLayout::new(80, 30);
        let mut ui = UiState::default();
        ui.set_error("Start and Goal must be placed to run pathfinding");
        let tool = ToolState::default();
        let runner = SearchRunner::new(DEFAULT_MARGIN);
        draw_panel(
            &grid,
            &layout,
            &PanelView {
                ui: &ui,
                tool: &tool,
                runner: &runner,
            },
        );

        assert!(row_text(&grid, layout.row(ROW_WEIGHT)).starts_with("Weight   1.0"));
        assert_eq!(row_text(&grid, layout.weight_plus()), "[+]");
        assert!(row_text(&grid, layout.mode_row(TileKind::Obstacle)).starts_with("(*) 1 Obstacle"));
        assert!(row_text(&grid, layout.mode_row(TileKind::Goal)).starts_with("( ) 4 Goal"));
        assert_eq!(row_text(&grid, layout.start_button()), START_LABEL);
        assert!(row_text(&grid, layout.row(ROW_ERROR)).starts_with("Error: Start and Goal"));
        assert!(row_text(&grid, layout.row(ROW_PATH)).starts_with("Path     -"));
        assert_eq!(grid.at(Point::new(50, 0)).ch, '\u{250c}');
    }
}
