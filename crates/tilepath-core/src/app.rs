//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! One loop iteration is: poll driver input → update the model with every
//! queued message → deliver a single [`Msg::Frame`] → draw → diff → flush.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Instant;

use crate::cell::Cell;
use crate::grid::{compute_frame, Frame, Grid};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Signal the application loop to stop.
    End,
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &Grid);
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input messages, sending them through `tx`.
    ///
    /// Implementations wait at most one frame interval, then return so the
    /// loop can deliver [`Msg::Frame`] even without input.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application from a configuration.
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
        }
    }

    /// The model, e.g. for inspection after [`run`](App::run) returns.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the main Model-View-Update loop until the model returns
    /// [`Effect::End`] or the driver fails.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let mut prev_grid = blank_grid(self.width, self.height);
        let mut curr_grid = Grid::new(self.width, self.height);

        let result = loop {
            if let Err(e) = self.process_pending(&rx, &ctx, &mut prev_grid, &mut curr_grid) {
                break Err(e);
            }
            if ctx.is_done() {
                break Ok(());
            }
            if let Err(e) = self.driver.poll_msgs(&ctx, tx.clone()) {
                break Err(e);
            }
        };

        ctx.cancel();
        self.driver.close();
        result
    }

    /// Drain queued messages, deliver the frame message, draw, diff, and
    /// flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev_grid: &mut Grid,
        curr_grid: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { width, height, .. } = msg {
                log::debug!("screen resized to {width}x{height}");
                self.width = width;
                self.height = height;
                *prev_grid = blank_grid(width, height);
                *curr_grid = Grid::new(width, height);
            }
            if let Some(effect) = self.model.update(msg) {
                if self.handle_effect(effect, ctx) {
                    return Ok(());
                }
            }
        }

        if let Some(effect) = self.model.update(Msg::Frame {
            time: Instant::now(),
        }) {
            if self.handle_effect(effect, ctx) {
                return Ok(());
            }
        }

        curr_grid.fill(Cell::default());
        self.model.draw(curr_grid);
        let frame = compute_frame(prev_grid, curr_grid);
        if !frame.cells.is_empty() {
            self.driver.flush(frame)?;
        }
        prev_grid.copy_from(curr_grid);
        Ok(())
    }

    /// Returns `true` if the app should stop.
    fn handle_effect(&self, effect: Effect, ctx: &Context) -> bool {
        match effect {
            Effect::End => {
                ctx.cancel();
                true
            }
        }
    }
}

/// A grid whose cells can never match a drawn cell, forcing a full redraw.
fn blank_grid(width: i32, height: i32) -> Grid {
    let g = Grid::new(width, height);
    g.fill(Cell::default().with_char('\0'));
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::messages::Key;

    /// Replays one batch of messages per poll and records flushed frames.
    struct ScriptDriver {
        script: Vec<Vec<Msg>>,
        frames: Vec<Frame>,
        closed: bool,
    }

    impl Driver for ScriptDriver {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            tx: Sender<Msg>,
        ) -> Result<(), Box<dyn std::error::Error>> {
            if self.script.is_empty() {
                tx.send(Msg::Quit).ok();
                return Ok(());
            }
            for msg in self.script.remove(0) {
                tx.send(msg).ok();
            }
            Ok(())
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[derive(Default)]
    struct Counter {
        frames: usize,
        keys: usize,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::Frame { .. } => {
                    self.frames += 1;
                    None
                }
                Msg::KeyDown { key: Key::Escape, .. } => Some(Effect::End),
                Msg::KeyDown { .. } => {
                    self.keys += 1;
                    None
                }
                Msg::Quit => Some(Effect::End),
                _ => None,
            }
        }

        fn draw(&self, grid: &Grid) {
            let ch = char::from_digit((self.keys % 10) as u32, 10).unwrap_or('?');
            grid.set(Point::new(0, 0), Cell::default().with_char(ch));
        }
    }

    #[test]
    fn loop_delivers_one_frame_per_iteration() {
        let driver = ScriptDriver {
            script: vec![vec![Msg::key(Key::Char('a')), Msg::key(Key::Char('b'))], vec![]],
            frames: Vec::new(),
            closed: false,
        };
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver,
            width: 3,
            height: 1,
        });
        app.run().unwrap();

        // Init pass plus two scripted polls; the quit poll ends before a frame.
        assert_eq!(app.model().frames, 3);
        assert_eq!(app.model().keys, 2);
        assert!(app.driver.closed);
        // First frame redraws the whole grid, later ones only the changed cell.
        assert_eq!(app.driver.frames[0].cells.len(), 3);
        assert_eq!(app.driver.frames[1].cells.len(), 1);
        assert_eq!(app.driver.frames[1].cells[0].cell.ch, '2');
    }

    #[test]
    fn end_effect_stops_before_the_frame() {
        let driver = ScriptDriver {
            script: vec![vec![Msg::key(Key::Escape), Msg::key(Key::Char('a'))], vec![]],
            frames: Vec::new(),
            closed: false,
        };
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver,
            width: 1,
            height: 1,
        });
        app.run().unwrap();
        // Only the init pass delivered a frame; the queued key was never seen.
        assert_eq!(app.model().frames, 1);
        assert_eq!(app.model().keys, 0);
        assert_eq!(app.driver.frames.len(), 1);
        assert!(app.driver.closed);
    }
}
