//! Crossterm terminal driver for tilepath.
//!
//! Provides a [`CrosstermDriver`] that implements [`tilepath_core::Driver`],
//! mapping the grid rendering model and mouse/keyboard input onto a terminal.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    queue,
    style::{self, Attribute, Color as CtColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use tilepath_core::{
    app::{Context, Driver},
    grid::Frame,
    messages::{Key, ModMask, MouseAction, Msg},
    style::{AttrMask, Color},
    Point,
};

/// Maps a [`tilepath_core::Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

/// Maps crossterm key modifiers to a [`ModMask`].
fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    if mods.contains(KeyModifiers::META) {
        m = m | ModMask::META;
    }
    m
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::BackTab),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Translate one crossterm event into a message, if it has a counterpart.
fn to_msg(ev: Event, time: Instant) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            // Release/repeat reports only arrive with enhanced keyboard mode.
            if kind == KeyEventKind::Release {
                return None;
            }
            to_key(code).map(|key| Msg::KeyDown {
                key,
                modifiers: to_mod_mask(modifiers),
                time,
            })
        }
        Event::Mouse(me) => {
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
                MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Down(MouseButton::Middle) => MouseAction::Auxiliary,
                MouseEventKind::Up(_) => MouseAction::Release,
                MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseAction::Move,
                MouseEventKind::ScrollUp => MouseAction::WheelUp,
                MouseEventKind::ScrollDown => MouseAction::WheelDown,
                _ => return None,
            };
            Some(Msg::Mouse {
                action,
                pos: Point::new(me.column as i32, me.row as i32),
                modifiers: to_mod_mask(me.modifiers),
                time,
            })
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
            time,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
    frame_interval: Duration,
}

impl CrosstermDriver {
    /// Create a new driver polling at roughly 60 frames per second.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
            frame_interval: Duration::from_millis(16),
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Longest time a poll waits for input before returning.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Current terminal size in cells.
    pub fn terminal_size() -> io::Result<(i32, i32)> {
        let (w, h) = terminal::size()?;
        Ok((w as i32, h as i32))
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            queue!(stdout, event::EnableMouseCapture)?;
        }
        stdout.flush()?;
        log::debug!("terminal initialised (mouse: {})", self.mouse_enabled);
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(self.frame_interval)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(msg) = to_msg(event::read()?, Instant::now()) {
                tx.send(msg).ok();
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout().lock();

        for fc in &frame.cells {
            let p = fc.pos;
            let cell = &fc.cell;

            queue!(
                stdout,
                cursor::MoveTo(p.x as u16, p.y as u16),
                SetForegroundColor(to_ct_color(cell.style.fg)),
                SetBackgroundColor(to_ct_color(cell.style.bg))
            )?;

            let attrs = cell.style.attrs;
            if attrs.contains(AttrMask::BOLD) {
                queue!(stdout, style::SetAttribute(Attribute::Bold))?;
            }
            if attrs.contains(AttrMask::ITALIC) {
                queue!(stdout, style::SetAttribute(Attribute::Italic))?;
            }
            if attrs.contains(AttrMask::UNDERLINE) {
                queue!(stdout, style::SetAttribute(Attribute::Underlined))?;
            }
            if attrs.contains(AttrMask::REVERSE) {
                queue!(stdout, style::SetAttribute(Attribute::Reverse))?;
            }
            if attrs.contains(AttrMask::DIM) {
                queue!(stdout, style::SetAttribute(Attribute::Dim))?;
            }

            write!(stdout, "{}", cell.ch)?;

            if !attrs.is_empty() {
                queue!(stdout, style::SetAttribute(Attribute::Reset))?;
            }
        }

        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = queue!(stdout, event::DisableMouseCapture);
        }
        let _ = queue!(
            stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}
