use crate::Coords;
use std::io::{Stdout, Write, stdout};
use std::ops::{Deref, DerefMut};
use std::sync::Once;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

/// Size of the visible grid in character cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn contains(&self, pos: Coords) -> bool {
        (0..self.width).contains(&pos.0) && (0..self.height).contains(&pos.1)
    }
}

/// A key press, independent of the terminal library that read it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
    /// Ctrl+C. Raw mode swallows the signal so it arrives as a key.
    Interrupt,
    Other,
}

/// Everything the game loop needs from a display.
pub trait Driver {
    /// Returns immediately with `None` when no key is pending.
    fn poll_key(&mut self) -> Result<Option<Key>>;

    fn query_viewport(&mut self) -> Result<Viewport>;

    /// Writes outside the viewport are dropped, never reported.
    fn write_cell(&mut self, pos: Coords, glyph: char) -> Result<()>;

    fn present(&mut self) -> Result<()>;

    fn enter_raw_mode(&mut self) -> Result<()>;

    /// Must be safe to call after an `enter_raw_mode` that failed part way.
    fn leave_raw_mode(&mut self) -> Result<()>;
}

/// Holds a driver in raw mode until released or dropped.
pub struct RawMode<'a, D: Driver> {
    driver: &'a mut D,
    active: bool,
}

impl<'a, D: Driver> RawMode<'a, D> {
    /// Undoes whatever part of the setup succeeded before returning an error.
    pub fn enter(driver: &'a mut D) -> Result<Self> {
        if let Err(err) = driver.enter_raw_mode() {
            if let Err(restore) = driver.leave_raw_mode() {
                tracing::warn!(error = %restore, "failed to restore terminal");
            }
            return Err(err);
        }

        Ok(RawMode { driver, active: true })
    }

    /// Restores the terminal and reports whether that worked.
    pub fn release(mut self) -> Result<()> {
        self.active = false;
        self.driver.leave_raw_mode()
    }
}

impl<D: Driver> Deref for RawMode<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.driver
    }
}

impl<D: Driver> DerefMut for RawMode<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.driver
    }
}

impl<D: Driver> Drop for RawMode<'_, D> {
    fn drop(&mut self) {
        if self.active {
            if let Err(err) = self.driver.leave_raw_mode() {
                tracing::warn!(error = %err, "failed to restore terminal");
            }
        }
    }
}

pub struct CrosstermDriver {
    stdout: Stdout,
    viewport: Viewport,
}

impl CrosstermDriver {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Failed to read terminal size")?;
        let viewport = Viewport { width: width.into(), height: height.into() };
        Ok(CrosstermDriver { stdout: stdout(), viewport })
    }
}

impl Driver for CrosstermDriver {
    fn poll_key(&mut self) -> Result<Option<Key>> {
        while event::poll(Duration::ZERO).context("Failed to poll input")? {
            if let Event::Key(ev) = event::read().context("Failed to read input")? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(Some(map_key(ev)));
                }
            }
        }

        Ok(None)
    }

    fn query_viewport(&mut self) -> Result<Viewport> {
        Ok(self.viewport)
    }

    fn write_cell(&mut self, pos: Coords, glyph: char) -> Result<()> {
        if !self.viewport.contains(pos) {
            tracing::trace!(?pos, "dropping write outside viewport");
            return Ok(());
        }

        // contains() keeps both coordinates in 0..u16::MAX
        queue!(self.stdout, cursor::MoveTo(pos.0 as u16, pos.1 as u16), style::Print(glyph))
            .context("Failed to write cell")?;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.stdout.flush().context("Failed to flush terminal")
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        install_panic_hook();
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, terminal::Clear(ClearType::All))
            .context("Failed to set up terminal")
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        let raw = terminal::disable_raw_mode().context("Failed to disable raw mode");
        let screen = execute!(self.stdout, cursor::Show, LeaveAlternateScreen)
            .context("Failed to restore screen");
        raw.and(screen)
    }
}

fn map_key(ev: KeyEvent) -> Key {
    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

/// A panic unwinds past the game loop with the terminal still raw. Put it
/// back before the default hook prints, so the message is readable.
fn install_panic_hook() {
    static HOOK: Once = Once::new();

    HOOK.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = terminal::disable_raw_mode();
            let _ = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
            original(info);
        }));
    });
}
