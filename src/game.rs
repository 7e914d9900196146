use std::thread::sleep;

use crate::config::{Config, INITIAL_DIRECTION, INITIAL_SNAKE, MIN_VIEWPORT};
use crate::snake::{Snake, Direction::{*, self}};
use crate::term::{Driver, Key, RawMode, Viewport};

use anyhow::{bail, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Quit,
}

/// Maps a key to the direction the snake should travel next. Anything that
/// isn't an arrow key keeps the current heading, reversing is allowed.
pub fn next_direction(current: Direction, key: Key) -> Direction {
    match key {
        Key::Up => Up,
        Key::Down => Down,
        Key::Left => Left,
        Key::Right => Right,
        _ => current,
    }
}

pub fn is_quit(key: Key) -> bool {
    matches!(key, Key::Char('q') | Key::Interrupt)
}

/// Everything that changes between ticks, owned by the loop.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub viewport: Viewport,
}

impl GameState {
    pub fn new(viewport: Viewport) -> Result<Self> {
        if viewport.width < MIN_VIEWPORT || viewport.height < MIN_VIEWPORT {
            bail!(
                "terminal is {}x{}, need at least {}x{}",
                viewport.width, viewport.height, MIN_VIEWPORT, MIN_VIEWPORT
            );
        }

        Ok(GameState { snake: Snake::new(&INITIAL_SNAKE), direction: INITIAL_DIRECTION, viewport })
    }

    /// Runs one iteration: input, motion, then a full redraw.
    pub fn tick<D: Driver>(&mut self, term: &mut D, config: &Config) -> Result<Tick> {
        while let Some(key) = term.poll_key()? {
            if is_quit(key) {
                return Ok(Tick::Quit);
            }
            self.direction = next_direction(self.direction, key);
        }

        // Erase from a snapshot: advance() overwrites the old tail in place.
        let previous = self.snake.segments().to_vec();

        self.snake.advance(self.direction);
        self.snake.wrap(self.viewport);
        tracing::trace!(head = ?self.snake.head(), direction = ?self.direction, "tick");

        for pos in previous {
            term.write_cell(pos, config.blank_glyph)?;
        }

        for pos in self.snake.segments() {
            term.write_cell(*pos, config.body_glyph)?;
        }

        draw_border(term, self.viewport, config.border_glyph)?;
        term.present()?;

        Ok(Tick::Continue)
    }
}

pub struct SnakeGame<D: Driver> {
    driver: D,
    state: GameState,
    config: Config,
}

impl<D: Driver> SnakeGame<D> {
    pub fn new(mut driver: D, config: Config) -> Result<Self> {
        let viewport = driver.query_viewport()?;
        let state = GameState::new(viewport)?;
        tracing::info!(
            width = viewport.width,
            height = viewport.height,
            length = state.snake.len(),
            "starting"
        );

        Ok(SnakeGame { driver, state, config })
    }

    /// Runs until a quit key arrives. The terminal is restored on every way out.
    pub fn play(&mut self) -> Result<()> {
        let mut term = RawMode::enter(&mut self.driver)?;
        let mut ticks: u64 = 0;

        while self.state.tick(&mut *term, &self.config)? == Tick::Continue {
            ticks += 1;
            sleep(self.config.tick);
        }

        tracing::info!(ticks, "quit requested");
        term.release()
    }
}

fn draw_border<D: Driver>(term: &mut D, viewport: Viewport, glyph: char) -> Result<()> {
    let end_x = viewport.width - 1;
    let end_y = viewport.height - 1;

    for x in 0..viewport.width {
        term.write_cell((x, 0), glyph)?;
        term.write_cell((x, end_y), glyph)?;
    }

    for y in 0..viewport.height {
        term.write_cell((0, y), glyph)?;
        term.write_cell((end_x, y), glyph)?;
    }

    Ok(())
}
