use crate::Coords;
use crate::snake::Direction;
use std::time::Duration;

pub const TICK_INTERVAL_MS: u64 = 200;

/// Smallest width and height the wrap rules work on.
pub const MIN_VIEWPORT: i32 = 3;

pub const INITIAL_SNAKE: [Coords; 3] = [(5, 5), (5, 6), (5, 7)];
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Tunables for a run of the game
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Delay between ticks
    pub tick: Duration,
    pub body_glyph: char,
    pub border_glyph: char,
    /// Written over cells the snake has left
    pub blank_glyph: char,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tick: Duration::from_millis(TICK_INTERVAL_MS),
            body_glyph: 'O',
            border_glyph: '#',
            blank_glyph: ' ',
        }
    }
}
