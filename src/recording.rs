//! In-memory driver for exercising the game loop without a terminal.

use crate::Coords;
use crate::term::{Driver, Key, Viewport};
use std::collections::{HashMap, VecDeque};

use anyhow::{bail, Result};

pub struct RecordingDriver {
    viewport: Viewport,
    keys: VecDeque<Key>,
    cells: HashMap<Coords, char>,
    writes: Vec<(Coords, char)>,
    presents: usize,
    raw_mode: bool,
    raw_mode_exits: usize,
    fail_raw_mode: bool,
    fail_after_raw_mode: bool,
    fail_present: bool,
}

impl RecordingDriver {
    pub fn new(width: i32, height: i32) -> Self {
        RecordingDriver {
            viewport: Viewport { width, height },
            keys: VecDeque::new(),
            cells: HashMap::new(),
            writes: vec![],
            presents: 0,
            raw_mode: false,
            raw_mode_exits: 0,
            fail_raw_mode: false,
            fail_after_raw_mode: false,
            fail_present: false,
        }
    }

    pub fn push_keys(&mut self, keys: &[Key]) {
        self.keys.extend(keys.iter().copied());
    }

    pub fn fail_raw_mode(&mut self) {
        self.fail_raw_mode = true;
    }

    /// Raw mode is acquired, then the rest of the setup fails.
    pub fn fail_after_raw_mode(&mut self) {
        self.fail_after_raw_mode = true;
    }

    pub fn fail_present(&mut self) {
        self.fail_present = true;
    }

    /// The glyph last written at `pos`, if anything was.
    pub fn cell(&self, pos: Coords) -> Option<char> {
        self.cells.get(&pos).copied()
    }

    pub fn writes(&self) -> &[(Coords, char)] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn raw_mode(&self) -> bool {
        self.raw_mode
    }

    pub fn raw_mode_exits(&self) -> usize {
        self.raw_mode_exits
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }
}

impl Driver for RecordingDriver {
    fn poll_key(&mut self) -> Result<Option<Key>> {
        Ok(self.keys.pop_front())
    }

    fn query_viewport(&mut self) -> Result<Viewport> {
        Ok(self.viewport)
    }

    fn write_cell(&mut self, pos: Coords, glyph: char) -> Result<()> {
        if self.viewport.contains(pos) {
            self.cells.insert(pos, glyph);
            self.writes.push((pos, glyph));
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if self.fail_present {
            bail!("present failed");
        }
        self.presents += 1;
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        if self.fail_raw_mode {
            bail!("no terminal");
        }
        self.raw_mode = true;
        if self.fail_after_raw_mode {
            bail!("screen setup failed");
        }
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        self.raw_mode = false;
        self.raw_mode_exits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_writes_are_ignored() {
        let mut driver = RecordingDriver::new(4, 4);
        driver.write_cell((4, 0), 'x').unwrap();
        driver.write_cell((-1, 2), 'x').unwrap();
        driver.write_cell((1, 1), 'x').unwrap();

        assert_eq!(driver.writes(), &[((1, 1), 'x')]);
        assert_eq!(driver.cell((4, 0)), None);
    }

    #[test]
    fn test_scripted_keys_come_back_in_order() {
        let mut driver = RecordingDriver::new(4, 4);
        driver.push_keys(&[Key::Up, Key::Char('q')]);

        assert_eq!(driver.poll_key().unwrap(), Some(Key::Up));
        assert_eq!(driver.poll_key().unwrap(), Some(Key::Char('q')));
        assert_eq!(driver.poll_key().unwrap(), None);
    }
}
