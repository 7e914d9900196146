use crate::Coords;
use crate::term::Viewport;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// A fixed-length chain of cells. Index 0 is the head.
///
/// The length is set at construction and never changes: there is no way to
/// grow or shrink a snake once it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Box<[Coords]>,
}

impl Snake {
    /// Builds a snake from its segments, head first.
    ///
    /// # Panics
    ///
    /// If `segments` is empty.
    pub fn new(segments: &[Coords]) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least a head");
        Snake { body: segments.into() }
    }

    pub fn segments(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Moves every segment onto its predecessor's cell, then steps the head
    /// one cell towards `direction`. No bounds are checked here, see `wrap`.
    pub fn advance(&mut self, direction: Direction) {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let (dx, dy) = direction.delta();
        let head = &mut self.body[0];
        head.0 += dx;
        head.1 += dy;
    }

    /// Teleports the head back inside the border when it has reached it.
    /// Trailing segments are never checked, they only ever copy a head cell
    /// that was already wrapped.
    ///
    /// Requires a viewport of at least 3x3.
    pub fn wrap(&mut self, viewport: Viewport) {
        let (max_x, max_y) = (viewport.width, viewport.height);
        let head = &mut self.body[0];

        if head.0 <= 0 {
            head.0 = max_x - 2;
        } else if head.0 >= max_x - 1 {
            head.0 = 1;
        }

        if head.1 <= 0 {
            head.1 = max_y - 2;
        } else if head.1 >= max_y - 1 {
            head.1 = 1;
        }
    }
}
