//! Grid coordinates and movement directions.

use std::ops::Add;

/// A cell position. Absolute on the canvas or local to a window,
/// depending on who holds it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Vec2 { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    #[default]
    Stopped,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step for one tick of movement.
    pub fn velocity(self) -> Vec2 {
        match self {
            Direction::Stopped => Vec2::new(0, 0),
            Direction::Up => Vec2::new(0, -1),
            Direction::Down => Vec2::new(0, 1),
            Direction::Left => Vec2::new(-1, 0),
            Direction::Right => Vec2::new(1, 0),
        }
    }

    pub fn head_glyph(self) -> char {
        match self {
            Direction::Stopped => '\u{25CB}',
            Direction::Up => '\u{25B2}',
            Direction::Down => '\u{25BC}',
            Direction::Left => '\u{25C0}',
            Direction::Right => '\u{25BA}',
        }
    }

    pub fn is_moving(self) -> bool {
        self != Direction::Stopped
    }
}
