//! Messages in, commands out, and events the step reports.

use std::time::Duration;

use crate::domain::geom::Direction;

/// Input to the state machine. Exactly one is handled at a time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Msg {
    Resize { width: u16, height: u16 },
    Key(Key),
    Tick,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Quit,
}

impl Key {
    /// Map a canonical key name ("up", "q", "ctrl+c", ...) to a game key.
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "up" | "w" => Some(Key::Up),
            "down" | "s" => Some(Key::Down),
            "left" | "a" => Some(Key::Left),
            "right" | "d" => Some(Key::Right),
            "q" | "esc" | "ctrl+c" => Some(Key::Quit),
            _ => None,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Quit => None,
        }
    }
}

/// Follow-up requested from the harness after a transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    /// Deliver exactly one `Msg::Tick` after the delay.
    ArmTick(Duration),
    TakeOverScreen,
    Quit,
}

/// Things that happened during a simulation step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    SelfCollision { score: u64 },
    ObstacleCollision { score: u64 },
    Grew { max_length: usize, frame: u32 },
}
