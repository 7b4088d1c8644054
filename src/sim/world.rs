//! GameModel: the complete state threaded through every transition.
//!
//! ## Layout
//!
//! The terminal is split into two windows:
//!   - `score_board`: fixed-width panel on the left, holds the banner
//!   - `game_board`: the rest; walls and snake live in its local space
//!
//! Both are recomputed on every size event. Until the first one arrives the
//! model is `Initializing` and has no snake and no walls.

use std::time::Duration;

use crate::config::GameConfig;
use crate::domain::geom::{Direction, Vec2};
use crate::domain::score::ScoreBanner;
use crate::domain::snake::{Snake, DEFAULT_GROWTH_INTERVAL};
use crate::domain::wall::{self, Drawable};
use crate::domain::window::Window;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Initializing,
    Running,
    Quitting,
}

/// Tunables fixed for the life of the process.
#[derive(Clone, Copy, Debug)]
pub struct Rules {
    pub tick_interval: Duration,
    pub growth_interval: u32,
    pub score_panel_width: i32,
    pub length_per_column: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            tick_interval: Duration::from_secs(1) / 15,
            growth_interval: DEFAULT_GROWTH_INTERVAL,
            score_panel_width: 25,
            length_per_column: 2,
        }
    }
}

impl From<&GameConfig> for Rules {
    fn from(cfg: &GameConfig) -> Self {
        Rules {
            tick_interval: cfg.speed.tick_interval(),
            growth_interval: cfg.speed.growth_interval,
            score_panel_width: cfg.layout.score_panel_width,
            length_per_column: cfg.layout.length_per_column,
        }
    }
}

#[derive(Debug)]
pub struct GameModel {
    pub phase: Phase,
    pub rules: Rules,

    // ── Game board ──
    pub player: Option<Snake>,
    pub drawables: Vec<Drawable>,
    pub game_board: Window,
    pub max_snake_length: usize,

    // ── Score board ──
    pub score_board: Window,
    pub banner: ScoreBanner,
    pub score: u64,
    /// Every banked score, highest first. Never capped.
    pub hi_scores: Vec<u64>,

    // ── Terminal ──
    pub width: u16,
    pub height: u16,
}

impl GameModel {
    pub fn new(rules: Rules) -> Self {
        GameModel {
            phase: Phase::Initializing,
            rules,
            player: None,
            drawables: vec![],
            game_board: Window::default(),
            max_snake_length: 1,
            score_board: Window::default(),
            banner: ScoreBanner::new(),
            score: 0,
            hi_scores: vec![],
            width: 0,
            height: 0,
        }
    }

    /// Recompute both windows for a `width` x `height` terminal. The game
    /// board never gets a negative extent, however small the terminal.
    pub fn layout(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;

        let w = i32::from(width);
        let h = i32::from(height);
        let panel = self.rules.score_panel_width;
        let bottom = (h - 1).max(0);

        self.score_board = Window::new(Vec2::new(0, 0), Vec2::new((panel - 1).max(0), bottom));
        self.game_board = Window::new(Vec2::new(panel, 0), Vec2::new((w - 1).max(panel), bottom));
        self.max_snake_length =
            (self.rules.length_per_column * self.game_board.width() as usize).max(1);
    }

    pub fn spawn_snake_at(&mut self, pos: Vec2, direction: Direction) {
        self.player = Some(Snake::spawn(
            pos,
            direction,
            self.max_snake_length,
            self.rules.growth_interval,
        ));
    }

    /// Replace all drawables with a fresh wall ring around the game board.
    pub fn init_walls(&mut self) {
        self.drawables = wall::perimeter(self.game_board.width(), self.game_board.height());
    }

    /// Move the live score into the history and start again from zero.
    pub fn reset_score(&mut self) {
        self.hi_scores.push(self.score);
        self.hi_scores.sort_unstable_by(|a, b| b.cmp(a));
        self.score = 0;
    }
}
