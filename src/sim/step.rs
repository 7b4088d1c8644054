//! The transition function and the per-tick simulation step.
//!
//! `update` takes the model by value and hands it back together with an
//! optional command for the harness, so every transition can be driven from
//! tests without a terminal.
//!
//! Step order:
//!   1. Score += snake length, banner refresh
//!   2. Snake movement (growth + trim)
//!   3. Self-collision: respawn at head, keep direction, bank score
//!   4. Obstacle occupancy rebuilt from drawables
//!   5. Obstacle collision: respawn at centre, stopped, bank score
//!
//! Steps 3 and 5 are independent; either, neither or both can fire.

use tracing::{debug, info};

use crate::domain::geom::Direction;
use crate::domain::wall::Occupancy;
use super::event::{Command, GameEvent, Key, Msg};
use super::world::{GameModel, Phase};

// ══════════════════════════════════════════════════════════════
// Transition
// ══════════════════════════════════════════════════════════════

/// Command to issue right after constructing the initial model.
pub fn init(model: &GameModel) -> Command {
    Command::ArmTick(model.rules.tick_interval)
}

pub fn update(mut model: GameModel, msg: Msg) -> (GameModel, Option<Command>) {
    if model.phase == Phase::Quitting {
        return (model, None);
    }

    let cmd = match msg {
        Msg::Resize { width, height } => {
            resize(&mut model, width, height);
            Some(Command::TakeOverScreen)
        }
        Msg::Key(Key::Quit) => {
            info!(score = model.score, banked = model.hi_scores.len(), "quit requested");
            model.phase = Phase::Quitting;
            Some(Command::Quit)
        }
        Msg::Key(key) => {
            if let (Some(dir), Some(player)) = (key.direction(), model.player.as_mut()) {
                player.set_direction(dir);
            }
            None
        }
        Msg::Tick => {
            if model.phase == Phase::Running {
                for event in step(&mut model) {
                    log_event(&event);
                }
            }
            Some(Command::ArmTick(model.rules.tick_interval))
        }
    };

    (model, cmd)
}

fn resize(model: &mut GameModel, width: u16, height: u16) {
    model.layout(width, height);
    let center = model.game_board.center_point();
    model.spawn_snake_at(center, Direction::Stopped);
    model.init_walls();
    model.phase = Phase::Running;
    info!(
        width, height,
        board_w = model.game_board.width(),
        board_h = model.game_board.height(),
        max_length = model.max_snake_length,
        "terminal resized"
    );
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::SelfCollision { score } => info!(score, "snake bit itself"),
        GameEvent::ObstacleCollision { score } => info!(score, "snake hit a wall"),
        GameEvent::Grew { max_length, frame } => debug!(max_length, frame, "snake grew"),
    }
}

// ══════════════════════════════════════════════════════════════
// Simulation step
// ══════════════════════════════════════════════════════════════

pub fn step(model: &mut GameModel) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let Some(length) = model.player.as_ref().map(|p| p.len()) else {
        return events;
    };

    model.score += length as u64;
    model.banner.update(model.score, &model.hi_scores);

    resolve_movement(model, &mut events);
    resolve_self_collision(model, &mut events);
    resolve_obstacles(model, &mut events);

    events
}

fn resolve_movement(model: &mut GameModel, events: &mut Vec<GameEvent>) {
    if let Some(player) = model.player.as_mut() {
        let before = player.max_length();
        player.update();
        if player.max_length() > before {
            events.push(GameEvent::Grew {
                max_length: player.max_length(),
                frame: player.frame(),
            });
        }
    }
}

fn resolve_self_collision(model: &mut GameModel, events: &mut Vec<GameEvent>) {
    let Some(player) = model.player.as_ref() else { return };
    if !player.check_for_collisions() {
        return;
    }

    let (head, direction) = (player.head(), player.direction());
    events.push(GameEvent::SelfCollision { score: model.score });
    model.spawn_snake_at(head, direction);
    model.reset_score();
}

fn resolve_obstacles(model: &mut GameModel, events: &mut Vec<GameEvent>) {
    let mut obstacles = Occupancy::new();
    for d in model.drawables.iter_mut() {
        d.update();
        d.accumulate_positions(&mut obstacles);
    }

    let Some(head) = model.player.as_ref().map(|p| p.head()) else { return };
    if obstacles.get(&head).copied().unwrap_or(0) == 0 {
        return;
    }

    events.push(GameEvent::ObstacleCollision { score: model.score });
    let center = model.game_board.center_point();
    model.spawn_snake_at(center, Direction::Stopped);
    model.reset_score();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geom::Vec2;
    use crate::domain::wall::{Drawable, Wall};
    use crate::sim::world::Rules;

    fn running(width: u16, height: u16) -> GameModel {
        let (model, cmd) = update(GameModel::new(Rules::default()), Msg::Resize { width, height });
        assert_eq!(cmd, Some(Command::TakeOverScreen));
        model
    }

    fn send(model: GameModel, msgs: &[Msg]) -> GameModel {
        msgs.iter().fold(model, |m, &msg| update(m, msg).0)
    }

    fn ticks(model: GameModel, n: usize) -> GameModel {
        send(model, &vec![Msg::Tick; n])
    }

    fn head(model: &GameModel) -> Vec2 {
        model.player.as_ref().unwrap().head()
    }

    #[test]
    fn init_arms_first_tick() {
        let model = GameModel::new(Rules::default());
        assert_eq!(init(&model), Command::ArmTick(Rules::default().tick_interval));
    }

    #[test]
    fn ticks_before_size_only_rearm() {
        let (model, cmd) = update(GameModel::new(Rules::default()), Msg::Tick);
        assert_eq!(cmd, Some(Command::ArmTick(model.rules.tick_interval)));
        assert_eq!(model.phase, Phase::Initializing);
        assert!(model.player.is_none());
        assert_eq!(model.score, 0);
    }

    #[test]
    fn direction_key_without_snake_is_noop() {
        let (model, cmd) = update(GameModel::new(Rules::default()), Msg::Key(Key::Left));
        assert_eq!(cmd, None);
        assert!(model.player.is_none());
    }

    #[test]
    fn resize_spawns_stopped_snake_and_walls() {
        let model = running(80, 24);
        assert_eq!(model.phase, Phase::Running);
        let player = model.player.as_ref().unwrap();
        assert_eq!(player.head(), Vec2::new(27, 11));
        assert_eq!(player.direction(), Direction::Stopped);
        assert_eq!(player.len(), 1);
        assert_eq!(player.max_length(), 108);
        assert_eq!(model.drawables.len(), 54 * 23 - 52 * 21);
    }

    #[test]
    fn resize_keeps_score_and_does_not_duplicate_walls() {
        let mut model = ticks(running(80, 24), 5);
        model.hi_scores.push(99);
        let score = model.score;
        let model = send(model, &[Msg::Resize { width: 60, height: 20 }]);
        assert_eq!(model.score, score);
        assert_eq!(model.hi_scores, vec![99]);
        assert_eq!(model.drawables.len(), 34 * 19 - 32 * 17);
    }

    #[test]
    fn quit_is_terminal() {
        let (model, cmd) = update(running(80, 24), Msg::Key(Key::Quit));
        assert_eq!(cmd, Some(Command::Quit));
        assert_eq!(model.phase, Phase::Quitting);
        let (model, cmd) = update(model, Msg::Tick);
        assert_eq!(cmd, None);
        let (_, cmd) = update(model, Msg::Resize { width: 10, height: 10 });
        assert_eq!(cmd, None);
    }

    #[test]
    fn tick_rearms_exactly_once() {
        let (_, cmd) = update(running(80, 24), Msg::Tick);
        assert_eq!(cmd, Some(Command::ArmTick(Rules::default().tick_interval)));
    }

    #[test]
    fn stopped_snake_still_scores_its_length() {
        let model = ticks(running(80, 24), 3);
        assert_eq!(model.score, 3);
        assert_eq!(head(&model), Vec2::new(27, 11));
    }

    #[test]
    fn moving_right_one_cell_per_tick() {
        let mut model = send(running(80, 24), &[Msg::Key(Key::Right)]);
        for i in 1..=20 {
            model = ticks(model, 1);
            assert_eq!(head(&model), Vec2::new(27 + i, 11));
        }
        assert!(model.hi_scores.is_empty());
    }

    #[test]
    fn key_between_ticks_only_sets_pending_direction() {
        let model = send(running(80, 24), &[Msg::Key(Key::Down)]);
        assert_eq!(head(&model), Vec2::new(27, 11));
        let model = ticks(model, 1);
        assert_eq!(head(&model), Vec2::new(27, 12));
    }

    #[test]
    fn hitting_wall_respawns_at_center_stopped() {
        // Head starts at x=27; the right wall sits at x=53.
        let model = ticks(send(running(80, 24), &[Msg::Key(Key::Right)]), 26);
        let player = model.player.as_ref().unwrap();
        assert_eq!(player.head(), model.game_board.center_point());
        assert_eq!(player.direction(), Direction::Stopped);
        assert_eq!(player.len(), 1);
        assert_eq!(model.hi_scores, vec![(1..=26).sum::<u64>()]);
        assert_eq!(model.score, 0);
    }

    #[test]
    fn self_collision_respawns_at_head_keeping_direction() {
        let model = send(running(80, 24), &[Msg::Key(Key::Right)]);
        let model = ticks(model, 3);
        let model = send(model, &[Msg::Key(Key::Left), Msg::Tick]);
        let player = model.player.as_ref().unwrap();
        assert_eq!(player.head(), Vec2::new(29, 11));
        assert_eq!(player.direction(), Direction::Left);
        assert_eq!(player.len(), 1);
        assert_eq!(model.hi_scores, vec![1 + 2 + 3 + 4]);
        assert_eq!(model.score, 0);
    }

    #[test]
    fn both_deaths_can_fire_in_one_tick() {
        let model = ticks(send(running(80, 24), &[Msg::Key(Key::Right)]), 3);
        let mut model = send(model, &[Msg::Key(Key::Left)]);
        // An obstacle right where the reversing head lands.
        model.drawables.push(Drawable::Wall(Wall::new(29, 11)));
        let events = step(&mut model);
        assert_eq!(events, vec![
            GameEvent::SelfCollision { score: 10 },
            GameEvent::ObstacleCollision { score: 0 },
        ]);
        assert_eq!(model.hi_scores, vec![10, 0]);
        assert_eq!(head(&model), model.game_board.center_point());
        assert_eq!(model.player.as_ref().unwrap().direction(), Direction::Stopped);
    }

    #[test]
    fn banked_history_matches_every_death() {
        let mut model = running(80, 24);
        for run in 0..4 {
            model = send(model, &[Msg::Key(Key::Up)]);
            // Centre y=11, top wall at y=0: eleven ticks to die.
            model = ticks(model, 11);
            assert_eq!(model.hi_scores.len(), run + 1);
        }
        assert_eq!(model.hi_scores, vec![66, 66, 66, 66]);

        model = ticks(model, 2);
        let lines = model.banner.lines();
        assert_eq!(lines.len(), 1 + 5);
        let mut shown: Vec<u64> = lines[1..].iter()
            .map(|l| l.rsplit(' ').next().unwrap().parse().unwrap())
            .collect();
        let sorted = { let mut s = shown.clone(); s.sort_unstable_by(|a, b| b.cmp(a)); s };
        assert_eq!(shown, sorted);
        shown.sort_unstable();
        assert_eq!(shown, vec![2, 66, 66, 66, 66]);
        assert!(lines.iter().any(|l| l.starts_with("   > ")));
    }

    #[test]
    fn growth_is_reported() {
        let mut model = send(running(80, 24), &[Msg::Key(Key::Down)]);
        let mut grew = 0;
        for _ in 0..10 {
            grew += step(&mut model).iter()
                .filter(|e| matches!(e, GameEvent::Grew { .. }))
                .count();
        }
        assert_eq!(grew, 1);
        assert_eq!(model.player.as_ref().unwrap().max_length(), 109);
    }
}
