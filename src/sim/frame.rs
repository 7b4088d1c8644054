//! Frame composition: walls, snake and banner drawn onto one canvas.

use crate::domain::canvas::Canvas;
use super::world::GameModel;

pub const PLACEHOLDER: &str = "Initializing...";

/// Build the frame for the current state, or `None` while the terminal
/// size is still unknown.
pub fn compose(model: &GameModel) -> Option<Canvas> {
    if model.width == 0 || model.height == 0 {
        return None;
    }

    let mut canvas = Canvas::new(usize::from(model.width), usize::from(model.height));
    for d in &model.drawables {
        d.render(&mut canvas, &model.game_board);
    }
    if let Some(player) = &model.player {
        player.render(&mut canvas, &model.game_board);
    }
    model.banner.render(&mut canvas, &model.score_board);
    Some(canvas)
}

/// The frame as plain text.
pub fn view(model: &GameModel) -> String {
    compose(model).map_or_else(|| PLACEHOLDER.to_string(), |c| c.render())
}
