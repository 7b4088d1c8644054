//! Static obstacles and the drawable set.
//!
//! Collision against obstacles is occupancy-based: every drawable adds its
//! cells to a shared count map, and the step function only asks whether the
//! snake's head cell has a nonzero count. No wall geometry is special-cased.

use std::collections::HashMap;

use super::canvas::{Canvas, Style};
use super::geom::Vec2;
use super::window::Window;

const WALL_STYLE: Style = Style::fg_bg(87, 67);

/// Position -> number of occupants, rebuilt every tick.
pub type Occupancy = HashMap<Vec2, u32>;

/// A single immovable obstacle cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Wall {
    pos: Vec2,
}

impl Wall {
    pub fn new(x: i32, y: i32) -> Self {
        Wall { pos: Vec2::new(x, y) }
    }
}

/// Anything placed on the game board besides the snake.
#[derive(Clone, Debug)]
pub enum Drawable {
    Wall(Wall),
}

impl Drawable {
    pub fn update(&mut self) {
        match self {
            Drawable::Wall(_) => {}
        }
    }

    pub fn render(&self, canvas: &mut Canvas, window: &Window) {
        match self {
            Drawable::Wall(w) => {
                let p = window.to_screen(w.pos);
                canvas.set(WALL_STYLE.render(' '), p.x, p.y);
            }
        }
    }

    pub fn accumulate_positions(&self, dst: &mut Occupancy) {
        match self {
            Drawable::Wall(w) => *dst.entry(w.pos).or_insert(0) += 1,
        }
    }
}

/// Outline a `width` x `height` local area: top and bottom rows plus the
/// left and right columns, each cell exactly once.
pub fn perimeter(width: i32, height: i32) -> Vec<Drawable> {
    let mut walls = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                walls.push(Drawable::Wall(Wall::new(x, y)));
            }
        }
    }
    walls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupancy(drawables: &[Drawable]) -> Occupancy {
        let mut occ = Occupancy::new();
        for d in drawables {
            d.accumulate_positions(&mut occ);
        }
        occ
    }

    #[test]
    fn perimeter_covers_ring_exactly_once() {
        for (n, m) in [(2, 2), (3, 3), (10, 4), (54, 23)] {
            let walls = perimeter(n, m);
            assert_eq!(walls.len() as i32, n * m - (n - 2) * (m - 2), "{n}x{m}");
            let occ = occupancy(&walls);
            assert_eq!(occ.len(), walls.len());
            assert!(occ.values().all(|&c| c == 1));
        }
    }

    #[test]
    fn perimeter_leaves_interior_free() {
        let occ = occupancy(&perimeter(6, 5));
        for y in 1..4 {
            for x in 1..5 {
                assert!(!occ.contains_key(&Vec2::new(x, y)));
            }
        }
        assert!(occ.contains_key(&Vec2::new(5, 4)));
        assert!(occ.contains_key(&Vec2::new(0, 2)));
    }

    #[test]
    fn degenerate_sizes() {
        assert!(perimeter(0, 5).is_empty());
        assert!(perimeter(-3, 5).is_empty());
        assert_eq!(perimeter(1, 1).len(), 1);
        assert_eq!(perimeter(4, 1).len(), 4);
    }

    #[test]
    fn overlapping_walls_accumulate() {
        let walls = vec![Drawable::Wall(Wall::new(1, 1)), Drawable::Wall(Wall::new(1, 1))];
        assert_eq!(occupancy(&walls)[&Vec2::new(1, 1)], 2);
    }

    #[test]
    fn wall_renders_styled_blank_in_window() {
        let mut canvas = Canvas::new(6, 3);
        let window = Window::new(Vec2::new(2, 1), Vec2::new(6, 3));
        let mut wall = Drawable::Wall(Wall::new(1, 0));
        wall.update();
        wall.render(&mut canvas, &window);
        assert_eq!(canvas.get(3, 1), WALL_STYLE.render(' '));
    }
}
