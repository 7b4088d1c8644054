//! Window: an immutable viewport rectangle on the canvas.
//!
//! Drawables work in window-local coordinates; `to_screen` maps them to
//! absolute canvas cells.

use super::geom::Vec2;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Window {
    ul: Vec2,
    lr: Vec2,
}

impl Window {
    pub fn new(ul: Vec2, lr: Vec2) -> Self {
        Window { ul, lr }
    }

    pub fn width(&self) -> i32 {
        self.lr.x - self.ul.x
    }

    pub fn height(&self) -> i32 {
        self.lr.y - self.ul.y
    }

    /// Centre in local coordinates. Pass through `to_screen` before
    /// addressing the canvas.
    pub fn center_point(&self) -> Vec2 {
        Vec2::new(self.width() / 2, self.height() / 2)
    }

    pub fn to_screen(&self, local: Vec2) -> Vec2 {
        local + self.ul
    }

    pub fn contains_local(&self, p: Vec2) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width() && p.y < self.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_and_center() {
        let w = Window::new(Vec2::new(25, 0), Vec2::new(79, 23));
        assert_eq!(w.width(), 54);
        assert_eq!(w.height(), 23);
        assert_eq!(w.center_point(), Vec2::new(27, 11));
    }

    #[test]
    fn to_screen_offsets_by_upper_left() {
        let w = Window::new(Vec2::new(25, 3), Vec2::new(40, 10));
        assert_eq!(w.to_screen(Vec2::new(0, 0)), Vec2::new(25, 3));
        assert_eq!(w.to_screen(w.center_point()), Vec2::new(32, 6));
    }

    #[test]
    fn contains_local_is_half_open() {
        let w = Window::new(Vec2::new(5, 5), Vec2::new(8, 7));
        assert!(w.contains_local(Vec2::new(0, 0)));
        assert!(w.contains_local(Vec2::new(2, 1)));
        assert!(!w.contains_local(Vec2::new(3, 1)));
        assert!(!w.contains_local(Vec2::new(0, -1)));
    }
}
