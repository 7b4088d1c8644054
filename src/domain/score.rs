//! Score banner: the ranked high-score list shown in the side panel.

use super::canvas::Canvas;
use super::geom::Vec2;
use super::window::Window;

const TITLE: &str = "HI SCORES";

#[derive(Clone, Debug, Default)]
pub struct ScoreBanner {
    lines: Vec<String>,
}

impl ScoreBanner {
    pub fn new() -> Self {
        ScoreBanner::default()
    }

    /// Rebuild the lines from the live score and all banked scores.
    /// Entries are ranked highest first; rows equal to the live score get
    /// a `>` marker in place of their rank.
    pub fn update(&mut self, score: u64, history: &[u64]) {
        let mut ranked: Vec<u64> = Vec::with_capacity(history.len() + 1);
        ranked.extend_from_slice(history);
        ranked.push(score);
        ranked.sort_unstable_by(|a, b| b.cmp(a));

        self.lines.clear();
        self.lines.push(TITLE.to_string());
        for (i, &entry) in ranked.iter().enumerate() {
            let line = if entry == score {
                format!("   > {:>10}", entry)
            } else {
                format!("{:>3}: {:>10}", i + 1, entry)
            };
            self.lines.push(line);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self, canvas: &mut Canvas, window: &Window) {
        let p = window.to_screen(Vec2::ZERO);
        for (i, line) in self.lines().iter().enumerate() {
            canvas.place_text(line, p.x, p.y + i as i32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_history_shows_only_live_score() {
        let mut b = ScoreBanner::new();
        b.update(42, &[]);
        assert_eq!(b.lines(), &[TITLE.to_string(), "   >         42".to_string()]);
    }

    #[test]
    fn ranks_descending_and_marks_live_row() {
        let mut b = ScoreBanner::new();
        b.update(50, &[10, 300, 70]);
        assert_eq!(b.lines(), &[
            TITLE.to_string(),
            "  1:        300".to_string(),
            "  2:         70".to_string(),
            "   >         50".to_string(),
            "  4:         10".to_string(),
        ]);
    }

    #[test]
    fn ties_with_live_score_are_all_marked() {
        let mut b = ScoreBanner::new();
        b.update(5, &[5, 9]);
        assert_eq!(b.lines()[1], "  1:          9");
        assert_eq!(b.lines()[2], "   >          5");
        assert_eq!(b.lines()[3], "   >          5");
    }

    #[test]
    fn render_places_lines_from_window_corner() {
        let mut b = ScoreBanner::new();
        b.update(3, &[8]);
        let mut canvas = Canvas::new(20, 4);
        b.render(&mut canvas, &Window::new(Vec2::new(1, 1), Vec2::new(19, 4)));
        let text = canvas.render();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[0].trim(), "");
        assert_eq!(rows[1], " HI SCORES          ");
        assert_eq!(rows[2], "   1:          8    ");
        assert_eq!(rows[3], "    >          3    ");
    }
}
