//! Canvas: one frame as a fixed-size grid of character cells.
//!
//! Every cell holds exactly one `char` plus an optional style. The canvas is
//! built fresh for each frame and never resized; `render()` drops the styles
//! and yields plain text, while the terminal layer reads `rows()` to emit colours.

/// Foreground/background as 256-colour palette indices. `None` = terminal default.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Style {
    pub fg: Option<u8>,
    pub bg: Option<u8>,
}

impl Style {
    pub const PLAIN: Style = Style { fg: None, bg: None };

    pub const fn fg(color: u8) -> Self {
        Style { fg: Some(color), bg: None }
    }

    pub const fn fg_bg(fg: u8, bg: u8) -> Self {
        Style { fg: Some(fg), bg: Some(bg) }
    }

    /// Produce a cell token carrying this style.
    pub fn render(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', style: Style::PLAIN };
}

impl Default for Cell {
    fn default() -> Self {
        Cell::BLANK
    }
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Write one cell. Coordinates outside the grid are ignored.
    pub fn set(&mut self, cell: Cell, x: i32, y: i32) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.index(x, y).map_or(Cell::BLANK, |idx| self.cells[idx])
    }

    /// Write `s` left to right from (x, y), one cell per `char` (not per byte).
    pub fn place_text(&mut self, s: &str, x: i32, y: i32) {
        for (dx, ch) in s.chars().enumerate() {
            self.set(Style::PLAIN.render(ch), x + dx as i32, y);
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() panics on zero; an empty canvas has no rows anyway
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Plain text: rows joined by a single newline, no trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.ch));
        }
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}
