//! Presentation layer: diff-based terminal renderer for composed canvases.
//!
//! How it works:
//!   1. `sim::frame::compose` builds the next frame as a `Canvas`
//!   2. Each cell is compared with the previously flushed frame
//!   3. Only changed cells are emitted, batched with `queue!`, one flush
//!   4. The new frame becomes the comparison base for the next one
//!
//! A size change or the first frame after taking over the screen forces a
//! full repaint.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::canvas::{Canvas, Style};
use crate::sim::frame::{self, PLACEHOLDER};
use crate::sim::world::GameModel;

/// Map a palette style to terminal colours.
fn colors(style: Style) -> (Color, Color) {
    let fg = style.fg.map_or(Color::Reset, Color::AnsiValue);
    let bg = style.bg.map_or(Color::Reset, Color::AnsiValue);
    (fg, bg)
}

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    /// Last frame written to the terminal. `None` forces a full repaint.
    back: Option<Canvas>,
    raw: bool,
    alt_screen: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            back: None,
            raw: false,
            alt_screen: false,
        }
    }

    /// Raw mode for key-by-key input. The screen itself is only taken over
    /// once the game asks for it.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        execute!(self.writer, cursor::Hide)
    }

    pub fn take_over_screen(&mut self) -> io::Result<()> {
        if !self.alt_screen {
            execute!(self.writer, terminal::EnterAlternateScreen)?;
            self.alt_screen = true;
        }
        queue!(self.writer, ResetColor, Clear(ClearType::All))?;
        self.back = None;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show)?;
        if self.alt_screen {
            execute!(self.writer, terminal::LeaveAlternateScreen)?;
            self.alt_screen = false;
        }
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }

    pub fn render(&mut self, model: &GameModel) -> io::Result<()> {
        let front = match frame::compose(model) {
            Some(canvas) => canvas,
            None => placeholder()?,
        };

        let resized = self.back.as_ref()
            .map_or(true, |b| b.width() != front.width() || b.height() != front.height());
        if resized {
            queue!(self.writer, ResetColor, Clear(ClearType::All))?;
            self.back = None;
        }

        self.flush_diff(&front)?;
        self.back = Some(front);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self, front: &Canvas) -> io::Result<()> {
        let mut last_style: Option<Style> = None;
        let mut cursor_at: Option<(usize, usize)> = None;

        for (y, row) in front.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let prev = self.back.as_ref().map(|b| b.get(x as i32, y as i32));
                if prev == Some(cell) {
                    continue;
                }

                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }

                if last_style != Some(cell.style) {
                    let (fg, bg) = colors(cell.style);
                    queue!(self.writer, SetForegroundColor(fg), SetBackgroundColor(bg))?;
                    last_style = Some(cell.style);
                }

                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        queue!(self.writer, ResetColor)?;
        self.writer.flush()
    }
}

/// Blank frame of the current terminal size with the placeholder text.
fn placeholder() -> io::Result<Canvas> {
    let (w, h) = terminal::size()?;
    let mut canvas = Canvas::new(usize::from(w), usize::from(h));
    canvas.place_text(PLACEHOLDER, 0, 0);
    Ok(canvas)
}
