//! The snake: a singly linked chain of segments, head first.
//!
//! The head owns the whole chain. Moving prepends a new head; `trim` walks
//! from the head and severs the link after the `max_length`-th node.
//! Growth is purely time-based: `max_length` rises by one every
//! `growth_interval` movement frames.

use std::collections::HashMap;

use super::canvas::{Canvas, Style};
use super::geom::{Direction, Vec2};
use super::window::Window;

pub const DEFAULT_GROWTH_INTERVAL: u32 = 10;

const TAIL_GLYPH: char = '\u{25E6}';
const TAIL_STYLE: Style = Style::fg(180);
const HEAD_STYLE: Style = Style::fg(204);

#[derive(Debug)]
struct Segment {
    pos: Vec2,
    next: Option<Box<Segment>>,
}

impl Drop for Segment {
    // Unlink iteratively so a long tail doesn't recurse once per node.
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

#[derive(Debug)]
pub struct Snake {
    head: Box<Segment>,
    direction: Direction,
    max_length: usize,
    growth_interval: u32,
    frame: u32,
    length: usize,
}

impl Snake {
    /// A fresh single-segment snake at `pos`.
    pub fn spawn(pos: Vec2, direction: Direction, max_length: usize, growth_interval: u32) -> Self {
        Snake {
            head: Box::new(Segment { pos, next: None }),
            direction,
            max_length: max_length.max(1),
            growth_interval: growth_interval.max(1),
            frame: 0,
            length: 1,
        }
    }

    pub fn head(&self) -> Vec2 {
        self.head.pos
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Node count as of the last trim.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Positions from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = Vec2> + '_ {
        std::iter::successors(Some(&*self.head), |s| s.next.as_deref()).map(|s| s.pos)
    }

    /// Reversing into the body is allowed; it usually kills the snake next tick.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Advance one tick. Does nothing while stopped.
    pub fn update(&mut self) {
        if !self.direction.is_moving() {
            return;
        }

        let pos = self.head.pos + self.direction.velocity();
        let old_head = std::mem::replace(&mut self.head, Box::new(Segment { pos, next: None }));
        self.head.next = Some(old_head);

        self.frame += 1;
        if self.frame % self.growth_interval == 0 {
            self.max_length += 1;
        }
        self.trim(self.max_length);
    }

    /// Keep at most `n` nodes (never fewer than the head) and record the count.
    pub fn trim(&mut self, n: usize) {
        let n = n.max(1);
        let mut count = 1;
        let mut cursor: &mut Segment = &mut self.head;
        while count < n {
            match cursor.next.as_deref_mut() {
                Some(next) => {
                    cursor = next;
                    count += 1;
                }
                None => {
                    self.length = count;
                    return;
                }
            }
        }
        cursor.next = None;
        self.length = count;
    }

    /// True iff some cell is occupied by two or more segments.
    pub fn check_for_collisions(&self) -> bool {
        let mut seen: HashMap<Vec2, u32> = HashMap::with_capacity(self.length);
        let mut hit = false;
        for pos in self.segments() {
            let count = seen.entry(pos).or_insert(0);
            *count += 1;
            if *count > 1 {
                hit = true;
            }
        }
        hit
    }

    pub fn render(&self, canvas: &mut Canvas, window: &Window) {
        for pos in self.segments() {
            let p = window.to_screen(pos);
            canvas.set(TAIL_STYLE.render(TAIL_GLYPH), p.x, p.y);
        }
        let p = window.to_screen(self.head.pos);
        canvas.set(HEAD_STYLE.render(self.direction.head_glyph()), p.x, p.y);
    }
}
