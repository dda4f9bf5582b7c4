// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use std::fmt::{Display, Formatter, Result};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

/// A 64x32 monochrome framebuffer, plus a flag recording whether it changed since it was last shown
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Screen {
    pixels: Vec<bool>,
    dirty: bool,
}

impl Screen {
    /// Creates a blank screen
    pub fn new() -> Self {
        Screen {
            pixels: vec![false; WIDTH * HEIGHT],
            dirty: false,
        }
    }

    /// Turns every pixel off, and marks the screen dirty
    pub fn clear(&mut self) {
        self.pixels.fill(false);
        self.dirty = true;
    }

    /// XORs an 8-pixel-wide sprite onto the screen, one byte per row, MSB leftmost.
    ///
    /// Coordinates wrap around both edges, so every pixel lands on the screen.
    /// Returns true if any lit pixel was turned off.
    /// # Examples
    /// ```rust
    /// # use chirp_term::*;
    /// let mut screen = Screen::new();
    /// assert!(!screen.draw(62, 0, &[0b1100_0001]));
    /// assert!(screen.pixel(63, 0) && screen.pixel(5, 0));
    /// assert!(screen.draw(63, 0, &[0b1000_0000]));
    /// ```
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, &byte) in sprite.iter().enumerate() {
            let py = (y + row) % HEIGHT;
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let px = (x + bit) % WIDTH;
                let pixel = &mut self.pixels[py * WIDTH + px];
                collision |= *pixel;
                *pixel ^= true;
            }
        }
        self.dirty = true;
        collision
    }

    /// Gets the pixel at (x, y). Coordinates wrap, as they do when drawing.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[(y % HEIGHT) * WIDTH + x % WIDTH]
    }

    /// Gets the raw pixels, row-major
    pub fn as_slice(&self) -> &[bool] {
        &self.pixels
    }

    /// Iterates over the rows of the screen
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks_exact(WIDTH)
    }

    /// Whether the screen has changed since it was last rendered
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consumes the dirty flag, returning whether it was set
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the screen as text: `0` for lit pixels, space for unlit, one line per row
impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for row in self.rows() {
            for &pixel in row {
                f.write_str(if pixel { "0" } else { " " })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_sets_dirty() {
        let mut screen = Screen::new();
        assert!(!screen.is_dirty());
        screen.clear();
        assert!(screen.take_dirty());
        assert!(!screen.is_dirty());
    }

    #[test]
    fn draw_wraps_vertically() {
        let mut screen = Screen::new();
        screen.draw(0, 31, &[0x80, 0x80]);
        assert!(screen.pixel(0, 31));
        assert!(screen.pixel(0, 0));
    }

    #[test]
    fn collision_accumulates() {
        let mut screen = Screen::new();
        screen.draw(0, 0, &[0x80]);
        // first row collides, second row doesn't; flag must survive
        assert!(screen.draw(0, 0, &[0x80, 0x80]));
        assert!(!screen.pixel(0, 0));
        assert!(screen.pixel(0, 1));
    }

    #[test]
    fn display() {
        let mut screen = Screen::new();
        screen.draw(0, 0, &[0xa0]);
        let text = screen.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(HEIGHT, lines.len());
        assert!(lines.iter().all(|line| line.len() == WIDTH));
        assert!(lines[0].starts_with("0 0 "));
        assert!(text.ends_with('\n'));
    }
}
