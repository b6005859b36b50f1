use std::fmt;

use crate::pixel::Pixel;

const UPPER_HALF_BLOCK: char = '▀';
const LOWER_HALF_BLOCK: char = '▄';
const RESET: &str = "\x1b[0m";

/// Draws an image two pixel rows per line of text: every terminal cell shows
/// the pixel at `(x, y)` in its upper half and `(x, y + 1)` in its lower
/// half, using 24-bit ANSI colors.
///
/// An odd final row is paired with fully transparent pixels. Pixels with an
/// alpha below 128 are left blank.
#[derive(Debug, Clone, Copy)]
pub struct HalfBlocks<'a> {
    width: usize,
    height: usize,
    pixels: &'a [Pixel],
    margin: usize,
}
impl<'a> HalfBlocks<'a> {
    pub fn new(width: usize, height: usize, pixels: &'a [Pixel]) -> Self {
        Self {
            width,
            height,
            pixels,
            margin: 0,
        }
    }

    /// Spaces written before every line.
    pub fn margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    fn pixel(&self, x: usize, y: usize) -> Pixel {
        if y >= self.height {
            return Pixel::TRANSPARENT;
        }
        self.pixels
            .get(y * self.width + x)
            .copied()
            .unwrap_or(Pixel::TRANSPARENT)
    }
}
impl fmt::Display for HalfBlocks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).step_by(2) {
            write!(f, "{:1$}", "", self.margin)?;
            for x in 0..self.width {
                write!(f, "{}", Cell::new(self.pixel(x, y), self.pixel(x, y + 1)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Renders `pixels` (row-major, `width * height` of them) as half-block text.
pub fn render_halfblocks(width: usize, height: usize, pixels: &[Pixel]) -> String {
    HalfBlocks::new(width, height, pixels).to_string()
}

#[derive(Debug, PartialEq, Eq)]
enum Cell {
    Blank,
    Top(Pixel),
    /// Drawn with the lower half block so the color sits where the pixel is.
    Bottom(Pixel),
    Both(Pixel, Pixel),
}
impl Cell {
    fn new(top: Pixel, bottom: Pixel) -> Self {
        match (top.is_opaque(), bottom.is_opaque()) {
            (false, false) => Cell::Blank,
            (true, false) => Cell::Top(top),
            (false, true) => Cell::Bottom(bottom),
            (true, true) => Cell::Both(top, bottom),
        }
    }
}
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Blank => f.write_str(" "),
            Cell::Top(p) => write!(f, "\x1b[38;2;{}m{UPPER_HALF_BLOCK}{RESET}", Rgb(p)),
            Cell::Bottom(p) => write!(f, "\x1b[38;2;{}m{LOWER_HALF_BLOCK}{RESET}", Rgb(p)),
            Cell::Both(top, bottom) => write!(
                f,
                "\x1b[38;2;{};48;2;{}m{UPPER_HALF_BLOCK}{RESET}",
                Rgb(top),
                Rgb(bottom)
            ),
        }
    }
}

struct Rgb<'a>(&'a Pixel);
impl fmt::Display for Rgb<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{};{}", self.0.red, self.0.green, self.0.blue)
    }
}
