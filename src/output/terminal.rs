//! Terminal preview of a rasterised figure.
//!
//! - ASCII: luminance ramp ` .:-=+*#%@`, works in any terminal
//! - Unicode half-block: `▀` with 24-bit ANSI colors, two pixel rows per line

use crate::framebuffer::Framebuffer;
use std::fmt::Write as FmtWrite;
use std::io::{self, Write};

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// ASCII grayscale characters (widest compatibility)
    #[default]
    Ascii,
    /// Unicode half-block characters with 24-bit color
    UnicodeHalfBlock,
}

/// Downsamples a framebuffer into terminal text.
#[derive(Debug, Clone)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    /// Output width in characters.
    columns: u32,
}

impl Default for TerminalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEncoder {
    /// ASCII ramp from dark to light.
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    /// Monospace cells are roughly twice as tall as they are wide.
    const CELL_ASPECT: f32 = 2.0;

    /// Create an encoder producing 120-column ASCII output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: TerminalMode::default(),
            columns: 120,
        }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the output width in characters.
    #[must_use]
    pub fn columns(mut self, columns: u32) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Render a framebuffer to a string.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        let cols = self.columns.min(fb.width());
        let aspect = fb.height() as f32 / fb.width() as f32;
        let lines = ((cols as f32 * aspect / Self::CELL_ASPECT).round() as u32).max(1);

        match self.mode {
            TerminalMode::Ascii => Self::render_ascii(fb, cols, lines),
            TerminalMode::UnicodeHalfBlock => Self::render_half_block(fb, cols, lines),
        }
    }

    /// Write the rendered preview to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, fb: &Framebuffer, out: &mut W) -> io::Result<()> {
        out.write_all(self.render(fb).as_bytes())?;
        out.flush()
    }

    fn render_ascii(fb: &Framebuffer, cols: u32, lines: u32) -> String {
        let mut output = String::with_capacity(((cols + 1) * lines) as usize);
        for y in 0..lines {
            for x in 0..cols {
                let (r, g, b) = sample(fb, x, y, cols, lines);
                // Rec. 709 luminance
                let luma = (0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b))
                    / 255.0;
                let idx = (luma * (Self::ASCII_RAMP.len() - 1) as f32).round() as usize;
                output.push(Self::ASCII_RAMP[idx.min(Self::ASCII_RAMP.len() - 1)]);
            }
            output.push('\n');
        }
        output
    }

    fn render_half_block(fb: &Framebuffer, cols: u32, lines: u32) -> String {
        let rows = lines * 2;
        let mut output = String::with_capacity(((cols * 40 + 5) * lines) as usize);
        for y in (0..rows).step_by(2) {
            for x in 0..cols {
                let top = sample(fb, x, y, cols, rows);
                let bottom = sample(fb, x, y + 1, cols, rows);
                let _ = write!(
                    output,
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                    top.0, top.1, top.2, bottom.0, bottom.1, bottom.2
                );
            }
            output.push_str("\x1b[0m\n");
        }
        output
    }
}

/// Nearest-neighbour sample of cell `(x, y)` on a `cols` x `rows` grid.
fn sample(fb: &Framebuffer, x: u32, y: u32, cols: u32, rows: u32) -> (u8, u8, u8) {
    let fx = ((x as f32 + 0.5) * fb.width() as f32 / cols as f32) as u32;
    let fy = ((y as f32 + 0.5) * fb.height() as f32 / rows as f32) as u32;
    fb.get_pixel(fx.min(fb.width() - 1), fy.min(fb.height() - 1))
        .map_or((0, 0, 0), |px| (px.r, px.g, px.b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn test_ascii_white_is_brightest() {
        let mut fb = Framebuffer::new(40, 20).unwrap();
        fb.clear(Rgba::WHITE);
        let out = TerminalEncoder::new().columns(10).render(&fb);
        assert!(out.lines().all(|l| l.chars().all(|c| c == '@')));
        // 10 cols, aspect 0.5, halved for cell shape
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_ascii_black_is_blank() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::BLACK);
        let out = TerminalEncoder::new().columns(4).render(&fb);
        assert!(out.lines().all(|l| l.chars().all(|c| c == ' ')));
    }

    #[test]
    fn test_columns_capped_by_width() {
        let fb = Framebuffer::new(5, 5).unwrap();
        let out = TerminalEncoder::new().columns(100).render(&fb);
        assert_eq!(out.lines().next().unwrap().chars().count(), 5);
    }

    #[test]
    fn test_half_block_resets_color() {
        let mut fb = Framebuffer::new(8, 8).unwrap();
        fb.clear(Rgba::STEEL_BLUE);
        let out = TerminalEncoder::new()
            .mode(TerminalMode::UnicodeHalfBlock)
            .columns(4)
            .render(&fb);
        assert!(out.contains('▀'));
        assert!(out.contains("\x1b[0m"));
        assert!(out.contains("38;2;76;114;176"));
    }

    #[test]
    fn test_write_to_buffer() {
        let fb = Framebuffer::new(4, 4).unwrap();
        let mut buf = Vec::new();
        TerminalEncoder::new().write_to(&fb, &mut buf).unwrap();
        assert!(!buf.is_empty());
    }
}
