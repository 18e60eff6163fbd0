//! RGBA pixel buffer that figures are rasterised into.
//!
//! Rows are padded to a 64-byte stride so whole-row fills stay aligned.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Row alignment in bytes.
const ROW_ALIGNMENT: usize = 64;

/// Raster target for [`Figure::to_framebuffer`](crate::figure::Figure::to_framebuffer).
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// RGBA bytes in row-major order, `stride` bytes per row.
    pixels: Vec<u8>,
    stride: usize,
}

impl Framebuffer {
    /// Create a transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_eda::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(200, 50).unwrap();
    /// assert_eq!(fb.width(), 200);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = (row_bytes + ROW_ALIGNMENT - 1) & !(ROW_ALIGNMENT - 1);

        Ok(Self {
            width,
            height,
            pixels: vec![0; stride * height as usize],
            stride,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Clear the whole buffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        self.fill_rect(0, 0, self.width, self.height, color);
    }

    /// Fill a rectangle, clamped to the buffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);
        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let rgba = color.to_array();
        for row_y in y1..y2 {
            let start = self.pixel_index(x1, row_y);
            let end = self.pixel_index(x2, row_y);
            for chunk in self.pixels[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&rgba);
            }
        }
    }

    /// Color at a pixel, `None` when out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.pixel_index(x, y);
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Overwrite a pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Composite `color` over the existing pixel ("over" operator).
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if color.a == 255 {
            self.set_pixel(x, y, color);
            return;
        }
        if x >= self.width || y >= self.height || color.a == 0 {
            return;
        }

        let idx = self.pixel_index(x, y);
        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(self.pixels[idx + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let blend = |src: u8, dst: u8| -> u8 {
            let out = (f32::from(src) * src_a + f32::from(dst) * dst_a * (1.0 - src_a)) / out_a;
            out.round().clamp(0.0, 255.0) as u8
        };

        self.pixels[idx] = blend(color.r, self.pixels[idx]);
        self.pixels[idx + 1] = blend(color.g, self.pixels[idx + 1]);
        self.pixels[idx + 2] = blend(color.b, self.pixels[idx + 2]);
        self.pixels[idx + 3] = (out_a * 255.0).round() as u8;
    }

    /// Count pixels exactly matching `color`.
    #[must_use]
    pub fn count_color(&self, color: Rgba) -> usize {
        let rgba = color.to_array();
        (0..self.height)
            .map(|y| {
                let start = y as usize * self.stride;
                self.pixels[start..start + self.width as usize * 4]
                    .chunks_exact(4)
                    .filter(|px| *px == rgba)
                    .count()
            })
            .sum()
    }

    /// Pixel data without stride padding, as PNG encoders expect.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = self.width as usize * 4;
        if self.stride == row_bytes {
            return self.pixels.clone();
        }

        let mut compact = Vec::with_capacity(row_bytes * self.height as usize);
        for y in 0..self.height as usize {
            let start = y * self.stride;
            compact.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        compact
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(Framebuffer::new(0, 10).is_err());
        assert!(Framebuffer::new(10, 0).is_err());
    }

    #[test]
    fn test_set_get_pixel() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.set_pixel(3, 4, Rgba::STEEL_BLUE);
        assert_eq!(fb.get_pixel(3, 4), Some(Rgba::STEEL_BLUE));
        assert_eq!(fb.get_pixel(10, 0), None);
        // Out of bounds write is a no-op
        fb.set_pixel(100, 100, Rgba::BLACK);
    }

    #[test]
    fn test_fill_rect_clamped() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::WHITE);
        fb.fill_rect(8, 8, 5, 5, Rgba::BLACK);
        assert_eq!(fb.count_color(Rgba::BLACK), 4);
    }

    #[test]
    fn test_blend_half_alpha_over_white() {
        let mut fb = Framebuffer::new(1, 1).unwrap();
        fb.clear(Rgba::WHITE);
        fb.blend_pixel(0, 0, Rgba::BLACK.with_alpha(128));
        let px = fb.get_pixel(0, 0).unwrap();
        assert!(px.r > 120 && px.r < 135);
        assert_eq!(px.a, 255);
    }

    #[test]
    fn test_compact_pixels_drop_padding() {
        // 3 px * 4 bytes = 12 bytes per row, padded to 64
        let fb = Framebuffer::new(3, 2).unwrap();
        assert_eq!(fb.to_compact_pixels().len(), 3 * 2 * 4);
    }
}
