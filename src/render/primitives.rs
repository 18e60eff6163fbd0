//! Primitive rendering functions.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;

/// Trait for shapes that can paint themselves onto a framebuffer.
pub trait Drawable {
    /// Draw this primitive to a framebuffer.
    fn draw(&self, fb: &mut Framebuffer, color: Rgba);
}

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm (non-antialiased).
///
/// Pixels outside the framebuffer are skipped.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }
        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a filled rectangle. Negative origins are clipped to zero.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    let clip_x = x.min(0).unsigned_abs();
    let clip_y = y.min(0).unsigned_abs();
    fb.fill_rect(
        x.max(0) as u32,
        y.max(0) as u32,
        width.saturating_sub(clip_x),
        height.saturating_sub(clip_y),
        color,
    );
}

/// Draw a one-pixel rectangle outline.
pub fn draw_rect_outline(fb: &mut Framebuffer, rect: Rect, color: Rgba) {
    let (x0, y0) = (rect.x as i32, rect.y as i32);
    let (x1, y1) = (rect.right() as i32, rect.bottom() as i32);
    draw_line(fb, x0, y0, x1, y0, color);
    draw_line(fb, x0, y1, x1, y1, color);
    draw_line(fb, x0, y0, x0, y1, color);
    draw_line(fb, x1, y0, x1, y1, color);
}

impl Drawable for Rect {
    fn draw(&self, fb: &mut Framebuffer, color: Rgba) {
        draw_rect(
            fb,
            self.x.round() as i32,
            self.y.round() as i32,
            self.width.round() as u32,
            self.height.round() as u32,
            color,
        );
    }
}

// ============================================================================
// Markers
// ============================================================================

/// Draw a filled disc, alpha-blending every covered pixel exactly once.
pub fn draw_disc(fb: &mut Framebuffer, cx: f32, cy: f32, radius: f32, color: Rgba) {
    let r = radius.max(0.5);
    let r2 = r * r;
    let y_start = (cy - r).floor().max(0.0) as u32;
    let y_end = (cy + r).ceil().min(fb.height() as f32) as u32;
    let x_start = (cx - r).floor().max(0.0) as u32;
    let x_end = (cx + r).ceil().min(fb.width() as f32) as u32;

    for y in y_start..y_end {
        let dy = y as f32 + 0.5 - cy;
        for x in x_start..x_end {
            let dx = x as f32 + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                fb.blend_pixel(x, y, color);
            }
        }
    }
}
