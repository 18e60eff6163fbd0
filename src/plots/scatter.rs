//! Feature-versus-target scatter chart.

use super::{format_tick, nice_ticks, svg_x_tick, svg_y_ticks, ChartRender, TickStyle};
use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::SvgEncoder;
use crate::render::draw_disc;
use crate::scale::{LinearScale, Scale};

/// Marker opacity for relation scatter plots.
pub const SCATTER_ALPHA: f32 = 0.3;

/// Fraction of the data span added on each side of the axes.
const AXIS_PAD: f32 = 0.05;

/// Points of (feature, target).
#[derive(Debug, Clone)]
pub struct Scatter {
    points: Vec<(f32, f32)>,
    color: Rgba,
    alpha: f32,
    radius: f32,
}

impl Scatter {
    /// Pair `x` and `y` row by row. Rows where either side is missing or
    /// not finite are dropped; extra rows on the longer side are ignored.
    #[must_use]
    pub fn from_rows(x: &[Option<f32>], y: &[Option<f32>]) -> Self {
        let points = x
            .iter()
            .zip(y)
            .filter_map(|(x, y)| match (x, y) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
                _ => None,
            })
            .collect();

        Self {
            points,
            color: Rgba::STEEL_BLUE,
            alpha: SCATTER_ALPHA,
            radius: 3.0,
        }
    }

    /// Plotted points.
    #[must_use]
    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    /// Marker opacity.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    fn scales(&self, area: Rect) -> Option<(LinearScale, LinearScale)> {
        let xs: Vec<f32> = self.points.iter().map(|p| p.0).collect();
        let ys: Vec<f32> = self.points.iter().map(|p| p.1).collect();
        let x = LinearScale::from_data(&xs, (area.x, area.right()), AXIS_PAD)?;
        let y = LinearScale::from_data(&ys, (area.bottom(), area.y), AXIS_PAD)?;
        Some((x, y))
    }
}

impl ChartRender for Scatter {
    fn render(&self, fb: &mut Framebuffer, area: Rect) {
        let Some((sx, sy)) = self.scales(area) else {
            return;
        };
        let color = self.color.with_opacity(self.alpha);
        for &(x, y) in &self.points {
            draw_disc(fb, sx.scale(x), sy.scale(y), self.radius, color);
        }
    }

    fn to_svg(&self, svg: &mut SvgEncoder, area: Rect, ticks: &TickStyle) {
        let Some((sx, sy)) = self.scales(area) else {
            return;
        };
        let color = self.color.with_opacity(self.alpha);
        for &(x, y) in &self.points {
            svg.circle(sx.scale(x), sy.scale(y), self.radius, color);
        }

        let (x_lo, x_hi) = sx.domain();
        for value in nice_ticks(x_lo, x_hi, 4) {
            svg_x_tick(svg, area, sx.scale(value), &format_tick(value), ticks);
        }
        let (y_lo, y_hi) = sy.domain();
        svg_y_ticks(svg, area, y_lo, y_hi, ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_drops_incomplete() {
        let x = [Some(1.0), None, Some(3.0), Some(f32::NAN)];
        let y = [Some(10.0), Some(20.0), Some(30.0), Some(40.0)];
        let scatter = Scatter::from_rows(&x, &y);
        assert_eq!(scatter.points(), &[(1.0, 10.0), (3.0, 30.0)]);
    }

    #[test]
    fn test_from_rows_unequal_lengths() {
        let x = [Some(1.0), Some(2.0), Some(3.0)];
        let y = [Some(1.0)];
        assert_eq!(Scatter::from_rows(&x, &y).points().len(), 1);
    }

    #[test]
    fn test_default_alpha() {
        let scatter = Scatter::from_rows(&[], &[]);
        assert!((scatter.alpha() - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_render_is_translucent() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);
        let scatter = Scatter::from_rows(&[Some(0.0), Some(1.0)], &[Some(0.0), Some(1.0)]);
        scatter.render(&mut fb, Rect::new(0.0, 0.0, 100.0, 100.0));

        // Markers blend with the background instead of covering it
        assert_eq!(fb.count_color(Rgba::STEEL_BLUE), 0);
        assert!(fb.count_color(Rgba::WHITE) < 100 * 100);
    }

    #[test]
    fn test_render_empty_is_noop() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::WHITE);
        Scatter::from_rows(&[], &[]).render(&mut fb, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(fb.count_color(Rgba::WHITE), 100);
    }
}
