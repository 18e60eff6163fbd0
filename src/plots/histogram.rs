//! Fixed-bin histogram for numeric columns.
//!
//! Bins are equal-width over the finite data range; the last bin is closed
//! on the right so the maximum lands in it. A constant column spans
//! `[v - 0.5, v + 0.5]`.

use super::{svg_x_tick, svg_y_ticks, ChartRender, TickStyle};
use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::SvgEncoder;
use crate::render::Drawable;
use trueno::Vector;

/// Bin count used by the distribution plots.
pub const DISTRIBUTION_BINS: usize = 20;

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub start: f32,
    /// Upper edge (inclusive only for the last bin).
    pub end: f32,
    /// Number of values in the bin.
    pub count: usize,
}

/// Binned counts, no density normalisation.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: Vec<HistogramBin>,
    color: Rgba,
}

impl Histogram {
    /// Bin `values` into `bin_count` equal-width bins. Non-finite values are ignored.
    #[must_use]
    pub fn from_values(values: &[f32], bin_count: usize) -> Self {
        let bin_count = bin_count.max(1);
        let finite: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();

        let (lo, hi) = if finite.is_empty() {
            (0.0, 1.0)
        } else {
            let vec = Vector::from_vec(finite.clone());
            let min = vec.min().unwrap_or(0.0);
            let max = vec.max().unwrap_or(min);
            if (max - min).abs() < f32::EPSILON {
                (min - 0.5, max + 0.5)
            } else {
                (min, max)
            }
        };

        let width = (hi - lo) / bin_count as f32;
        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                start: lo + i as f32 * width,
                end: lo + (i + 1) as f32 * width,
                count: 0,
            })
            .collect();

        for value in finite {
            let idx = (((value - lo) / width).floor() as usize).min(bin_count - 1);
            bins[idx].count += 1;
        }

        Self {
            bins,
            color: Rgba::STEEL_BLUE,
        }
    }

    /// The bins in ascending order.
    #[must_use]
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Number of bins.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Number of values counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    fn range(&self) -> (f32, f32) {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        }
    }

    /// Bar rectangles in pixel space.
    fn bars(&self, area: Rect) -> Vec<Rect> {
        let max = self.max_count().max(1) as f32;
        let bar_width = area.width / self.bins.len() as f32;
        self.bins
            .iter()
            .enumerate()
            .filter(|(_, bin)| bin.count > 0)
            .map(|(i, bin)| {
                let h = bin.count as f32 / max * area.height;
                Rect::new(area.x + i as f32 * bar_width, area.bottom() - h, bar_width, h)
            })
            .collect()
    }
}

impl ChartRender for Histogram {
    fn render(&self, fb: &mut Framebuffer, area: Rect) {
        for bar in self.bars(area) {
            // One pixel gap between neighbouring bars
            Rect::new(bar.x, bar.y, (bar.width - 1.0).max(1.0), bar.height).draw(fb, self.color);
        }
    }

    fn to_svg(&self, svg: &mut SvgEncoder, area: Rect, ticks: &TickStyle) {
        for bar in self.bars(area) {
            svg.rect(bar.x, bar.y, bar.width, bar.height, self.color);
        }

        let (lo, hi) = self.range();
        for value in super::nice_ticks(lo, hi, 4) {
            let x = area.x + (value - lo) / (hi - lo) * area.width;
            svg_x_tick(svg, area, x, &super::format_tick(value), ticks);
        }
        svg_y_ticks(svg, area, 0.0, self.max_count() as f32, ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bins_cover_range() {
        let data: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let hist = Histogram::from_values(&data, DISTRIBUTION_BINS);

        assert_eq!(hist.bin_count(), 20);
        assert_eq!(hist.total(), 100);
        assert!((hist.bins()[0].start - 0.0).abs() < 1e-5);
        assert!((hist.bins()[19].end - 99.0).abs() < 1e-3);
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let hist = Histogram::from_values(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        let counts: Vec<usize> = hist.bins().iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn test_constant_column() {
        let hist = Histogram::from_values(&[5.0; 10], DISTRIBUTION_BINS);
        assert_eq!(hist.total(), 10);
        assert!((hist.bins()[0].start - 4.5).abs() < 1e-5);
        assert!((hist.bins()[19].end - 5.5).abs() < 1e-5);
    }

    #[test]
    fn test_ignores_non_finite() {
        let hist = Histogram::from_values(&[1.0, f32::NAN, 2.0, f32::INFINITY], 2);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn test_empty_values() {
        let hist = Histogram::from_values(&[], DISTRIBUTION_BINS);
        assert_eq!(hist.bin_count(), 20);
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn test_zero_bins_clamped() {
        assert_eq!(Histogram::from_values(&[1.0], 0).bin_count(), 1);
    }

    #[test]
    fn test_render_paints_bars() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);
        let hist = Histogram::from_values(&[1.0, 2.0, 2.0, 3.0], 3);
        hist.render(&mut fb, Rect::new(10.0, 10.0, 80.0, 80.0));
        assert!(fb.count_color(Rgba::STEEL_BLUE) > 0);
        // Tallest bar reaches the top of the area
        assert_eq!(fb.get_pixel(50, 11), Some(Rgba::STEEL_BLUE));
    }
}
