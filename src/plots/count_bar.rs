//! Count bar chart for non-numeric columns.

use super::{svg_x_tick, svg_y_ticks, ChartRender, TickStyle};
use crate::color::category_color;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::SvgEncoder;
use crate::render::Drawable;
use crate::scale::{BandScale, Scale};

/// Fraction of each band filled by its bar.
const BAR_FILL: f32 = 0.8;

/// One bar per distinct value, height = number of occurrences.
#[derive(Debug, Clone)]
pub struct CountBar {
    counts: Vec<(String, usize)>,
}

impl CountBar {
    /// Build from `(label, count)` pairs, drawn in the given order.
    #[must_use]
    pub fn new(counts: Vec<(String, usize)>) -> Self {
        Self { counts }
    }

    /// `(label, count)` pairs in drawing order.
    #[must_use]
    pub fn counts(&self) -> &[(String, usize)] {
        &self.counts
    }

    fn max_count(&self) -> usize {
        self.counts.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }

    fn bars(&self, area: Rect) -> impl Iterator<Item = (usize, &str, Rect)> + '_ {
        let bands = BandScale::new(self.counts.len(), (area.x, area.right()));
        let max = self.max_count().max(1) as f32;
        let bar_width = bands.bandwidth() * BAR_FILL;

        self.counts.iter().enumerate().map(move |(i, (label, count))| {
            let h = *count as f32 / max * area.height;
            let x = bands.scale(i) - bar_width / 2.0;
            (i, label.as_str(), Rect::new(x, area.bottom() - h, bar_width, h))
        })
    }
}

impl ChartRender for CountBar {
    fn render(&self, fb: &mut Framebuffer, area: Rect) {
        for (i, _, bar) in self.bars(area) {
            bar.draw(fb, category_color(i));
        }
    }

    fn to_svg(&self, svg: &mut SvgEncoder, area: Rect, ticks: &TickStyle) {
        for (i, label, bar) in self.bars(area) {
            svg.rect(bar.x, bar.y, bar.width, bar.height, category_color(i));
            svg_x_tick(svg, area, bar.x + bar.width / 2.0, label, ticks);
        }
        svg_y_ticks(svg, area, 0.0, self.max_count() as f32, ticks);
    }
}
