//! Chart panels placed in figure grid cells.
//!
//! A [`Panel`] is one grid cell's worth of chart: title, axis labels and one
//! [`Chart`]. Charts know how to draw their marks into a plot area; the panel
//! owns the frame and the text around it.

mod count_bar;
mod histogram;
mod scatter;
mod violin;

pub use count_bar::CountBar;
pub use histogram::{Histogram, HistogramBin, DISTRIBUTION_BINS};
pub use scatter::{Scatter, SCATTER_ALPHA};
pub use violin::{Quartiles, Violin, ViolinGroup};

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::layout::GridSlot;
use crate::output::{SvgElement, SvgEncoder, TextAnchor};
use crate::render::draw_rect_outline;

/// Drawing interface every chart kind implements.
pub trait ChartRender {
    /// Rasterise the chart marks into `area`.
    fn render(&self, fb: &mut Framebuffer, area: Rect);

    /// Emit vector marks and tick labels for `area`.
    fn to_svg(&self, svg: &mut SvgEncoder, area: Rect, ticks: &TickStyle);
}

/// Font size and x tick rotation used when emitting tick labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickStyle {
    /// Tick label font size in pixels.
    pub font_size: f32,
    /// Clockwise rotation of x tick labels in degrees.
    pub x_rotation: f32,
}

/// The chart drawn inside a panel.
#[derive(Debug, Clone)]
pub enum Chart {
    /// Binned counts of a numeric column.
    Histogram(Histogram),
    /// Occurrence counts of each distinct value.
    CountBar(CountBar),
    /// Feature (x) against target (y).
    Scatter(Scatter),
    /// Target distribution per category.
    Violin(Violin),
}

impl Chart {
    /// Short lowercase name, used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Chart::Histogram(_) => "histogram",
            Chart::CountBar(_) => "count bar",
            Chart::Scatter(_) => "scatter",
            Chart::Violin(_) => "violin",
        }
    }

    fn renderer(&self) -> &dyn ChartRender {
        match self {
            Chart::Histogram(c) => c,
            Chart::CountBar(c) => c,
            Chart::Scatter(c) => c,
            Chart::Violin(c) => c,
        }
    }
}

/// One titled chart in a grid cell.
#[derive(Debug, Clone)]
pub struct Panel {
    slot: GridSlot,
    title: String,
    x_label: String,
    y_label: String,
    x_tick_rotation: f32,
    chart: Chart,
}

impl Panel {
    /// Create a panel with empty axis labels and unrotated ticks.
    #[must_use]
    pub fn new(slot: GridSlot, title: impl Into<String>, chart: Chart) -> Self {
        Self {
            slot,
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            x_tick_rotation: 0.0,
            chart,
        }
    }

    /// Set the x axis label.
    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    /// Set the y axis label.
    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    /// Rotate x tick labels (degrees).
    #[must_use]
    pub fn x_tick_rotation(mut self, degrees: f32) -> Self {
        self.x_tick_rotation = degrees;
        self
    }

    /// Grid cell of this panel.
    #[must_use]
    pub fn slot(&self) -> GridSlot {
        self.slot
    }

    /// Panel title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// X axis label (may be empty).
    #[must_use]
    pub fn x_axis_label(&self) -> &str {
        &self.x_label
    }

    /// Y axis label.
    #[must_use]
    pub fn y_axis_label(&self) -> &str {
        &self.y_label
    }

    /// X tick rotation in degrees.
    #[must_use]
    pub fn tick_rotation(&self) -> f32 {
        self.x_tick_rotation
    }

    /// The chart.
    #[must_use]
    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// Plot area inside `cell`, leaving room for title, labels and ticks.
    #[must_use]
    pub fn plot_area(&self, cell: Rect, dpi: f32) -> Rect {
        let unit = dpi / 100.0;
        let bottom = if self.x_tick_rotation.abs() > f32::EPSILON {
            110.0
        } else {
            50.0
        };
        cell.inset(65.0 * unit, 35.0 * unit, 20.0 * unit, bottom * unit)
    }

    /// Rasterise frame and marks into `cell`.
    pub fn render(&self, fb: &mut Framebuffer, cell: Rect, dpi: f32) {
        let area = self.plot_area(cell, dpi);
        if area.is_empty() {
            return;
        }
        self.chart.renderer().render(fb, area);
        draw_rect_outline(fb, area, Rgba::AXIS);
    }

    /// Emit frame, marks, title, axis labels and ticks into `cell`.
    pub fn to_svg(&self, svg: &mut SvgEncoder, cell: Rect, dpi: f32) {
        let area = self.plot_area(cell, dpi);
        if area.is_empty() {
            return;
        }
        let unit = dpi / 100.0;
        let ticks = TickStyle {
            font_size: 10.0 * unit,
            x_rotation: self.x_tick_rotation,
        };

        self.chart.renderer().to_svg(svg, area, &ticks);
        svg.frame(area.x, area.y, area.width, area.height, Rgba::AXIS);

        svg.add_element(SvgElement::Text {
            x: area.x + area.width / 2.0,
            y: cell.y + 22.0 * unit,
            text: self.title.clone(),
            font_size: 13.0 * unit,
            anchor: TextAnchor::Middle,
            bold: true,
            rotate: 0.0,
        });

        if !self.x_label.is_empty() {
            svg.text(
                area.x + area.width / 2.0,
                cell.bottom() - 10.0 * unit,
                &self.x_label,
                11.0 * unit,
                TextAnchor::Middle,
            );
        }

        if !self.y_label.is_empty() {
            let x = cell.x + 14.0 * unit;
            let y = area.y + area.height / 2.0;
            svg.add_element(SvgElement::Text {
                x,
                y,
                text: self.y_label.clone(),
                font_size: 11.0 * unit,
                anchor: TextAnchor::Middle,
                bold: false,
                rotate: -90.0,
            });
        }
    }
}

/// Upper bound on the tick index produced by [`nice_ticks`].
const MAX_TICKS: usize = 50;

/// "Nice" tick positions covering `lo..=hi` with roughly `target` steps.
#[must_use]
pub fn nice_ticks(lo: f32, hi: f32, target: usize) -> Vec<f32> {
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return vec![lo];
    }

    let raw = span / target as f32;
    let magnitude = 10f32.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() * step;
    // Step below the float spacing at this magnitude: ticks would not advance
    if !first.is_finite() || first + step == first {
        return vec![lo];
    }

    let last = ((hi - first) / step + 1e-3).floor();
    if last < 0.0 {
        return Vec::new();
    }
    (0..=(last as usize).min(MAX_TICKS))
        .map(|i| {
            let value = first + i as f32 * step;
            // Snap -0.0 and float dust to clean labels
            if value.abs() < step * 1e-6 {
                0.0
            } else {
                value
            }
        })
        .collect()
}

/// Compact tick label: integers without decimals, otherwise up to 3 places.
#[must_use]
pub fn format_tick(value: f32) -> String {
    if (value - value.round()).abs() < 1e-4 {
        format!("{}", value.round() as i64)
    } else {
        let s = format!("{value:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Emit horizontal numeric tick labels along the left edge of `area`.
pub(crate) fn svg_y_ticks(svg: &mut SvgEncoder, area: Rect, lo: f32, hi: f32, ticks: &TickStyle) {
    if hi <= lo {
        return;
    }
    for value in nice_ticks(lo, hi, 4) {
        let y = area.bottom() - (value - lo) / (hi - lo) * area.height;
        svg.line(area.x - 4.0, y, area.x, y, Rgba::AXIS);
        svg.text(
            area.x - 6.0,
            y + ticks.font_size / 3.0,
            &format_tick(value),
            ticks.font_size,
            TextAnchor::End,
        );
    }
}

/// Emit an x tick label at `x`, honouring the rotation in `ticks`.
pub(crate) fn svg_x_tick(svg: &mut SvgEncoder, area: Rect, x: f32, label: &str, ticks: &TickStyle) {
    svg.line(x, area.bottom(), x, area.bottom() + 4.0, Rgba::AXIS);
    let rotated = ticks.x_rotation.abs() > f32::EPSILON;
    let y = area.bottom() + 6.0 + ticks.font_size;
    svg.add_element(SvgElement::Text {
        x,
        y,
        text: label.to_string(),
        font_size: ticks.font_size,
        // Rotated labels hang down from the axis, ending at the tick
        anchor: if rotated { TextAnchor::End } else { TextAnchor::Middle },
        bold: false,
        rotate: if rotated { -ticks.x_rotation } else { 0.0 },
    });
}
