//! Per-category violin chart of a numeric target.
//!
//! Each violin is a Gaussian kernel density estimate of the target values in
//! one category, mirrored around the band centre and scaled so the densest
//! point fills the violin width. The inner bar spans the interquartile range
//! with a dot at the median.

use super::{svg_x_tick, svg_y_ticks, ChartRender, TickStyle};
use crate::color::{category_color, Rgba};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::SvgEncoder;
use crate::render::{draw_disc, draw_line};
use crate::scale::{BandScale, LinearScale, Scale};

/// Number of points on each density curve.
const KDE_POINTS: usize = 50;

/// Fraction of each band the widest violin may use.
const VIOLIN_FILL: f32 = 0.8;

/// First quartile, median and third quartile of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    /// 25th percentile.
    pub q1: f32,
    /// 50th percentile.
    pub median: f32,
    /// 75th percentile.
    pub q3: f32,
}

impl Quartiles {
    /// Quartiles of the finite values in `data`, `None` if there are none.
    #[must_use]
    pub fn from_data(data: &[f32]) -> Option<Self> {
        let mut sorted: Vec<f32> = data.iter().copied().filter(|x| x.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f32::total_cmp);

        Some(Self {
            q1: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            q3: percentile(&sorted, 75.0),
        })
    }
}

/// Linear-interpolated percentile of sorted, non-empty data.
fn percentile(sorted: &[f32], p: f32) -> f32 {
    if sorted.len() == 1 {
        return sorted[0];
    }

    let k = (p / 100.0) * (sorted.len() - 1) as f32;
    let f = k.floor() as usize;
    let c = (k.ceil() as usize).min(sorted.len() - 1);
    let d = k - f as f32;
    sorted[f] * (1.0 - d) + sorted[c] * d
}

/// Gaussian KDE over the finite values, `(value, density)` with the peak
/// density normalised to 1. A constant sample yields a single point.
fn kernel_density(data: &[f32], n_points: usize) -> Vec<(f32, f32)> {
    let clean: Vec<f32> = data.iter().copied().filter(|x| x.is_finite()).collect();
    if clean.is_empty() {
        return Vec::new();
    }

    let min = clean.iter().copied().fold(f32::MAX, f32::min);
    let max = clean.iter().copied().fold(f32::MIN, f32::max);
    let range = max - min;
    if range <= f32::EPSILON {
        return vec![(min, 1.0)];
    }

    let n = clean.len() as f32;
    let mean = clean.iter().sum::<f32>() / n;
    let std_dev = (clean.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / n).sqrt();
    // Silverman's rule, floored at 1% of the range
    let h = (1.06 * std_dev * n.powf(-0.2)).max(range * 0.01);

    let lo = min - range * 0.1;
    let hi = max + range * 0.1;
    let step = (hi - lo) / (n_points - 1) as f32;

    let mut curve: Vec<(f32, f32)> = (0..n_points)
        .map(|i| {
            let x = lo + i as f32 * step;
            let density = clean
                .iter()
                .map(|&xi| {
                    let u = (x - xi) / h;
                    (-0.5 * u * u).exp()
                })
                .sum::<f32>();
            (x, density)
        })
        .collect();

    let peak = curve.iter().map(|&(_, d)| d).fold(0.0f32, f32::max);
    if peak > 0.0 {
        for point in &mut curve {
            point.1 /= peak;
        }
    }
    curve
}

/// Target values for one category.
#[derive(Debug, Clone)]
pub struct ViolinGroup {
    label: String,
    samples: Vec<f32>,
    kde: Vec<(f32, f32)>,
    quartiles: Option<Quartiles>,
}

impl ViolinGroup {
    /// Summarise `samples` under `label`.
    #[must_use]
    pub fn new(label: impl Into<String>, samples: Vec<f32>) -> Self {
        let kde = kernel_density(&samples, KDE_POINTS);
        let quartiles = Quartiles::from_data(&samples);
        Self {
            label: label.into(),
            samples,
            kde,
            quartiles,
        }
    }

    /// Category label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Target values in this category.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Normalised density curve.
    #[must_use]
    pub fn density(&self) -> &[(f32, f32)] {
        &self.kde
    }

    /// Quartiles, `None` for an empty category.
    #[must_use]
    pub fn quartiles(&self) -> Option<Quartiles> {
        self.quartiles
    }
}

/// One violin per category, in category order.
#[derive(Debug, Clone)]
pub struct Violin {
    groups: Vec<ViolinGroup>,
    outline: Rgba,
}

impl Violin {
    /// Build from already grouped samples.
    #[must_use]
    pub fn from_groups(groups: Vec<(String, Vec<f32>)>) -> Self {
        Self {
            groups: groups
                .into_iter()
                .map(|(label, samples)| ViolinGroup::new(label, samples))
                .collect(),
            outline: Rgba::AXIS,
        }
    }

    /// Group `values` by the row-aligned `labels`, one group per entry of
    /// `categories`. Rows whose label or value is missing, or whose label is
    /// not a listed category, are dropped.
    #[must_use]
    pub fn from_rows(
        categories: &[String],
        labels: &[Option<String>],
        values: &[Option<f32>],
    ) -> Self {
        let mut grouped: Vec<(String, Vec<f32>)> =
            categories.iter().map(|c| (c.clone(), Vec::new())).collect();

        for (label, value) in labels.iter().zip(values) {
            let (Some(label), Some(value)) = (label, value) else {
                continue;
            };
            if let Some((_, samples)) = grouped.iter_mut().find(|(c, _)| c == label) {
                samples.push(*value);
            }
        }

        Self::from_groups(grouped)
    }

    /// The groups in drawing order.
    #[must_use]
    pub fn groups(&self) -> &[ViolinGroup] {
        &self.groups
    }

    fn value_scale(&self, area: Rect) -> Option<LinearScale> {
        let values: Vec<f32> = self
            .groups
            .iter()
            .flat_map(|g| g.kde.iter().map(|&(v, _)| v))
            .collect();
        LinearScale::from_data(&values, (area.bottom(), area.y), 0.05)
    }

    fn bands(&self, area: Rect) -> BandScale {
        BandScale::new(self.groups.len(), (area.x, area.right()))
    }

    /// Outline of one violin as a closed polygon: right side bottom to top,
    /// then left side top to bottom.
    fn outline_points(
        group: &ViolinGroup,
        center: f32,
        half_width: f32,
        ys: &LinearScale,
    ) -> Vec<(f32, f32)> {
        let right = group
            .kde
            .iter()
            .map(|&(v, d)| (center + d * half_width, ys.scale(v)));
        let left = group
            .kde
            .iter()
            .rev()
            .map(|&(v, d)| (center - d * half_width, ys.scale(v)));
        right.chain(left).collect()
    }
}

impl ChartRender for Violin {
    fn render(&self, fb: &mut Framebuffer, area: Rect) {
        let Some(ys) = self.value_scale(area) else {
            return;
        };
        let bands = self.bands(area);
        let half_width = bands.bandwidth() * VIOLIN_FILL / 2.0;

        for (i, group) in self.groups.iter().enumerate() {
            let center = bands.scale(i);
            let fill = category_color(i);

            if let [(value, _)] = group.kde.as_slice() {
                let y = ys.scale(*value).round() as i32;
                let (left, right) = ((center - half_width) as i32, (center + half_width) as i32);
                draw_line(fb, left, y, right, y, fill);
            }

            for pair in group.kde.windows(2) {
                let (v1, d1) = pair[0];
                let (v2, d2) = pair[1];
                let (y1, y2) = (ys.scale(v1), ys.scale(v2));
                let (top, bottom) = (y1.min(y2).round() as i32, y1.max(y2).round() as i32);

                // Fill scanlines, interpolating the width between the two points
                for py in top..=bottom {
                    let t = if bottom == top {
                        0.5
                    } else {
                        (py as f32 - y1.round()) / (y2.round() - y1.round())
                    };
                    let w = (d1 * (1.0 - t) + d2 * t) * half_width;
                    let (left, right) = ((center - w).round() as i32, (center + w).round() as i32);
                    draw_line(fb, left, py, right, py, fill);
                }
            }

            if let Some(q) = group.quartiles {
                let cx = center.round() as i32;
                draw_line(
                    fb,
                    cx,
                    ys.scale(q.q3).round() as i32,
                    cx,
                    ys.scale(q.q1).round() as i32,
                    self.outline,
                );
                draw_disc(fb, center, ys.scale(q.median), 2.5, Rgba::WHITE);
            }
        }
    }

    fn to_svg(&self, svg: &mut SvgEncoder, area: Rect, ticks: &TickStyle) {
        let Some(ys) = self.value_scale(area) else {
            return;
        };
        let bands = self.bands(area);
        let half_width = bands.bandwidth() * VIOLIN_FILL / 2.0;

        for (i, group) in self.groups.iter().enumerate() {
            let center = bands.scale(i);
            if group.kde.len() > 1 {
                let points = Self::outline_points(group, center, half_width, &ys);
                svg.polygon(points, category_color(i), self.outline);
            } else if let [(value, _)] = group.kde.as_slice() {
                let y = ys.scale(*value);
                svg.line(center - half_width, y, center + half_width, y, category_color(i));
            }

            if let Some(q) = group.quartiles {
                svg.line(center, ys.scale(q.q3), center, ys.scale(q.q1), self.outline);
                svg.circle(center, ys.scale(q.median), 2.5, Rgba::WHITE);
            }
            svg_x_tick(svg, area, center, &group.label, ticks);
        }

        let (lo, hi) = ys.domain();
        svg_y_ticks(svg, area, lo, hi, ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn labels(raw: &[Option<&str>]) -> Vec<Option<String>> {
        raw.iter().map(|l| l.map(str::to_string)).collect()
    }

    #[test]
    fn test_quartiles() {
        let q = Quartiles::from_data(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
        assert_relative_eq!(q.q1, 3.0);
        assert_relative_eq!(q.median, 5.0);
        assert_relative_eq!(q.q3, 7.0);
    }

    #[test]
    fn test_quartiles_interpolate() {
        let q = Quartiles::from_data(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(q.median, 2.5);
    }

    #[test]
    fn test_quartiles_empty() {
        assert!(Quartiles::from_data(&[]).is_none());
        assert!(Quartiles::from_data(&[f32::NAN]).is_none());
    }

    #[test]
    fn test_density_peak_is_one() {
        let curve = kernel_density(&[1.0, 2.0, 2.0, 3.0], KDE_POINTS);
        assert_eq!(curve.len(), KDE_POINTS);
        let peak = curve.iter().map(|p| p.1).fold(0.0f32, f32::max);
        assert_relative_eq!(peak, 1.0);
    }

    #[test]
    fn test_density_constant_sample() {
        assert_eq!(kernel_density(&[4.0, 4.0], KDE_POINTS), vec![(4.0, 1.0)]);
    }

    #[test]
    fn test_from_rows_groups_by_category() {
        let categories = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let violin = Violin::from_rows(
            &categories,
            &labels(&[Some("a"), Some("b"), None, Some("a"), Some("z")]),
            &[Some(1.0), Some(2.0), Some(3.0), None, Some(5.0)],
        );

        let groups = violin.groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].label(), "a");
        assert_eq!(groups[0].samples(), &[1.0]);
        assert_eq!(groups[1].samples(), &[2.0]);
        assert!(groups[2].samples().is_empty());
        assert!(groups[2].quartiles().is_none());
    }

    #[test]
    fn test_render_fills_each_group() {
        let violin = Violin::from_groups(vec![
            ("a".to_string(), vec![1.0, 2.0, 2.5, 3.0]),
            ("b".to_string(), vec![4.0, 5.0, 5.5, 6.0]),
        ]);
        let mut fb = Framebuffer::new(200, 200).unwrap();
        fb.clear(Rgba::WHITE);
        violin.render(&mut fb, Rect::new(0.0, 0.0, 200.0, 200.0));

        assert!(fb.count_color(category_color(0)) > 0);
        assert!(fb.count_color(category_color(1)) > 0);
    }

    #[test]
    fn test_svg_polygons_and_labels() {
        let violin = Violin::from_groups(vec![
            ("low".to_string(), vec![1.0, 2.0, 3.0]),
            ("high".to_string(), vec![7.0, 8.0, 9.0]),
        ]);
        let mut svg = SvgEncoder::new(300, 300);
        let ticks = TickStyle {
            font_size: 10.0,
            x_rotation: 90.0,
        };
        violin.to_svg(&mut svg, Rect::new(40.0, 20.0, 240.0, 200.0), &ticks);

        let out = svg.render();
        assert_eq!(out.matches("<polygon").count(), 2);
        assert!(out.contains(">low</text>"));
        assert!(out.contains(">high</text>"));
    }

    #[test]
    fn test_empty_violin_draws_nothing() {
        let violin = Violin::from_groups(Vec::new());
        let mut fb = Framebuffer::new(20, 20).unwrap();
        fb.clear(Rgba::WHITE);
        violin.render(&mut fb, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(fb.count_color(Rgba::WHITE), 400);
    }
}
