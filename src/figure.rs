//! Multi-panel figure produced by the EDA plotting functions.
//!
//! A [`Figure`] owns its [`GridLayout`] and the panels placed on it. Nothing
//! is rasterised until the figure is rendered, saved or displayed, so callers
//! can inspect panel titles, labels and chart data directly.

use std::path::Path;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::layout::{GridLayout, GridSlot};
use crate::output::{PngEncoder, SvgEncoder};
use crate::plots::Panel;

/// Pixels per figure unit when none is given.
pub const DEFAULT_DPI: f32 = 100.0;

/// A grid of chart panels.
#[derive(Debug, Clone)]
pub struct Figure {
    layout: GridLayout,
    panels: Vec<Panel>,
    dpi: f32,
}

impl Figure {
    /// Empty figure over `layout`.
    #[must_use]
    pub fn new(layout: GridLayout) -> Self {
        Self {
            layout,
            panels: Vec::new(),
            dpi: DEFAULT_DPI,
        }
    }

    /// Set the output resolution in pixels per figure unit.
    #[must_use]
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = if dpi.is_finite() && dpi > 0.0 { dpi } else { DEFAULT_DPI };
        self
    }

    /// Add a panel. Slots are not checked for overlap.
    pub fn push_panel(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    /// Grid the panels sit on.
    #[must_use]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Output resolution.
    #[must_use]
    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Panels in insertion order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Number of drawn panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Panel occupying `slot`, if any.
    #[must_use]
    pub fn panel_at(&self, slot: GridSlot) -> Option<&Panel> {
        self.panels.iter().find(|p| p.slot() == slot)
    }

    /// Pixel size at the current resolution.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        self.layout.pixel_size(self.dpi)
    }

    fn cell(&self, slot: GridSlot) -> Rect {
        let (w, h) = self.pixel_size();
        let cell_w = w as f32 / self.layout.cols() as f32;
        let cell_h = h as f32 / self.layout.rows() as f32;
        Rect::new(slot.col as f32 * cell_w, slot.row as f32 * cell_h, cell_w, cell_h)
    }

    /// Rasterise every panel onto a white framebuffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the figure has no pixels.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let (w, h) = self.pixel_size();
        let mut fb = Framebuffer::new(w, h)?;
        fb.clear(Rgba::WHITE);
        for panel in &self.panels {
            panel.render(&mut fb, self.cell(panel.slot()), self.dpi);
        }
        Ok(fb)
    }

    /// Vector rendering with titles, axis labels and tick labels.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let (w, h) = self.pixel_size();
        let mut svg = SvgEncoder::new(w, h);
        for panel in &self.panels {
            panel.to_svg(&mut svg, self.cell(panel.slot()), self.dpi);
        }
        svg
    }

    /// Write the figure, choosing the format from the file extension
    /// (`png` or `svg`, case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for other extensions, or the
    /// encoder's error if writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "png" => self.save_png(path),
            "svg" => self.save_svg(path),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Rasterise and write a PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let fb = self.to_framebuffer()?;
        PngEncoder::write_to_file(&fb, path)
    }

    /// Write an SVG document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_svg().write_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::{Chart, CountBar, Histogram, Scatter};
    use tempfile::TempDir;

    fn figure() -> Figure {
        let layout = GridLayout::plan(2, 5).unwrap();
        let mut fig = Figure::new(layout).with_dpi(20.0);
        fig.push_panel(Panel::new(
            layout.slot(0),
            "a distribution",
            Chart::Histogram(Histogram::from_values(&[1.0, 2.0, 3.0], 20)),
        ));
        fig.push_panel(Panel::new(
            layout.slot(1),
            "b distribution",
            Chart::CountBar(CountBar::new(vec![("x".to_string(), 3)])),
        ));
        fig
    }

    #[test]
    fn test_pixel_size_follows_layout() {
        // 20 x 5 units at 20 px per unit
        assert_eq!(figure().pixel_size(), (400, 100));
    }

    #[test]
    fn test_panel_lookup() {
        let fig = figure();
        assert_eq!(fig.panel_count(), 2);
        let panel = fig.panel_at(GridSlot { row: 0, col: 1 }).unwrap();
        assert_eq!(panel.title(), "b distribution");
        assert!(fig.panel_at(GridSlot { row: 0, col: 2 }).is_none());
    }

    #[test]
    fn test_invalid_dpi_falls_back() {
        let fig = figure().with_dpi(0.0);
        assert!((fig.dpi() - DEFAULT_DPI).abs() < f32::EPSILON);
    }

    #[test]
    fn test_framebuffer_matches_size() {
        let fig = figure().with_dpi(100.0);
        let fb = fig.to_framebuffer().unwrap();
        assert_eq!((fb.width(), fb.height()), (2000, 500));
        assert!(fb.count_color(Rgba::STEEL_BLUE) > 0);
    }

    #[test]
    fn test_save_by_extension() {
        let dir = TempDir::new().unwrap();
        let fig = figure().with_dpi(100.0);

        let png = dir.path().join("fig.PNG");
        fig.save(&png).unwrap();
        assert!(std::fs::read(&png).unwrap().starts_with(&[0x89, b'P', b'N', b'G']));

        let svg = dir.path().join("fig.svg");
        fig.save(&svg).unwrap();
        let text = std::fs::read_to_string(&svg).unwrap();
        assert!(text.contains("a distribution"));
    }

    #[test]
    fn test_svg_narrow_range_at_large_magnitude() {
        // Epoch-second timestamps two minutes apart
        let stamps = [1.7e9, 1.7e9 + 64.0, 1.7e9 + 128.0];
        let layout = GridLayout::plan(2, 5).unwrap();
        let mut fig = Figure::new(layout).with_dpi(20.0);
        fig.push_panel(Panel::new(
            layout.slot(0),
            "ts distribution",
            Chart::Histogram(Histogram::from_values(&stamps, 20)),
        ));
        let rows: Vec<Option<f32>> = stamps.iter().copied().map(Some).collect();
        fig.push_panel(Panel::new(
            layout.slot(1),
            "Target vs. ts",
            Chart::Scatter(Scatter::from_rows(&rows, &rows)),
        ));

        let svg = fig.to_svg().render();
        assert!(svg.contains("ts distribution"));
        assert!(svg.contains("Target vs. ts"));
        assert!(fig.to_framebuffer().is_ok());
    }

    #[test]
    fn test_save_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let result = figure().save(dir.path().join("fig.jpg"));
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
