//! SVG output encoder.
//!
//! Vector output is the only format that carries panel titles, axis labels and
//! rotated tick labels; the raster path draws marks only.

use crate::color::Rgba;
use crate::error::Result;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

/// SVG document under construction.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Option<Rgba>,
    },
    /// Circle
    Circle { cx: f32, cy: f32, r: f32, fill: Rgba },
    /// Line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
    },
    /// Closed polygon
    Polygon {
        points: Vec<(f32, f32)>,
        fill: Rgba,
        stroke: Rgba,
    },
    /// Text, optionally rotated (degrees, clockwise) about its anchor point
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        anchor: TextAnchor,
        bold: bool,
        rotate: f32,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

impl SvgEncoder {
    /// Create a new SVG document with a white background.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            elements: Vec::new(),
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Add a filled rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) {
        self.add_element(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke: None,
        });
    }

    /// Add a one-pixel rectangle outline with no fill.
    pub fn frame(&mut self, x: f32, y: f32, width: f32, height: f32, stroke: Rgba) {
        self.add_element(SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill: Rgba::TRANSPARENT,
            stroke: Some(stroke),
        });
    }

    /// Add a filled circle.
    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, fill: Rgba) {
        self.add_element(SvgElement::Circle { cx, cy, r, fill });
    }

    /// Add a line.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba) {
        self.add_element(SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        });
    }

    /// Add a filled polygon.
    pub fn polygon(&mut self, points: Vec<(f32, f32)>, fill: Rgba, stroke: Rgba) {
        self.add_element(SvgElement::Polygon {
            points,
            fill,
            stroke,
        });
    }

    /// Add unrotated text.
    pub fn text(&mut self, x: f32, y: f32, text: &str, font_size: f32, anchor: TextAnchor) {
        self.add_element(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            anchor,
            bold: false,
            rotate: 0.0,
        });
    }

    /// Render to an SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(256 + self.elements.len() * 96);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let fill_attr = if fill.a == 0 {
                "none".to_string()
            } else {
                fill.to_css()
            };
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}" stroke-width="1""#, s.to_css()))
                .unwrap_or_default();
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{fill_attr}"{stroke_attr}/>"#
            )
        }
        SvgElement::Circle { cx, cy, r, fill } => {
            format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#, fill.to_css())
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
        } => format!(
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="1"/>"#,
            stroke.to_css()
        ),
        SvgElement::Polygon {
            points,
            fill,
            stroke,
        } => {
            let points_str = points
                .iter()
                .map(|(x, y)| format!("{x},{y}"))
                .collect::<Vec<_>>()
                .join(" ");
            format!(
                r#"<polygon points="{points_str}" fill="{}" stroke="{}" stroke-width="1"/>"#,
                fill.to_css(),
                stroke.to_css()
            )
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            anchor,
            bold,
            rotate,
        } => {
            let weight = if *bold { r#" font-weight="bold""# } else { "" };
            let transform = if rotate.abs() > f32::EPSILON {
                format!(r#" transform="rotate({rotate} {x} {y})""#)
            } else {
                String::new()
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="rgb(0,0,0)" text-anchor="{}" font-family="sans-serif"{weight}{transform}>{}</text>"#,
                anchor.as_str(),
                escape_xml(text)
            )
        }
    }
}
