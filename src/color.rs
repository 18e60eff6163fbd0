//! Color types and the categorical palette used by EDA panels.

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Axis frame grey.
    pub const AXIS: Self = Self::new(80, 80, 80, 255);
    /// Steel blue, the default single-series fill.
    pub const STEEL_BLUE: Self = Self::new(76, 114, 176, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Create a color with alpha given as an opacity in `0.0..=1.0`.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        self.with_alpha((opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// CSS color string (`rgb(..)` when opaque, `rgba(..)` otherwise).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

/// Ten-color qualitative palette, one color per category.
pub const CATEGORY_PALETTE: [Rgba; 10] = [
    Rgba::rgb(76, 114, 176),
    Rgba::rgb(221, 132, 82),
    Rgba::rgb(85, 168, 104),
    Rgba::rgb(196, 78, 82),
    Rgba::rgb(129, 114, 179),
    Rgba::rgb(147, 120, 96),
    Rgba::rgb(218, 139, 195),
    Rgba::rgb(140, 140, 140),
    Rgba::rgb(204, 185, 116),
    Rgba::rgb(100, 181, 205),
];

/// Palette color for the `index`-th category, cycling past the end.
#[must_use]
pub fn category_color(index: usize) -> Rgba {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_array_roundtrip() {
        let c = Rgba::new(1, 2, 3, 4);
        assert_eq!(Rgba::from_array(c.to_array()), c);
    }

    #[test]
    fn test_with_opacity() {
        assert_eq!(Rgba::BLACK.with_opacity(0.3).a, 77);
        assert_eq!(Rgba::BLACK.with_opacity(2.0).a, 255);
    }

    #[test]
    fn test_css() {
        assert_eq!(Rgba::rgb(10, 20, 30).to_css(), "rgb(10,20,30)");
        assert!(Rgba::new(10, 20, 30, 0).to_css().starts_with("rgba("));
    }

    #[test]
    fn test_category_color_cycles() {
        assert_eq!(category_color(0), category_color(10));
        assert_ne!(category_color(0), category_color(1));
    }
}
