//! RGBA color values shared by solid and gradient shadow paints.

use bytemuck::{Pod, Zeroable};

/// A linear RGBA color, each channel typically within `[0.0, 1.0]`.
///
/// The layout is `#[repr(C)]` so a renderer can upload a shadow color as-is.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    pub const PURPLE: Color = Color::new(0.5, 0.0, 0.5, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a color from 8-bit channels, as parsed from `#rrggbbaa`.
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from([r, g, b, a].map(|channel| channel as f32 / 255.0))
    }

    /// Returns the same color with its alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Returns the same color with its alpha multiplied by `factor`.
    ///
    /// Shadow layers use this to fold their opacity into a flat fill.
    #[inline]
    pub fn multiply_alpha(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Shadows default to opaque black.
impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_channels() {
        let color = Color::from_rgba_u8(255, 0, 51, 128);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 0.2).abs() < 1e-6);
        assert!((color.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(Color::from(color.to_array()), color);
    }

    #[test]
    fn test_alpha_helpers() {
        let color = Color::BLACK.with_alpha(0.5);
        assert_eq!(color, Color::new(0.0, 0.0, 0.0, 0.5));
        assert_eq!(color.multiply_alpha(0.5).a, 0.25);
    }

    #[test]
    fn test_default_is_black() {
        assert_eq!(Color::default(), Color::BLACK);
        let bytes: &[u8] = bytemuck::bytes_of(&Color::BLACK);
        assert_eq!(bytes.len(), 16);
    }
}
