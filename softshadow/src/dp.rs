//! # Density-Independent Pixels (Dp)
//!
//! Shadow arguments are usually authored in dp so that an elevation of
//! `Dp(8.0)` reads the same on a low-DPI laptop and a high-DPI phone. The
//! planner itself works in physical pixels; [`Dp::to_pixels_f32`] bridges the
//! two using the global [`SCALE_FACTOR`].
//!
//! ## Usage
//!
//! ```
//! use softshadow::Dp;
//!
//! let elevation = Dp(8.0);
//! let pixels = elevation.to_pixels_with_scale(2.0);
//! assert_eq!(pixels, 16.0);
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

/// Global scale factor for converting between density-independent pixels and physical pixels.
///
/// The scale factor represents how many physical pixels correspond to one dp unit.
/// When it has never been set, conversions use `1.0`.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Sets the global scale factor, initializing it on first use.
pub fn set_scale_factor(scale_factor: f64) {
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(scale_factor));
    *lock.write() = scale_factor;
}

/// Reads the global scale factor, defaulting to `1.0`.
pub fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Density-independent pixels (dp) for UI scaling.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dp(pub f64);

impl Dp {
    /// A zero-length dp value.
    pub const ZERO: Dp = Dp(0.0);

    /// Creates a new `Dp` instance with the specified value.
    ///
    /// ```
    /// use softshadow::Dp;
    ///
    /// const CARD_ELEVATION: Dp = Dp::new(4.0);
    /// assert_eq!(CARD_ELEVATION.0, 4.0);
    /// ```
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Converts this dp value to physical pixels using the global scale factor.
    pub fn to_pixels_f32(&self) -> f32 {
        self.to_pixels_with_scale(scale_factor())
    }

    /// Converts this dp value to physical pixels using an explicit scale factor.
    pub fn to_pixels_with_scale(&self, scale_factor: f64) -> f32 {
        (self.0 * scale_factor) as f32
    }

    /// Creates a `Dp` value from physical pixels using the global scale factor.
    pub fn from_pixels_f32(value: f32) -> Self {
        Self::from_pixels_with_scale(value, scale_factor())
    }

    /// Creates a `Dp` value from physical pixels using an explicit scale factor.
    pub fn from_pixels_with_scale(value: f32, scale_factor: f64) -> Self {
        Dp((value as f64) / scale_factor)
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp(value)
    }
}

impl From<f32> for Dp {
    fn from(value: f32) -> Self {
        Dp(value as f64)
    }
}
