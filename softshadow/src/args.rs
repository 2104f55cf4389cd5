//! Dp-denominated shadow arguments for component code.
//!
//! ## Usage
//!
//! Build a [`ShadowArgs`] where a component declares its shadow, then turn it
//! into a pixel-space [`ShadowRequest`] (or a plan) at render time.
//!
//! ```
//! use softshadow::{Color, Dp, ShadowArgs};
//!
//! let card = ShadowArgs::elevation(Dp(8.0)).color(Color::BLACK).y(Dp(2.0));
//! let request = card.to_request_with_scale(1.0);
//! assert_eq!(request.radius, 8.0);
//! assert_eq!(request.offset_y, 2.0);
//! ```

use crate::{
    color::Color,
    dp::{self, Dp},
    paint::{Paint, UnitPoint},
    planner::{DEFAULT_OPACITY, DEFAULT_RADIUS, ShadowMode, ShadowPlan, ShadowRequest, plan_with},
    profile::LayerProfile,
};

/// Elevation used when none is given.
pub const DEFAULT_ELEVATION: Dp = Dp(4.0);

/// Opacity of a plain soft shadow when none is given.
pub const SOFT_SHADOW_OPACITY: f32 = 0.2;

/// Arguments for a layered shadow.
#[derive(PartialEq, Clone, Debug)]
pub struct ShadowArgs {
    /// Fill of the shadow.
    pub paint: Paint,
    /// Blur radius, or elevation in [`ShadowMode::ElevationDerived`].
    pub radius: Dp,
    /// Opacity of every layer.
    pub opacity: f32,
    /// Horizontal offset.
    pub x: Dp,
    /// Vertical offset.
    pub y: Dp,
    /// Interpretation of `radius` and the offsets.
    pub mode: ShadowMode,
    /// Layering rules.
    pub profile: LayerProfile,
}

impl Default for ShadowArgs {
    fn default() -> Self {
        Self {
            paint: Paint::Solid(Color::BLACK),
            radius: Dp::ZERO,
            opacity: SOFT_SHADOW_OPACITY,
            x: Dp::ZERO,
            y: Dp::ZERO,
            mode: ShadowMode::FixedFractions,
            profile: LayerProfile::default(),
        }
    }
}

impl ShadowArgs {
    /// Creates a black soft shadow with the given blur radius.
    pub fn new(radius: Dp) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }

    /// Creates a black soft shadow with no radius; set one with
    /// [`ShadowArgs::radius`].
    pub fn soft() -> Self {
        Self::default()
    }

    /// Creates an elevation-based shadow.
    pub fn elevation(elevation: Dp) -> Self {
        Self {
            radius: elevation,
            opacity: DEFAULT_OPACITY,
            mode: ShadowMode::ElevationDerived,
            ..Default::default()
        }
    }

    /// Creates a gradient shadow.
    pub fn gradient(paint: Paint) -> Self {
        Self {
            paint,
            radius: Dp(DEFAULT_RADIUS as f64),
            opacity: DEFAULT_OPACITY,
            ..Default::default()
        }
    }

    /// Creates a gradient shadow running from the top-leading to the
    /// bottom-trailing corner through `colors`.
    pub fn colorful_gradient(colors: impl IntoIterator<Item = Color>) -> Self {
        Self::gradient(Paint::linear(
            colors,
            UnitPoint::TOP_LEADING,
            UnitPoint::BOTTOM_TRAILING,
        ))
    }

    /// Sets the paint.
    pub fn paint(mut self, paint: impl Into<Paint>) -> Self {
        self.paint = paint.into();
        self
    }

    /// Sets a solid color.
    pub fn color(mut self, color: Color) -> Self {
        self.paint = Paint::Solid(color);
        self
    }

    /// Sets the radius (or elevation).
    pub fn radius(mut self, radius: Dp) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the opacity.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets both offsets.
    pub fn offset(mut self, x: Dp, y: Dp) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets the horizontal offset.
    pub fn x(mut self, x: Dp) -> Self {
        self.x = x;
        self
    }

    /// Sets the vertical offset.
    pub fn y(mut self, y: Dp) -> Self {
        self.y = y;
        self
    }

    /// Sets the layer profile.
    pub fn profile(mut self, profile: LayerProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Converts to a pixel-space request using the global scale factor.
    pub fn to_request(&self) -> ShadowRequest {
        self.to_request_with_scale(dp::scale_factor())
    }

    /// Converts to a pixel-space request using an explicit scale factor.
    pub fn to_request_with_scale(&self, scale_factor: f64) -> ShadowRequest {
        ShadowRequest {
            paint: self.paint.clone(),
            radius: self.radius.to_pixels_with_scale(scale_factor),
            opacity: self.opacity,
            offset_x: self.x.to_pixels_with_scale(scale_factor),
            offset_y: self.y.to_pixels_with_scale(scale_factor),
            mode: self.mode,
        }
    }

    /// Plans the shadow using the global scale factor.
    pub fn plan(&self) -> ShadowPlan {
        plan_with(&self.to_request(), &self.profile)
    }

    /// Plans the shadow using an explicit scale factor.
    pub fn plan_with_scale(&self, scale_factor: f64) -> ShadowPlan {
        plan_with(&self.to_request_with_scale(scale_factor), &self.profile)
    }
}

impl From<Dp> for ShadowArgs {
    fn from(elevation: Dp) -> Self {
        Self::elevation(elevation)
    }
}

impl From<&ShadowArgs> for ShadowRequest {
    fn from(args: &ShadowArgs) -> Self {
        args.to_request()
    }
}
