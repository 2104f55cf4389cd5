//! Layered shadow planning.
//!
//! ## Usage
//!
//! Expand one [`ShadowRequest`] into the [`LAYER_COUNT`] layers a renderer
//! draws beneath the content. Planning is a pure function of the request and
//! the [`LayerProfile`]; it never fails and keeps no state.
//!
//! ```
//! use softshadow::{Color, ShadowRequest, plan};
//!
//! let request = ShadowRequest::new(Color::BLACK, 16.0, 0.25);
//! let radii: Vec<f32> = plan(&request).iter().map(|layer| layer.radius).collect();
//! assert_eq!(radii, vec![1.0, 2.0, 4.0, 8.0, 16.0]);
//! ```

use tracing::{debug, trace};

use crate::{
    error::ShadowError,
    paint::Paint,
    profile::{LAYER_COUNT, LayerProfile, OffsetScaling},
};

/// Offset magnitude, in pixels, at which the dynamic radius multiplier has
/// grown by [`OFFSET_RADIUS_GAIN`].
pub const OFFSET_REFERENCE: f32 = 32.0;

/// Multiplier growth per [`OFFSET_REFERENCE`] pixels of offset.
pub const OFFSET_RADIUS_GAIN: f32 = 0.5;

/// Largest elevation that still reads as a plausible material depth.
pub const MAX_RECOMMENDED_ELEVATION: f32 = 24.0;

/// Default blur radius, in pixels.
pub const DEFAULT_RADIUS: f32 = 8.0;

/// Default layer opacity.
pub const DEFAULT_OPACITY: f32 = 0.25;

/// How the request's radius and offsets are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShadowMode {
    /// The radius is a blur radius and offsets are used as given.
    #[default]
    FixedFractions,
    /// The radius is an elevation; every non-zero offset axis is pushed by
    /// half the elevation.
    ElevationDerived,
}

/// A single shadow to be expanded into layers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowRequest {
    /// Fill of every layer; passed through untouched.
    pub paint: Paint,
    /// Blur radius, or elevation in [`ShadowMode::ElevationDerived`]. Negative
    /// values are treated as zero.
    pub radius: f32,
    /// Opacity applied to every layer. Not range checked.
    pub opacity: f32,
    /// Horizontal offset in pixels.
    pub offset_x: f32,
    /// Vertical offset in pixels.
    pub offset_y: f32,
    /// Interpretation of `radius` and the offsets.
    pub mode: ShadowMode,
}

impl Default for ShadowRequest {
    fn default() -> Self {
        Self::new(Paint::default(), DEFAULT_RADIUS, DEFAULT_OPACITY)
    }
}

impl ShadowRequest {
    /// Creates an unshifted request in [`ShadowMode::FixedFractions`].
    pub fn new(paint: impl Into<Paint>, radius: f32, opacity: f32) -> Self {
        Self {
            paint: paint.into(),
            radius,
            opacity,
            offset_x: 0.0,
            offset_y: 0.0,
            mode: ShadowMode::FixedFractions,
        }
    }

    /// Creates an unshifted request in [`ShadowMode::ElevationDerived`].
    pub fn elevation(paint: impl Into<Paint>, elevation: f32, opacity: f32) -> Self {
        Self {
            mode: ShadowMode::ElevationDerived,
            ..Self::new(paint, elevation, opacity)
        }
    }

    /// Sets the offsets.
    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    /// Sets the mode.
    pub fn mode(mut self, mode: ShadowMode) -> Self {
        self.mode = mode;
        self
    }

    /// Radius after clamping to zero. NaN is also treated as zero.
    pub fn clamped_radius(&self) -> f32 {
        self.radius.max(0.0)
    }

    /// Strict check: finite inputs, non-negative radius, opacity in `0..=1`
    /// and a well-formed gradient.
    pub fn validate(&self) -> Result<(), ShadowError> {
        let finite = |value: f32, field: &'static str| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(ShadowError::NonFinite { field })
            }
        };
        finite(self.radius, "radius")?;
        finite(self.opacity, "opacity")?;
        finite(self.offset_x, "offset_x")?;
        finite(self.offset_y, "offset_y")?;
        if self.radius < 0.0 {
            return Err(ShadowError::NegativeRadius(self.radius));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ShadowError::OpacityOutOfRange(self.opacity));
        }
        self.paint.validate()
    }
}

/// Drawing parameters of one shadow layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowLayerDescriptor {
    /// Blur radius, never negative.
    pub radius: f32,
    /// Layer opacity.
    pub opacity: f32,
    /// Horizontal offset in pixels.
    pub offset_x: f32,
    /// Vertical offset in pixels.
    pub offset_y: f32,
    /// Fill copied from the request.
    pub paint: Paint,
}

impl ShadowLayerDescriptor {
    /// Offset in the format `[x, y]`.
    pub fn offset(&self) -> [f32; 2] {
        [self.offset_x, self.offset_y]
    }
}

/// Layers of one shadow, ordered tight to wide.
pub type ShadowPlan = [ShadowLayerDescriptor; LAYER_COUNT];

/// Widening factor for a shadow offset by `(offset_x, offset_y)`.
///
/// Never less than `1.0`, so small offsets don't shrink the shadow.
///
/// ```
/// use softshadow::radius_multiplier;
///
/// assert_eq!(radius_multiplier(0.0, 0.0), 1.0);
/// assert_eq!(radius_multiplier(32.0, 0.0), 1.5);
/// ```
pub fn radius_multiplier(offset_x: f32, offset_y: f32) -> f32 {
    let magnitude = offset_x.hypot(offset_y);
    (1.0 + (magnitude / OFFSET_REFERENCE) * OFFSET_RADIUS_GAIN).max(1.0)
}

/// Offset the layers are derived from, after the elevation rule.
///
/// In [`ShadowMode::ElevationDerived`] each axis is handled on its own: an
/// axis that is exactly zero stays zero, any other value has half the
/// (clamped) elevation added to it regardless of its sign.
pub fn effective_offset(request: &ShadowRequest) -> [f32; 2] {
    match request.mode {
        ShadowMode::FixedFractions => [request.offset_x, request.offset_y],
        ShadowMode::ElevationDerived => {
            let lift = request.clamped_radius() / 2.0;
            let push = |value: f32| if value == 0.0 { 0.0 } else { value + lift };
            [push(request.offset_x), push(request.offset_y)]
        }
    }
}

/// Plans a shadow with the canonical [`LayerProfile::SOFT`] profile.
pub fn plan(request: &ShadowRequest) -> ShadowPlan {
    plan_with(request, &LayerProfile::SOFT)
}

/// Plans a shadow with an explicit profile.
pub fn plan_with(request: &ShadowRequest, profile: &LayerProfile) -> ShadowPlan {
    let base_radius = request.clamped_radius();
    if request.mode == ShadowMode::ElevationDerived && base_radius > MAX_RECOMMENDED_ELEVATION {
        debug!(
            "Elevation {base_radius} exceeds the recommended maximum of {MAX_RECOMMENDED_ELEVATION}"
        );
    }

    let [offset_x, offset_y] = effective_offset(request);
    let multiplier = if profile.dynamic_radius {
        radius_multiplier(offset_x, offset_y)
    } else {
        1.0
    };
    let last = LAYER_COUNT - 1;

    let layers: ShadowPlan = std::array::from_fn(|index| {
        let fraction = profile.fractions[index];
        let offset_fraction = match profile.offset_scaling {
            OffsetScaling::Proportional => fraction,
            OffsetScaling::Constant => 1.0,
        };
        let mut radius = (base_radius * fraction * multiplier).max(0.0);
        let mut layer_x = offset_x * offset_fraction;
        let mut layer_y = offset_y * offset_fraction;

        if index == last
            && let Some(boost) = profile.final_layer
        {
            radius = (radius * boost.radius_factor).max(0.0);
            layer_x *= boost.offset_factor;
            layer_y *= boost.offset_factor;
        }

        ShadowLayerDescriptor {
            radius,
            opacity: request.opacity,
            offset_x: layer_x,
            offset_y: layer_y,
            paint: request.paint.clone(),
        }
    });

    trace!(
        base_radius,
        multiplier,
        offset_x,
        offset_y,
        widest = layers[last].radius,
        "planned layered shadow"
    );
    layers
}

/// Plans a shadow after strictly validating both the request and the profile.
pub fn plan_strict(
    request: &ShadowRequest,
    profile: &LayerProfile,
) -> Result<ShadowPlan, ShadowError> {
    request
        .validate()
        .and_then(|()| profile.validate())
        .inspect_err(|err| debug!("Rejected shadow request: {err}"))?;
    Ok(plan_with(request, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, profile::FinalLayerBoost};

    fn radii(plan: &ShadowPlan) -> Vec<f32> {
        plan.iter().map(|layer| layer.radius).collect()
    }

    #[test]
    fn test_reference_plan() {
        let request = ShadowRequest::new(Color::BLACK, 16.0, 0.25);
        let plan = plan(&request);

        assert_eq!(plan.len(), LAYER_COUNT);
        assert_eq!(radii(&plan), vec![1.0, 2.0, 4.0, 8.0, 16.0]);
        for layer in &plan {
            assert_eq!(layer.opacity, 0.25);
            assert_eq!(layer.offset(), [0.0, 0.0]);
            assert_eq!(layer.paint, Paint::Solid(Color::BLACK));
        }
    }

    #[test]
    fn test_radii_are_non_decreasing() {
        for (x, y) in [(0.0, 0.0), (3.0, -7.0), (-40.0, 12.5)] {
            for profile in [LayerProfile::SOFT, LayerProfile::CLASSIC, LayerProfile::AMBIENT] {
                let request = ShadowRequest::new(Color::BLACK, 20.0, 0.3).offset(x, y);
                let plan = plan_with(&request, &profile);
                assert!(
                    plan.windows(2).all(|pair| pair[0].radius <= pair[1].radius),
                    "radii should grow for offset ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_negative_radius_is_clamped() {
        let negative = ShadowRequest::new(Color::BLACK, -5.0, 0.25).offset(4.0, 8.0);
        let zero = ShadowRequest::new(Color::BLACK, 0.0, 0.25).offset(4.0, 8.0);
        assert_eq!(plan(&negative), plan(&zero));
        assert!(plan(&negative).iter().all(|layer| layer.radius == 0.0));

        let nan = ShadowRequest::new(Color::BLACK, f32::NAN, 0.25);
        assert!(plan(&nan).iter().all(|layer| layer.radius == 0.0));
    }

    #[test]
    fn test_radius_multiplier() {
        assert_eq!(radius_multiplier(0.0, 0.0), 1.0);
        assert_eq!(radius_multiplier(32.0, 0.0), 1.5);
        assert_eq!(radius_multiplier(0.0, -32.0), 1.5);
        assert_eq!(radius_multiplier(64.0, 0.0), 2.0);
        assert_eq!(radius_multiplier(f32::NAN, 0.0), 1.0);
    }

    #[test]
    fn test_offset_widens_every_layer() {
        let request = ShadowRequest::new(Color::BLACK, 10.0, 0.25).offset(32.0, 0.0);
        let plan = plan(&request);
        assert_eq!(plan[LAYER_COUNT - 1].radius, 15.0);
        assert_eq!(plan[0].radius, 10.0 / 16.0 * 1.5);
        let offsets: Vec<f32> = plan.iter().map(|layer| layer.offset_x).collect();
        assert_eq!(offsets, vec![2.0, 4.0, 8.0, 16.0, 32.0]);
    }

    #[test]
    fn test_elevation_keeps_zero_offsets() {
        for elevation in [0.0, 4.0, 8.0, 48.0] {
            let request = ShadowRequest::elevation(Color::BLACK, elevation, 0.25);
            assert_eq!(effective_offset(&request), [0.0, 0.0]);
            assert!(plan(&request).iter().all(|layer| layer.offset() == [0.0, 0.0]));
        }
    }

    #[test]
    fn test_elevation_pushes_non_zero_axes() {
        let request = ShadowRequest::elevation(Color::BLACK, 8.0, 0.25).offset(2.0, 0.0);
        assert_eq!(effective_offset(&request), [6.0, 0.0]);

        let plan = plan(&request);
        let offsets: Vec<f32> = plan.iter().map(|layer| layer.offset_x).collect();
        assert_eq!(offsets, vec![0.375, 0.75, 1.5, 3.0, 6.0]);
        assert!(plan.iter().all(|layer| layer.offset_y == 0.0));
        // The pushed offset also feeds the radius multiplier.
        assert_eq!(plan[LAYER_COUNT - 1].radius, 8.0 * radius_multiplier(6.0, 0.0));

        // The push is not sign aware.
        let negative = ShadowRequest::elevation(Color::BLACK, 8.0, 0.25).offset(-2.0, 0.0);
        assert_eq!(effective_offset(&negative), [2.0, 0.0]);
    }

    #[test]
    fn test_fixed_mode_ignores_elevation_rule() {
        let request = ShadowRequest::new(Color::BLACK, 8.0, 0.25).offset(2.0, 0.0);
        assert_eq!(effective_offset(&request), [2.0, 0.0]);
    }

    #[test]
    fn test_planning_is_idempotent() {
        let request = ShadowRequest::new(Paint::default_gradient(), 12.0, 0.4).offset(-3.0, 9.0);
        assert_eq!(plan(&request), plan(&request));
        assert!(plan(&request).iter().all(|layer| layer.paint == request.paint));
    }

    #[test]
    fn test_classic_profile_keeps_offsets() {
        let request = ShadowRequest::new(Color::BLACK, 16.0, 0.075).offset(0.0, 32.0);
        let plan = plan_with(&request, &LayerProfile::CLASSIC);
        assert_eq!(radii(&plan), vec![1.0, 2.0, 4.0, 8.0, 16.0]);
        assert!(plan.iter().all(|layer| layer.offset() == [0.0, 32.0]));
    }

    #[test]
    fn test_ambient_profile_boosts_last_layer_only() {
        let request = ShadowRequest::new(Color::BLACK, 16.0, 0.25).offset(0.0, 4.0);
        let soft = plan(&request);
        let ambient = plan_with(&request, &LayerProfile::AMBIENT);

        assert_eq!(soft[..LAYER_COUNT - 1], ambient[..LAYER_COUNT - 1]);
        let last = LAYER_COUNT - 1;
        let expected = soft[last].radius * FinalLayerBoost::AMBIENT.radius_factor;
        assert!((ambient[last].radius - expected).abs() < 1e-5);
        assert_eq!(ambient[last].offset_y, 8.0);
    }

    #[test]
    fn test_permissive_inputs_pass_through() {
        let request = ShadowRequest::new(Color::BLACK, 4.0, 1.7).offset(1e6, -1e6);
        let plan = plan(&request);
        assert!(plan.iter().all(|layer| layer.opacity == 1.7));
        assert_eq!(plan[LAYER_COUNT - 1].offset(), [1e6, -1e6]);
    }

    #[test]
    fn test_plan_strict() {
        let valid = ShadowRequest::default().offset(0.0, 4.0);
        assert_eq!(
            plan_strict(&valid, &LayerProfile::SOFT),
            Ok(plan(&valid))
        );

        let negative = ShadowRequest::new(Color::BLACK, -5.0, 0.25);
        assert_eq!(
            plan_strict(&negative, &LayerProfile::SOFT),
            Err(ShadowError::NegativeRadius(-5.0))
        );

        let too_opaque = ShadowRequest::new(Color::BLACK, 5.0, 1.5);
        assert_eq!(
            plan_strict(&too_opaque, &LayerProfile::SOFT),
            Err(ShadowError::OpacityOutOfRange(1.5))
        );

        let infinite = ShadowRequest::default().offset(f32::INFINITY, 0.0);
        assert_eq!(
            plan_strict(&infinite, &LayerProfile::SOFT),
            Err(ShadowError::NonFinite { field: "offset_x" })
        );

        let bad_profile = LayerProfile::SOFT.fractions([1.0, 0.5, 0.25, 0.125, 0.0625]);
        assert_eq!(
            plan_strict(&valid, &bad_profile),
            Err(ShadowError::DecreasingFractions { index: 1 })
        );
    }
}
