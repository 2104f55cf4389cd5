//! Paint styles a shadow can be filled with.
//!
//! ## Usage
//!
//! A [`Paint`] is carried through the planner untouched; every planned layer
//! holds a copy of it so renderers can fill the blurred silhouette with a
//! solid color or any of the supported gradient kinds.

use crate::{color::Color, error::ShadowError};

/// A point in the unit square of the shadowed content's bounds.
///
/// `(0, 0)` is the top-leading corner and `(1, 1)` the bottom-trailing one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitPoint {
    pub x: f32,
    pub y: f32,
}

impl UnitPoint {
    pub const TOP_LEADING: UnitPoint = UnitPoint::new(0.0, 0.0);
    pub const TOP: UnitPoint = UnitPoint::new(0.5, 0.0);
    pub const TOP_TRAILING: UnitPoint = UnitPoint::new(1.0, 0.0);
    pub const LEADING: UnitPoint = UnitPoint::new(0.0, 0.5);
    pub const CENTER: UnitPoint = UnitPoint::new(0.5, 0.5);
    pub const TRAILING: UnitPoint = UnitPoint::new(1.0, 0.5);
    pub const BOTTOM_LEADING: UnitPoint = UnitPoint::new(0.0, 1.0);
    pub const BOTTOM: UnitPoint = UnitPoint::new(0.5, 1.0);
    pub const BOTTOM_TRAILING: UnitPoint = UnitPoint::new(1.0, 1.0);

    /// Creates a unit point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A color at a relative location along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientStop {
    /// Color at this stop.
    pub color: Color,
    /// Position along the gradient in `[0.0, 1.0]`.
    pub location: f32,
}

impl GradientStop {
    /// Creates a gradient stop.
    pub const fn new(color: Color, location: f32) -> Self {
        Self { color, location }
    }
}

/// Spreads `colors` evenly over `[0.0, 1.0]`.
pub fn evenly_spaced_stops(colors: impl IntoIterator<Item = Color>) -> Vec<GradientStop> {
    let colors: Vec<Color> = colors.into_iter().collect();
    let last = colors.len().saturating_sub(1);
    colors
        .into_iter()
        .enumerate()
        .map(|(index, color)| {
            let location = if last == 0 {
                0.0
            } else {
                index as f32 / last as f32
            };
            GradientStop::new(color, location)
        })
        .collect()
}

/// Fill style of a shadow.
///
/// # Variants
/// * [`Paint::Solid`] – A single color
/// * [`Paint::LinearGradient`] – Colors interpolated along a line
/// * [`Paint::RadialGradient`] – Circles of color around a center, radii in pixels
/// * [`Paint::AngularGradient`] – Colors swept around a center, angles in degrees
/// * [`Paint::EllipticalGradient`] – Ellipses fitted to the content bounds, radii as
///   fractions of those bounds
///
/// # Example
///
/// ```
/// use softshadow::{Color, Paint, UnitPoint};
///
/// let paint = Paint::linear(
///     [Color::BLUE, Color::PURPLE],
///     UnitPoint::TOP_LEADING,
///     UnitPoint::BOTTOM_TRAILING,
/// );
/// assert!(paint.is_gradient());
/// assert_eq!(paint.stops().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Paint {
    /// A single color.
    Solid(Color),
    /// Linear gradient between two unit points.
    LinearGradient {
        /// Color stops.
        stops: Vec<GradientStop>,
        /// Start of the gradient line.
        start: UnitPoint,
        /// End of the gradient line.
        end: UnitPoint,
    },
    /// Radial gradient between two radii.
    RadialGradient {
        /// Color stops.
        stops: Vec<GradientStop>,
        /// Center of the circles.
        center: UnitPoint,
        /// Radius at location `0.0`, in pixels.
        start_radius: f32,
        /// Radius at location `1.0`, in pixels.
        end_radius: f32,
    },
    /// Angular (conic) gradient.
    AngularGradient {
        /// Color stops.
        stops: Vec<GradientStop>,
        /// Center of the sweep.
        center: UnitPoint,
        /// Angle at location `0.0`, in degrees.
        start_angle: f32,
        /// Angle at location `1.0`, in degrees.
        end_angle: f32,
    },
    /// Elliptical gradient fitted to the content bounds.
    EllipticalGradient {
        /// Color stops.
        stops: Vec<GradientStop>,
        /// Center of the ellipses.
        center: UnitPoint,
        /// Radius at location `0.0`, as a fraction of the bounds.
        start_radius_fraction: f32,
        /// Radius at location `1.0`, as a fraction of the bounds.
        end_radius_fraction: f32,
    },
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Color::BLACK)
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl Paint {
    /// Creates a solid paint.
    pub const fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    /// Creates a linear gradient with evenly spaced colors.
    pub fn linear(
        colors: impl IntoIterator<Item = Color>,
        start: UnitPoint,
        end: UnitPoint,
    ) -> Self {
        Paint::LinearGradient {
            stops: evenly_spaced_stops(colors),
            start,
            end,
        }
    }

    /// Creates a radial gradient with evenly spaced colors.
    pub fn radial(
        colors: impl IntoIterator<Item = Color>,
        center: UnitPoint,
        start_radius: f32,
        end_radius: f32,
    ) -> Self {
        Paint::RadialGradient {
            stops: evenly_spaced_stops(colors),
            center,
            start_radius,
            end_radius,
        }
    }

    /// Creates a full-turn angular gradient with evenly spaced colors.
    pub fn angular(colors: impl IntoIterator<Item = Color>, center: UnitPoint) -> Self {
        Paint::AngularGradient {
            stops: evenly_spaced_stops(colors),
            center,
            start_angle: 0.0,
            end_angle: 360.0,
        }
    }

    /// Creates an elliptical gradient reaching the edges of the bounds.
    pub fn elliptical(colors: impl IntoIterator<Item = Color>, center: UnitPoint) -> Self {
        Paint::EllipticalGradient {
            stops: evenly_spaced_stops(colors),
            center,
            start_radius_fraction: 0.0,
            end_radius_fraction: 0.5,
        }
    }

    /// Red-to-blue, top-to-bottom gradient used when a gradient shadow is
    /// requested without an explicit paint.
    pub fn default_gradient() -> Self {
        Self::linear([Color::RED, Color::BLUE], UnitPoint::TOP, UnitPoint::BOTTOM)
    }

    /// Whether this paint is any of the gradient variants.
    pub fn is_gradient(&self) -> bool {
        !matches!(self, Paint::Solid(_))
    }

    /// Gradient stops, or an empty slice for solid paints.
    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Paint::Solid(_) => &[],
            Paint::LinearGradient { stops, .. }
            | Paint::RadialGradient { stops, .. }
            | Paint::AngularGradient { stops, .. }
            | Paint::EllipticalGradient { stops, .. } => stops,
        }
    }

    fn stops_mut(&mut self) -> Option<&mut Vec<GradientStop>> {
        match self {
            Paint::Solid(_) => None,
            Paint::LinearGradient { stops, .. }
            | Paint::RadialGradient { stops, .. }
            | Paint::AngularGradient { stops, .. }
            | Paint::EllipticalGradient { stops, .. } => Some(stops),
        }
    }

    /// Returns a copy with every color's alpha multiplied by `opacity`.
    pub fn with_opacity(&self, opacity: f32) -> Self {
        let mut paint = self.clone();
        if let Paint::Solid(color) = &mut paint {
            *color = color.multiply_alpha(opacity);
        } else if let Some(stops) = paint.stops_mut() {
            for stop in stops.iter_mut() {
                stop.color = stop.color.multiply_alpha(opacity);
            }
        }
        paint
    }

    /// Flattens the paint to a single color.
    ///
    /// Renderers that cannot fill a blurred shape with a gradient draw this
    /// instead. Gradients average their stop colors; a gradient with no stops
    /// is transparent.
    pub fn average_color(&self) -> Color {
        if let Paint::Solid(color) = self {
            return *color;
        }
        let stops = self.stops();
        if stops.is_empty() {
            return Color::TRANSPARENT;
        }
        let sum = stops.iter().fold([0.0f32; 4], |mut acc, stop| {
            for (channel, value) in acc.iter_mut().zip(stop.color.to_array()) {
                *channel += value;
            }
            acc
        });
        let count = stops.len() as f32;
        Color::from(sum.map(|channel| channel / count))
    }

    /// Checks that a gradient has at least two stops with finite locations in
    /// `[0.0, 1.0]`. Solid paints always pass.
    pub fn validate(&self) -> Result<(), ShadowError> {
        if !self.is_gradient() {
            return Ok(());
        }
        let stops = self.stops();
        if stops.len() < 2 {
            return Err(ShadowError::InvalidGradient {
                reason: format!("expected at least 2 stops, got {}", stops.len()),
            });
        }
        if let Some(stop) = stops
            .iter()
            .find(|stop| !(0.0..=1.0).contains(&stop.location))
        {
            return Err(ShadowError::InvalidGradient {
                reason: format!("stop location {} is outside 0..=1", stop.location),
            });
        }
        Ok(())
    }
}
