//! softshadow plans layered "soft" and gradient drop shadows for declarative UI
//! renderers.
//!
//! A single native blurred shadow tends to look flat. softshadow expands one
//! shadow request into five stacked layers whose blur radii follow a
//! `1/16, 1/8, 1/4, 1/2, 1` progression of the requested radius, which reads
//! much closer to how real light falls off.
//!
//! # Planning
//!
//! ```
//! use softshadow::{Color, ShadowRequest, plan};
//!
//! let request = ShadowRequest::new(Color::BLACK, 16.0, 0.25).offset(0.0, 4.0);
//! let layers = plan(&request);
//!
//! assert_eq!(layers.len(), 5);
//! assert!(layers.windows(2).all(|pair| pair[0].radius <= pair[1].radius));
//! ```
//!
//! Offsets widen the shadow: every layer's radius is multiplied by
//! [`radius_multiplier`], which is `1.0` for an unshifted shadow and grows by
//! half for every 32 pixels of offset.
//!
//! # Elevation
//!
//! [`ShadowMode::ElevationDerived`] treats the radius as a material elevation.
//! Any non-zero offset axis is pushed further by half the elevation, while a
//! zero axis stays put.
//!
//! ```
//! use softshadow::{Color, ShadowRequest, effective_offset};
//!
//! let request = ShadowRequest::elevation(Color::BLACK, 8.0, 0.25).offset(2.0, 0.0);
//! assert_eq!(effective_offset(&request), [6.0, 0.0]);
//! ```
//!
//! # Profiles
//!
//! The fraction table, the offset rule, the dynamic radius and an optional
//! boost of the widest layer are described by a [`LayerProfile`]. Use
//! [`plan_with`] to pick one other than the canonical [`LayerProfile::SOFT`].
//!
//! # Rendering
//!
//! softshadow does not rasterize anything. [`render_layered_shadow`] hands
//! [`ShadowDrawCommand`]s to any [`ShadowCanvas`] implementation, generic over
//! the content being shadowed.

pub mod args;
pub mod color;
pub mod dp;
pub mod error;
pub mod paint;
pub mod planner;
pub mod profile;
pub mod render;

pub use crate::{
    args::{DEFAULT_ELEVATION, SOFT_SHADOW_OPACITY, ShadowArgs},
    color::Color,
    dp::Dp,
    error::ShadowError,
    paint::{GradientStop, Paint, UnitPoint},
    planner::{
        DEFAULT_OPACITY, DEFAULT_RADIUS, MAX_RECOMMENDED_ELEVATION, ShadowLayerDescriptor,
        ShadowMode, ShadowPlan, ShadowRequest, effective_offset, plan, plan_strict, plan_with,
        radius_multiplier,
    },
    profile::{CANONICAL_FRACTIONS, FinalLayerBoost, LAYER_COUNT, LayerProfile, OffsetScaling},
    render::{
        CanvasOp, DrawAdjustments, LayerOrder, MaskMode, RecordingCanvas, RenderOptions,
        ShadowCanvas, ShadowDrawCommand, render_layered_shadow, shadow_commands,
    },
};
