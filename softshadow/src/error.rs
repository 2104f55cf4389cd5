//! Errors reported by the opt-in strict validation paths.
//!
//! The default planner never fails; these are only produced by
//! [`ShadowRequest::validate`](crate::ShadowRequest::validate),
//! [`LayerProfile::validate`](crate::LayerProfile::validate),
//! [`plan_strict`](crate::plan_strict) and profile name parsing.

use thiserror::Error;

/// Reasons a shadow request, profile or paint is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShadowError {
    /// The requested blur radius is below zero.
    #[error("shadow radius must not be negative, got {0}")]
    NegativeRadius(f32),
    /// The requested opacity is outside `0..=1`.
    #[error("shadow opacity must be within 0..=1, got {0}")]
    OpacityOutOfRange(f32),
    /// A numeric field is NaN or infinite.
    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },
    /// A profile's fraction table is not non-decreasing.
    #[error("layer fraction {index} is smaller than the fraction before it")]
    DecreasingFractions { index: usize },
    /// A profile's fraction is zero or negative.
    #[error("layer fraction {index} must be greater than zero")]
    NonPositiveFraction { index: usize },
    /// A final-layer boost factor is not finite and positive.
    #[error("final layer boost factors must be finite and positive")]
    InvalidBoost,
    /// A profile name matches no preset.
    #[error("unknown layer profile `{0}` (expected soft, classic or ambient)")]
    UnknownProfile(String),
    /// A gradient has fewer than two stops or a stop outside `0..=1`.
    #[error("invalid gradient: {reason}")]
    InvalidGradient { reason: String },
}
