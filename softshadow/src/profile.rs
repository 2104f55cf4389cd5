//! Layer profiles: the fraction table and per-layer rules the planner follows.
//!
//! ## Usage
//!
//! Most callers use [`LayerProfile::SOFT`] (the [`Default`]). The other
//! presets reproduce older layering rules, and every field is public so a
//! profile can be assembled by hand or loaded from configuration.

use std::str::FromStr;

use crate::error::ShadowError;

/// Number of layers every plan contains.
pub const LAYER_COUNT: usize = 5;

/// Geometric progression of the base radius used by the canonical profile,
/// ordered tight to wide.
pub const CANONICAL_FRACTIONS: [f32; LAYER_COUNT] =
    [1.0 / 16.0, 1.0 / 8.0, 1.0 / 4.0, 1.0 / 2.0, 1.0];

/// How layer offsets relate to the requested offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OffsetScaling {
    /// Offsets scale by the same fraction as the radius.
    #[default]
    Proportional,
    /// Every layer uses the full offset; only the radius is scaled.
    Constant,
}

/// Extra widening applied to the last (widest) layer only.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinalLayerBoost {
    /// Multiplier applied to the last layer's radius.
    pub radius_factor: f32,
    /// Multiplier applied to the last layer's offsets.
    pub offset_factor: f32,
}

impl FinalLayerBoost {
    /// Soft ambient falloff: a third wider and twice as far.
    pub const AMBIENT: FinalLayerBoost = FinalLayerBoost {
        radius_factor: 1.3,
        offset_factor: 2.0,
    };
}

/// Rules the planner uses to expand a request into layers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayerProfile {
    /// Radius (and offset) fraction of each layer, tight to wide.
    pub fractions: [f32; LAYER_COUNT],
    /// How offsets are distributed across layers.
    pub offset_scaling: OffsetScaling,
    /// Whether larger offsets widen every layer.
    pub dynamic_radius: bool,
    /// Optional widening of the last layer.
    pub final_layer: Option<FinalLayerBoost>,
}

impl LayerProfile {
    /// Canonical profile: offsets scale with the radius and the dynamic radius
    /// multiplier is on.
    pub const SOFT: LayerProfile = LayerProfile {
        fractions: CANONICAL_FRACTIONS,
        offset_scaling: OffsetScaling::Proportional,
        dynamic_radius: true,
        final_layer: None,
    };

    /// Radius-only layering: every layer keeps the full offset and no dynamic
    /// radius is applied.
    pub const CLASSIC: LayerProfile = LayerProfile {
        fractions: CANONICAL_FRACTIONS,
        offset_scaling: OffsetScaling::Constant,
        dynamic_radius: false,
        final_layer: None,
    };

    /// [`LayerProfile::SOFT`] with an ambient falloff on the widest layer.
    pub const AMBIENT: LayerProfile = LayerProfile {
        final_layer: Some(FinalLayerBoost::AMBIENT),
        ..LayerProfile::SOFT
    };

    /// Named presets, in the order they are listed to users.
    pub const PRESETS: [(&'static str, LayerProfile); 3] = [
        ("soft", LayerProfile::SOFT),
        ("classic", LayerProfile::CLASSIC),
        ("ambient", LayerProfile::AMBIENT),
    ];

    /// Sets the fraction table.
    pub fn fractions(mut self, fractions: [f32; LAYER_COUNT]) -> Self {
        self.fractions = fractions;
        self
    }

    /// Sets the offset rule.
    pub fn offset_scaling(mut self, offset_scaling: OffsetScaling) -> Self {
        self.offset_scaling = offset_scaling;
        self
    }

    /// Enables or disables the dynamic radius multiplier.
    pub fn dynamic_radius(mut self, dynamic_radius: bool) -> Self {
        self.dynamic_radius = dynamic_radius;
        self
    }

    /// Sets the final-layer boost.
    pub fn final_layer(mut self, boost: impl Into<Option<FinalLayerBoost>>) -> Self {
        self.final_layer = boost.into();
        self
    }

    /// Checks that fractions are finite, positive and non-decreasing, and that
    /// any boost factors are finite and positive.
    pub fn validate(&self) -> Result<(), ShadowError> {
        let mut previous = 0.0f32;
        for (index, &fraction) in self.fractions.iter().enumerate() {
            if !fraction.is_finite() {
                return Err(ShadowError::NonFinite { field: "fractions" });
            }
            if fraction <= 0.0 {
                return Err(ShadowError::NonPositiveFraction { index });
            }
            if fraction < previous {
                return Err(ShadowError::DecreasingFractions { index });
            }
            previous = fraction;
        }
        if let Some(boost) = self.final_layer {
            let valid = |factor: f32| factor.is_finite() && factor > 0.0;
            if !valid(boost.radius_factor) || !valid(boost.offset_factor) {
                return Err(ShadowError::InvalidBoost);
            }
        }
        Ok(())
    }
}

impl Default for LayerProfile {
    fn default() -> Self {
        Self::SOFT
    }
}

impl FromStr for LayerProfile {
    type Err = ShadowError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim();
        Self::PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .map(|(_, profile)| *profile)
            .ok_or_else(|| ShadowError::UnknownProfile(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for (name, profile) in LayerProfile::PRESETS {
            assert!(profile.validate().is_ok(), "preset {name} should be valid");
        }
    }

    #[test]
    fn test_parse_preset_names() {
        assert_eq!("soft".parse::<LayerProfile>(), Ok(LayerProfile::SOFT));
        assert_eq!(" Classic ".parse::<LayerProfile>(), Ok(LayerProfile::CLASSIC));
        assert_eq!(
            "ambient".parse::<LayerProfile>().map(|p| p.final_layer),
            Ok(Some(FinalLayerBoost::AMBIENT))
        );
        assert_eq!(
            "harsh".parse::<LayerProfile>(),
            Err(ShadowError::UnknownProfile("harsh".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let decreasing = LayerProfile::SOFT.fractions([0.5, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(
            decreasing.validate(),
            Err(ShadowError::DecreasingFractions { index: 1 })
        );

        let zero = LayerProfile::SOFT.fractions([0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(zero.validate(), Err(ShadowError::NonPositiveFraction { index: 0 }));

        let nan = LayerProfile::SOFT.fractions([f32::NAN, 0.25, 0.5, 0.75, 1.0]);
        assert!(matches!(nan.validate(), Err(ShadowError::NonFinite { .. })));

        let boost = LayerProfile::SOFT.final_layer(FinalLayerBoost {
            radius_factor: -1.0,
            offset_factor: 2.0,
        });
        assert_eq!(boost.validate(), Err(ShadowError::InvalidBoost));
    }

    #[test]
    fn test_builder_setters() {
        let profile = LayerProfile::default()
            .offset_scaling(OffsetScaling::Constant)
            .dynamic_radius(false)
            .final_layer(None::<FinalLayerBoost>);
        assert_eq!(profile, LayerProfile::CLASSIC);
    }
}
