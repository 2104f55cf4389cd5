use anyhow::{Result, bail};
use softshadow::{
    Color, DEFAULT_OPACITY, DrawAdjustments, LayerOrder, LayerProfile, MaskMode, Paint,
    RecordingCanvas, RenderOptions, ShadowPlan, ShadowRequest, UnitPoint, plan_strict, plan_with,
    render_layered_shadow,
};

use crate::{
    config::Config,
    output::{self, Format},
};

/// Gradient kinds selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
    Angular,
    Elliptical,
}

/// Draw adjustment presets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AdjustmentPreset {
    /// Draw the plan verbatim
    #[value(name = "none")]
    Verbatim,
    /// Push and lower the vertical offset only
    SoftShadow,
    /// Extra blur, both axes pushed and padded
    GradientShadow,
    /// Drop every layer by its own radius
    RealShadow,
}

impl AdjustmentPreset {
    pub fn adjustments(self) -> DrawAdjustments {
        match self {
            Self::Verbatim => DrawAdjustments::NONE,
            Self::SoftShadow => DrawAdjustments::SOFT_SHADOW,
            Self::GradientShadow => DrawAdjustments::GRADIENT_SHADOW,
            Self::RealShadow => DrawAdjustments::REAL_SHADOW,
        }
    }
}

/// Options shared by every planning command, already merged with the config.
pub struct PlanOptions {
    pub profile: LayerProfile,
    pub strict: bool,
    pub format: Format,
}

/// Parses `#rrggbb`, `#rrggbbaa` (the `#` is optional) or a basic color name.
pub fn parse_color(input: &str) -> Result<Color> {
    let trimmed = input.trim();
    let named = match trimmed.to_ascii_lowercase().as_str() {
        "black" => Some(Color::BLACK),
        "white" => Some(Color::WHITE),
        "red" => Some(Color::RED),
        "green" => Some(Color::GREEN),
        "blue" => Some(Color::BLUE),
        "purple" => Some(Color::PURPLE),
        "yellow" => Some(Color::YELLOW),
        "clear" | "transparent" => Some(Color::TRANSPARENT),
        _ => None,
    };
    if let Some(color) = named {
        return Ok(color);
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Invalid color `{input}`, expected #rrggbb, #rrggbbaa or a color name");
    }
    let channel = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16);
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
    Ok(Color::from_rgba_u8(channel(0)?, channel(2)?, channel(4)?, alpha))
}

pub fn gradient_paint(kind: GradientKind, colors: Vec<Color>) -> Paint {
    match kind {
        GradientKind::Linear => Paint::linear(colors, UnitPoint::TOP, UnitPoint::BOTTOM),
        GradientKind::Radial => Paint::radial(colors, UnitPoint::CENTER, 0.0, 64.0),
        GradientKind::Angular => Paint::angular(colors, UnitPoint::CENTER),
        GradientKind::Elliptical => Paint::elliptical(colors, UnitPoint::CENTER),
    }
}

/// Resolves the draw adjustments: command line preset, then config, then none.
pub fn resolve_adjustments(cli: Option<AdjustmentPreset>, config: &Config) -> DrawAdjustments {
    cli.map(AdjustmentPreset::adjustments)
        .or(config.adjustments)
        .unwrap_or_default()
}

/// Resolves the layer opacity: command line, then config, then the default.
pub fn resolve_opacity(cli: Option<f32>, config: &Config) -> f32 {
    cli.or(config.opacity).unwrap_or(DEFAULT_OPACITY)
}

fn plan_request(request: &ShadowRequest, options: &PlanOptions) -> Result<ShadowPlan> {
    if options.strict {
        Ok(plan_strict(request, &options.profile)?)
    } else {
        Ok(plan_with(request, &options.profile))
    }
}

/// Plans `request` and prints the layers.
pub fn plan(request: &ShadowRequest, options: &PlanOptions) -> Result<()> {
    let layers = plan_request(request, options)?;
    match options.format {
        Format::Json => output::print_json(&layers)?,
        Format::Table => {
            output::status(
                "Planned",
                format!(
                    "{} layers from radius {} at ({}, {})",
                    layers.len(),
                    request.radius,
                    request.offset_x,
                    request.offset_y
                ),
            );
            println!("{}", output::plan_table(&layers));
        }
    }
    Ok(())
}

/// Drives a recording canvas and prints the draw commands it received.
pub fn draw(
    request: &ShadowRequest,
    options: &PlanOptions,
    adjustments: DrawAdjustments,
    order: LayerOrder,
    mask: MaskMode,
) -> Result<()> {
    // Validate up front so strict mode rejects before anything is drawn.
    plan_request(request, options)?;

    let render_options = RenderOptions::default()
        .profile(options.profile)
        .adjustments(adjustments)
        .order(order)
        .mask(mask);
    let mut canvas = RecordingCanvas::new();
    render_layered_shadow(&mut canvas, &(), request, &render_options);
    let commands: Vec<_> = canvas.layers().cloned().collect();

    match options.format {
        Format::Json => output::print_json(&commands)?,
        Format::Table => {
            output::status("Recorded", format!("{} draw commands", commands.len()));
            println!("{}", output::commands_table(&commands));
            output::note("the content itself is drawn after the last command");
        }
    }
    Ok(())
}

pub fn profiles(format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let profiles: serde_json::Map<String, serde_json::Value> = LayerProfile::PRESETS
                .iter()
                .map(|(name, profile)| -> Result<(String, serde_json::Value)> {
                    Ok((name.to_string(), serde_json::to_value(profile)?))
                })
                .collect::<Result<_>>()?;
            output::print_json(&profiles)?;
        }
        Format::Table => println!("{}", output::profiles_table(&LayerProfile::PRESETS)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#000000").unwrap(), Color::BLACK);
        assert_eq!(parse_color("ff0000").unwrap(), Color::RED);
        assert_eq!(
            parse_color("#00000080").unwrap(),
            Color::from_rgba_u8(0, 0, 0, 128)
        );
        assert_eq!(parse_color(" Purple ").unwrap(), Color::PURPLE);
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gg0000").is_err());
    }

    #[test]
    fn test_resolve_opacity_precedence() {
        let config = Config {
            opacity: Some(0.1),
            ..Default::default()
        };
        assert_eq!(resolve_opacity(Some(0.5), &config), 0.5);
        assert_eq!(resolve_opacity(None, &config), 0.1);
        assert_eq!(resolve_opacity(None, &Config::default()), DEFAULT_OPACITY);
    }

    #[test]
    fn test_resolve_adjustments_precedence() {
        let config = Config {
            adjustments: Some(DrawAdjustments::REAL_SHADOW),
            ..Default::default()
        };
        assert_eq!(
            resolve_adjustments(Some(AdjustmentPreset::GradientShadow), &config),
            DrawAdjustments::GRADIENT_SHADOW
        );
        assert_eq!(resolve_adjustments(None, &config), DrawAdjustments::REAL_SHADOW);
        assert_eq!(resolve_adjustments(None, &Config::default()), DrawAdjustments::NONE);
    }

    #[test]
    fn test_strict_planning_rejects_negative_radius() {
        let request = ShadowRequest::new(Color::BLACK, -1.0, 0.25);
        let strict = PlanOptions {
            profile: LayerProfile::SOFT,
            strict: true,
            format: Format::Json,
        };
        assert!(plan_request(&request, &strict).is_err());

        let permissive = PlanOptions {
            strict: false,
            ..strict
        };
        let layers = plan_request(&request, &permissive).unwrap();
        assert!(layers.iter().all(|layer| layer.radius == 0.0));
    }

    #[test]
    fn test_gradient_paint_kinds() {
        let colors = vec![Color::RED, Color::BLUE];
        assert!(matches!(
            gradient_paint(GradientKind::Angular, colors.clone()),
            Paint::AngularGradient { .. }
        ));
        assert!(matches!(
            gradient_paint(GradientKind::Elliptical, colors),
            Paint::EllipticalGradient { .. }
        ));
    }
}
