use clap::ValueEnum;
use comfy_table::{
    Attribute, Cell, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS as RoundCorners,
    presets::UTF8_FULL,
};
use console::style;
use serde::Serialize;
use softshadow::{
    Color, LayerProfile, OffsetScaling, Paint, ShadowDrawCommand, ShadowLayerDescriptor,
};

const STATUS_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Human readable table
    #[default]
    Table,
    /// Pretty printed JSON
    Json,
}

pub fn status(label: &str, message: impl AsRef<str>) {
    eprintln!(
        "{:>width$} {}",
        style(label).green().bold(),
        message.as_ref(),
        width = STATUS_WIDTH
    );
}

pub fn note(message: impl AsRef<str>) {
    eprintln!("{}: {}", style("note").blue().bold(), message.as_ref());
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(RoundCorners)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|header| Cell::new(header).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

pub fn hex(color: Color) -> String {
    let [r, g, b, a] = color
        .to_array()
        .map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

pub fn describe_paint(paint: &Paint) -> String {
    let stops = || {
        paint
            .stops()
            .iter()
            .map(|stop| hex(stop.color))
            .collect::<Vec<_>>()
            .join(" → ")
    };
    match paint {
        Paint::Solid(color) => hex(*color),
        Paint::LinearGradient { .. } => format!("linear {}", stops()),
        Paint::RadialGradient { .. } => format!("radial {}", stops()),
        Paint::AngularGradient { .. } => format!("angular {}", stops()),
        Paint::EllipticalGradient { .. } => format!("elliptical {}", stops()),
    }
}

pub fn plan_table(layers: &[ShadowLayerDescriptor]) -> Table {
    let mut table = new_table(&["Layer", "Radius", "Opacity", "Offset X", "Offset Y", "Paint"]);
    for (index, layer) in layers.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(format!("{:.3}", layer.radius)),
            Cell::new(format!("{:.3}", layer.opacity)),
            Cell::new(format!("{:.3}", layer.offset_x)),
            Cell::new(format!("{:.3}", layer.offset_y)),
            Cell::new(describe_paint(&layer.paint)),
        ]);
    }
    table
}

pub fn commands_table(commands: &[ShadowDrawCommand]) -> Table {
    let mut table = new_table(&["Draw", "Blur", "Opacity", "Offset", "Mask", "Paint"]);
    for (index, command) in commands.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(format!("{:.3}", command.blur_radius)),
            Cell::new(format!("{:.3}", command.opacity)),
            Cell::new(format!("({:.3}, {:.3})", command.offset[0], command.offset[1])),
            Cell::new(format!("{:?}", command.mask)),
            Cell::new(describe_paint(&command.paint)),
        ]);
    }
    table
}

pub fn profiles_table(profiles: &[(&str, LayerProfile)]) -> Table {
    let mut table = new_table(&[
        "Profile",
        "Fractions",
        "Offsets",
        "Dynamic radius",
        "Final layer",
    ]);
    for (name, profile) in profiles {
        let fractions = profile
            .fractions
            .iter()
            .map(|fraction| format!("{fraction}"))
            .collect::<Vec<_>>()
            .join(", ");
        let offsets = match profile.offset_scaling {
            OffsetScaling::Proportional => "proportional",
            OffsetScaling::Constant => "constant",
        };
        let final_layer = match profile.final_layer {
            Some(boost) => format!(
                "radius ×{}, offset ×{}",
                boost.radius_factor, boost.offset_factor
            ),
            None => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(fractions),
            Cell::new(offsets),
            Cell::new(if profile.dynamic_radius { "yes" } else { "no" }),
            Cell::new(final_layer),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use softshadow::UnitPoint;

    #[test]
    fn test_hex() {
        assert_eq!(hex(Color::BLACK), "#000000ff");
        assert_eq!(hex(Color::new(1.0, 0.5, 0.0, 0.25)), "#ff800040");
    }

    #[test]
    fn test_describe_paint() {
        assert_eq!(describe_paint(&Paint::Solid(Color::RED)), "#ff0000ff");
        let gradient = Paint::linear([Color::RED, Color::BLUE], UnitPoint::TOP, UnitPoint::BOTTOM);
        assert_eq!(describe_paint(&gradient), "linear #ff0000ff → #0000ffff");
    }
}
