use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use softshadow::{
    DEFAULT_ELEVATION, DEFAULT_RADIUS, LayerOrder, MaskMode, Paint, ShadowRequest,
};

mod commands;
mod config;
mod output;

use commands::{AdjustmentPreset, GradientKind, PlanOptions};
use config::Config;
use output::Format;

#[derive(Parser)]
#[command(name = "softshadow")]
#[command(version, about = "Inspect layered soft shadow plans", long_about = None)]
struct Cli {
    /// TOML file with profile, opacity and draw adjustment settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table, global = true)]
    format: Format,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a soft shadow from a blur radius
    Plan(PlanArgs),
    /// Plan a shadow from a material elevation
    Elevation(ElevationArgs),
    /// Plan a gradient shadow
    Gradient(GradientArgs),
    /// Print the draw commands a canvas receives for a soft shadow
    Draw(DrawArgs),
    /// List the built-in layer profiles
    Profiles,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Horizontal offset in pixels
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f32,
    /// Vertical offset in pixels
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f32,
    /// Opacity of every layer (defaults to the config value, then 0.25)
    #[arg(long, allow_negative_numbers = true)]
    opacity: Option<f32>,
    /// Layer profile: soft, classic or ambient
    #[arg(long)]
    profile: Option<String>,
    /// Reject negative radii, out of range opacity and malformed gradients
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Blur radius in pixels
    #[arg(short, long, default_value_t = DEFAULT_RADIUS, allow_negative_numbers = true)]
    radius: f32,
    /// Shadow color (#rrggbb, #rrggbbaa or a name)
    #[arg(short, long, default_value = "black")]
    color: String,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct ElevationArgs {
    /// Elevation in pixels
    #[arg(short, long, default_value_t = DEFAULT_ELEVATION.0 as f32, allow_negative_numbers = true)]
    elevation: f32,
    /// Shadow color (#rrggbb, #rrggbbaa or a name)
    #[arg(short, long, default_value = "black")]
    color: String,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct GradientArgs {
    /// Comma separated gradient colors
    #[arg(long, value_delimiter = ',', default_value = "red,blue")]
    colors: Vec<String>,
    /// Gradient kind
    #[arg(long, value_enum, default_value_t = GradientKind::Linear)]
    kind: GradientKind,
    /// Blur radius in pixels
    #[arg(short, long, default_value_t = DEFAULT_RADIUS, allow_negative_numbers = true)]
    radius: f32,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct DrawArgs {
    #[command(flatten)]
    plan: PlanArgs,
    /// Draw adjustment preset (defaults to the config value, then none)
    #[arg(long, value_enum)]
    adjust: Option<AdjustmentPreset>,
    /// Hand the widest layer to the canvas first
    #[arg(long)]
    wide_first: bool,
    /// Draw plain drop shadows instead of masking them with the content
    #[arg(long)]
    unmasked: bool,
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,softshadow=info") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn plan_options(common: &CommonArgs, config: &Config, format: Format) -> Result<PlanOptions> {
    Ok(PlanOptions {
        profile: config.layer_profile(common.profile.as_deref())?,
        strict: common.strict,
        format,
    })
}

fn soft_request(args: &PlanArgs, config: &Config) -> Result<ShadowRequest> {
    let color = commands::parse_color(&args.color)?;
    let opacity = commands::resolve_opacity(args.common.opacity, config);
    Ok(ShadowRequest::new(color, args.radius, opacity).offset(args.common.x, args.common.y))
}

fn main() -> Result<()> {
    init_tracing();
    let Cli {
        config,
        format,
        command,
    } = Cli::parse();
    let config = Config::load(config.as_deref())?;

    match command {
        Commands::Plan(args) => {
            let request = soft_request(&args, &config)?;
            commands::plan(&request, &plan_options(&args.common, &config, format)?)?;
        }
        Commands::Elevation(args) => {
            let color = commands::parse_color(&args.color)?;
            let opacity = commands::resolve_opacity(args.common.opacity, &config);
            let request = ShadowRequest::elevation(color, args.elevation, opacity)
                .offset(args.common.x, args.common.y);
            commands::plan(&request, &plan_options(&args.common, &config, format)?)?;
        }
        Commands::Gradient(args) => {
            let colors = args
                .colors
                .iter()
                .map(|color| commands::parse_color(color))
                .collect::<Result<Vec<_>>>()?;
            let paint: Paint = commands::gradient_paint(args.kind, colors);
            let opacity = commands::resolve_opacity(args.common.opacity, &config);
            let request = ShadowRequest::new(paint, args.radius, opacity)
                .offset(args.common.x, args.common.y);
            commands::plan(&request, &plan_options(&args.common, &config, format)?)?;
        }
        Commands::Draw(args) => {
            let request = soft_request(&args.plan, &config)?;
            let adjustments = commands::resolve_adjustments(args.adjust, &config);
            let order = if args.wide_first {
                LayerOrder::WideFirst
            } else {
                LayerOrder::TightFirst
            };
            let mask = if args.unmasked {
                MaskMode::Unmasked
            } else {
                MaskMode::Masked
            };
            commands::draw(
                &request,
                &plan_options(&args.plan.common, &config, format)?,
                adjustments,
                order,
                mask,
            )?;
        }
        Commands::Profiles => commands::profiles(format)?,
    }
    Ok(())
}
