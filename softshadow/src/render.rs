//! Drives a host canvas with a planned shadow.
//!
//! ## Usage
//!
//! Implement [`ShadowCanvas`] for whatever the host renderer can blur,
//! offset, mask and alpha-composite, then call [`render_layered_shadow`].
//! The content type stays generic; nothing here rasterizes.

use smallvec::SmallVec;
use tracing::trace;

use crate::{
    color::Color,
    paint::Paint,
    planner::{ShadowLayerDescriptor, ShadowRequest, plan_with},
    profile::{LAYER_COUNT, LayerProfile},
};

/// Blur and offset padding added by the soft and gradient draw presets.
pub const EXTRA_BLUR: f32 = 2.0;

/// Order in which layers are handed to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LayerOrder {
    /// Tightest layer first, widest last.
    #[default]
    TightFirst,
    /// Widest layer first, tightest last.
    WideFirst,
}

/// Whether a layer is clipped so it never paints over the content itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MaskMode {
    /// The content's silhouette masks the layer.
    #[default]
    Masked,
    /// Plain drop shadow.
    Unmasked,
}

/// Draw-time tweaks applied when turning a planned layer into a command.
///
/// Axis arrays are in the format `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrawAdjustments {
    /// Added to every layer's blur radius.
    pub extra_blur: f32,
    /// A non-zero offset axis moves further by `sign * radius * push`.
    pub directional_push: [f32; 2],
    /// Added to the offset of every layer.
    pub bias: [f32; 2],
    /// Every layer drops by `radius * radius_drop`, whatever its offset.
    pub radius_drop: f32,
}

impl DrawAdjustments {
    /// Layers are drawn exactly as planned.
    pub const NONE: DrawAdjustments = DrawAdjustments {
        extra_blur: 0.0,
        directional_push: [0.0, 0.0],
        bias: [0.0, 0.0],
        radius_drop: 0.0,
    };

    /// Solid soft shadows: only the vertical offset is pushed and lowered.
    pub const SOFT_SHADOW: DrawAdjustments = DrawAdjustments {
        extra_blur: 0.0,
        directional_push: [0.0, 0.5],
        bias: [0.0, EXTRA_BLUR],
        radius_drop: 0.0,
    };

    /// Gradient shadows: blurrier, with both axes pushed and padded.
    pub const GRADIENT_SHADOW: DrawAdjustments = DrawAdjustments {
        extra_blur: EXTRA_BLUR,
        directional_push: [0.5, 0.5],
        bias: [EXTRA_BLUR, EXTRA_BLUR],
        radius_drop: 0.0,
    };

    /// Each layer sits one blur radius below its offset.
    pub const REAL_SHADOW: DrawAdjustments = DrawAdjustments {
        extra_blur: 0.0,
        directional_push: [0.0, 0.0],
        bias: [0.0, 0.0],
        radius_drop: 1.0,
    };

    /// Returns the blur radius and offset a layer is drawn with.
    pub fn apply(&self, layer: &ShadowLayerDescriptor) -> (f32, [f32; 2]) {
        let push = |value: f32, factor: f32| {
            if value == 0.0 {
                0.0
            } else {
                value.signum() * layer.radius * factor
            }
        };
        let x = layer.offset_x + push(layer.offset_x, self.directional_push[0]) + self.bias[0];
        let y = layer.offset_y
            + push(layer.offset_y, self.directional_push[1])
            + self.bias[1]
            + layer.radius * self.radius_drop;
        ((layer.radius + self.extra_blur).max(0.0), [x, y])
    }
}

impl Default for DrawAdjustments {
    fn default() -> Self {
        Self::NONE
    }
}

/// One blurred, offset, alpha-blended draw of the content's silhouette.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowDrawCommand {
    /// Fill of the silhouette.
    pub paint: Paint,
    /// Opacity the fill is composited with.
    pub opacity: f32,
    /// Gaussian blur radius in pixels.
    pub blur_radius: f32,
    /// Offset in the format `[x, y]`.
    pub offset: [f32; 2],
    /// Clipping of the layer against the content.
    pub mask: MaskMode,
}

impl ShadowDrawCommand {
    /// Builds the command for a planned layer.
    pub fn from_layer(
        layer: &ShadowLayerDescriptor,
        adjustments: &DrawAdjustments,
        mask: MaskMode,
    ) -> Self {
        let (blur_radius, offset) = adjustments.apply(layer);
        Self {
            paint: layer.paint.clone(),
            opacity: layer.opacity,
            blur_radius,
            offset,
            mask,
        }
    }

    /// Multiplies the command's opacity, keeping it within `0..=1`.
    pub fn apply_opacity(&mut self, opacity: f32) {
        self.opacity = (self.opacity * opacity).clamp(0.0, 1.0);
    }

    /// Single color for canvases that cannot fill with gradients.
    pub fn flat_color(&self) -> Color {
        self.paint.average_color().multiply_alpha(self.opacity)
    }
}

/// Options for [`render_layered_shadow`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Layering rules used to plan the shadow.
    pub profile: LayerProfile,
    /// Draw order of the layers.
    pub order: LayerOrder,
    /// Clipping of the layers against the content.
    pub mask: MaskMode,
    /// Draw-time tweaks.
    pub adjustments: DrawAdjustments,
}

impl RenderOptions {
    /// Sets the layer profile.
    pub fn profile(mut self, profile: LayerProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets the draw order.
    pub fn order(mut self, order: LayerOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the mask mode.
    pub fn mask(mut self, mask: MaskMode) -> Self {
        self.mask = mask;
        self
    }

    /// Sets the draw adjustments.
    pub fn adjustments(mut self, adjustments: DrawAdjustments) -> Self {
        self.adjustments = adjustments;
        self
    }
}

/// A surface that can draw blurred, offset, optionally masked copies of some
/// content `C`, and the content itself.
pub trait ShadowCanvas<C: ?Sized> {
    /// Draws one shadow layer of `content`.
    fn draw_shadow_layer(&mut self, content: &C, command: &ShadowDrawCommand);

    /// Draws `content` on top of its shadow.
    fn draw_content(&mut self, content: &C);
}

/// Plans `request` and converts the layers into draw commands, in draw order.
pub fn shadow_commands(
    request: &ShadowRequest,
    options: &RenderOptions,
) -> [ShadowDrawCommand; LAYER_COUNT] {
    let plan = plan_with(request, &options.profile);
    let mut commands = plan
        .each_ref()
        .map(|layer| ShadowDrawCommand::from_layer(layer, &options.adjustments, options.mask));
    if options.order == LayerOrder::WideFirst {
        commands.reverse();
    }
    commands
}

/// Draws the shadow of `content` followed by `content` itself.
///
/// Returns the number of shadow layers drawn.
pub fn render_layered_shadow<C, K>(
    canvas: &mut K,
    content: &C,
    request: &ShadowRequest,
    options: &RenderOptions,
) -> usize
where
    C: ?Sized,
    K: ShadowCanvas<C> + ?Sized,
{
    let commands = shadow_commands(request, options);
    for command in &commands {
        canvas.draw_shadow_layer(content, command);
    }
    canvas.draw_content(content);
    trace!(layers = commands.len(), order = ?options.order, "rendered layered shadow");
    commands.len()
}

/// Operation captured by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    /// A shadow layer.
    Layer(ShadowDrawCommand),
    /// The content.
    Content,
}

/// Canvas that records what it is asked to draw.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    ops: SmallVec<[CanvasOp; LAYER_COUNT + 1]>,
}

impl RecordingCanvas {
    /// Creates an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations, in draw order.
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Recorded shadow layer commands, in draw order.
    pub fn layers(&self) -> impl Iterator<Item = &ShadowDrawCommand> {
        self.ops.iter().filter_map(|op| match op {
            CanvasOp::Layer(command) => Some(command),
            CanvasOp::Content => None,
        })
    }

    /// Clears the recording.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl<C: ?Sized> ShadowCanvas<C> for RecordingCanvas {
    fn draw_shadow_layer(&mut self, _content: &C, command: &ShadowDrawCommand) {
        self.ops.push(CanvasOp::Layer(command.clone()));
    }

    fn draw_content(&mut self, _content: &C) {
        self.ops.push(CanvasOp::Content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canvas over string content that logs a line per draw.
    #[derive(Default)]
    struct LogCanvas {
        lines: Vec<String>,
    }

    impl ShadowCanvas<str> for LogCanvas {
        fn draw_shadow_layer(&mut self, content: &str, command: &ShadowDrawCommand) {
            self.lines
                .push(format!("shadow {content} blur={}", command.blur_radius));
        }

        fn draw_content(&mut self, content: &str) {
            self.lines.push(format!("content {content}"));
        }
    }

    fn request() -> ShadowRequest {
        ShadowRequest::new(Color::BLACK, 16.0, 0.25)
    }

    #[test]
    fn test_content_is_drawn_last() {
        let mut canvas = RecordingCanvas::new();
        let drawn = render_layered_shadow(&mut canvas, &(), &request(), &RenderOptions::default());

        assert_eq!(drawn, LAYER_COUNT);
        assert_eq!(canvas.ops().len(), LAYER_COUNT + 1);
        assert_eq!(canvas.ops().last(), Some(&CanvasOp::Content));
        let blurs: Vec<f32> = canvas.layers().map(|command| command.blur_radius).collect();
        assert_eq!(blurs, vec![1.0, 2.0, 4.0, 8.0, 16.0]);
        assert!(canvas.layers().all(|command| command.mask == MaskMode::Masked));
    }

    #[test]
    fn test_wide_first_reverses_order() {
        let options = RenderOptions::default()
            .order(LayerOrder::WideFirst)
            .mask(MaskMode::Unmasked);
        let mut canvas = LogCanvas::default();
        render_layered_shadow(&mut canvas, "card", &request(), &options);

        assert_eq!(
            canvas.lines,
            vec![
                "shadow card blur=16",
                "shadow card blur=8",
                "shadow card blur=4",
                "shadow card blur=2",
                "shadow card blur=1",
                "content card",
            ]
        );
    }

    fn layer(radius: f32, offset_x: f32, offset_y: f32) -> ShadowLayerDescriptor {
        ShadowLayerDescriptor {
            radius,
            opacity: 0.25,
            offset_x,
            offset_y,
            paint: Paint::default(),
        }
    }

    #[test]
    fn test_no_adjustments_draws_plan_verbatim() {
        assert_eq!(DrawAdjustments::NONE.apply(&layer(4.0, 3.0, -2.0)), (4.0, [3.0, -2.0]));
        assert_eq!(DrawAdjustments::default(), DrawAdjustments::NONE);
    }

    #[test]
    fn test_soft_shadow_adjustments_leave_x_alone() {
        let soft = DrawAdjustments::SOFT_SHADOW;
        assert_eq!(soft.apply(&layer(4.0, 3.0, 0.0)), (4.0, [3.0, 2.0]));
        assert_eq!(soft.apply(&layer(4.0, 0.0, 3.0)), (4.0, [0.0, 7.0]));
        assert_eq!(soft.apply(&layer(4.0, -1.0, -3.0)), (4.0, [-1.0, -3.0]));
    }

    #[test]
    fn test_gradient_shadow_adjustments_pad_both_axes() {
        let gradient = DrawAdjustments::GRADIENT_SHADOW;
        assert_eq!(gradient.apply(&layer(4.0, 3.0, 0.0)), (6.0, [7.0, 2.0]));
        assert_eq!(gradient.apply(&layer(4.0, -1.0, -3.0)), (6.0, [-1.0, -3.0]));
        assert_eq!(gradient.apply(&layer(0.0, 0.0, 0.0)), (2.0, [2.0, 2.0]));
    }

    #[test]
    fn test_real_shadow_adjustments_drop_by_radius() {
        let real = DrawAdjustments::REAL_SHADOW;
        assert_eq!(real.apply(&layer(4.0, 0.0, 0.0)), (4.0, [0.0, 4.0]));
        assert_eq!(real.apply(&layer(8.0, 2.0, -3.0)), (8.0, [2.0, 5.0]));
    }

    #[test]
    fn test_apply_opacity_clamps() {
        let layer = &plan_with(&request(), &LayerProfile::SOFT)[0];
        let mut command =
            ShadowDrawCommand::from_layer(layer, &DrawAdjustments::NONE, MaskMode::Masked);
        command.apply_opacity(0.5);
        assert_eq!(command.opacity, 0.125);
        command.apply_opacity(100.0);
        assert_eq!(command.opacity, 1.0);
        assert_eq!(command.flat_color(), Color::BLACK);
    }

    #[test]
    fn test_gradient_paint_reaches_the_canvas() {
        let request = ShadowRequest::new(Paint::default_gradient(), 8.0, 0.3);
        let commands = shadow_commands(&request, &RenderOptions::default());
        assert!(commands.iter().all(|command| command.paint == request.paint));
        assert_eq!(
            commands[0].flat_color(),
            Color::new(0.5, 0.0, 0.5, 1.0).multiply_alpha(0.3)
        );
    }
}
