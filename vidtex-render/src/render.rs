//! Draw-command rendering
//!
//! Iterates the GUI engine's per-frame draw commands and decides, per
//! command, between the engine's default single-texture path and a
//! format-aware pass with extra shader uniforms. Pure orchestration over
//! the classifier and the uploaded render sources: everything arrives as
//! explicit parameters and the output is a command list for the backend.

use crate::quad::classify_quad;
use crate::quad::DrawVert;
use crate::source::RenderSource;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use vidtex_format::MAX_PLANES;

/// Scissor rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub min: Vec2,
    pub max: Vec2,
}

/// One draw command from the GUI engine's frame draw list
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand<'a> {
    /// Vertices this command covers, already resolved through the index
    /// buffer
    pub vertices: &'a [DrawVert],
    /// Scissor rect for the command
    pub clip: ClipRect,
    /// Render source tag attached to the drawn quad, if any; `None` means
    /// GUI chrome drawn from the engine's own atlas
    pub source: Option<&'a RenderSource>,
}

/// Uniform block for the format-aware blit shader
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BlitUniforms {
    /// `SampleFormat` tag selecting the sampling branch
    pub sample_format: u32,
    /// `ColorRange` tag (full vs studio)
    pub color_range: u32,
    /// `SampleFilter` tag (linear, nearest, area)
    pub filter: u32,
    pub _pad: u32,
    /// Full source texture size in texels
    pub texture_size: [f32; 2],
    /// Destination rectangle size on screen in pixels
    pub display_size: [f32; 2],
    /// Sampled sub-rectangle size in texels
    pub render_size: [f32; 2],
}

/// Shader path selected for one command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassKind {
    /// GUI engine default: first texture, linear sampling
    Default,
    /// Multi-plane format-aware blit with extra uniforms
    FormatAware(BlitUniforms),
}

/// Backend-ready rendering of one draw command
///
/// Ops correspond one-to-one, in order, with the input commands.
#[derive(Debug, Clone, Copy)]
pub struct RenderOp {
    /// Plane texture ids to bind; unused slots are zero
    pub textures: [u64; MAX_PLANES],
    /// Number of planes to bind; zero means the engine's own atlas
    pub texture_count: u32,
    /// Scissor rect carried through from the command
    pub clip: ClipRect,
    /// Selected shader path
    pub pass: PassKind,
}

/// Plan backend render ops for a frame's draw command list
pub fn build_render_ops(commands: &[DrawCommand<'_>]) -> Vec<RenderOp> {
    commands.iter().map(op_for_command).collect()
}

fn op_for_command(command: &DrawCommand<'_>) -> RenderOp {
    let Some(source) = command.source else {
        return RenderOp {
            textures: [0; MAX_PLANES],
            texture_count: 0,
            clip: command.clip,
            pass: PassKind::Default,
        };
    };

    let mut op = RenderOp {
        textures: source.planes,
        texture_count: source.plane_count,
        clip: command.clip,
        pass: PassKind::Default,
    };

    // The format-aware pass applies only to a single-rectangle image blit
    // with a non-default sample type; everything else takes the engine's
    // single-texture linear path
    if source.is_default_sampling() {
        return op;
    }
    let Some(rect) = classify_quad(command.vertices) else {
        return op;
    };

    let texture_size = Vec2::new(source.width as f32, source.height as f32);
    op.pass = PassKind::FormatAware(BlitUniforms {
        sample_format: source.format as u32,
        color_range: source.range as u32,
        filter: source.filter as u32,
        _pad: 0,
        texture_size: texture_size.to_array(),
        display_size: rect.screen_size.to_array(),
        render_size: (rect.uv_size * texture_size).to_array(),
    });
    op
}
