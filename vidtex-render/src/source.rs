//! Per-draw-call render source tokens

use vidtex_format::{ColorRange, SampleFormat, MAX_PLANES};
use vidtex_upload::{TextureBackend, TextureHandle};

/// Texture sampling mode requested for a drawn image
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFilter {
    /// Bilinear, the GUI engine's default
    #[default]
    Linear = 0,
    Nearest = 1,
    /// Area averaging for strong downscales
    Area = 2,
}

/// Copyable snapshot of a texture handle attached to a drawn quad
///
/// The draw-list batcher treats this as an opaque per-draw-call tag; it
/// holds plane texture ids plus the metadata the renderer needs to pick a
/// shader sampling branch. It borrows nothing and stays valid for the frame
/// in which it was snapshotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSource {
    /// Backend texture ids, one per plane
    pub planes: [u64; MAX_PLANES],
    /// Live planes in `planes`
    pub plane_count: u32,
    /// Shader sampling tag
    pub format: SampleFormat,
    /// Sample value range of the source
    pub range: ColorRange,
    /// Full texture width in pixels
    pub width: u32,
    /// Full texture height in pixels
    pub height: u32,
    /// Requested sampling mode
    pub filter: SampleFilter,
}

impl RenderSource {
    /// Snapshot a texture handle for this frame's draw list
    ///
    /// Returns `None` until the handle has seen a successful upload.
    pub fn from_handle<B: TextureBackend>(
        backend: &B,
        handle: &TextureHandle<B>,
        filter: SampleFilter,
    ) -> Option<Self> {
        let meta = handle.meta()?;
        let plane_count = meta.format.plane_count();

        let mut planes = [0u64; MAX_PLANES];
        for (plane, slot) in planes.iter_mut().enumerate().take(plane_count) {
            *slot = backend.texture_id(handle.plane(plane)?);
        }

        Some(Self {
            planes,
            plane_count: plane_count as u32,
            format: meta.format.sample_format(),
            range: meta.range,
            width: meta.width,
            height: meta.height,
            filter,
        })
    }

    /// First plane's texture id, the one the default shader path binds
    pub fn primary_texture(&self) -> u64 {
        self.planes[0]
    }

    /// Whether the GUI engine's default single-texture linear path suffices
    pub fn is_default_sampling(&self) -> bool {
        self.format == SampleFormat::Rgba
            && self.range == ColorRange::Full
            && self.filter == SampleFilter::Linear
    }
}
