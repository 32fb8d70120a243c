//! Texture backend seam
//!
//! The uploader never talks to a graphics API directly; it drives this
//! trait. Plane geometry is resolved by `vidtex-format` before any backend
//! call, so a backend only sees per-plane descriptors and packed bytes.

use vidtex_format::{NativeSurface, PlaneDescriptor};

/// Channel layout of a single plane texture
///
/// Derived from a plane's bytes-per-pixel: luma and gray planes are R8,
/// interleaved chroma is RG8, packed color is RGBA8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneChannelFormat {
    R8,
    Rg8,
    Rgba8,
}

impl PlaneChannelFormat {
    /// Map a plane's bytes-per-pixel to its channel layout
    pub fn from_bytes_per_pixel(bytes_per_pixel: u32) -> Option<Self> {
        match bytes_per_pixel {
            1 => Some(PlaneChannelFormat::R8),
            2 => Some(PlaneChannelFormat::Rg8),
            4 => Some(PlaneChannelFormat::Rgba8),
            _ => None,
        }
    }
}

/// Backend failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("texture creation failed: {0}")]
    TextureCreation(String),
    #[error("texture upload failed: {0}")]
    Upload(String),
    #[error("no channel layout for {bytes_per_pixel} bytes per pixel")]
    UnsupportedChannelLayout { bytes_per_pixel: u32 },
    #[error("backend cannot import shared GPU surfaces")]
    SharedImportUnsupported,
    #[error("shared surface import failed: {0}")]
    SharedImport(String),
}

/// Graphics API abstraction for plane textures
///
/// Implementations wrap a native device/context pair (Direct3D 11, OpenGL)
/// and own nothing beyond that; texture objects returned here are owned by
/// the caller's `TextureHandle` and must be returned via `destroy_texture`.
pub trait TextureBackend {
    /// Backend-native plane texture object
    type Texture;

    /// Create one plane texture with the given geometry and channel layout
    fn create_texture(
        &mut self,
        desc: &PlaneDescriptor,
        channels: PlaneChannelFormat,
    ) -> Result<Self::Texture, BackendError>;

    /// Copy tightly-packed pixel rows into an existing plane texture
    ///
    /// `data` is exactly `desc.size_in_bytes()` long; padded strides are
    /// compacted by the uploader before this call.
    fn upload_texture(
        &mut self,
        texture: &mut Self::Texture,
        desc: &PlaneDescriptor,
        data: &[u8],
    ) -> Result<(), BackendError>;

    /// Release one plane texture
    fn destroy_texture(&mut self, texture: Self::Texture);

    /// Opaque identifier the GUI draw list can carry for this texture
    fn texture_id(&self, texture: &Self::Texture) -> u64;

    /// Import a pre-decoded shared GPU surface as plane textures
    ///
    /// Backend specific by nature: on Direct3D this opens the shared
    /// resource handle and issues a GPU-side region copy into an internally
    /// held shared-compatible texture, yielding one view per plane. There
    /// is no portable equivalent, so the default refuses.
    fn import_shared(
        &mut self,
        surface: &NativeSurface,
    ) -> Result<Vec<Self::Texture>, BackendError> {
        let _ = surface;
        Err(BackendError::SharedImportUnsupported)
    }
}
