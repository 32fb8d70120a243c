//! GPU texture handles with cached upload metadata

use crate::backend::TextureBackend;
use vidtex_format::{ColorRange, PixelFormat, MAX_PLANES};

/// Metadata mirrored from the last successful upload
///
/// Used to decide whether existing plane textures can be reused (same
/// dimensions and pixel layout) or must be destroyed and recreated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureMeta {
    pub format: PixelFormat,
    pub range: ColorRange,
    pub width: u32,
    pub height: u32,
}

/// Per-backend plane texture set for one render source
///
/// Exclusively owned by whichever render-source object holds it; released
/// on `free` or when the owner drops it back to the backend.
pub struct TextureHandle<B: TextureBackend> {
    planes: [Option<B::Texture>; MAX_PLANES],
    meta: Option<TextureMeta>,
}

impl<B: TextureBackend> Default for TextureHandle<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: TextureBackend> TextureHandle<B> {
    /// Create an empty handle with no GPU textures
    pub fn new() -> Self {
        Self {
            planes: [None, None, None, None],
            meta: None,
        }
    }

    /// Metadata of the last successful upload, if any
    pub fn meta(&self) -> Option<&TextureMeta> {
        self.meta.as_ref()
    }

    /// Borrow one plane texture
    pub fn plane(&self, plane: usize) -> Option<&B::Texture> {
        self.planes.get(plane).and_then(Option::as_ref)
    }

    /// Number of live plane textures
    pub fn plane_count(&self) -> usize {
        self.planes.iter().filter(|p| p.is_some()).count()
    }

    /// Whether existing textures match an incoming buffer's layout
    pub fn matches(&self, format: PixelFormat, width: u32, height: u32) -> bool {
        self.meta
            .map(|meta| meta.format == format && meta.width == width && meta.height == height)
            .unwrap_or(false)
    }

    pub(crate) fn plane_mut(&mut self, plane: usize) -> Option<&mut B::Texture> {
        self.planes.get_mut(plane).and_then(Option::as_mut)
    }

    pub(crate) fn set_plane(&mut self, plane: usize, texture: B::Texture) {
        self.planes[plane] = Some(texture);
    }

    pub(crate) fn set_meta(&mut self, meta: TextureMeta) {
        self.meta = Some(meta);
    }

    /// Destroy every plane texture and clear the cached metadata
    pub fn release(&mut self, backend: &mut B) {
        for slot in self.planes.iter_mut() {
            if let Some(texture) = slot.take() {
                backend.destroy_texture(texture);
            }
        }
        self.meta = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::software::SoftwareBackend;

    #[test]
    fn test_empty_handle() {
        let handle: TextureHandle<SoftwareBackend> = TextureHandle::new();
        assert!(handle.meta().is_none());
        assert_eq!(handle.plane_count(), 0);
        assert!(handle.plane(0).is_none());
        assert!(!handle.matches(PixelFormat::Rgba, 64, 64));
    }

    #[test]
    fn test_matches_after_meta() {
        let mut handle: TextureHandle<SoftwareBackend> = TextureHandle::new();
        handle.set_meta(TextureMeta {
            format: PixelFormat::Nv12,
            range: ColorRange::Studio,
            width: 640,
            height: 480,
        });

        assert!(handle.matches(PixelFormat::Nv12, 640, 480));
        assert!(!handle.matches(PixelFormat::Nv12, 320, 480));
        assert!(!handle.matches(PixelFormat::Yuv420P, 640, 480));
    }
}
