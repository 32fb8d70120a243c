//! Frame-to-texture upload path
//!
//! Ensures a `TextureHandle`'s plane textures match an incoming frame's
//! layout, recreating them only when format or dimensions changed, then
//! copies pixel data plane by plane. Failure never leaves a half-updated
//! multi-plane handle: the handle is fully released and the next frame
//! recreates from scratch.

use crate::backend::{BackendError, PlaneChannelFormat, TextureBackend};
use crate::handle::{TextureHandle, TextureMeta};
use vidtex_format::{plane_info, ImageBuffer, PixelFormat, PlaneError};

/// Upload failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Plane(#[from] PlaneError),
    #[error("native-handle buffer carries no shared surface")]
    MissingNativeSurface,
    #[error("shared import yielded {got} planes, format requires {expected}")]
    SharedPlaneCountMismatch { expected: usize, got: usize },
    #[error("plane {plane} texture missing from handle")]
    MissingPlaneTexture { plane: usize },
}

/// Texture uploader with a reusable row-compaction scratch buffer
///
/// One instance lives alongside the render loop; the scratch buffer keeps
/// padded-stride uploads from allocating every frame.
#[derive(Default)]
pub struct Uploader {
    scratch: Vec<u8>,
}

impl Uploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload one frame into a handle, reusing textures where possible
    ///
    /// On success the handle's metadata mirrors the buffer's format, range
    /// and size. On any failure the handle is fully released; the caller
    /// skips this frame's bind and the next call recreates from scratch.
    pub fn update_texture<B: TextureBackend>(
        &mut self,
        backend: &mut B,
        image: &ImageBuffer<'_>,
        handle: &mut TextureHandle<B>,
    ) -> Result<(), UploadError> {
        let result = self.update_inner(backend, image, handle);
        if let Err(err) = &result {
            log::warn!(
                "texture update failed for {:?} {}x{}: {err}",
                image.format(),
                image.width(),
                image.height()
            );
            handle.release(backend);
        }
        result
    }

    fn update_inner<B: TextureBackend>(
        &mut self,
        backend: &mut B,
        image: &ImageBuffer<'_>,
        handle: &mut TextureHandle<B>,
    ) -> Result<(), UploadError> {
        let format = image.format();

        if format == PixelFormat::NativeHandle {
            return import_native(backend, image, handle);
        }

        let plane_count = format.plane_count();

        if !handle.matches(format, image.width(), image.height()) {
            log::debug!(
                "recreating {} plane textures for {:?} {}x{}",
                plane_count,
                format,
                image.width(),
                image.height()
            );
            handle.release(backend);
            for plane in 0..plane_count {
                let desc = plane_info(format, image.width(), image.height(), plane)?;
                let channels = PlaneChannelFormat::from_bytes_per_pixel(desc.bytes_per_pixel)
                    .ok_or(BackendError::UnsupportedChannelLayout {
                        bytes_per_pixel: desc.bytes_per_pixel,
                    })?;
                let texture = backend.create_texture(&desc, channels)?;
                handle.set_plane(plane, texture);
            }
        }

        for plane in 0..plane_count {
            let desc = plane_info(format, image.width(), image.height(), plane)?;
            let data: &[u8] = if image.is_tightly_packed(plane)? {
                &image.plane(plane).data[..desc.size_in_bytes()]
            } else {
                // The backend expects a single stride for the whole plane
                image.compact_plane_into(plane, &mut self.scratch)?;
                &self.scratch
            };

            let texture = handle
                .plane_mut(plane)
                .ok_or(UploadError::MissingPlaneTexture { plane })?;
            backend.upload_texture(texture, &desc, data)?;
        }

        handle.set_meta(TextureMeta {
            format,
            range: image.range(),
            width: image.width(),
            height: image.height(),
        });
        Ok(())
    }
}

/// Route a pre-decoded shared GPU surface through the backend
fn import_native<B: TextureBackend>(
    backend: &mut B,
    image: &ImageBuffer<'_>,
    handle: &mut TextureHandle<B>,
) -> Result<(), UploadError> {
    let surface = image.native().ok_or(UploadError::MissingNativeSurface)?;
    let expected = PixelFormat::NativeHandle.plane_count();

    let mut planes = backend.import_shared(surface)?;
    if planes.len() != expected {
        let got = planes.len();
        for texture in planes.drain(..) {
            backend.destroy_texture(texture);
        }
        return Err(UploadError::SharedPlaneCountMismatch { expected, got });
    }

    handle.release(backend);
    for (plane, texture) in planes.into_iter().enumerate() {
        handle.set_plane(plane, texture);
    }
    handle.set_meta(TextureMeta {
        format: PixelFormat::NativeHandle,
        range: image.range(),
        width: image.width(),
        height: image.height(),
    });
    Ok(())
}

/// Destroy a handle's plane textures and clear its metadata
pub fn free_texture<B: TextureBackend>(backend: &mut B, handle: &mut TextureHandle<B>) {
    handle.release(backend);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::software::SoftwareBackend;
    use vidtex_format::{ColorRange, NativeSurface, PlaneView};

    fn nv12_buffer<'a>(
        y: &'a [u8],
        uv: &'a [u8],
        width: u32,
        height: u32,
    ) -> ImageBuffer<'a> {
        let planes = [
            PlaneView {
                data: y,
                stride: width as usize,
            },
            PlaneView {
                data: uv,
                stride: width as usize,
            },
        ];
        ImageBuffer::new(PixelFormat::Nv12, ColorRange::Studio, width, height, &planes).unwrap()
    }

    #[test]
    fn test_upload_reuses_then_recreates() {
        let mut backend = SoftwareBackend::new();
        let mut uploader = Uploader::new();
        let mut handle = TextureHandle::new();

        let y_a = vec![10u8; 64 * 64];
        let uv_a = vec![20u8; 64 * 32];
        uploader
            .update_texture(&mut backend, &nv12_buffer(&y_a, &uv_a, 64, 64), &mut handle)
            .unwrap();
        assert_eq!(backend.created_count(), 2);
        assert_eq!(handle.plane_count(), 2);
        let meta_first = *handle.meta().unwrap();

        // Same layout, different content: textures are reused, bytes change
        let y_b = vec![99u8; 64 * 64];
        let uv_b = vec![55u8; 64 * 32];
        uploader
            .update_texture(&mut backend, &nv12_buffer(&y_b, &uv_b, 64, 64), &mut handle)
            .unwrap();
        assert_eq!(backend.created_count(), 2);
        assert_eq!(backend.destroyed_count(), 0);
        assert_eq!(*handle.meta().unwrap(), meta_first);
        assert_eq!(
            backend.texture_bytes(handle.plane(0).unwrap()),
            Some(&y_b[..])
        );

        // New width: both planes destroyed and recreated
        let y_c = vec![1u8; 32 * 64];
        let uv_c = vec![2u8; 32 * 32];
        uploader
            .update_texture(&mut backend, &nv12_buffer(&y_c, &uv_c, 32, 64), &mut handle)
            .unwrap();
        assert_eq!(backend.destroyed_count(), 2);
        assert_eq!(backend.created_count(), 4);
        assert_eq!(handle.meta().unwrap().width, 32);
    }

    #[test]
    fn test_padded_stride_is_compacted() {
        let mut backend = SoftwareBackend::new();
        let mut uploader = Uploader::new();
        let mut handle = TextureHandle::new();

        // 4x2 gray plane padded to a 6-byte stride
        let data = [1u8, 2, 3, 4, 0xAA, 0xAA, 5, 6, 7, 8, 0xAA, 0xAA];
        let planes = [PlaneView {
            data: &data,
            stride: 6,
        }];
        let image =
            ImageBuffer::new(PixelFormat::Gray, ColorRange::Full, 4, 2, &planes).unwrap();

        uploader
            .update_texture(&mut backend, &image, &mut handle)
            .unwrap();
        assert_eq!(
            backend.texture_bytes(handle.plane(0).unwrap()),
            Some(&[1u8, 2, 3, 4, 5, 6, 7, 8][..])
        );
    }

    #[test]
    fn test_creation_failure_releases_everything() {
        // Three planes needed, budget of two: creation fails partway
        let mut backend = SoftwareBackend::with_max_live(2);
        let mut uploader = Uploader::new();
        let mut handle = TextureHandle::new();

        let y = vec![0u8; 64 * 64];
        let u = vec![0u8; 32 * 32];
        let v = vec![0u8; 32 * 32];
        let planes = [
            PlaneView { data: &y, stride: 64 },
            PlaneView { data: &u, stride: 32 },
            PlaneView { data: &v, stride: 32 },
        ];
        let image =
            ImageBuffer::new(PixelFormat::Yuv420P, ColorRange::Full, 64, 64, &planes).unwrap();

        let err = uploader
            .update_texture(&mut backend, &image, &mut handle)
            .unwrap_err();
        assert!(matches!(err, UploadError::Backend(_)));

        // Never half-updated: the handle is empty and nothing leaks
        assert_eq!(handle.plane_count(), 0);
        assert!(handle.meta().is_none());
        assert_eq!(backend.live_count(), 0);
    }

    #[test]
    fn test_native_surface_unsupported_backend() {
        let mut backend = SoftwareBackend::new();
        let mut uploader = Uploader::new();
        let mut handle = TextureHandle::new();

        let surface = NativeSurface {
            shared_handle: 42,
            width: 64,
            height: 64,
        };
        let image = ImageBuffer::from_native(surface, ColorRange::Studio);

        let err = uploader
            .update_texture(&mut backend, &image, &mut handle)
            .unwrap_err();
        assert_eq!(
            err,
            UploadError::Backend(BackendError::SharedImportUnsupported)
        );
        assert!(handle.meta().is_none());
    }

    #[test]
    fn test_free_texture() {
        let mut backend = SoftwareBackend::new();
        let mut uploader = Uploader::new();
        let mut handle = TextureHandle::new();

        let y = vec![0u8; 64 * 64];
        let uv = vec![0u8; 64 * 32];
        uploader
            .update_texture(&mut backend, &nv12_buffer(&y, &uv, 64, 64), &mut handle)
            .unwrap();

        free_texture(&mut backend, &mut handle);
        assert_eq!(handle.plane_count(), 0);
        assert!(handle.meta().is_none());
        assert_eq!(backend.live_count(), 0);
    }

    #[test]
    fn test_meta_mirrors_buffer() {
        let mut backend = SoftwareBackend::new();
        let mut uploader = Uploader::new();
        let mut handle = TextureHandle::new();

        let y = vec![0u8; 64 * 64];
        let uv = vec![0u8; 64 * 32];
        uploader
            .update_texture(&mut backend, &nv12_buffer(&y, &uv, 64, 64), &mut handle)
            .unwrap();

        let meta = handle.meta().unwrap();
        assert_eq!(meta.format, PixelFormat::Nv12);
        assert_eq!(meta.range, ColorRange::Studio);
        assert_eq!((meta.width, meta.height), (64, 64));
    }
}
