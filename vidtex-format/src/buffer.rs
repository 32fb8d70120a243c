//! Caller-owned image views
//!
//! An `ImageBuffer` is a read-only, non-owning description of one decoded
//! frame: per-plane byte slices with row strides, plus format and color
//! range. It is built per frame, consumed synchronously by the texture
//! uploader, and discarded; it owns no resources.

use crate::planes::{plane_info, PlaneError};
use crate::types::{ColorRange, NativeSurface, PixelFormat, MAX_PLANES};

/// One plane of host pixel data
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaneView<'a> {
    /// Raw plane bytes, at least `stride * (height - 1) + pitch` long
    pub data: &'a [u8],
    /// Row stride in bytes; may exceed the tightly-packed pitch
    pub stride: usize,
}

/// Image buffer validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error(transparent)]
    Plane(#[from] PlaneError),
    #[error("{format:?} spans {expected} planes, {got} supplied")]
    PlaneCountMismatch {
        format: PixelFormat,
        expected: usize,
        got: usize,
    },
    #[error("plane {plane} stride {stride} below packed pitch {pitch}")]
    StrideTooSmall {
        plane: usize,
        stride: usize,
        pitch: usize,
    },
    #[error("plane {plane} holds {got} bytes, layout requires {needed}")]
    PlaneTooShort {
        plane: usize,
        needed: usize,
        got: usize,
    },
    #[error("native-handle buffers carry a surface, not host planes")]
    NativeFormatWithHostPlanes,
}

/// Read-only view over one decoded frame
#[derive(Debug, Clone, Copy)]
pub struct ImageBuffer<'a> {
    format: PixelFormat,
    range: ColorRange,
    width: u32,
    height: u32,
    planes: [PlaneView<'a>; MAX_PLANES],
    native: Option<NativeSurface>,
}

impl<'a> ImageBuffer<'a> {
    /// Describe a host-memory frame
    ///
    /// Validates that the supplied plane views match the format's plane
    /// count and that each slice covers its plane at the given stride.
    pub fn new(
        format: PixelFormat,
        range: ColorRange,
        width: u32,
        height: u32,
        planes: &[PlaneView<'a>],
    ) -> Result<Self, BufferError> {
        if format == PixelFormat::NativeHandle {
            return Err(BufferError::NativeFormatWithHostPlanes);
        }

        let expected = format.plane_count();
        if planes.len() != expected {
            return Err(BufferError::PlaneCountMismatch {
                format,
                expected,
                got: planes.len(),
            });
        }

        let mut stored = [PlaneView::default(); MAX_PLANES];
        for (index, view) in planes.iter().enumerate() {
            let desc = plane_info(format, width, height, index)?;
            let pitch = desc.pitch();
            if view.stride < pitch {
                return Err(BufferError::StrideTooSmall {
                    plane: index,
                    stride: view.stride,
                    pitch,
                });
            }

            let needed = if desc.height == 0 {
                0
            } else {
                view.stride * (desc.height as usize - 1) + pitch
            };
            if view.data.len() < needed {
                return Err(BufferError::PlaneTooShort {
                    plane: index,
                    needed,
                    got: view.data.len(),
                });
            }

            stored[index] = *view;
        }

        Ok(Self {
            format,
            range,
            width,
            height,
            planes: stored,
            native: None,
        })
    }

    /// Describe a frame already resident on the GPU
    pub fn from_native(surface: NativeSurface, range: ColorRange) -> ImageBuffer<'static> {
        ImageBuffer {
            format: PixelFormat::NativeHandle,
            range,
            width: surface.width,
            height: surface.height,
            planes: [PlaneView::default(); MAX_PLANES],
            native: Some(surface),
        }
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn range(&self) -> ColorRange {
        self.range
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Shared GPU surface, present only for native-handle buffers
    pub fn native(&self) -> Option<&NativeSurface> {
        self.native.as_ref()
    }

    /// Raw view of one plane
    pub fn plane(&self, plane: usize) -> PlaneView<'a> {
        self.planes[plane]
    }

    /// Whether a plane's stride equals its packed pitch
    ///
    /// Tightly-packed planes can be handed to the backend as-is; padded
    /// strides require row compaction first.
    pub fn is_tightly_packed(&self, plane: usize) -> Result<bool, PlaneError> {
        let desc = plane_info(self.format, self.width, self.height, plane)?;
        Ok(self.planes[plane].stride == desc.pitch())
    }

    /// Iterate the packed rows of one plane, stride padding excluded
    pub fn rows(&self, plane: usize) -> Result<impl Iterator<Item = &'a [u8]>, PlaneError> {
        let desc = plane_info(self.format, self.width, self.height, plane)?;
        let view = self.planes[plane];
        let pitch = desc.pitch();
        Ok((0..desc.height as usize)
            .map(move |row| &view.data[row * view.stride..row * view.stride + pitch]))
    }

    /// Compact one plane into a tightly-packed buffer
    ///
    /// `out` is cleared and refilled; callers reuse the same scratch vector
    /// across frames to avoid per-frame allocation churn.
    pub fn compact_plane_into(&self, plane: usize, out: &mut Vec<u8>) -> Result<(), PlaneError> {
        let desc = plane_info(self.format, self.width, self.height, plane)?;
        out.clear();
        out.reserve(desc.size_in_bytes());
        for row in self.rows(plane)? {
            out.extend_from_slice(row);
        }
        Ok(())
    }
}
