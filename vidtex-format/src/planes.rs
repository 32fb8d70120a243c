//! Plane geometry resolution
//!
//! Pure mapping from `(format, width, height, plane)` to per-plane pixel
//! dimensions and bytes-per-pixel. No graphics device involved, so every
//! `(format, plane)` pair can be enumerated and asserted in tests.

use crate::types::PixelFormat;

/// Derived per-plane layout for a given image
///
/// Never stored; recomputed from the format and full-image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneDescriptor {
    /// Bytes per pixel within this plane
    pub bytes_per_pixel: u32,
    /// Plane width in pixels
    pub width: u32,
    /// Plane height in pixels
    pub height: u32,
}

impl PlaneDescriptor {
    /// Tightly-packed row size in bytes
    pub fn pitch(&self) -> usize {
        self.width as usize * self.bytes_per_pixel as usize
    }

    /// Tightly-packed plane size in bytes
    pub fn size_in_bytes(&self) -> usize {
        self.pitch() * self.height as usize
    }
}

/// Plane resolution error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlaneError {
    #[error("plane index {index} out of range for {format:?} ({count} planes)")]
    IndexOutOfRange {
        format: PixelFormat,
        index: usize,
        count: usize,
    },
}

/// Resolve the layout of one plane of an image
///
/// Chroma-subsampled plane dimensions derive from the luma dimensions by
/// truncating integer division; an odd luma dimension loses its last chroma
/// row/column. The native-handle format mirrors NV12 plane geometry (a
/// full-res luma view plus a half-res interleaved chroma view).
pub fn plane_info(
    format: PixelFormat,
    width: u32,
    height: u32,
    plane: usize,
) -> Result<PlaneDescriptor, PlaneError> {
    let count = format.plane_count();
    if plane >= count {
        return Err(PlaneError::IndexOutOfRange {
            format,
            index: plane,
            count,
        });
    }

    let desc = match format {
        PixelFormat::Rgba | PixelFormat::Bgra => PlaneDescriptor {
            bytes_per_pixel: 4,
            width,
            height,
        },
        PixelFormat::Gray => PlaneDescriptor {
            bytes_per_pixel: 1,
            width,
            height,
        },
        PixelFormat::Yuv444P => PlaneDescriptor {
            bytes_per_pixel: 1,
            width,
            height,
        },
        PixelFormat::Yuv422P => PlaneDescriptor {
            bytes_per_pixel: 1,
            width: if plane == 0 { width } else { width / 2 },
            height,
        },
        PixelFormat::Yuv411P => PlaneDescriptor {
            bytes_per_pixel: 1,
            width: if plane == 0 { width } else { width / 4 },
            height,
        },
        PixelFormat::Yuv420P | PixelFormat::Yv12 => PlaneDescriptor {
            bytes_per_pixel: 1,
            width: if plane == 0 { width } else { width / 2 },
            height: if plane == 0 { height } else { height / 2 },
        },
        PixelFormat::Nv12 | PixelFormat::Nv21 | PixelFormat::NativeHandle => {
            if plane == 0 {
                PlaneDescriptor {
                    bytes_per_pixel: 1,
                    width,
                    height,
                }
            } else {
                // Interleaved two-component chroma at half resolution
                PlaneDescriptor {
                    bytes_per_pixel: 2,
                    width: width / 2,
                    height: height / 2,
                }
            }
        }
    };

    Ok(desc)
}

/// Tightly-packed byte size of a whole image across all planes
pub fn total_size(format: PixelFormat, width: u32, height: u32) -> usize {
    (0..format.plane_count())
        .map(|plane| {
            plane_info(format, width, height, plane)
                .map(|desc| desc.size_in_bytes())
                .unwrap_or(0)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ALL_FORMATS;

    #[test]
    fn test_plane_info_positive_everywhere() {
        for format in ALL_FORMATS {
            for plane in 0..format.plane_count() {
                let desc = plane_info(format, 64, 64, plane).unwrap();
                assert!(desc.width > 0, "{:?} plane {}", format, plane);
                assert!(desc.height > 0, "{:?} plane {}", format, plane);
                assert!(desc.bytes_per_pixel > 0, "{:?} plane {}", format, plane);
            }
        }
    }

    #[test]
    fn test_plane_index_out_of_range() {
        let err = plane_info(PixelFormat::Rgba, 64, 64, 1).unwrap_err();
        assert_eq!(
            err,
            PlaneError::IndexOutOfRange {
                format: PixelFormat::Rgba,
                index: 1,
                count: 1,
            }
        );
        assert!(plane_info(PixelFormat::Yuv420P, 64, 64, 3).is_err());
        assert!(plane_info(PixelFormat::Nv12, 64, 64, 2).is_err());
    }

    #[test]
    fn test_yuv420_byte_layout() {
        // 4:2:0 at 64x64: 64*64 luma + two 32*32 chroma planes
        assert_eq!(total_size(PixelFormat::Yuv420P, 64, 64), 4096 + 1024 + 1024);

        let chroma = plane_info(PixelFormat::Yuv420P, 64, 64, 1).unwrap();
        assert_eq!((chroma.width, chroma.height), (32, 32));
    }

    #[test]
    fn test_known_totals() {
        assert_eq!(total_size(PixelFormat::Rgba, 64, 64), 64 * 64 * 4);
        assert_eq!(total_size(PixelFormat::Gray, 64, 64), 64 * 64);
        assert_eq!(total_size(PixelFormat::Yuv444P, 64, 64), 64 * 64 * 3);
        // 4:2:2: chroma width halved, height unchanged
        assert_eq!(total_size(PixelFormat::Yuv422P, 64, 64), 4096 + 2048 + 2048);
        // 4:1:1: chroma width quartered
        assert_eq!(total_size(PixelFormat::Yuv411P, 64, 64), 4096 + 1024 + 1024);
        // NV12: full-res 1 bpp luma + half-res 2 bpp chroma
        assert_eq!(total_size(PixelFormat::Nv12, 64, 64), 4096 + 32 * 32 * 2);
    }

    #[test]
    fn test_odd_dimension_truncates() {
        // Chroma halving truncates, never rounds up
        let chroma = plane_info(PixelFormat::Yuv420P, 65, 64, 1).unwrap();
        assert_eq!(chroma.width, 32);

        let chroma = plane_info(PixelFormat::Yuv420P, 65, 65, 2).unwrap();
        assert_eq!((chroma.width, chroma.height), (32, 32));

        let chroma = plane_info(PixelFormat::Yuv411P, 67, 64, 1).unwrap();
        assert_eq!(chroma.width, 16);
    }

    #[test]
    fn test_nv12_chroma_is_two_component() {
        let chroma = plane_info(PixelFormat::Nv12, 64, 64, 1).unwrap();
        assert_eq!(chroma.bytes_per_pixel, 2);
        assert_eq!(chroma.pitch(), 64);

        let chroma = plane_info(PixelFormat::Nv21, 64, 64, 1).unwrap();
        assert_eq!(chroma.bytes_per_pixel, 2);
    }

    #[test]
    fn test_descriptor_pitch_and_size() {
        let desc = PlaneDescriptor {
            bytes_per_pixel: 4,
            width: 10,
            height: 3,
        };
        assert_eq!(desc.pitch(), 40);
        assert_eq!(desc.size_in_bytes(), 120);
    }
}
