//! Pixel format and color metadata types

/// Maximum number of planes a single logical image can span
pub const MAX_PLANES: usize = 4;

/// Pixel format enumeration
///
/// The format is fixed once an image buffer is described; it determines
/// plane count and layout, never the reverse.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Packed 8-bit RGBA
    Rgba = 0,
    /// Packed 8-bit BGRA
    Bgra = 1,
    /// Planar YUV 4:4:4
    Yuv444P = 2,
    /// Planar YUV 4:2:2
    Yuv422P = 3,
    /// Planar YUV 4:1:1
    Yuv411P = 4,
    /// Planar YUV 4:2:0
    Yuv420P = 5,
    /// Planar YUV 4:2:0 with swapped chroma plane order (Y, V, U)
    Yv12 = 6,
    /// Semi-planar YUV 4:2:0 (Y plane, interleaved UV)
    Nv12 = 7,
    /// Semi-planar YUV 4:2:0 (Y plane, interleaved VU)
    Nv21 = 8,
    /// Single-plane 8-bit grayscale
    Gray = 9,
    /// Pre-decoded GPU surface shared by the decoder (platform specific)
    NativeHandle = 10,
}

/// All supported formats, in tag order
pub const ALL_FORMATS: [PixelFormat; 11] = [
    PixelFormat::Rgba,
    PixelFormat::Bgra,
    PixelFormat::Yuv444P,
    PixelFormat::Yuv422P,
    PixelFormat::Yuv411P,
    PixelFormat::Yuv420P,
    PixelFormat::Yv12,
    PixelFormat::Nv12,
    PixelFormat::Nv21,
    PixelFormat::Gray,
    PixelFormat::NativeHandle,
];

impl PixelFormat {
    /// Decode a raw format tag, e.g. one arriving over an FFI boundary
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(PixelFormat::Rgba),
            1 => Some(PixelFormat::Bgra),
            2 => Some(PixelFormat::Yuv444P),
            3 => Some(PixelFormat::Yuv422P),
            4 => Some(PixelFormat::Yuv411P),
            5 => Some(PixelFormat::Yuv420P),
            6 => Some(PixelFormat::Yv12),
            7 => Some(PixelFormat::Nv12),
            8 => Some(PixelFormat::Nv21),
            9 => Some(PixelFormat::Gray),
            10 => Some(PixelFormat::NativeHandle),
            _ => None,
        }
    }

    /// Returns the number of texture planes this format spans
    pub fn plane_count(self) -> usize {
        match self {
            PixelFormat::Yuv444P
            | PixelFormat::Yuv422P
            | PixelFormat::Yuv411P
            | PixelFormat::Yuv420P
            | PixelFormat::Yv12 => 3,
            PixelFormat::Nv12 | PixelFormat::Nv21 | PixelFormat::NativeHandle => 2,
            PixelFormat::Rgba | PixelFormat::Bgra | PixelFormat::Gray => 1,
        }
    }

    /// Check if format carries chroma-subsampled or full-res YUV samples
    ///
    /// Color range only affects how these formats are sampled in the shader.
    pub fn is_yuv(self) -> bool {
        match self {
            PixelFormat::Yuv444P
            | PixelFormat::Yuv422P
            | PixelFormat::Yuv411P
            | PixelFormat::Yuv420P
            | PixelFormat::Yv12
            | PixelFormat::Nv12
            | PixelFormat::Nv21
            | PixelFormat::NativeHandle => true,
            PixelFormat::Rgba | PixelFormat::Bgra | PixelFormat::Gray => false,
        }
    }

    /// Map to the shader sampling tag for this format
    ///
    /// Selects a sampling branch only; plane geometry is unaffected. The
    /// native-handle format defaults to RGBA because its planes are sampled
    /// through backend-provided views.
    pub fn sample_format(self) -> SampleFormat {
        match self {
            PixelFormat::Rgba | PixelFormat::NativeHandle => SampleFormat::Rgba,
            PixelFormat::Bgra => SampleFormat::Bgra,
            PixelFormat::Yuv444P
            | PixelFormat::Yuv422P
            | PixelFormat::Yuv411P
            | PixelFormat::Yuv420P => SampleFormat::YuvPlanar,
            PixelFormat::Yv12 => SampleFormat::YvuPlanar,
            PixelFormat::Nv12 => SampleFormat::Nv12,
            PixelFormat::Nv21 => SampleFormat::Nv21,
            PixelFormat::Gray => SampleFormat::Gray,
        }
    }
}

/// Plane count for a raw format tag
///
/// Returns 0 for unrecognized tags, the error sentinel expected by raw-tag
/// callers.
pub fn plane_count_of(raw: u32) -> usize {
    PixelFormat::from_raw(raw).map_or(0, PixelFormat::plane_count)
}

/// Backend-neutral shader sampling tag
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFormat {
    #[default]
    Rgba = 0,
    Bgra = 1,
    YuvPlanar = 2,
    YvuPlanar = 3,
    Nv12 = 4,
    Nv21 = 5,
    Gray = 6,
}

/// Sample value range for YUV content
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorRange {
    /// Full range (0-255)
    #[default]
    Full = 0,
    /// Studio range (16-235)
    Studio = 1,
}

/// Opaque pre-decoded GPU surface reference
///
/// Carried by `NativeHandle` image buffers in place of host pixel data. The
/// handle value is backend specific (e.g. a Direct3D shared resource handle)
/// and is only meaningful to the backend that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeSurface {
    /// Backend-specific shared resource handle value
    pub shared_handle: u64,
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
}
