//! Image plane and pixel format resolution
//!
//! Pure, stateless layout logic shared by every texture backend:
//! - Plane count and per-plane geometry for packed, planar and semi-planar
//!   pixel formats
//! - Shader sampling tags and color range metadata
//! - Non-owning per-frame image views with stride-aware row access
//!
//! Nothing here touches a graphics device, so the whole crate is unit
//! testable by enumerating `(format, plane)` pairs.

pub mod buffer;
pub mod planes;
pub mod types;

pub use buffer::*;
pub use planes::*;
pub use types::*;
