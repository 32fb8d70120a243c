//! Backend texture upload pipeline
//!
//! Bridges decoded frames (`vidtex-format` image views) to per-backend GPU
//! plane textures:
//! - `TextureBackend` trait as the narrow graphics-API seam
//! - `TextureHandle` with cached metadata for reuse-vs-recreate decisions
//! - Stride compaction for padded host buffers
//! - A host-memory `SoftwareBackend` for tests and headless use
//!
//! Everything runs synchronously on the thread owning the graphics context;
//! a failed upload degrades to skipping that frame's texture bind.

pub mod backend;
pub mod handle;
pub mod software;
pub mod upload;

pub use backend::*;
pub use handle::*;
pub use software::*;
pub use upload::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_software_backend_is_a_backend() {
        fn assert_backend<B: TextureBackend>() {}
        assert_backend::<SoftwareBackend>();
    }
}
