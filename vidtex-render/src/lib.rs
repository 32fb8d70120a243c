//! Draw-list rendering for video/image textures
//!
//! Sits between the GUI engine's draw-list batcher and a texture backend:
//! - Classifies six-vertex quad batches as rectangular image blits
//! - Snapshots uploaded texture handles into per-draw-call render sources
//! - Plans per-command render ops, switching to a format-aware shader pass
//!   only for non-default image blits
//!
//! No graphics device is touched here; the output is a plain command list
//! the backend executes.

pub mod quad;
pub mod render;
pub mod source;

pub use quad::*;
pub use render::*;
pub use source::*;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_quad_round_trip() {
        let vertices = image_quad(
            Vec2::new(10.0, 10.0),
            Vec2::new(100.0, 50.0),
            Vec2::ZERO,
            Vec2::ONE,
            0,
        );
        assert!(classify_quad(&vertices).is_some());
    }
}
