//! Texture-rect classification
//!
//! The GUI draw-list batcher emits an image blit as two triangles (six
//! vertices). This module decides whether such a batch is an axis-aligned
//! rectangular sprite and, if so, recovers the source-texture sub-rectangle
//! and destination screen rectangle from the vertex extrema.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Vertices in a quad batch: two triangles
pub const QUAD_VERTEX_COUNT: usize = 6;

/// Draw-list vertex, matching the GUI engine's vertex layout
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawVert {
    /// Screen-space position in pixels
    pub pos: Vec2,
    /// Texture coordinate
    pub uv: Vec2,
    /// Packed RGBA vertex color
    pub color: u32,
}

/// Rectangle recovered from a classified quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadRect {
    /// Minimum corner in UV space
    pub uv_min: Vec2,
    /// UV extent (max - min)
    pub uv_size: Vec2,
    /// Minimum corner in screen space
    pub screen_min: Vec2,
    /// Screen extent (max - min)
    pub screen_size: Vec2,
}

/// Classify six vertices as a rectangular image blit
///
/// Deduplicates by exact UV equality; anything other than exactly four
/// distinct vertices rejects the batch (degenerate quads, triangle fans,
/// arbitrary GUI chrome sharing the atlas). UV and screen extrema are
/// tracked independently: a flipped or rotated UV mapping decouples the two
/// orderings, so the screen corners are never assumed co-indexed with the
/// UV corners.
pub fn classify_quad(vertices: &[DrawVert]) -> Option<QuadRect> {
    if vertices.len() != QUAD_VERTEX_COUNT {
        return None;
    }

    let mut distinct = [0usize; 4];
    let mut count = 0;
    'scan: for (index, vertex) in vertices.iter().enumerate() {
        for &seen in &distinct[..count] {
            if vertices[seen].uv == vertex.uv {
                continue 'scan;
            }
        }
        if count == 4 {
            return None;
        }
        distinct[count] = index;
        count += 1;
    }
    if count != 4 {
        return None;
    }

    let first = &vertices[distinct[0]];
    let mut uv_min = first.uv;
    let mut uv_max = first.uv;
    let mut screen_min = first.pos;
    let mut screen_max = first.pos;
    for &index in &distinct[1..] {
        let vertex = &vertices[index];
        uv_min = uv_min.min(vertex.uv);
        uv_max = uv_max.max(vertex.uv);
        screen_min = screen_min.min(vertex.pos);
        screen_max = screen_max.max(vertex.pos);
    }

    Some(QuadRect {
        uv_min,
        uv_size: uv_max - uv_min,
        screen_min,
        screen_size: screen_max - screen_min,
    })
}

/// Expand a rectangle into the six vertices the draw-list batcher emits
pub fn image_quad(
    screen_min: Vec2,
    screen_size: Vec2,
    uv_min: Vec2,
    uv_size: Vec2,
    color: u32,
) -> [DrawVert; QUAD_VERTEX_COUNT] {
    let screen_max = screen_min + screen_size;
    let uv_max = uv_min + uv_size;

    let tl = DrawVert {
        pos: screen_min,
        uv: uv_min,
        color,
    };
    let tr = DrawVert {
        pos: Vec2::new(screen_max.x, screen_min.y),
        uv: Vec2::new(uv_max.x, uv_min.y),
        color,
    };
    let br = DrawVert {
        pos: screen_max,
        uv: uv_max,
        color,
    };
    let bl = DrawVert {
        pos: Vec2::new(screen_min.x, screen_max.y),
        uv: Vec2::new(uv_min.x, uv_max.y),
        color,
    };

    [tl, tr, br, tl, br, bl]
}
