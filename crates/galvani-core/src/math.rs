//! Vector types used for pixel-space geometry.
//!
//! CPU-side math uses [`glam`]; buffers handed to a host renderer use the
//! `#[repr(C)]` [`PackedVec2`], which converts to and from `mint` for
//! interop with whatever graphics crate the host uses.

pub use glam::{DVec2, Vec2};

use bytemuck::{Pod, Zeroable};

/// A 2D vector with guaranteed `#[repr(C)]` layout.
///
/// ```text
/// Offset | Field | Size
/// -------|-------|------
/// 0      | x     | 4 bytes (f32)
/// 4      | y     | 4 bytes (f32)
/// Total: 8 bytes
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedVec2 {
    pub x: f32,
    pub y: f32,
}

impl PackedVec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for PackedVec2 {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<PackedVec2> for Vec2 {
    fn from(v: PackedVec2) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<PackedVec2> for mint::Point2<f32> {
    fn from(v: PackedVec2) -> Self {
        mint::Point2 { x: v.x, y: v.y }
    }
}

impl From<mint::Point2<f32>> for PackedVec2 {
    fn from(p: mint::Point2<f32>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

static_assertions::assert_eq_size!(PackedVec2, [f32; 2]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_cast() {
        let verts = [PackedVec2::new(1.0, 2.0), PackedVec2::new(3.0, 4.0)];
        let floats: &[f32] = bytemuck::cast_slice(&verts);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_mint_roundtrip() {
        let p: mint::Point2<f32> = PackedVec2::new(5.0, -1.0).into();
        assert_eq!(PackedVec2::from(p), PackedVec2::new(5.0, -1.0));
        assert_eq!(Vec2::from(PackedVec2::from(Vec2::new(0.5, 0.25))), Vec2::new(0.5, 0.25));
    }
}
