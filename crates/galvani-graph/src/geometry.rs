//! Renderer-agnostic draw commands.
//!
//! A redraw produces one [`DrawBatch`]: commands in paint order (background,
//! border and ticks, plots, legend, text). Positions are canvas pixels with the
//! origin at the top-left corner. Vertex data is `#[repr(C)]` so a host can
//! upload it with `bytemuck::cast_slice` without copying.

use galvani_core::math::PackedVec2;
use glam::Vec2;

use crate::color::Color;
use crate::rect::Rect;

/// Connected line through every point, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineCommand {
    pub points: Vec<PackedVec2>,
    pub color: Color,
    pub width: f32,
    /// Ask the host for its anti-aliased line technique.
    pub smooth: bool,
}

/// Independent segments; `points` holds start/end pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentsCommand {
    pub points: Vec<PackedVec2>,
    pub color: Color,
    pub width: f32,
}

impl SegmentsCommand {
    pub fn segment_count(&self) -> usize {
        self.points.len() / 2
    }
}

/// One sprite per point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsCommand {
    pub points: Vec<PackedVec2>,
    pub color: Color,
    pub size: f32,
}

/// Indexed triangle list. Indices are `u16`, which bounds a single command to
/// 65,535 indices.
#[derive(Debug, Clone, PartialEq)]
pub struct TrianglesCommand {
    pub vertices: Vec<PackedVec2>,
    pub indices: Vec<u16>,
    pub color: Color,
}

impl TrianglesCommand {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// RGB8 image stretched over `bounds`.
///
/// Row 0 of `pixels` belongs to the lowest data Y and is drawn at the bottom
/// edge of `bounds`.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterCommand {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub bounds: Rect,
    pub tint: Color,
}

impl RasterCommand {
    pub const CHANNELS: usize = 3;

    /// RGB triple at column `x` of row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        let px = self.pixels.get(offset..offset + Self::CHANNELS)?;
        Some([px[0], px[1], px[2]])
    }
}

/// Filled and/or outlined rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadCommand {
    pub rect: Rect,
    pub fill: Option<Color>,
    pub border: Option<Color>,
    pub border_width: f32,
    pub corner_radius: f32,
}

impl QuadCommand {
    pub fn filled(rect: Rect, color: Color) -> Self {
        Self {
            rect,
            fill: Some(color),
            border: None,
            border_width: 0.0,
            corner_radius: 0.0,
        }
    }

    pub fn outlined(rect: Rect, color: Color, width: f32) -> Self {
        Self {
            rect,
            fill: None,
            border: Some(color),
            border_width: width,
            corner_radius: 0.0,
        }
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }
}

/// A single line of text. `position` is the top-left corner of the unrotated
/// text box; `angle` (degrees, counter-clockwise) rotates around its center.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub position: Vec2,
    pub size: Vec2,
    pub font_size: f32,
    pub color: Color,
    pub angle: f32,
}

impl TextCommand {
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }
}

/// A drawable primitive handed to the host renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polyline(PolylineCommand),
    Segments(SegmentsCommand),
    Points(PointsCommand),
    Triangles(TrianglesCommand),
    Raster(RasterCommand),
    Quad(QuadCommand),
    Text(TextCommand),
}

impl DrawCommand {
    /// Number of positions the host has to process.
    pub fn vertex_count(&self) -> usize {
        match self {
            DrawCommand::Polyline(c) => c.points.len(),
            DrawCommand::Segments(c) => c.points.len(),
            DrawCommand::Points(c) => c.points.len(),
            DrawCommand::Triangles(c) => c.vertices.len(),
            DrawCommand::Raster(_) | DrawCommand::Quad(_) => 4,
            DrawCommand::Text(_) => 0,
        }
    }

    pub fn as_text(&self) -> Option<&TextCommand> {
        match self {
            DrawCommand::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Commands of one redraw, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawBatch {
    commands: Vec<DrawCommand>,
}

impl DrawBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every text command, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextCommand> {
        self.commands.iter().filter_map(DrawCommand::as_text)
    }

    pub fn stats(&self) -> DrawBatchStats {
        let mut stats = DrawBatchStats {
            total_commands: self.commands.len(),
            ..Default::default()
        };
        for command in &self.commands {
            stats.vertices += command.vertex_count();
            match command {
                DrawCommand::Polyline(_) => stats.polylines += 1,
                DrawCommand::Segments(_) => stats.segments += 1,
                DrawCommand::Points(_) => stats.points += 1,
                DrawCommand::Triangles(_) => stats.triangles += 1,
                DrawCommand::Raster(_) => stats.rasters += 1,
                DrawCommand::Quad(_) => stats.quads += 1,
                DrawCommand::Text(_) => stats.texts += 1,
            }
        }
        stats
    }
}

impl Extend<DrawCommand> for DrawBatch {
    fn extend<I: IntoIterator<Item = DrawCommand>>(&mut self, iter: I) {
        self.commands.extend(iter);
    }
}

/// Per-kind command counts of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawBatchStats {
    pub total_commands: usize,
    pub polylines: usize,
    pub segments: usize,
    pub points: usize,
    pub triangles: usize,
    pub rasters: usize,
    pub quads: usize,
    pub texts: usize,
    pub vertices: usize,
}

/// Convert a pixel position into the packed vertex layout.
#[inline]
pub fn packed(v: Vec2) -> PackedVec2 {
    PackedVec2::new(v.x, v.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_stats() {
        let mut batch = DrawBatch::new();
        batch.push(DrawCommand::Quad(QuadCommand::filled(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Color::WHITE,
        )));
        batch.push(DrawCommand::Polyline(PolylineCommand {
            points: vec![PackedVec2::new(0.0, 0.0), PackedVec2::new(1.0, 1.0)],
            color: Color::RED,
            width: 1.0,
            smooth: false,
        }));
        batch.push(DrawCommand::Text(TextCommand {
            text: "0".into(),
            position: Vec2::ZERO,
            size: Vec2::new(8.0, 12.0),
            font_size: 12.0,
            color: Color::WHITE,
            angle: 0.0,
        }));

        let stats = batch.stats();
        assert_eq!(stats.total_commands, 3);
        assert_eq!(stats.quads, 1);
        assert_eq!(stats.polylines, 1);
        assert_eq!(stats.texts, 1);
        assert_eq!(stats.vertices, 6);
        assert_eq!(batch.texts().count(), 1);
    }

    #[test]
    fn test_raster_pixel_lookup() {
        let raster = RasterCommand {
            width: 2,
            height: 1,
            pixels: vec![0, 0, 0, 255, 255, 255],
            bounds: Rect::default(),
            tint: Color::WHITE,
        };
        assert_eq!(raster.pixel(1, 0), Some([255, 255, 255]));
        assert_eq!(raster.pixel(2, 0), None);
    }
}
