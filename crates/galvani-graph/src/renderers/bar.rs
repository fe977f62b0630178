use galvani_core::math::PackedVec2;

use super::{baseline_y, map_point};
use crate::geometry::{DrawCommand, TrianglesCommand};
use crate::mapper::CoordinateMapper;
use crate::plot::{BarWidth, DataPoint, Plot};

/// Bars per plot: six `u16` indices each must stay addressable.
pub const MAX_BARS: usize = u16::MAX as usize / 6;

/// Width used when the points cannot define a spacing.
const FALLBACK_WIDTH_PX: f32 = 1.0;

/// `viewport_width / (num_points * (axis_range / point_range)) * spacing`.
///
/// `point_range` is the X extent the points occupy including one bar, so the
/// bars exactly tile their own spacing when `spacing == 1`. Returns `None`
/// when any range is zero or not finite.
pub fn bar_width_px(
    viewport_width: f64,
    num_points: usize,
    axis_range: f64,
    point_range: f64,
    spacing: f64,
) -> Option<f64> {
    if num_points == 0 || axis_range == 0.0 || point_range == 0.0 {
        return None;
    }
    let width = viewport_width / (num_points as f64 * (axis_range / point_range)) * spacing;
    width.is_finite().then_some(width.abs())
}

/// Extent of the points' X values extended by one average step.
fn point_range(points: &[DataPoint]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    let (lo, hi) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.x), hi.max(p.x))
        });
    let n = points.len() as f64;
    Some((hi - lo) * n / (n - 1.0))
}

fn resolve_width(points: &[DataPoint], mapper: &CoordinateMapper, spacing: f32, width: BarWidth) -> f32 {
    match width {
        BarWidth::Pixels(px) => px,
        BarWidth::Data(units) => {
            let x_min = mapper.x_axis().min;
            (mapper.to_pixel_x(x_min + units) - mapper.to_pixel_x(x_min)).abs() as f32
        }
        BarWidth::Auto => {
            let x_axis = mapper.x_axis();
            point_range(points)
                .and_then(|range| {
                    bar_width_px(
                        mapper.viewport().width(),
                        points.len(),
                        (x_axis.max - x_axis.min).abs(),
                        range,
                        spacing as f64,
                    )
                })
                .map(|w| w as f32)
                .unwrap_or(FALLBACK_WIDTH_PX)
        }
    }
}

/// Two triangles per point from the baseline to the point's value.
pub fn bars(
    plot: &Plot,
    mapper: &CoordinateMapper,
    spacing: f32,
    width: BarWidth,
) -> Option<DrawCommand> {
    let mut points = plot.points.as_slice();
    if points.len() > MAX_BARS {
        tracing::warn!(
            points = points.len(),
            max = MAX_BARS,
            "bar plot exceeds the index limit, ignoring extra points"
        );
        points = &points[..MAX_BARS];
    }

    let bar_width = resolve_width(points, mapper, spacing, width);
    let base = baseline_y(mapper);
    let mut vertices = Vec::with_capacity(points.len() * 4);
    let mut indices = Vec::with_capacity(points.len() * 6);
    for p in points {
        let Some(top) = map_point(mapper, p) else {
            continue;
        };
        let (x1, x2) = (top.x, top.x + bar_width);
        let first = vertices.len() as u16;
        vertices.extend([
            PackedVec2::new(x1, top.y),
            PackedVec2::new(x1, base),
            PackedVec2::new(x2, base),
            PackedVec2::new(x2, top.y),
        ]);
        indices.extend([first, first + 1, first + 2, first, first + 3, first + 2]);
    }
    if indices.is_empty() {
        return None;
    }
    Some(DrawCommand::Triangles(TrianglesCommand {
        vertices,
        indices,
        color: plot.color,
    }))
}
