//! Chart chrome: plot-area sizing, tick labels, tick marks and border.
//!
//! The label pass reserves room around the plot area for the title, the
//! axis labels and the tick labels, in that order. Tick labels are then
//! placed against the final plot area. When two neighbouring labels of an
//! axis overlap, every label of that axis is dropped and the room reserved
//! for them is given back to the plot area.

use galvani_core::profiling::profile_function;
use glam::Vec2;

use crate::axis::Axis;
use crate::config::GraphConfig;
use crate::geometry::{DrawCommand, QuadCommand, SegmentsCommand, TextCommand, packed};
use crate::mapper::CoordinateMapper;
use crate::rect::{Rect, Viewport};
use crate::text::CachedMeasure;
use crate::ticks::TickSet;

/// Length of major tick marks when grid lines are off.
pub const MAJOR_TICK_LENGTH: f32 = 12.0;
/// Length of minor tick marks.
pub const MINOR_TICK_LENGTH: f32 = 8.0;

/// Everything the label pass decided.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartLayout {
    pub plot_area: Rect,
    pub title: Option<TextCommand>,
    pub x_label: Option<TextCommand>,
    pub y_label: Option<TextCommand>,
    pub x_tick_labels: Vec<TextCommand>,
    pub y_tick_labels: Vec<TextCommand>,
    /// X tick labels collided and were dropped.
    pub x_labels_blanked: bool,
    pub y_labels_blanked: bool,
}

impl ChartLayout {
    pub fn viewport(&self) -> Viewport {
        Viewport::from_plot_area(&self.plot_area)
    }

    /// Every text of the layout in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextCommand> {
        self.title
            .iter()
            .chain(&self.x_label)
            .chain(&self.y_label)
            .chain(&self.x_tick_labels)
            .chain(&self.y_tick_labels)
    }
}

/// Inputs of the label pass.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    /// Canvas bounds in pixels.
    pub canvas: Rect,
    pub config: &'a GraphConfig,
    pub x_axis: &'a Axis,
    pub y_axis: &'a Axis,
    pub x_ticks: &'a TickSet,
    pub y_ticks: &'a TickSet,
}

/// A measured tick label waiting for its position.
#[derive(Debug, Clone)]
struct PendingLabel {
    text: String,
    /// Tick position in scaled units.
    position: f64,
    size: Vec2,
}

fn tick_labels(
    axis: &Axis,
    ticks: &TickSet,
    enabled: bool,
    config: &GraphConfig,
    measure: &mut CachedMeasure,
) -> Vec<PendingLabel> {
    if !enabled {
        return Vec::new();
    }
    ticks
        .major
        .iter()
        .map(|&position| {
            let text = config.tick_format.format(tick_value(axis, position));
            let size = measure.measure(&text, config.font_size);
            PendingLabel {
                text,
                position,
                size,
            }
        })
        .collect()
}

/// Data value of a tick, with round-off around zero removed.
fn tick_value(axis: &Axis, position: f64) -> f64 {
    let value = axis.scale.inverse(position);
    let magnitude = axis.min.abs().max(axis.max.abs());
    if !axis.is_log() && value.abs() < magnitude * 1e-12 {
        0.0
    } else {
        value
    }
}

fn max_extent(labels: &[PendingLabel]) -> Vec2 {
    labels.iter().fold(Vec2::ZERO, |acc, l| acc.max(l.size))
}

fn text(text: &str, position: Vec2, size: Vec2, config: &GraphConfig, angle: f32) -> TextCommand {
    TextCommand {
        text: text.to_owned(),
        position,
        size,
        font_size: config.font_size,
        color: config.label_color,
        angle,
    }
}

/// Space reserved around the plot area for chart text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChartMargins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl ChartMargins {
    /// Create margins with uniform padding.
    pub fn uniform(padding: f32) -> Self {
        Self {
            top: padding,
            bottom: padding,
            left: padding,
            right: padding,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// `rect` shrunk by the margins, never negative in size.
    pub fn inner(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x + self.left,
            rect.y + self.top,
            (rect.width - self.horizontal()).max(0.0),
            (rect.height - self.vertical()).max(0.0),
        )
    }
}

/// Run the label pass.
pub fn compute(input: &LayoutInput<'_>, measure: &mut CachedMeasure) -> ChartLayout {
    profile_function!();
    let config = input.config;
    let canvas = input.canvas;
    let pad = config.padding;
    let font = config.font_size;

    let mut reserved = ChartMargins::uniform(pad);

    let title_size = measure.measure(&config.title, font);
    if !config.title.is_empty() {
        reserved.top += title_size.y + pad;
    }
    let xlabel_size = measure.measure(&config.xlabel, font);
    if !config.xlabel.is_empty() {
        reserved.bottom += xlabel_size.y + pad;
    }
    let ylabel_size = measure.measure(&config.ylabel, font);
    if !config.ylabel.is_empty() {
        // Drawn rotated; its height is the horizontal footprint.
        reserved.left += ylabel_size.y + pad;
    }

    let x_pending = tick_labels(input.x_axis, input.x_ticks, config.x_grid_label, config, measure);
    let y_pending = tick_labels(input.y_axis, input.y_ticks, config.y_grid_label, config, measure);
    let x_extent = max_extent(&x_pending);
    let y_extent = max_extent(&y_pending);

    let chrome = reserved;
    let has_title = !config.title.is_empty();
    let reserve = |with_x: bool, with_y: bool| {
        let mut r = chrome;
        let x_on = with_x && !x_pending.is_empty();
        let y_on = with_y && !y_pending.is_empty();
        if x_on {
            r.bottom += x_extent.y + pad;
            if let Some(last) = x_pending.last() {
                r.right = r.right.max(pad + last.size.x * 0.5);
            }
        }
        if y_on {
            r.left += y_extent.x + pad;
            if !has_title {
                r.top = r.top.max(pad + y_extent.y * 0.5);
            }
            if !x_on {
                r.bottom = r.bottom.max(pad + y_extent.y * 0.5);
            }
        }
        if x_on {
            if let Some(first) = x_pending.first() {
                r.left = r.left.max(pad + first.size.x * 0.5);
            }
        }
        r
    };

    let mut area = reserve(true, true).inner(&canvas);
    let mut x_labels = place_x(&x_pending, input, &area);
    let mut y_labels = place_y(&y_pending, input, &area);

    let x_blanked = x_collides(&x_labels);
    let y_blanked = y_collides(&y_labels);
    if x_blanked || y_blanked {
        tracing::debug!(x_blanked, y_blanked, "tick labels overlap, blanking axis labels");
        area = reserve(!x_blanked, !y_blanked).inner(&canvas);
        x_labels = if x_blanked {
            Vec::new()
        } else {
            place_x(&x_pending, input, &area)
        };
        y_labels = if y_blanked {
            Vec::new()
        } else {
            place_y(&y_pending, input, &area)
        };
    }

    let center = area.center();
    let title = (!config.title.is_empty()).then(|| {
        text(
            &config.title,
            Vec2::new(center.x - title_size.x * 0.5, canvas.y + pad),
            title_size,
            config,
            0.0,
        )
    });
    let x_label = (!config.xlabel.is_empty()).then(|| {
        text(
            &config.xlabel,
            Vec2::new(
                center.x - xlabel_size.x * 0.5,
                canvas.bottom() - pad - xlabel_size.y,
            ),
            xlabel_size,
            config,
            0.0,
        )
    });
    let y_label = (!config.ylabel.is_empty()).then(|| {
        let rotated_center = Vec2::new(canvas.x + pad + ylabel_size.y * 0.5, center.y);
        text(
            &config.ylabel,
            rotated_center - ylabel_size * 0.5,
            ylabel_size,
            config,
            90.0,
        )
    });

    ChartLayout {
        plot_area: area,
        title,
        x_label,
        y_label,
        x_tick_labels: x_labels,
        y_tick_labels: y_labels,
        x_labels_blanked: x_blanked,
        y_labels_blanked: y_blanked,
    }
}

fn mapper(input: &LayoutInput<'_>, area: &Rect) -> CoordinateMapper {
    CoordinateMapper::new(*input.x_axis, *input.y_axis, Viewport::from_plot_area(area))
}

/// X labels centered under their tick, just below the plot area.
fn place_x(pending: &[PendingLabel], input: &LayoutInput<'_>, area: &Rect) -> Vec<TextCommand> {
    let mapper = mapper(input, area);
    let y = area.bottom() + input.config.padding;
    pending
        .iter()
        .map(|label| {
            let px = mapper.to_pixel_x(input.x_axis.scale.inverse(label.position)) as f32;
            text(
                &label.text,
                Vec2::new(px - label.size.x * 0.5, y),
                label.size,
                input.config,
                input.config.x_ticks_angle,
            )
        })
        .collect()
}

/// Y labels right-aligned against the plot area, centered on their tick.
fn place_y(pending: &[PendingLabel], input: &LayoutInput<'_>, area: &Rect) -> Vec<TextCommand> {
    let mapper = mapper(input, area);
    let right = area.x - input.config.padding;
    pending
        .iter()
        .map(|label| {
            let py = mapper.to_pixel_y(input.y_axis.scale.inverse(label.position)) as f32;
            text(
                &label.text,
                Vec2::new(right - label.size.x, py - label.size.y * 0.5),
                label.size,
                input.config,
                0.0,
            )
        })
        .collect()
}

/// A label starts left of the previous label's right edge.
fn x_collides(labels: &[TextCommand]) -> bool {
    labels
        .windows(2)
        .any(|pair| pair[1].position.x < pair[0].bounds().right())
}

/// Vertical extents of neighbouring labels intersect.
fn y_collides(labels: &[TextCommand]) -> bool {
    labels.windows(2).any(|pair| {
        let (a, b) = (pair[0].bounds(), pair[1].bounds());
        a.y < b.bottom() && b.y < a.bottom()
    })
}

/// Tick marks along the bottom and left edges of the plot area.
///
/// Major marks become full grid lines when the axis grid is enabled.
pub fn tick_mesh(
    area: &Rect,
    x_axis: &Axis,
    y_axis: &Axis,
    x_ticks: &TickSet,
    y_ticks: &TickSet,
    config: &GraphConfig,
) -> Option<DrawCommand> {
    profile_function!();
    let mapper = CoordinateMapper::new(*x_axis, *y_axis, Viewport::from_plot_area(area));
    let mut points = Vec::with_capacity((x_ticks.len() + y_ticks.len()) * 2);

    let bottom = area.bottom();
    let x_major_end = if config.x_grid { area.y } else { bottom - MAJOR_TICK_LENGTH };
    for (positions, end) in [
        (&x_ticks.major, x_major_end),
        (&x_ticks.minor, bottom - MINOR_TICK_LENGTH),
    ] {
        for &position in positions {
            let px = mapper.to_pixel_x(x_axis.scale.inverse(position)) as f32;
            if px.is_finite() {
                points.push(packed(Vec2::new(px, bottom)));
                points.push(packed(Vec2::new(px, end)));
            }
        }
    }

    let left = area.x;
    let y_major_end = if config.y_grid { area.right() } else { left + MAJOR_TICK_LENGTH };
    for (positions, end) in [
        (&y_ticks.major, y_major_end),
        (&y_ticks.minor, left + MINOR_TICK_LENGTH),
    ] {
        for &position in positions {
            let py = mapper.to_pixel_y(y_axis.scale.inverse(position)) as f32;
            if py.is_finite() {
                points.push(packed(Vec2::new(left, py)));
                points.push(packed(Vec2::new(end, py)));
            }
        }
    }

    if points.is_empty() {
        return None;
    }
    Some(DrawCommand::Segments(SegmentsCommand {
        points,
        color: config.tick_color,
        width: 1.0,
    }))
}

/// Outline of the plot area, if enabled.
pub fn border(area: &Rect, config: &GraphConfig) -> Option<DrawCommand> {
    config
        .draw_border
        .then(|| DrawCommand::Quad(QuadCommand::outlined(*area, config.border_color, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AxisKind;
    use crate::text::MonospaceMetrics;
    use crate::ticks::TickPlanner;

    fn measure() -> CachedMeasure {
        // 10px per character, 10px lines at font size 10.
        CachedMeasure::new(MonospaceMetrics {
            advance: 1.0,
            line_height: 1.0,
        })
    }

    fn run(config: &GraphConfig, canvas: Rect) -> ChartLayout {
        let x_axis = config.x_axis();
        let y_axis = config.y_axis();
        let x_ticks = config.x_ticks().plan(AxisKind::X, &x_axis).unwrap();
        let y_ticks = config.y_ticks().plan(AxisKind::Y, &y_axis).unwrap();
        compute(
            &LayoutInput {
                canvas,
                config,
                x_axis: &x_axis,
                y_axis: &y_axis,
                x_ticks: &x_ticks,
                y_ticks: &y_ticks,
            },
            &mut measure(),
        )
    }

    #[test]
    fn test_bare_chart_uses_padding_only() {
        let config = GraphConfig::new().with_font_size(10.0);
        let layout = run(&config, Rect::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(layout.plot_area, Rect::new(5.0, 5.0, 390.0, 290.0));
        assert_eq!(layout.texts().count(), 0);
    }

    #[test]
    fn test_chart_text_reserves_room() {
        let config = GraphConfig::new()
            .with_font_size(10.0)
            .with_title("T")
            .with_xlabel("X")
            .with_ylabel("Y");
        let layout = run(&config, Rect::new(0.0, 0.0, 400.0, 300.0));
        // Each text is 10px tall plus 5px padding.
        assert_eq!(layout.plot_area, Rect::new(20.0, 20.0, 375.0, 260.0));

        let title = layout.title.as_ref().unwrap();
        assert_eq!(title.position, Vec2::new(20.0 + 187.5 - 5.0, 5.0));
        let x_label = layout.x_label.as_ref().unwrap();
        assert_eq!(x_label.position.y, 300.0 - 5.0 - 10.0);
        let y_label = layout.y_label.as_ref().unwrap();
        assert_eq!(y_label.angle, 90.0);
        assert_eq!(y_label.bounds().center(), Vec2::new(10.0, 150.0));
    }

    #[test]
    fn test_tick_labels_follow_ticks() {
        let config = GraphConfig::new()
            .with_font_size(10.0)
            .with_x_ticks(25.0, 5)
            .with_y_ticks(50.0, 0)
            .with_x_grid_label(true)
            .with_y_grid_label(true);
        let layout = run(&config, Rect::new(0.0, 0.0, 600.0, 400.0));
        assert!(!layout.x_labels_blanked);
        assert!(!layout.y_labels_blanked);
        let texts: Vec<_> = layout.x_tick_labels.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["0", "25", "50", "75", "100"]);
        assert_eq!(layout.y_tick_labels.len(), 3);

        let area = layout.plot_area;
        for label in &layout.x_tick_labels {
            assert!(label.position.y >= area.bottom());
        }
        let first = &layout.x_tick_labels[0];
        assert!((first.bounds().center().x - area.x).abs() < 0.001);
        let top = &layout.y_tick_labels[2];
        assert_eq!(top.text, "100");
        assert!((top.bounds().center().y - area.y).abs() < 0.001);
        assert!(top.bounds().right() <= area.x);
    }

    #[test]
    fn test_colliding_labels_blank_whole_axis() {
        let config = GraphConfig::new()
            .with_font_size(10.0)
            .with_x_range(0.0, 1000.0)
            .with_x_ticks(1.0, 0)
            .with_x_grid_label(true)
            .with_y_ticks(25.0, 0)
            .with_y_grid_label(true);
        let layout = run(&config, Rect::new(0.0, 0.0, 400.0, 300.0));
        assert!(layout.x_labels_blanked);
        assert!(layout.x_tick_labels.is_empty());
        assert!(!layout.y_labels_blanked);
        assert_eq!(layout.y_tick_labels.len(), 5);
        // The room kept for X labels is released; only half a Y label remains.
        assert_eq!(layout.plot_area.bottom(), 290.0);
    }

    #[test]
    fn test_log_labels_show_values() {
        let config = GraphConfig::new()
            .with_font_size(10.0)
            .with_xlog(true)
            .with_x_range(1.0, 1000.0)
            .with_x_ticks(1.0, 9)
            .with_x_grid_label(true);
        let layout = run(&config, Rect::new(0.0, 0.0, 600.0, 300.0));
        let texts: Vec<_> = layout.x_tick_labels.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["1", "10", "100", "1000"]);
    }

    #[test]
    fn test_tick_mesh_lengths() {
        let config = GraphConfig::new().with_x_ticks(50.0, 2).with_y_ticks(100.0, 0);
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        let x_axis = config.x_axis();
        let y_axis = config.y_axis();
        let x_ticks = TickPlanner::new(50.0, 2).plan(AxisKind::X, &x_axis).unwrap();
        let y_ticks = TickPlanner::new(100.0, 0).plan(AxisKind::Y, &y_axis).unwrap();
        let Some(DrawCommand::Segments(mesh)) =
            tick_mesh(&area, &x_axis, &y_axis, &x_ticks, &y_ticks, &config)
        else {
            panic!("expected tick segments");
        };
        // 3 major + 2 minor on X, 2 major on Y.
        assert_eq!(mesh.segment_count(), 7);
        assert_eq!(mesh.points[1].y, 100.0 - MAJOR_TICK_LENGTH);
        assert_eq!(mesh.points[7].y, 100.0 - MINOR_TICK_LENGTH);
        assert_eq!(mesh.points[11].x, MAJOR_TICK_LENGTH);

        let grid = config.with_x_grid(true);
        let Some(DrawCommand::Segments(mesh)) =
            tick_mesh(&area, &x_axis, &y_axis, &x_ticks, &y_ticks, &grid)
        else {
            panic!("expected tick segments");
        };
        assert_eq!(mesh.points[1].y, 0.0);
    }

    #[test]
    fn test_border_toggle() {
        let area = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert!(border(&area, &GraphConfig::new()).is_some());
        assert!(border(&area, &GraphConfig::new().with_border(false)).is_none());
    }

    #[test]
    fn test_margins_inner_rect() {
        let margins = ChartMargins {
            left: 30.0,
            ..ChartMargins::uniform(10.0)
        };
        assert_eq!(margins.horizontal(), 40.0);
        let canvas = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(margins.inner(&canvas), Rect::new(30.0, 10.0, 60.0, 30.0));
        assert_eq!(
            ChartMargins::uniform(60.0).inner(&canvas),
            Rect::new(60.0, 60.0, 0.0, 0.0)
        );
    }
}
