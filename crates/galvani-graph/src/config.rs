//! Canvas configuration.
//!
//! [`GraphConfig`] carries everything a canvas needs besides its plots:
//! primary axis bounds and scales, tick spacing, chart text, legend placement
//! and colors. Builders never fail; call [`GraphConfig::validate`] (or let
//! [`GraphCanvas::new`](crate::GraphCanvas::new) do it) to reject bounds no
//! axis transform can use.

use crate::axis::{Axis, ScaleType};
use crate::color::Color;
use crate::error::{AxisKind, GraphResult};
use crate::text::TickFormat;
use crate::ticks::TickPlanner;

/// Corner of the plot area the legend is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    #[default]
    TopRight,
    BottomRight,
    BottomLeft,
    TopLeft,
}

impl LegendPosition {
    pub fn is_top(&self) -> bool {
        matches!(self, Self::TopRight | Self::TopLeft)
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }
}

/// Options of a [`GraphCanvas`](crate::GraphCanvas).
#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    pub xlog: bool,
    pub xmin: f64,
    pub xmax: f64,
    pub ylog: bool,
    pub ymin: f64,
    pub ymax: f64,
    /// Major tick distance; `0` disables X ticks.
    pub x_ticks_major: f64,
    /// Subdivisions of each major X step.
    pub x_ticks_minor: u32,
    pub y_ticks_major: f64,
    pub y_ticks_minor: u32,
    /// Major X ticks become full-height grid lines.
    pub x_grid: bool,
    pub y_grid: bool,
    /// Label major X ticks.
    pub x_grid_label: bool,
    pub y_grid_label: bool,
    /// Spacing between chart text and the canvas edge, in pixels.
    pub padding: f32,
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub legend: bool,
    pub legend_pos: LegendPosition,
    pub legend_border: bool,
    pub font_size: f32,
    pub tick_format: TickFormat,
    /// Rotation of X tick labels in degrees.
    pub x_ticks_angle: f32,
    pub draw_border: bool,
    pub tick_color: Color,
    pub border_color: Color,
    pub background_color: Color,
    pub label_color: Color,
    pub legend_border_color: Color,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            xlog: false,
            xmin: 0.0,
            xmax: 100.0,
            ylog: false,
            ymin: 0.0,
            ymax: 100.0,
            x_ticks_major: 0.0,
            x_ticks_minor: 0,
            y_ticks_major: 0.0,
            y_ticks_minor: 0,
            x_grid: false,
            y_grid: false,
            x_grid_label: false,
            y_grid_label: false,
            padding: 5.0,
            title: String::new(),
            xlabel: String::new(),
            ylabel: String::new(),
            legend: false,
            legend_pos: LegendPosition::TopRight,
            legend_border: true,
            font_size: 15.0,
            tick_format: TickFormat::default(),
            x_ticks_angle: 0.0,
            draw_border: true,
            tick_color: Color::rgba(0.25, 0.25, 0.25, 1.0),
            border_color: Color::WHITE,
            background_color: Color::TRANSPARENT,
            label_color: Color::WHITE,
            legend_border_color: Color::grey(0.7),
        }
    }
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.xmin = min;
        self.xmax = max;
        self
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.ymin = min;
        self.ymax = max;
        self
    }

    pub fn with_xlog(mut self, log: bool) -> Self {
        self.xlog = log;
        self
    }

    pub fn with_ylog(mut self, log: bool) -> Self {
        self.ylog = log;
        self
    }

    pub fn with_x_ticks(mut self, major: f64, minor: u32) -> Self {
        self.x_ticks_major = major;
        self.x_ticks_minor = minor;
        self
    }

    pub fn with_y_ticks(mut self, major: f64, minor: u32) -> Self {
        self.y_ticks_major = major;
        self.y_ticks_minor = minor;
        self
    }

    pub fn with_x_grid(mut self, grid: bool) -> Self {
        self.x_grid = grid;
        self
    }

    pub fn with_y_grid(mut self, grid: bool) -> Self {
        self.y_grid = grid;
        self
    }

    pub fn with_x_grid_label(mut self, label: bool) -> Self {
        self.x_grid_label = label;
        self
    }

    pub fn with_y_grid_label(mut self, label: bool) -> Self {
        self.y_grid_label = label;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_xlabel(mut self, label: impl Into<String>) -> Self {
        self.xlabel = label.into();
        self
    }

    pub fn with_ylabel(mut self, label: impl Into<String>) -> Self {
        self.ylabel = label.into();
        self
    }

    pub fn with_legend(mut self, position: LegendPosition) -> Self {
        self.legend = true;
        self.legend_pos = position;
        self
    }

    pub fn without_legend(mut self) -> Self {
        self.legend = false;
        self
    }

    pub fn with_legend_border(mut self, border: bool) -> Self {
        self.legend_border = border;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_tick_format(mut self, format: TickFormat) -> Self {
        self.tick_format = format;
        self
    }

    pub fn with_x_ticks_angle(mut self, degrees: f32) -> Self {
        self.x_ticks_angle = degrees;
        self
    }

    pub fn with_border(mut self, draw: bool) -> Self {
        self.draw_border = draw;
        self
    }

    pub fn with_tick_color(mut self, color: Color) -> Self {
        self.tick_color = color;
        self
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }

    pub fn x_axis(&self) -> Axis {
        Axis::new(ScaleType::from_log(self.xlog), self.xmin, self.xmax)
    }

    pub fn y_axis(&self) -> Axis {
        Axis::new(ScaleType::from_log(self.ylog), self.ymin, self.ymax)
    }

    pub fn x_ticks(&self) -> TickPlanner {
        TickPlanner::new(self.x_ticks_major, self.x_ticks_minor)
    }

    pub fn y_ticks(&self) -> TickPlanner {
        TickPlanner::new(self.y_ticks_major, self.y_ticks_minor)
    }

    /// Reject non-finite bounds and non-positive bounds on log axes.
    ///
    /// Inverted or empty ranges and unusable tick spacing are accepted: they
    /// only leave nothing to draw.
    pub fn validate(&self) -> GraphResult<()> {
        self.x_axis().validate(AxisKind::X)?;
        self.y_axis().validate(AxisKind::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    #[test]
    fn test_defaults() {
        let config = GraphConfig::default();
        assert_eq!(config.x_axis(), Axis::linear(0.0, 100.0));
        assert_eq!(config.padding, 5.0);
        assert_eq!(config.tick_format, TickFormat::General(6));
        assert!(config.draw_border);
        assert!(!config.legend);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = GraphConfig::new()
            .with_x_range(1.0, 1000.0)
            .with_xlog(true)
            .with_y_ticks(25.0, 5)
            .with_legend(LegendPosition::BottomLeft)
            .with_padding(-3.0);
        assert_eq!(config.x_axis(), Axis::log10(1.0, 1000.0));
        assert_eq!(config.y_ticks(), TickPlanner::new(25.0, 5));
        assert!(config.legend);
        assert_eq!(config.legend_pos, LegendPosition::BottomLeft);
        assert_eq!(config.padding, 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_log_bounds() {
        let config = GraphConfig::new().with_ylog(true).with_y_range(0.0, 10.0);
        assert!(matches!(
            config.validate(),
            Err(GraphError::NonPositiveLogBound {
                axis: AxisKind::Y,
                ..
            })
        ));
        let nan = GraphConfig::new().with_x_range(f64::NAN, 1.0);
        assert!(matches!(nan.validate(), Err(GraphError::NonFiniteBound { .. })));
        // Inverted is a configuration error: nothing to draw, not a failure.
        assert!(GraphConfig::new().with_x_range(10.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_legend_position_corners() {
        assert!(LegendPosition::TopRight.is_top());
        assert!(LegendPosition::TopRight.is_right());
        assert!(!LegendPosition::BottomLeft.is_top());
        assert!(!LegendPosition::TopLeft.is_right());
    }
}
