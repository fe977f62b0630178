//! Plot definitions.
//!
//! A [`Plot`] is plain data: samples, styling, the axes it is drawn against
//! and a [`PlotKind`] selecting the renderer. Geometry is never stored on the
//! plot; the canvas regenerates it on every redraw.

use galvani_core::alloc::SlotHandle;

use crate::axis::AxisIndex;
use crate::color::Color;
use crate::error::{AxisKind, ContourError, GraphResult};

/// Largest contour raster side the engine will build.
pub const MAX_RASTER_SIDE: usize = 16_384;

/// A data point in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataPoint {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for DataPoint {
    fn from((x, y): (f32, f32)) -> Self {
        Self {
            x: x as f64,
            y: y as f64,
        }
    }
}

/// How wide each bar of a bar plot is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BarWidth {
    /// Bars tile the points' own spacing across the viewport.
    #[default]
    Auto,
    /// Fixed width in pixels.
    Pixels(f32),
    /// Width in X data units.
    Data(f64),
}

/// Validated scalar matrix for a contour plot.
///
/// Row `r` runs along Y (row 0 at `y_range.0`), column `c` along X.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourData {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl ContourData {
    /// Build from a row-major buffer of `rows * cols` values.
    pub fn new(
        rows: usize,
        cols: usize,
        values: Vec<f64>,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> GraphResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(ContourError::Empty.into());
        }
        if values.len() != rows * cols {
            return Err(ContourError::ShapeMismatch {
                rows,
                cols,
                actual: values.len(),
            }
            .into());
        }
        if rows > MAX_RASTER_SIDE || cols > MAX_RASTER_SIDE {
            return Err(ContourError::TooLarge {
                rows,
                cols,
                limit: MAX_RASTER_SIDE,
            }
            .into());
        }
        if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
            return Err(ContourError::NonFinite {
                row: idx / cols,
                col: idx % cols,
            }
            .into());
        }
        check_range(AxisKind::X, x_range)?;
        check_range(AxisKind::Y, y_range)?;
        Ok(Self {
            rows,
            cols,
            values,
            x_range,
            y_range,
        })
    }

    /// Build from nested rows; every row must have the same length.
    pub fn from_rows(
        rows: &[Vec<f64>],
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> GraphResult<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(ContourError::RaggedRow {
                row,
                len: r.len(),
                expected: cols,
            }
            .into());
        }
        let values = rows.iter().flatten().copied().collect();
        Self::new(rows.len(), cols, values, x_range, y_range)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    /// Smallest and largest value.
    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            })
    }
}

fn check_range(axis: AxisKind, (min, max): (f64, f64)) -> Result<(), ContourError> {
    if min.is_finite() && max.is_finite() && max > min {
        Ok(())
    } else {
        Err(ContourError::InvalidRange { axis, min, max })
    }
}

/// Renderer selection plus per-kind options.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotKind {
    /// Connected polyline.
    Line { width: f32 },
    /// Polyline drawn with the host's anti-aliased technique.
    SmoothLine { width: f32 },
    /// Vertical segment from the zero baseline to each point.
    Stem,
    /// One sprite per point.
    Dot { point_size: f32 },
    /// Vertical bars from the zero baseline.
    Bar { spacing: f32, width: BarWidth },
    /// Full-width horizontal line at each point's Y.
    HBar,
    /// Full-height vertical line at each point's X.
    VBar,
    /// Greyscale intensity raster.
    Contour(ContourData),
}

impl PlotKind {
    pub fn name(&self) -> &'static str {
        match self {
            PlotKind::Line { .. } => "line",
            PlotKind::SmoothLine { .. } => "smooth_line",
            PlotKind::Stem => "stem",
            PlotKind::Dot { .. } => "dot",
            PlotKind::Bar { .. } => "bar",
            PlotKind::HBar => "hbar",
            PlotKind::VBar => "vbar",
            PlotKind::Contour(_) => "contour",
        }
    }

    /// Symbol drawn next to the plot's label in the legend.
    pub fn legend_symbol(&self) -> LegendSymbol {
        match self {
            PlotKind::Dot { point_size } => LegendSymbol::Dot { size: *point_size },
            PlotKind::Line { width } | PlotKind::SmoothLine { width } => {
                LegendSymbol::Line { width: *width }
            }
            PlotKind::Stem | PlotKind::HBar | PlotKind::VBar => LegendSymbol::Line { width: 2.0 },
            PlotKind::Bar { .. } | PlotKind::Contour(_) => LegendSymbol::Swatch,
        }
    }
}

/// Legend marker shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendSymbol {
    Dot { size: f32 },
    Line { width: f32 },
    Swatch,
}

/// Stable reference to a plot owned by a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlotHandle(pub(crate) SlotHandle);

/// A data series and how to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub points: Vec<DataPoint>,
    pub color: Color,
    /// Empty labels keep the plot out of the legend.
    pub label: String,
    pub x_axis: AxisIndex,
    pub y_axis: AxisIndex,
    pub visible: bool,
    pub kind: PlotKind,
}

impl Plot {
    pub fn new(kind: PlotKind) -> Self {
        Self {
            points: Vec::new(),
            color: Color::WHITE,
            label: String::new(),
            x_axis: AxisIndex::PRIMARY,
            y_axis: AxisIndex::PRIMARY,
            visible: true,
            kind,
        }
    }

    pub fn line<P: Into<DataPoint>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::new(PlotKind::Line { width: 1.0 }).with_points(points)
    }

    pub fn smooth_line<P: Into<DataPoint>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::new(PlotKind::SmoothLine { width: 1.0 }).with_points(points)
    }

    pub fn stem<P: Into<DataPoint>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::new(PlotKind::Stem).with_points(points)
    }

    pub fn dot<P: Into<DataPoint>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::new(PlotKind::Dot { point_size: 1.0 }).with_points(points)
    }

    pub fn bar<P: Into<DataPoint>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::new(PlotKind::Bar {
            spacing: 1.0,
            width: BarWidth::Auto,
        })
        .with_points(points)
    }

    /// Horizontal reference lines at each Y value.
    pub fn hbar(values: impl IntoIterator<Item = f64>) -> Self {
        let mut plot = Self::new(PlotKind::HBar);
        plot.points = values.into_iter().map(|y| DataPoint::new(0.0, y)).collect();
        plot
    }

    /// Vertical reference lines at each X value.
    pub fn vbar(values: impl IntoIterator<Item = f64>) -> Self {
        let mut plot = Self::new(PlotKind::VBar);
        plot.points = values.into_iter().map(|x| DataPoint::new(x, 0.0)).collect();
        plot
    }

    pub fn contour(data: ContourData) -> Self {
        Self::new(PlotKind::Contour(data))
    }

    pub fn with_points<P: Into<DataPoint>>(mut self, points: impl IntoIterator<Item = P>) -> Self {
        self.points = points.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_axes(mut self, x_axis: AxisIndex, y_axis: AxisIndex) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Line width for line kinds; ignored elsewhere.
    pub fn with_line_width(mut self, line_width: f32) -> Self {
        if let PlotKind::Line { width } | PlotKind::SmoothLine { width } = &mut self.kind {
            *width = line_width;
        }
        self
    }

    /// Sprite size for dot plots; ignored elsewhere.
    pub fn with_point_size(mut self, size: f32) -> Self {
        if let PlotKind::Dot { point_size } = &mut self.kind {
            *point_size = size;
        }
        self
    }

    /// Bar spacing factor in `(0, 1]`; ignored for non-bar plots.
    pub fn with_bar_spacing(mut self, factor: f32) -> Self {
        if let PlotKind::Bar { spacing, .. } = &mut self.kind {
            *spacing = factor.clamp(f32::EPSILON, 1.0);
        }
        self
    }

    pub fn with_bar_width(mut self, bar_width: BarWidth) -> Self {
        if let PlotKind::Bar { width, .. } = &mut self.kind {
            *width = bar_width;
        }
        self
    }

    /// Whether this plot gets a legend entry.
    pub fn is_legended(&self) -> bool {
        self.visible && !self.label.is_empty()
    }
}
