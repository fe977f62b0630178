//! Axis ranges, scale kinds and the per-canvas axis registry.
//!
//! Every canvas owns one primary X and one primary Y axis (index 0). Further
//! axes can be registered and referenced by plots through [`AxisIndex`].

use crate::error::{AxisKind, GraphError, GraphResult};

/// Scale type for axis transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleType {
    /// Data values map linearly to pixels.
    #[default]
    Linear,
    /// Base-10 logarithmic scale. Bounds must be > 0.
    Log10,
}

impl ScaleType {
    pub fn from_log(log: bool) -> Self {
        if log { Self::Log10 } else { Self::Linear }
    }

    pub fn is_log(&self) -> bool {
        matches!(self, Self::Log10)
    }

    /// Map a data value into the space where the axis is linear.
    #[inline]
    pub fn forward(&self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log10 => value.log10(),
        }
    }

    /// Inverse of [`forward`](Self::forward).
    #[inline]
    pub fn inverse(&self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log10 => 10f64.powf(value),
        }
    }
}

/// Index of an axis within its dimension. `0` is the primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct AxisIndex(pub usize);

impl AxisIndex {
    pub const PRIMARY: AxisIndex = AxisIndex(0);

    pub fn is_primary(&self) -> bool {
        self.0 == 0
    }
}

/// A single axis: scale plus data bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub scale: ScaleType,
    pub min: f64,
    pub max: f64,
}

impl Default for Axis {
    fn default() -> Self {
        Self::linear(0.0, 100.0)
    }
}

impl Axis {
    pub fn new(scale: ScaleType, min: f64, max: f64) -> Self {
        Self { scale, min, max }
    }

    pub fn linear(min: f64, max: f64) -> Self {
        Self::new(ScaleType::Linear, min, max)
    }

    pub fn log10(min: f64, max: f64) -> Self {
        Self::new(ScaleType::Log10, min, max)
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn is_log(&self) -> bool {
        self.scale.is_log()
    }

    /// Reject bounds no transform can make sense of.
    pub fn validate(&self, kind: AxisKind) -> GraphResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(GraphError::NonFiniteBound {
                axis: kind,
                min: self.min,
                max: self.max,
            });
        }
        if self.is_log() && (self.min <= 0.0 || self.max <= 0.0) {
            return Err(GraphError::NonPositiveLogBound {
                axis: kind,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Bounds after the scale transform (`log10` for log axes).
    pub fn scaled_bounds(&self) -> (f64, f64) {
        (self.scale.forward(self.min), self.scale.forward(self.max))
    }

    /// Signed width of the axis in scaled space.
    pub fn scaled_span(&self) -> f64 {
        let (lo, hi) = self.scaled_bounds();
        hi - lo
    }

    /// Zero-width (or unmappable) range.
    pub fn is_degenerate(&self) -> bool {
        let span = self.scaled_span();
        span == 0.0 || !span.is_finite()
    }

    /// Fraction of the range at which `value` sits; `0.0` on a degenerate axis.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let (lo, _) = self.scaled_bounds();
        (self.scale.forward(value) - lo) / self.scaled_span()
    }

    /// Inverse of [`normalize`](Self::normalize); `min` on a degenerate axis.
    pub fn denormalize(&self, t: f64) -> f64 {
        if self.is_degenerate() {
            return self.min;
        }
        let (lo, _) = self.scaled_bounds();
        self.scale.inverse(lo + t * self.scaled_span())
    }
}

/// All axes of a canvas, split by dimension.
#[derive(Debug, Clone)]
pub struct AxisSet {
    x: Vec<Axis>,
    y: Vec<Axis>,
}

impl AxisSet {
    pub fn new(x: Axis, y: Axis) -> Self {
        Self {
            x: vec![x],
            y: vec![y],
        }
    }

    pub fn x(&self, index: AxisIndex) -> GraphResult<&Axis> {
        self.x.get(index.0).ok_or(GraphError::UnknownAxis {
            axis: AxisKind::X,
            index: index.0,
        })
    }

    pub fn y(&self, index: AxisIndex) -> GraphResult<&Axis> {
        self.y.get(index.0).ok_or(GraphError::UnknownAxis {
            axis: AxisKind::Y,
            index: index.0,
        })
    }

    pub fn get(&self, kind: AxisKind, index: AxisIndex) -> GraphResult<&Axis> {
        match kind {
            AxisKind::X => self.x(index),
            AxisKind::Y => self.y(index),
        }
    }

    pub fn get_mut(&mut self, kind: AxisKind, index: AxisIndex) -> GraphResult<&mut Axis> {
        let list = match kind {
            AxisKind::X => &mut self.x,
            AxisKind::Y => &mut self.y,
        };
        list.get_mut(index.0).ok_or(GraphError::UnknownAxis {
            axis: kind,
            index: index.0,
        })
    }

    pub fn primary_x(&self) -> &Axis {
        &self.x[0]
    }

    pub fn primary_y(&self) -> &Axis {
        &self.y[0]
    }

    /// Register a secondary axis after validating it.
    pub fn push(&mut self, kind: AxisKind, axis: Axis) -> GraphResult<AxisIndex> {
        axis.validate(kind)?;
        let list = match kind {
            AxisKind::X => &mut self.x,
            AxisKind::Y => &mut self.y,
        };
        list.push(axis);
        Ok(AxisIndex(list.len() - 1))
    }

    pub fn len(&self, kind: AxisKind) -> usize {
        match kind {
            AxisKind::X => self.x.len(),
            AxisKind::Y => self.y.len(),
        }
    }
}
