//! The chart widget model.
//!
//! [`GraphCanvas`] owns axis state, tick spacing and the plot arena. Every
//! mutation only records a [`GraphDirtyFlags`] bit; the host calls
//! [`GraphCanvas::on_frame`] once per frame and all changes since the last
//! frame are rebuilt into a single [`DrawBatch`]:
//!
//! 1. label pass (chart text and tick labels decide the plot area)
//! 2. tick pass (tick mesh and grid lines)
//! 3. geometry pass (border and each visible plot in insertion order)
//! 4. legend pass
//!
//! The layout is reused when only plot data or styling changed.

use galvani_core::alloc::SlotArena;
use galvani_core::profiling::{profile_function, profile_scope};
use glam::Vec2;

use crate::axis::{Axis, AxisIndex, AxisSet};
use crate::color::Color;
use crate::config::GraphConfig;
use crate::error::{AxisKind, GraphResult};
use crate::frame::{FrameScheduler, FrameStats, GraphDirtyFlags};
use crate::geometry::{DrawBatch, DrawCommand, QuadCommand};
use crate::layout::{self, ChartLayout, LayoutInput};
use crate::legend::{LegendLayout, LegendStyle};
use crate::mapper::CoordinateMapper;
use crate::plot::{DataPoint, Plot, PlotHandle};
use crate::rect::{Rect, Viewport};
use crate::renderers;
use crate::text::{CachedMeasure, TextMeasure};
use crate::ticks::{TickPlanner, TickSet};
use crate::zoom::ZoomController;

/// Canvas size used until the host calls [`GraphCanvas::set_size`].
pub const DEFAULT_SIZE: Vec2 = Vec2::new(100.0, 100.0);

/// Pixels between automatic major X ticks.
const AUTO_X_TICK_PX: f64 = 100.0;
const AUTO_X_MINOR: u32 = 10;
const AUTO_Y_TICK_PX: f64 = 50.0;
const AUTO_Y_MINOR: u32 = 5;

/// Host seam that receives finished batches.
///
/// Takes `&self` so implementations can be shared with a render thread;
/// use interior mutability to keep state.
pub trait RenderSurface: Send + Sync {
    fn submit(&self, batch: &DrawBatch);
}

/// A 2D chart: axes, plots and the cached output of the last redraw.
pub struct GraphCanvas {
    config: GraphConfig,
    axes: AxisSet,
    x_ticks: TickPlanner,
    y_ticks: TickPlanner,
    position: Vec2,
    size: Vec2,
    plots: SlotArena<Plot>,
    /// Insertion order, which is also paint order.
    order: Vec<PlotHandle>,
    measure: CachedMeasure,
    scheduler: FrameScheduler,
    layout: Option<ChartLayout>,
    x_tick_set: TickSet,
    y_tick_set: TickSet,
    batch: DrawBatch,
    /// Legend commands, reused while membership and the plot area hold.
    legend: Vec<DrawCommand>,
    zoom: ZoomController,
}

impl std::fmt::Debug for GraphCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphCanvas")
            .field("config", &self.config)
            .field("axes", &self.axes)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("plots", &self.order.len())
            .field("pending", &self.scheduler.pending())
            .finish_non_exhaustive()
    }
}

impl GraphCanvas {
    /// Create a canvas. Fails if the configured axis bounds are unusable.
    pub fn new(config: GraphConfig, measure: impl TextMeasure + 'static) -> GraphResult<Self> {
        config.validate()?;
        tracing::debug!(
            x = ?config.x_axis(),
            y = ?config.y_axis(),
            "graph canvas created"
        );
        Ok(Self {
            axes: AxisSet::new(config.x_axis(), config.y_axis()),
            x_ticks: config.x_ticks(),
            y_ticks: config.y_ticks(),
            config,
            position: Vec2::ZERO,
            size: DEFAULT_SIZE,
            plots: SlotArena::new(),
            order: Vec::new(),
            measure: CachedMeasure::new(measure),
            scheduler: FrameScheduler::primed(),
            layout: None,
            x_tick_set: TickSet::default(),
            y_tick_set: TickSet::default(),
            batch: DrawBatch::new(),
            legend: Vec::new(),
            zoom: ZoomController::new(),
        })
    }

    fn mark(&mut self, flags: GraphDirtyFlags) {
        self.scheduler.mark(flags);
    }

    // Plots

    /// Add a plot on top of the existing ones.
    ///
    /// The plot's axis indices must refer to registered axes.
    ///
    /// The canvas takes ownership and identity is the returned handle, so
    /// adding the same plot twice cannot happen. A clone added again is a
    /// separate plot with its own handle and legend entry.
    pub fn add_plot(&mut self, plot: Plot) -> GraphResult<PlotHandle> {
        self.axes.x(plot.x_axis)?;
        self.axes.y(plot.y_axis)?;
        let kind = plot.kind.name();
        let handle = PlotHandle(self.plots.insert(plot));
        self.order.push(handle);
        tracing::debug!(kind, plots = self.order.len(), "plot added");
        self.mark(GraphDirtyFlags::PLOTS);
        Ok(handle)
    }

    /// Remove a plot. Removing an unknown or already removed handle is a
    /// no-op returning `None`.
    pub fn remove_plot(&mut self, handle: PlotHandle) -> Option<Plot> {
        let plot = self.plots.remove(handle.0)?;
        self.order.retain(|h| *h != handle);
        tracing::debug!(kind = plot.kind.name(), plots = self.order.len(), "plot removed");
        self.mark(GraphDirtyFlags::PLOTS);
        Some(plot)
    }

    pub fn contains_plot(&self, handle: PlotHandle) -> bool {
        self.plots.contains(handle.0)
    }

    pub fn plot(&self, handle: PlotHandle) -> Option<&Plot> {
        self.plots.get(handle.0)
    }

    /// Mutable access to a plot. Always schedules a redraw.
    pub fn plot_mut(&mut self, handle: PlotHandle) -> Option<&mut Plot> {
        if !self.plots.contains(handle.0) {
            return None;
        }
        self.mark(GraphDirtyFlags::DATA | GraphDirtyFlags::STYLE);
        self.plots.get_mut(handle.0)
    }

    /// Plots in paint order.
    pub fn plots(&self) -> impl Iterator<Item = (PlotHandle, &Plot)> {
        self.order
            .iter()
            .filter_map(|h| self.plots.get(h.0).map(|p| (*h, p)))
    }

    pub fn plot_count(&self) -> usize {
        self.order.len()
    }

    fn update_plot(
        &mut self,
        handle: PlotHandle,
        flags: GraphDirtyFlags,
        f: impl FnOnce(&mut Plot),
    ) -> bool {
        let Some(plot) = self.plots.get_mut(handle.0) else {
            return false;
        };
        f(plot);
        self.mark(flags);
        true
    }

    /// Replace a plot's samples. Returns `false` for unknown handles.
    pub fn set_points<P: Into<DataPoint>>(
        &mut self,
        handle: PlotHandle,
        points: impl IntoIterator<Item = P>,
    ) -> bool {
        let points: Vec<DataPoint> = points.into_iter().map(Into::into).collect();
        self.update_plot(handle, GraphDirtyFlags::DATA, |plot| plot.points = points)
    }

    pub fn set_color(&mut self, handle: PlotHandle, color: Color) -> bool {
        self.update_plot(handle, GraphDirtyFlags::STYLE, |plot| plot.color = color)
    }

    pub fn set_label(&mut self, handle: PlotHandle, label: impl Into<String>) -> bool {
        let label = label.into();
        self.update_plot(handle, GraphDirtyFlags::STYLE, |plot| plot.label = label)
    }

    pub fn set_visible(&mut self, handle: PlotHandle, visible: bool) -> bool {
        self.update_plot(handle, GraphDirtyFlags::STYLE, |plot| plot.visible = visible)
    }

    // Axes

    pub fn x_axis(&self) -> &Axis {
        self.axes.primary_x()
    }

    pub fn y_axis(&self) -> &Axis {
        self.axes.primary_y()
    }

    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    /// Replace the primary X bounds. The canvas is unchanged on error.
    pub fn set_x_range(&mut self, min: f64, max: f64) -> GraphResult<()> {
        self.set_axis(AxisKind::X, AxisIndex::PRIMARY, self.x_axis().with_range(min, max))
    }

    pub fn set_y_range(&mut self, min: f64, max: f64) -> GraphResult<()> {
        self.set_axis(AxisKind::Y, AxisIndex::PRIMARY, self.y_axis().with_range(min, max))
    }

    /// Replace both primary ranges at once; neither changes if either is
    /// invalid.
    pub fn set_view_bounds(&mut self, x: (f64, f64), y: (f64, f64)) -> GraphResult<()> {
        let x_axis = self.x_axis().with_range(x.0, x.1);
        let y_axis = self.y_axis().with_range(y.0, y.1);
        x_axis.validate(AxisKind::X)?;
        y_axis.validate(AxisKind::Y)?;
        self.apply_primary(x_axis, y_axis);
        Ok(())
    }

    /// Replace any registered axis.
    pub fn set_axis(&mut self, kind: AxisKind, index: AxisIndex, axis: Axis) -> GraphResult<()> {
        axis.validate(kind)?;
        let slot = self.axes.get_mut(kind, index)?;
        if *slot == axis {
            return Ok(());
        }
        *slot = axis;
        if index.is_primary() {
            self.sync_config_bounds();
        }
        self.mark(GraphDirtyFlags::AXES);
        Ok(())
    }

    /// Register a secondary X axis for plots to reference.
    pub fn add_x_axis(&mut self, axis: Axis) -> GraphResult<AxisIndex> {
        self.axes.push(AxisKind::X, axis)
    }

    pub fn add_y_axis(&mut self, axis: Axis) -> GraphResult<AxisIndex> {
        self.axes.push(AxisKind::Y, axis)
    }

    fn apply_primary(&mut self, x: Axis, y: Axis) {
        if *self.x_axis() == x && *self.y_axis() == y {
            return;
        }
        if let Ok(slot) = self.axes.get_mut(AxisKind::X, AxisIndex::PRIMARY) {
            *slot = x;
        }
        if let Ok(slot) = self.axes.get_mut(AxisKind::Y, AxisIndex::PRIMARY) {
            *slot = y;
        }
        self.sync_config_bounds();
        self.mark(GraphDirtyFlags::AXES);
    }

    fn sync_config_bounds(&mut self) {
        let (x, y) = (*self.axes.primary_x(), *self.axes.primary_y());
        self.config.xmin = x.min;
        self.config.xmax = x.max;
        self.config.xlog = x.is_log();
        self.config.ymin = y.min;
        self.config.ymax = y.max;
        self.config.ylog = y.is_log();
    }

    // Ticks

    pub fn set_x_ticks(&mut self, ticks: TickPlanner) {
        if self.x_ticks == ticks {
            return;
        }
        self.x_ticks = ticks;
        self.config.x_ticks_major = ticks.major;
        self.config.x_ticks_minor = ticks.minor;
        self.mark(GraphDirtyFlags::TICKS);
    }

    pub fn set_y_ticks(&mut self, ticks: TickPlanner) {
        if self.y_ticks == ticks {
            return;
        }
        self.y_ticks = ticks;
        self.config.y_ticks_major = ticks.major;
        self.config.y_ticks_minor = ticks.minor;
        self.mark(GraphDirtyFlags::TICKS);
    }

    /// Pick tick spacing from the current plot area: one major X tick per
    /// 100 pixels and one major Y tick per 50 pixels.
    pub fn auto_ticks(&mut self) {
        let area = self.plot_area();
        let x = TickPlanner::auto(
            self.x_axis().scaled_span(),
            area.width as f64,
            AUTO_X_TICK_PX,
            AUTO_X_MINOR,
        );
        let y = TickPlanner::auto(
            self.y_axis().scaled_span(),
            area.height as f64,
            AUTO_Y_TICK_PX,
            AUTO_Y_MINOR,
        );
        tracing::debug!(?x, ?y, "automatic tick spacing");
        self.set_x_ticks(x);
        self.set_y_ticks(y);
    }

    // Geometry and configuration

    pub fn set_size(&mut self, width: f32, height: f32) {
        let size = Vec2::new(width.max(0.0), height.max(0.0));
        if self.size != size {
            self.size = size;
            self.mark(GraphDirtyFlags::BOUNDS);
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        if self.position != position {
            self.position = position;
            self.mark(GraphDirtyFlags::BOUNDS);
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Replace the whole configuration, including primary axes and tick
    /// spacing. Secondary axes are kept.
    pub fn set_config(&mut self, config: GraphConfig) -> GraphResult<()> {
        config.validate()?;
        if let Ok(slot) = self.axes.get_mut(AxisKind::X, AxisIndex::PRIMARY) {
            *slot = config.x_axis();
        }
        if let Ok(slot) = self.axes.get_mut(AxisKind::Y, AxisIndex::PRIMARY) {
            *slot = config.y_axis();
        }
        self.x_ticks = config.x_ticks();
        self.y_ticks = config.y_ticks();
        self.config = config;
        self.mark(GraphDirtyFlags::CONFIG | GraphDirtyFlags::AXES | GraphDirtyFlags::TICKS);
        Ok(())
    }

    /// Plot area of the last layout, or the padded canvas before the first
    /// redraw.
    pub fn plot_area(&self) -> Rect {
        match &self.layout {
            Some(layout) => layout.plot_area,
            None => self.bounds().inset(self.config.padding),
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_plot_area(&self.plot_area())
    }

    /// Width and height of the plot area.
    pub fn viewport_size(&self) -> Vec2 {
        self.plot_area().size()
    }

    /// Mapper for the primary axes over the current plot area.
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(*self.x_axis(), *self.y_axis(), self.viewport())
    }

    /// Data coordinates of a canvas pixel on the primary axes.
    pub fn to_data(&self, px: f64, py: f64) -> (f64, f64) {
        self.mapper().to_data(px, py)
    }

    /// Whether a canvas pixel lies inside the plot area.
    pub fn collides_plot_area(&self, px: f32, py: f32) -> bool {
        self.plot_area().contains(Vec2::new(px, py))
    }

    // Interaction

    pub fn zoom_controller(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn zoom_controller_mut(&mut self) -> &mut ZoomController {
        &mut self.zoom
    }

    /// Zoom the primary axes around a canvas pixel. Returns whether the
    /// bounds changed.
    pub fn zoom_at(&mut self, dx: f64, dy: f64, px: f64, py: f64) -> bool {
        let result = self
            .zoom
            .zoom(dx, dy, px, py, self.x_axis(), self.y_axis(), self.viewport());
        match result {
            Some(result) => {
                self.apply_primary(result.x, result.y);
                true
            }
            None => false,
        }
    }

    /// Pan the primary axes so content follows a pixel drag.
    pub fn pan_by(&mut self, dx_px: f64, dy_px: f64) -> bool {
        let result = self
            .zoom
            .pan(dx_px, dy_px, self.x_axis(), self.y_axis(), self.viewport());
        match result {
            Some(result) => {
                self.apply_primary(result.x, result.y);
                true
            }
            None => false,
        }
    }

    // Frames

    pub fn is_dirty(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn frame_stats(&self) -> FrameStats {
        self.scheduler.stats()
    }

    /// Drive one host frame. Redraws and submits to `surface` if anything
    /// changed since the previous frame; returns whether it did.
    pub fn on_frame(&mut self, surface: &dyn RenderSurface) -> bool {
        let Some(flags) = self.scheduler.take() else {
            return false;
        };
        if !self.redraw(flags) {
            return false;
        }
        surface.submit(&self.batch);
        galvani_core::profiling::new_frame();
        true
    }

    /// Redraw immediately, discarding pending flags.
    pub fn redraw_now(&mut self) -> &DrawBatch {
        let flags = self.scheduler.take().unwrap_or(GraphDirtyFlags::all());
        self.redraw(flags);
        &self.batch
    }

    /// Output of the most recent successful redraw.
    pub fn last_batch(&self) -> &DrawBatch {
        &self.batch
    }

    /// Layout of the most recent redraw.
    pub fn layout(&self) -> Option<&ChartLayout> {
        self.layout.as_ref()
    }

    fn plan_ticks(&self, kind: AxisKind) -> TickSet {
        let (planner, axis) = match kind {
            AxisKind::X => (&self.x_ticks, self.x_axis()),
            AxisKind::Y => (&self.y_ticks, self.y_axis()),
        };
        planner.plan(kind, axis).unwrap_or_else(|err| {
            tracing::warn!(%err, "tick planning failed");
            TickSet::default()
        })
    }

    fn redraw(&mut self, flags: GraphDirtyFlags) -> bool {
        profile_function!();
        let x_axis = *self.x_axis();
        let y_axis = *self.y_axis();
        if x_axis.is_degenerate() || y_axis.is_degenerate() {
            tracing::trace!(?x_axis, ?y_axis, "degenerate primary axes, keeping last frame");
            return false;
        }

        let relayout = !flags.is_plot_only() || self.layout.is_none();
        if relayout {
            profile_scope!("layout_pass");
            self.x_tick_set = self.plan_ticks(AxisKind::X);
            self.y_tick_set = self.plan_ticks(AxisKind::Y);
            let input = LayoutInput {
                canvas: self.bounds(),
                config: &self.config,
                x_axis: &x_axis,
                y_axis: &y_axis,
                x_ticks: &self.x_tick_set,
                y_ticks: &self.y_tick_set,
            };
            self.layout = Some(layout::compute(&input, &mut self.measure));
        }
        let Some(chart) = self.layout.as_ref() else {
            return false;
        };
        let area = chart.plot_area;
        let viewport = Viewport::from_plot_area(&area);

        let mut batch = DrawBatch::new();
        if self.config.background_color.a > 0.0 {
            batch.push(DrawCommand::Quad(QuadCommand::filled(
                self.bounds(),
                self.config.background_color,
            )));
        }
        batch.extend(layout::border(&area, &self.config));
        batch.extend(layout::tick_mesh(
            &area,
            &x_axis,
            &y_axis,
            &self.x_tick_set,
            &self.y_tick_set,
            &self.config,
        ));

        {
            profile_scope!("geometry_pass");
            for handle in &self.order {
                let Some(plot) = self.plots.get(handle.0) else {
                    continue;
                };
                if !plot.visible {
                    continue;
                }
                let (Ok(px), Ok(py)) = (self.axes.x(plot.x_axis), self.axes.y(plot.y_axis)) else {
                    continue;
                };
                let mapper = CoordinateMapper::new(*px, *py, viewport);
                if mapper.is_degenerate() {
                    tracing::trace!(kind = plot.kind.name(), "skipping plot on degenerate axis");
                    continue;
                }
                batch.extend(renderers::render_plot(plot, &mapper));
            }
        }

        if relayout || flags.needs_legend() {
            profile_scope!("legend_pass");
            self.legend = self.legend_commands(&area);
        }
        batch.extend(self.legend.iter().cloned());

        if let Some(chart) = &self.layout {
            batch.extend(chart.texts().cloned().map(DrawCommand::Text));
        }

        let stats = batch.stats();
        tracing::trace!(
            ?flags,
            commands = stats.total_commands,
            vertices = stats.vertices,
            "graph redrawn"
        );
        self.batch = batch;
        self.scheduler.record_redraw();
        true
    }

    fn legend_commands(&mut self, area: &Rect) -> Vec<DrawCommand> {
        if !self.config.legend {
            return Vec::new();
        }
        let legend = LegendLayout::new(self.config.font_size)
            .with_border(self.config.legend_border)
            .layout(
                self.order.iter().filter_map(|h| self.plots.get(h.0)),
                &mut self.measure,
            );
        let Some(mut legend) = legend else {
            return Vec::new();
        };
        legend.anchor(self.config.legend_pos, area);
        legend.draw(&LegendStyle {
            background: self.config.background_color,
            border: self.config.legend_border_color,
            text: self.config.label_color,
            font_size: self.config.font_size,
        })
    }
}
