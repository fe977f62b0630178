//! End-to-end canvas tests (no GPU required).
//!
//! A `GraphCanvas` is driven through frames with a recording surface and
//! fixed text metrics so every assertion is on exact draw output.

use std::sync::Arc;

use galvani_graph::*;
use galvani_test_utils::{FixedMetrics, RecordingSurface};

fn canvas_with(config: GraphConfig) -> GraphCanvas {
    let mut canvas = GraphCanvas::new(config, FixedMetrics::default()).unwrap();
    canvas.set_size(400.0, 300.0);
    canvas
}

fn points(batch: &DrawBatch) -> Vec<&PointsCommand> {
    batch
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Points(p) => Some(p),
            _ => None,
        })
        .collect()
}

#[test]
fn test_mutations_between_frames_coalesce() {
    let surface = RecordingSurface::new();
    let mut canvas = canvas_with(GraphConfig::default());
    let plot = canvas.add_plot(Plot::line([(0.0, 0.0), (100.0, 100.0)])).unwrap();

    for i in 0..10 {
        canvas.set_points(plot, [(0.0, i as f64), (100.0, 50.0)]);
        canvas.set_y_range(0.0, 100.0 + i as f64).unwrap();
    }
    assert!(canvas.is_dirty());

    assert!(canvas.on_frame(&surface));
    assert!(!canvas.on_frame(&surface));
    assert!(!canvas.on_frame(&surface));
    assert_eq!(surface.submission_count(), 1);

    let stats = canvas.frame_stats();
    assert_eq!(stats.frames, 3);
    assert_eq!(stats.redraws, 1);
    assert!(stats.coalesced >= 20);
    assert_eq!(canvas.y_axis().max, 109.0);
}

#[test]
fn test_frame_output_matches_redraw_now() {
    let surface = RecordingSurface::new();
    let mut canvas = canvas_with(GraphConfig::default().with_x_ticks(10.0, 2));
    canvas.add_plot(Plot::dot([(10.0, 10.0), (20.0, 30.0)])).unwrap();
    canvas.on_frame(&surface);
    assert_eq!(surface.last_batch().as_ref(), Some(canvas.last_batch()));
    assert_eq!(surface.last_stats().map(|s| s.points), Some(1));
}

#[test]
fn test_linear_tick_labels() {
    let surface = RecordingSurface::new();
    let mut canvas = canvas_with(
        GraphConfig::default()
            .with_x_ticks(25.0, 5)
            .with_x_grid_label(true),
    );
    canvas.on_frame(&surface);
    assert_eq!(surface.last_texts(), ["0", "25", "50", "75", "100"]);

    let layout = canvas.layout().unwrap();
    assert!(!layout.x_labels_blanked);
    let xs: Vec<f32> = layout
        .x_tick_labels
        .iter()
        .map(|t| t.bounds().center().x)
        .collect();
    let area = layout.plot_area;
    assert!((xs[0] - area.x).abs() < 1e-3);
    assert!((xs[4] - area.right()).abs() < 1e-3);
    assert!((xs[2] - area.center().x).abs() < 1e-3);
}

#[test]
fn test_log_tick_labels() {
    let mut canvas = canvas_with(
        GraphConfig::default()
            .with_xlog(true)
            .with_x_range(1.0, 1000.0)
            .with_x_ticks(1.0, 10)
            .with_x_grid_label(true),
    );
    let texts: Vec<String> = canvas.redraw_now().texts().map(|t| t.text.clone()).collect();
    assert_eq!(texts, ["1", "10", "100", "1000"]);
}

#[test]
fn test_dense_tick_labels_are_blanked() {
    let mut canvas = canvas_with(
        GraphConfig::default()
            .with_x_ticks(1.0, 0)
            .with_x_grid_label(true)
            .with_y_ticks(20.0, 0)
            .with_y_grid_label(true),
    );
    let texts: Vec<String> = canvas.redraw_now().texts().map(|t| t.text.clone()).collect();
    let layout = canvas.layout().unwrap();
    assert!(layout.x_labels_blanked);
    assert!(!layout.y_labels_blanked);
    assert!(layout.x_tick_labels.is_empty());
    assert_eq!(texts, ["0", "20", "40", "60", "80", "100"]);
}

#[test]
fn test_chart_text_shrinks_plot_area() {
    let mut bare = canvas_with(GraphConfig::default());
    bare.redraw_now();
    let mut labeled = canvas_with(
        GraphConfig::default()
            .with_title("Current")
            .with_xlabel("t (s)")
            .with_ylabel("I (A)"),
    );
    let texts: Vec<String> = labeled.redraw_now().texts().map(|t| t.text.clone()).collect();
    assert_eq!(texts, ["Current", "t (s)", "I (A)"]);

    let (a, b) = (bare.plot_area(), labeled.plot_area());
    assert!(b.y > a.y);
    assert!(b.x > a.x);
    assert!(b.bottom() < a.bottom());
    let ylabel = labeled.layout().unwrap().y_label.as_ref().unwrap();
    assert_eq!(ylabel.angle, 90.0);
}

#[test]
fn test_text_is_measured_once_per_string() {
    let metrics = Arc::new(FixedMetrics::default());
    let mut canvas = GraphCanvas::new(
        GraphConfig::default()
            .with_title("Title")
            .with_y_ticks(50.0, 0)
            .with_y_grid_label(true),
        Arc::clone(&metrics),
    )
    .unwrap();
    canvas.redraw_now();
    let first = metrics.call_count();
    assert!(first > 0);

    canvas.set_size(500.0, 400.0);
    canvas.redraw_now();
    assert_eq!(metrics.call_count(), first);
}

#[test]
fn test_plots_paint_in_insertion_order() {
    let mut canvas = canvas_with(GraphConfig::default().with_border(false));
    canvas
        .add_plot(Plot::dot([(10.0, 10.0)]).with_color(Color::RED))
        .unwrap();
    canvas
        .add_plot(Plot::dot([(20.0, 20.0)]).with_color(Color::GREEN))
        .unwrap();
    let batch = canvas.redraw_now();
    let colors: Vec<Color> = points(batch).iter().map(|p| p.color).collect();
    assert_eq!(colors, [Color::RED, Color::GREEN]);
}

#[test]
fn test_secondary_axis_plot() {
    let mut canvas = canvas_with(GraphConfig::default().with_border(false));
    let y2 = canvas.add_y_axis(Axis::linear(0.0, 1.0)).unwrap();
    canvas
        .add_plot(Plot::dot([(50.0, 0.5)]).with_axes(AxisIndex::PRIMARY, y2))
        .unwrap();
    let batch = canvas.redraw_now().clone();
    let area = canvas.plot_area();
    let dot = points(&batch)[0].points[0];
    assert!((dot.x - area.center().x).abs() < 1e-3);
    assert!((dot.y - area.center().y).abs() < 1e-3);
}

#[test]
fn test_degenerate_secondary_axis_is_skipped() {
    let mut canvas = canvas_with(GraphConfig::default().with_border(false));
    let y2 = canvas.add_y_axis(Axis::linear(3.0, 3.0)).unwrap();
    canvas
        .add_plot(Plot::line([(0.0, 3.0), (100.0, 3.0)]).with_axes(AxisIndex::PRIMARY, y2))
        .unwrap();
    canvas.add_plot(Plot::dot([(50.0, 50.0)])).unwrap();
    let stats = canvas.redraw_now().stats();
    assert_eq!(stats.polylines, 0);
    assert_eq!(stats.points, 1);
}

#[test]
fn test_degenerate_primary_range_keeps_last_frame() {
    let surface = RecordingSurface::new();
    let mut canvas = canvas_with(GraphConfig::default());
    canvas.add_plot(Plot::line([(0.0, 0.0), (100.0, 100.0)])).unwrap();
    assert!(canvas.on_frame(&surface));

    canvas.set_x_range(50.0, 50.0).unwrap();
    assert!(!canvas.on_frame(&surface));
    assert_eq!(surface.submission_count(), 1);
    assert_eq!(canvas.frame_stats().redraws, 1);
    assert_eq!(canvas.frame_stats().frames, 2);

    // Pixel queries stay finite on the collapsed axis.
    let (x, y) = canvas.to_data(10.0, 10.0);
    assert!(x.is_finite() && y.is_finite());
    let mapper = canvas.mapper();
    assert!(mapper.to_pixel_x(50.0).is_finite());

    canvas.set_x_range(0.0, 100.0).unwrap();
    assert!(canvas.on_frame(&surface));
    assert_eq!(surface.submission_count(), 2);
}

#[test]
fn test_log_axis_skips_non_positive_samples() {
    let mut canvas = canvas_with(GraphConfig::default().with_ylog(true).with_y_range(1.0, 100.0));
    canvas
        .add_plot(Plot::dot([(10.0, -1.0), (20.0, 0.0), (30.0, 10.0)]))
        .unwrap();
    let batch = canvas.redraw_now().clone();
    assert_eq!(points(&batch)[0].points.len(), 1);
}

#[test]
fn test_zoom_at_plot_center() {
    let surface = RecordingSurface::new();
    let mut canvas = canvas_with(GraphConfig::default());
    canvas.on_frame(&surface);

    let center = canvas.plot_area().center();
    assert!(canvas.zoom_at(2.0, 2.0, center.x as f64, center.y as f64));
    let x = *canvas.x_axis();
    assert!((x.min - 25.0).abs() < 1e-3);
    assert!((x.max - 75.0).abs() < 1e-3);
    assert!(canvas.on_frame(&surface));

    assert!(!canvas.zoom_at(-1.0, 2.0, 0.0, 0.0));
    assert!(!canvas.on_frame(&surface));
}

#[test]
fn test_repeated_zoom_out_keeps_drawing() {
    let mut canvas = canvas_with(
        GraphConfig::default()
            .with_x_ticks(25.0, 5)
            .with_x_grid_label(true),
    );
    canvas.add_plot(Plot::line([(0.0, 0.0), (100.0, 100.0)])).unwrap();
    canvas.redraw_now();

    for _ in 0..80 {
        let center = canvas.plot_area().center();
        assert!(canvas.zoom_at(0.5, 1.0, center.x as f64, center.y as f64));
        assert!(!canvas.redraw_now().is_empty());
    }
    let x = *canvas.x_axis();
    assert!(x.max - x.min > 1e25);
}

#[test]
fn test_set_config_replaces_axes_and_keeps_plots() {
    let mut canvas = canvas_with(GraphConfig::default());
    let plot = canvas.add_plot(Plot::line([(1.0, 1.0), (10.0, 10.0)])).unwrap();
    canvas
        .set_config(GraphConfig::default().with_xlog(true).with_x_range(1.0, 10.0))
        .unwrap();
    assert!(canvas.x_axis().is_log());
    assert!(canvas.contains_plot(plot));

    let err = canvas.set_config(GraphConfig::default().with_ylog(true).with_y_range(0.0, 1.0));
    assert!(matches!(err, Err(GraphError::NonPositiveLogBound { axis: AxisKind::Y, .. })));
    assert!(canvas.x_axis().is_log());
}

#[test]
fn test_every_plot_kind_renders() {
    let mut canvas = canvas_with(GraphConfig::default().with_border(false));
    let contour = ContourData::from_rows(&[vec![0.0, 1.0], vec![2.0, 3.0]], (0.0, 50.0), (0.0, 50.0))
        .unwrap();
    for plot in [
        Plot::line([(0.0, 0.0), (50.0, 50.0)]),
        Plot::smooth_line([(0.0, 0.0), (50.0, 50.0)]),
        Plot::stem([(10.0, 20.0), (20.0, 40.0)]),
        Plot::dot([(5.0, 5.0)]),
        Plot::bar([(10.0, 10.0), (20.0, 20.0)]),
        Plot::hbar([50.0]),
        Plot::vbar([50.0]),
        Plot::contour(contour),
    ] {
        canvas.add_plot(plot).unwrap();
    }
    let stats = canvas.redraw_now().stats();
    assert_eq!(stats.polylines, 2);
    assert_eq!(stats.segments, 3);
    assert_eq!(stats.points, 1);
    assert_eq!(stats.triangles, 1);
    assert_eq!(stats.rasters, 1);
}
