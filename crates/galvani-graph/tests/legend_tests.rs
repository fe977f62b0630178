//! Legend membership and placement through a canvas.

use galvani_graph::*;
use galvani_test_utils::{FixedMetrics, RecordingSurface};

fn legend_canvas(position: LegendPosition) -> GraphCanvas {
    let mut canvas = GraphCanvas::new(
        GraphConfig::default().with_legend(position),
        FixedMetrics::default(),
    )
    .unwrap();
    canvas.set_size(400.0, 300.0);
    canvas
}

#[test]
fn test_removed_plot_leaves_legend() {
    let surface = RecordingSurface::new();
    let mut canvas = legend_canvas(LegendPosition::TopRight);
    let a = canvas.add_plot(Plot::line([(0.0, 0.0), (1.0, 1.0)]).with_label("A")).unwrap();
    canvas.add_plot(Plot::dot([(0.0, 0.0)]).with_label("B")).unwrap();
    canvas.on_frame(&surface);
    assert_eq!(surface.last_texts(), ["A", "B"]);

    // Data-only changes reuse the legend.
    canvas.set_points(a, [(0.0, 1.0), (1.0, 0.0)]);
    canvas.on_frame(&surface);
    assert_eq!(surface.last_texts(), ["A", "B"]);

    canvas.remove_plot(a);
    canvas.on_frame(&surface);
    assert_eq!(surface.last_texts(), ["B"]);

    // Removing twice changes nothing and schedules nothing.
    assert!(canvas.remove_plot(a).is_none());
    assert!(!canvas.on_frame(&surface));
}

#[test]
fn test_unlabeled_and_hidden_plots_are_not_legended() {
    let surface = RecordingSurface::new();
    let mut canvas = legend_canvas(LegendPosition::TopRight);
    let unlabeled = canvas.add_plot(Plot::line([(0.0, 0.0), (1.0, 1.0)])).unwrap();
    let hidden = canvas
        .add_plot(Plot::dot([(0.0, 0.0)]).with_label("hidden").with_visible(false))
        .unwrap();
    canvas.on_frame(&surface);
    assert!(surface.last_texts().is_empty());

    canvas.set_label(unlabeled, "now labeled");
    canvas.set_visible(hidden, true);
    canvas.on_frame(&surface);
    assert_eq!(surface.last_texts(), ["now labeled", "hidden"]);

    canvas.set_label(unlabeled, "");
    canvas.on_frame(&surface);
    assert_eq!(surface.last_texts(), ["hidden"]);
}

#[test]
fn test_legend_sits_inside_plot_area_corner() {
    for position in [
        LegendPosition::TopRight,
        LegendPosition::BottomRight,
        LegendPosition::BottomLeft,
        LegendPosition::TopLeft,
    ] {
        let mut canvas = legend_canvas(position);
        canvas.add_plot(Plot::bar([(10.0, 10.0), (20.0, 20.0)]).with_label("bars")).unwrap();
        let batch = canvas.redraw_now().clone();
        let area = canvas.plot_area();

        let label = batch.texts().next().unwrap();
        let bounds = label.bounds();
        assert!(area.contains(bounds.position()), "{position:?}");
        if position.is_right() {
            assert!(bounds.x > area.center().x, "{position:?}");
        } else {
            assert!(bounds.x < area.center().x, "{position:?}");
        }
        if position.is_top() {
            assert!(bounds.y < area.center().y, "{position:?}");
        } else {
            assert!(bounds.y > area.center().y, "{position:?}");
        }
    }
}

#[test]
fn test_disabled_legend_draws_nothing() {
    let mut canvas = legend_canvas(LegendPosition::TopRight);
    canvas.add_plot(Plot::line([(0.0, 0.0), (1.0, 1.0)]).with_label("A")).unwrap();
    assert_eq!(canvas.redraw_now().texts().count(), 1);

    let config = canvas.config().clone().without_legend();
    canvas.set_config(config).unwrap();
    assert_eq!(canvas.redraw_now().texts().count(), 0);
}
