//! Draw-call level checks for tiles, paths and markers.

mod common;

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use common::{Call, FailingFetcher, RecordingSurface, SolidFetcher};
use staticmap::layers::marker::draw_markers;
use staticmap::layers::vector::draw_paths;
use staticmap::prelude::*;
use staticmap::rendering::context::DrawState;

fn world_view() -> Viewport {
    // At zoom 1 the world is 512px wide, so a 512x512 canvas shows it edge to edge.
    Viewport::new(LatLng::new(0.0, 0.0), 1)
}

#[test]
fn test_marker_on_left_edge_is_drawn() {
    let mut surface = RecordingSurface::new(512, 512);
    let markers = vec![Marker::new(LatLng::new(0.0, -180.0))];

    let drawn = draw_markers(&mut surface, &markers, &world_view()).unwrap();

    assert_eq!(drawn, 1);
    let circles = surface.filled_circles();
    assert_eq!(circles.len(), 1);
    assert_abs_diff_eq!(circles[0].0.x, 0.0, epsilon = 1e-9);
}

#[test]
fn test_marker_past_left_edge_is_skipped() {
    let mut surface = RecordingSurface::new(512, 512);
    let markers = vec![Marker::new(LatLng::new(0.0, -180.5))];

    let drawn = draw_markers(&mut surface, &markers, &world_view()).unwrap();

    assert_eq!(drawn, 0);
    assert!(surface.calls.is_empty());
}

#[test]
fn test_marker_geometry() {
    let mut surface = RecordingSurface::new(512, 512);
    let markers = vec![Marker::new(LatLng::new(0.0, 0.0))
        .with_color("#00FF00")
        .with_size(MarkerSize::Large)
        .with_label("HQ")];

    draw_markers(&mut surface, &markers, &world_view()).unwrap();

    assert_eq!(surface.calls.len(), 3);
    match &surface.calls[0] {
        Call::FillCircle {
            center,
            radius,
            color,
        } => {
            assert_abs_diff_eq!(center.x, 256.0, epsilon = 1e-6);
            // Circle sits above the anchor: y - radius
            assert_abs_diff_eq!(center.y, 256.0 - 8.0, epsilon = 1e-6);
            assert_eq!(*radius, 8.0);
            assert_eq!(*color, Color::rgb(0, 255, 0));
        }
        other => panic!("expected fill circle, got {other:?}"),
    }
    match &surface.calls[1] {
        Call::StrokeCircle { color, width, .. } => {
            assert_eq!(*color, Color::WHITE);
            assert_eq!(*width, 2.0);
        }
        other => panic!("expected outline, got {other:?}"),
    }
    match &surface.calls[2] {
        Call::Text {
            text,
            x,
            y,
            font_size,
            color,
        } => {
            assert_eq!(text, "HQ");
            assert_abs_diff_eq!(*x, 256.0, epsilon = 1e-6);
            // diameter 16 plus 5px gap above the anchor
            assert_abs_diff_eq!(*y, 256.0 - 16.0 - 5.0, epsilon = 1e-6);
            assert_eq!(*font_size, 12.0);
            assert_eq!(*color, Color::BLACK);
        }
        other => panic!("expected label, got {other:?}"),
    }
}

#[test]
fn test_degenerate_paths_draw_nothing() {
    let mut surface = RecordingSurface::new(512, 512);
    let paths = vec![
        Path::new(Vec::new()),
        Path::new(vec![LatLng::new(10.0, 10.0)]),
    ];

    let drawn = draw_paths(&mut surface, &paths, &world_view()).unwrap();

    assert_eq!(drawn, 0);
    assert!(surface.calls.is_empty());
    assert_eq!(surface.state(), &DrawState::default());
}

#[test]
fn test_path_style_is_scoped() {
    let mut surface = RecordingSurface::new(512, 512);
    let paths = vec![Path::new(vec![
        LatLng::new(0.0, -90.0),
        LatLng::new(0.0, 0.0),
        LatLng::new(0.0, 300.0),
    ])
    .with_color("#112233")
    .with_width(4.0)
    .with_opacity(0.5)
    .with_line_cap(LineCap::Square)
    .with_line_join(LineJoin::Bevel)
    .with_dash_pattern(vec![6.0, 3.0])];

    let drawn = draw_paths(&mut surface, &paths, &world_view()).unwrap();
    assert_eq!(drawn, 1);

    match surface.polylines()[0] {
        Call::Polyline { points, state } => {
            // Off-canvas vertices are kept.
            assert_eq!(points.len(), 3);
            assert!(points[2].x > 512.0);
            assert_eq!(state.stroke_color, Color::rgb(0x11, 0x22, 0x33));
            assert_eq!(state.line_width, 4.0);
            assert_eq!(state.global_alpha, 0.5);
            assert_eq!(state.line_cap, LineCap::Square);
            assert_eq!(state.line_join, LineJoin::Bevel);
            assert_eq!(state.line_dash, vec![6.0, 3.0]);
        }
        other => panic!("expected polyline, got {other:?}"),
    }

    // Nothing leaks into later drawing.
    assert_eq!(surface.state(), &DrawState::default());
    assert_eq!(surface.stack_depth(), 0);
}

#[tokio::test]
async fn test_draw_order_tiles_paths_markers() {
    let map = StaticMapBuilder::new(400, 300)
        .with_center_and_zoom(LatLng::new(48.8566, 2.3522), 11)
        .with_marker(Marker::new(LatLng::new(48.8566, 2.3522)))
        .with_path(Path::new(vec![
            LatLng::new(48.85, 2.34),
            LatLng::new(48.86, 2.36),
        ]))
        .with_loader_config(TileLoaderConfig::for_testing())
        .build_with_fetcher(Arc::new(SolidFetcher::new([0, 0, 0, 255])))
        .unwrap();

    let mut surface = RecordingSurface::new(400, 300);
    let report = map.render_to_surface(&mut surface).await.unwrap();

    let kinds: Vec<&str> = surface
        .calls
        .iter()
        .map(|c| match c {
            Call::FillRect { .. } => "background",
            Call::Tile { .. } => "tile",
            Call::Polyline { .. } => "path",
            Call::FillCircle { .. } | Call::StrokeCircle { .. } | Call::Text { .. } => "marker",
        })
        .collect();

    assert_eq!(kinds[0], "background");
    let last_tile = kinds.iter().rposition(|k| *k == "tile").unwrap();
    let first_path = kinds.iter().position(|k| *k == "path").unwrap();
    let first_marker = kinds.iter().position(|k| *k == "marker").unwrap();
    assert!(last_tile < first_path);
    assert!(first_path < first_marker);

    assert_eq!(report.paths_drawn, 1);
    assert_eq!(report.markers_drawn, 1);
    assert_eq!(
        kinds.iter().filter(|k| **k == "tile").count(),
        report.tiles.len()
    );
}

#[tokio::test]
async fn test_background_covers_logical_canvas() {
    let map = StaticMapBuilder::new(320, 240)
        .with_center_and_zoom(LatLng::new(0.0, 0.0), 3)
        .with_loader_config(TileLoaderConfig::for_testing())
        .build_with_fetcher(Arc::new(FailingFetcher))
        .unwrap();

    let mut surface = RecordingSurface::new(320, 240);
    map.render_to_surface(&mut surface).await.unwrap();

    assert_eq!(
        surface.calls,
        vec![Call::FillRect {
            x: 0.0,
            y: 0.0,
            width: 320.0,
            height: 240.0,
            color: Color::rgb(0xf0, 0xf0, 0xf0),
        }]
    );
}
