// Copyright 2025 the polytess authors
// Simple and monotone shape coverage.

mod helpers;

use helpers::{circle_points, circle_polygon_area, tessellate, total_area, verify_valid_output};
use polytess::{Point, TessResult, Tessellator, Winding};

#[test]
fn triangle_emits_single_face() {
    let sink = tessellate(
        Winding::NonZero,
        &[(&[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)], false)],
    );
    verify_valid_output(&sink);
    assert_eq!(sink.vertices.len(), 3);
    assert_eq!(sink.triangles.len(), 1);
    assert!((total_area(&sink) - 6.0).abs() < 1e-3);
}

#[test]
fn quad_emits_two_faces() {
    let sink = tessellate(
        Winding::NonZero,
        &[(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)], false)],
    );
    verify_valid_output(&sink);
    assert_eq!(sink.vertices.len(), 4);
    assert_eq!(sink.triangles.len(), 2);
    assert!((total_area(&sink) - 16.0).abs() < 1e-3);
}

#[test]
fn convex_decagon_fan() {
    // regular 10-gon of radius 5
    let points: Vec<(f32, f32)> = (0..10)
        .map(|i| {
            let a = (i as f32) * std::f32::consts::TAU / 10.0;
            (5.0 * a.cos(), 5.0 * a.sin())
        })
        .collect();
    let sink = tessellate(Winding::NonZero, &[(&points, false)]);
    verify_valid_output(&sink);
    assert_eq!(sink.vertices.len(), 10);
    // n boundary vertices yield n - 2 triangles
    assert_eq!(sink.triangles.len(), 8);
}

#[test]
fn concave_polygon() {
    // reflex vertex at (5, 3)
    let sink = tessellate(
        Winding::NonZero,
        &[(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 8.0), (5.0, 3.0), (0.0, 8.0)],
            false,
        )],
    );
    verify_valid_output(&sink);
    assert_eq!(sink.vertices.len(), 5);
    assert_eq!(sink.triangles.len(), 3);
    assert!((total_area(&sink) - 55.0).abs() < 1e-2);
}

#[test]
fn round_shape_regression() {
    // Four quarter arcs approximating a circle of radius 100, closed,
    // under NonZero: a single simply connected interior, one output vertex
    // per pushed point, n - 2 triangles, none inverted.
    let points = circle_points(100.0, 6);
    let sink = tessellate(Winding::NonZero, &[(&points, false)]);
    verify_valid_output(&sink);

    assert_eq!(sink.vertices.len(), points.len());
    assert_eq!(sink.triangles.len(), points.len() - 2);
    assert!(!sink.triangles.is_empty());

    for tri in &sink.triangles {
        let area = helpers::signed_area(&sink, tri);
        assert!(area > 0.0, "inverted triangle {:?}", tri);
    }

    let expected = circle_polygon_area(100.0, 6);
    assert!(
        (total_area(&sink) - expected).abs() < expected * 1e-3,
        "area {} vs expected {}",
        total_area(&sink),
        expected
    );
}

#[test]
fn dense_circle() {
    let points = circle_points(100.0, 32);
    let sink = tessellate(Winding::NonZero, &[(&points, false)]);
    verify_valid_output(&sink);
    assert_eq!(sink.vertices.len(), points.len());
    assert_eq!(sink.triangles.len(), points.len() - 2);
}

#[test]
fn two_prepares_share_one_buffer() {
    // Two tessellators appending into the same result: the second pass
    // offsets its indices by the counters the first one left behind.
    let mut sink = helpers::BufferSink::default();
    let mut res = TessResult::new(&mut sink);

    let mut quad = Tessellator::new();
    let mut cursor = quad.begin_contour(false);
    for &(x, y) in &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)] {
        quad.push_vertex(&mut cursor, Point::new(x, y));
    }
    quad.close_contour(&mut cursor);
    assert!(quad.prepare(&mut res));
    assert_eq!(res.nvertexes, 4);

    let mut tri = Tessellator::new();
    let mut cursor = tri.begin_contour(false);
    for &(x, y) in &[(10.0, 0.0), (14.0, 0.0), (12.0, 3.0)] {
        tri.push_vertex(&mut cursor, Point::new(x, y));
    }
    tri.close_contour(&mut cursor);
    assert!(tri.prepare(&mut res));
    assert_eq!(res.nvertexes, 7);

    quad.write(&mut res);
    tri.write(&mut res);

    verify_valid_output(&sink);
    assert_eq!(sink.vertices.len(), 7);
    assert_eq!(sink.triangles.len(), 3);
    assert!((total_area(&sink) - 22.0).abs() < 1e-2);
}
