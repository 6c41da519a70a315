// Copyright 2025 the polytess authors
// Degenerate input: duplicates, short contours, empty passes.

mod helpers;

use helpers::{tessellate, total_area, verify_valid_output, BufferSink};
use polytess::{Point, TessResult, Tessellator, Winding};

#[test]
fn duplicate_push_is_rejected() {
    let mut tess = Tessellator::new();
    let mut cursor = tess.begin_contour(false);
    assert!(tess.push_vertex(&mut cursor, Point::new(1.0, 1.0)));
    assert!(!tess.push_vertex(&mut cursor, Point::new(1.0, 1.0)));
    assert!(tess.push_vertex(&mut cursor, Point::new(2.0, 1.0)));
    assert!(!tess.push_vertex(&mut cursor, Point::new(2.0, 1.0)));
    assert_eq!(cursor.count, 2);
}

#[test]
fn contour_under_three_points_contributes_nothing() {
    let mut tess = Tessellator::new();

    let mut empty = tess.begin_contour(false);
    assert!(!tess.close_contour(&mut empty));

    let mut point = tess.begin_contour(false);
    tess.push_vertex(&mut point, Point::new(0.0, 0.0));
    assert!(!tess.close_contour(&mut point));

    let mut line = tess.begin_contour(false);
    tess.push_vertex(&mut line, Point::new(0.0, 0.0));
    tess.push_vertex(&mut line, Point::new(5.0, 5.0));
    assert!(!tess.close_contour(&mut line));

    let mut sink = BufferSink::default();
    let mut res = TessResult::new(&mut sink);
    assert!(!tess.prepare(&mut res));
    tess.write(&mut res);
    assert!(sink.vertices.is_empty());
    assert!(sink.triangles.is_empty());
}

#[test]
fn rejected_contour_does_not_poison_later_ones() {
    let mut tess = Tessellator::new();

    let mut bad = tess.begin_contour(false);
    tess.push_vertex(&mut bad, Point::new(100.0, 100.0));
    tess.push_vertex(&mut bad, Point::new(101.0, 100.0));
    assert!(!tess.close_contour(&mut bad));

    let mut good = tess.begin_contour(false);
    for &(x, y) in &[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)] {
        tess.push_vertex(&mut good, Point::new(x, y));
    }
    assert!(tess.close_contour(&mut good));

    let mut sink = BufferSink::default();
    let mut res = TessResult::new(&mut sink);
    assert!(tess.prepare(&mut res));
    tess.write(&mut res);
    verify_valid_output(&sink);
    assert_eq!(sink.vertices.len(), 3);
    assert_eq!(sink.triangles.len(), 1);
}

#[test]
fn closing_twice_is_idempotent() {
    let mut tess = Tessellator::new();
    let mut cursor = tess.begin_contour(false);
    for &(x, y) in &[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)] {
        tess.push_vertex(&mut cursor, Point::new(x, y));
    }
    assert!(tess.close_contour(&mut cursor));
    assert!(!tess.close_contour(&mut cursor));
    assert!(!tess.push_vertex(&mut cursor, Point::new(9.0, 9.0)));
}

#[test]
fn closing_point_equal_to_first_is_dropped() {
    // A caller closing the loop explicitly repeats the first point; the
    // zero-length closing edge must be stripped, not triangulated.
    let sink = tessellate(
        Winding::NonZero,
        &[(
            &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)],
            false,
        )],
    );
    verify_valid_output(&sink);
    assert_eq!(sink.vertices.len(), 4);
    assert_eq!(sink.triangles.len(), 2);
    assert!((total_area(&sink) - 16.0).abs() < 1e-3);
}

#[test]
fn zero_area_sliver_produces_no_triangles() {
    // three collinear points survive the degenerate filter but span no area
    let sink = tessellate(
        Winding::NonZero,
        &[(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0)], false)],
    );
    assert!(total_area(&sink) < 1e-6);
}
