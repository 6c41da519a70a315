// Copyright 2025 the polytess authors
// Shared test utilities.

#![allow(dead_code)]

use polytess::{Point, Real, TessResult, TessSink, Tessellator, Winding};

/// Opt-in sweep tracing while debugging a failing test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Collects the sink callbacks into plain buffers.
#[derive(Default)]
pub struct BufferSink {
    pub vertices: Vec<(u32, Point)>,
    pub triangles: Vec<[u32; 3]>,
}

impl TessSink for BufferSink {
    fn push_vertex(&mut self, index: u32, point: Point, _value: Real) {
        self.vertices.push((index, point));
    }
    fn push_triangle(&mut self, triangle: [u32; 3]) {
        self.triangles.push(triangle);
    }
}

impl BufferSink {
    pub fn point(&self, index: u32) -> Point {
        self.vertices
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, p)| *p)
            .unwrap_or_else(|| panic!("no vertex with index {}", index))
    }
}

/// Build and run one tessellation pass over the given contours. Each
/// contour is a point list plus its `clockwise` flag.
pub fn tessellate(rule: Winding, contours: &[(&[(f32, f32)], bool)]) -> BufferSink {
    let mut tess = Tessellator::new();
    tess.set_winding_rule(rule);
    for &(points, clockwise) in contours {
        let mut cursor = tess.begin_contour(clockwise);
        for &(x, y) in points {
            tess.push_vertex(&mut cursor, Point::new(x, y));
        }
        tess.close_contour(&mut cursor);
    }

    let mut sink = BufferSink::default();
    let mut res = TessResult::new(&mut sink);
    tess.prepare(&mut res);
    tess.write(&mut res);
    sink
}

pub fn signed_area(sink: &BufferSink, tri: &[u32; 3]) -> f32 {
    let a = sink.point(tri[0]);
    let b = sink.point(tri[1]);
    let c = sink.point(tri[2]);
    0.5 * ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x))
}

/// Total unsigned area covered by the emitted triangles.
pub fn total_area(sink: &BufferSink) -> f32 {
    sink.triangles
        .iter()
        .map(|t| signed_area(sink, t).abs())
        .sum()
}

/// Every triangle index refers to an emitted vertex; emitted indices are
/// dense and unique.
pub fn verify_valid_output(sink: &BufferSink) {
    let mut seen = vec![false; sink.vertices.len()];
    for &(idx, p) in &sink.vertices {
        let idx = idx as usize;
        assert!(idx < seen.len(), "vertex index {} out of range", idx);
        assert!(!seen[idx], "vertex index {} repeated", idx);
        assert!(p.x.is_finite() && p.y.is_finite(), "non-finite vertex");
        seen[idx] = true;
    }
    assert!(seen.iter().all(|&s| s), "vertex indices have gaps");

    for tri in &sink.triangles {
        for &i in tri {
            assert!(
                (i as usize) < sink.vertices.len(),
                "triangle references missing vertex {}",
                i
            );
        }
    }
}

/// Points of a circle approximation: four quarter arcs around the origin,
/// `segments` flat segments per quarter.
pub fn circle_points(radius: f32, segments: usize) -> Vec<(f32, f32)> {
    let n = segments * 4;
    (0..n)
        .map(|i| {
            let a = (i as f32) * std::f32::consts::TAU / (n as f32);
            (radius * a.cos(), radius * a.sin())
        })
        .collect()
}

/// Exact area of the flattened circle polygon.
pub fn circle_polygon_area(radius: f32, segments: usize) -> f32 {
    let n = (segments * 4) as f32;
    0.5 * n * radius * radius * (std::f32::consts::TAU / n).sin()
}
