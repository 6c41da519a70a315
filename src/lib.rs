// polytess: sweep-line polygon tessellation over an arena-allocated
// half-edge mesh.
// Copyright 2025 the polytess authors
// License: MIT

pub mod dict;
pub mod geom;
pub mod mesh;
pub mod pool;
pub mod priorityq;
pub mod sweep;
pub mod tess;

pub use geom::{Point, Real};
pub use tess::{is_winding_inside, Cursor, TessResult, TessSink, Tessellator, Winding};
