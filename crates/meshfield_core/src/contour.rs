//! Isolines of an ordinary scalar field.
//!
//! Each triangle is classified on its own and contributes zero, one or three
//! segments. Segments are not stitched into polylines.

use crate::error::MeshError;
use crate::mesh::{lerp, Point, TriMesh, VERTS_PER_TRIANGLE};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourSettings {
    /// Slack used when deciding that two vertex values, or a vertex value and
    /// the contour value, coincide.
    pub tolerance: f64,
}

impl Default for ContourSettings {
    fn default() -> Self {
        Self { tolerance: 1e-10 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// `[x1, y1, x2, y2]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.start.x, self.start.y, self.end.x, self.end.y]
    }
}

/// Row-major `x1, y1, x2, y2` per segment.
pub fn flatten_segments(segments: &[Segment]) -> Vec<f64> {
    segments.iter().flat_map(Segment::to_array).collect()
}

type TriangleSegments = SmallVec<[Segment; VERTS_PER_TRIANGLE]>;

/// Isoline segments of `field` at `value`, in element order.
///
/// Fails only when `field` does not hold one value per node.
pub fn extract_contour(
    mesh: &TriMesh,
    field: &[f64],
    value: f64,
    settings: ContourSettings,
) -> Result<Vec<Segment>, MeshError> {
    mesh.check_field(field)?;
    let mut segments = Vec::new();
    for index in 0..mesh.element_count() {
        segments.extend(triangle_segments(mesh, field, index, value, settings.tolerance));
    }
    log_summary(mesh, value, segments.len());
    Ok(segments)
}

/// Same output as [`extract_contour`], with triangles classified on the rayon pool.
pub fn par_extract_contour(
    mesh: &TriMesh,
    field: &[f64],
    value: f64,
    settings: ContourSettings,
) -> Result<Vec<Segment>, MeshError> {
    mesh.check_field(field)?;
    let per_triangle: Vec<TriangleSegments> = (0..mesh.element_count())
        .into_par_iter()
        .map(|index| triangle_segments(mesh, field, index, value, settings.tolerance))
        .collect();
    let segments: Vec<Segment> = per_triangle.into_iter().flatten().collect();
    log_summary(mesh, value, segments.len());
    Ok(segments)
}

fn log_summary(mesh: &TriMesh, value: f64, segment_count: usize) {
    tracing::debug!(
        elements = mesh.element_count(),
        value,
        segments = segment_count,
        "contour extracted"
    );
}

/// Vertex indices (0..3) of a triangle ordered by ascending field value.
/// Ties keep stored vertex order.
fn sort_vertices(values: &[f64; VERTS_PER_TRIANGLE]) -> [usize; VERTS_PER_TRIANGLE] {
    let (mut lo, mut mid) = if values[1] < values[0] { (1, 0) } else { (0, 1) };
    let mut hi = 2;
    if values[hi] < values[mid] {
        std::mem::swap(&mut hi, &mut mid);
        if values[mid] < values[lo] {
            std::mem::swap(&mut mid, &mut lo);
        }
    }
    [lo, mid, hi]
}

fn triangle_segments(
    mesh: &TriMesh,
    field: &[f64],
    index: usize,
    value: f64,
    tol: f64,
) -> TriangleSegments {
    let mut out = TriangleSegments::new();
    let values = mesh.element_values(index, field);
    if values.iter().any(|v| v.is_nan()) {
        tracing::trace!(element = index, "skipping triangle with missing value");
        return out;
    }
    let corners = mesh.triangle(index);
    let [i0, i1, i2] = sort_vertices(&values);
    let (s0, s1, s2) = (values[i0], values[i1], values[i2]);
    let (p0, p1, p2) = (corners[i0], corners[i1], corners[i2]);

    if value < s0 || value > s2 {
        return out;
    }

    // exact equality keeps coincidence detection alive at zero tolerance
    let near = |a: f64, b: f64| a == b || (a - b).abs() < tol;
    if near(s0, s2) && near(s0, value) {
        // whole triangle sits on the contour
        out.push(Segment::new(p0, p1));
        out.push(Segment::new(p1, p2));
        out.push(Segment::new(p2, p0));
    } else if near(s0, s1) && near(s0, value) {
        out.push(Segment::new(p0, p1));
    } else if near(s1, s2) && near(s1, value) {
        out.push(Segment::new(p1, p2));
    } else {
        let a = lerp(&p0, &p2, (value - s0) / (s2 - s0));
        let b = if value < s1 {
            let fac = if s0 != s1 { (value - s0) / (s1 - s0) } else { 1.0 };
            lerp(&p0, &p1, fac)
        } else {
            let fac = if s1 != s2 { (value - s1) / (s2 - s1) } else { 1.0 };
            lerp(&p1, &p2, fac)
        };
        out.push(Segment::new(a, b));
    }
    out
}
