//! Isolines of an angular (phase) field measured in degrees.
//!
//! Adjacent samples such as 359 and 1 look like a steep gradient but are a
//! wrap of the angle. Edges whose value jump exceeds a limit are therefore not
//! treated as crossings. Output is a flat list of points; each contributing
//! triangle's points are followed by a break marker.

use crate::error::MeshError;
use crate::mesh::{lerp, Point, TriMesh, VERTS_PER_TRIANGLE};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseSettings {
    /// Contour values below this select the wrap regime: vertex values above
    /// `half_turn` are shifted down by `full_turn` and `wrap_limit` applies.
    pub wrap_threshold: f64,
    pub wrap_limit: f64,
    /// Largest value jump across an edge still accepted as a crossing.
    pub general_limit: f64,
    /// Edge jumps at or below this interpolate to the far endpoint.
    pub flat_edge_epsilon: f64,
    pub half_turn: f64,
    pub full_turn: f64,
    /// Coordinate written to both axes of a break marker.
    pub break_value: f64,
}

impl Default for PhaseSettings {
    fn default() -> Self {
        Self {
            wrap_threshold: 1.0,
            wrap_limit: 260.0,
            general_limit: 150.0,
            flat_edge_epsilon: 1e-7,
            half_turn: 180.0,
            full_turn: 360.0,
            break_value: f64::NAN,
        }
    }
}

impl PhaseSettings {
    pub fn break_marker(&self) -> Point {
        Point::new(self.break_value, self.break_value)
    }
}

fn same_value(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

/// Points of a phase contour with break markers between triangle groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseContour {
    pub points: Vec<Point>,
    pub break_value: f64,
}

impl PhaseContour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_break(&self, point: &Point) -> bool {
        same_value(point.x, self.break_value) && same_value(point.y, self.break_value)
    }

    /// Break-delimited runs of points, markers excluded.
    pub fn polylines(&self) -> impl Iterator<Item = &[Point]> + '_ {
        self.points
            .split(move |point| self.is_break(point))
            .filter(|run| !run.is_empty())
    }

    /// Row-major `x, y` per point, break markers included.
    pub fn flatten(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }
}

/// Vertex 0 may be recorded up front, then one point per crossed edge.
type TrianglePoints = SmallVec<[Point; VERTS_PER_TRIANGLE + 1]>;

/// Phase isoline of `field` at `value`.
///
/// Fails only when `field` does not hold one value per node.
pub fn extract_phase_contour(
    mesh: &TriMesh,
    field: &[f64],
    value: f64,
    settings: PhaseSettings,
) -> Result<PhaseContour, MeshError> {
    mesh.check_field(field)?;
    let mut points = Vec::new();
    let mut skipped = 0usize;
    for index in 0..mesh.element_count() {
        match triangle_crossings(mesh, field, index, value, &settings) {
            Some(crossings) => append_group(&mut points, &crossings, &settings),
            None => skipped += 1,
        }
    }
    log_summary(mesh, value, skipped, points.len());
    Ok(PhaseContour {
        points,
        break_value: settings.break_value,
    })
}

/// Same output as [`extract_phase_contour`]; per-triangle groups are merged in
/// element order so break grouping is unchanged.
pub fn par_extract_phase_contour(
    mesh: &TriMesh,
    field: &[f64],
    value: f64,
    settings: PhaseSettings,
) -> Result<PhaseContour, MeshError> {
    mesh.check_field(field)?;
    let groups: Vec<Option<TrianglePoints>> = (0..mesh.element_count())
        .into_par_iter()
        .map(|index| triangle_crossings(mesh, field, index, value, &settings))
        .collect();
    let mut points = Vec::new();
    let mut skipped = 0usize;
    for group in &groups {
        match group {
            Some(crossings) => append_group(&mut points, crossings, &settings),
            None => skipped += 1,
        }
    }
    log_summary(mesh, value, skipped, points.len());
    Ok(PhaseContour {
        points,
        break_value: settings.break_value,
    })
}

fn append_group(points: &mut Vec<Point>, crossings: &[Point], settings: &PhaseSettings) {
    if crossings.len() < 2 {
        return;
    }
    points.extend_from_slice(crossings);
    points.push(settings.break_marker());
}

fn log_summary(mesh: &TriMesh, value: f64, skipped: usize, point_count: usize) {
    tracing::debug!(
        elements = mesh.element_count(),
        skipped_missing = skipped,
        value,
        points = point_count,
        "phase contour extracted"
    );
}

/// Crossing points of one triangle, or `None` when a vertex value is missing.
fn triangle_crossings(
    mesh: &TriMesh,
    field: &[f64],
    index: usize,
    value: f64,
    settings: &PhaseSettings,
) -> Option<TrianglePoints> {
    let mut values = mesh.element_values(index, field);
    if values.iter().any(|v| v.is_nan()) {
        return None;
    }
    let corners = mesh.triangle(index);

    let limit = if value < settings.wrap_threshold {
        for v in values.iter_mut().filter(|v| **v > settings.half_turn) {
            *v -= settings.full_turn;
        }
        settings.wrap_limit
    } else {
        settings.general_limit
    };

    let mut crossings = TrianglePoints::new();
    if value == values[0] {
        crossings.push(corners[0]);
    }
    for k in 0..VERTS_PER_TRIANGLE {
        let next = (k + 1) % VERTS_PER_TRIANGLE;
        let (lo, hi) = if values[k] > values[next] {
            (values[next], values[k])
        } else {
            (values[k], values[next])
        };
        if value < lo || value > hi {
            continue;
        }
        let jump = values[next] - values[k];
        if jump.abs() > limit {
            continue;
        }
        let fac = if jump.abs() > settings.flat_edge_epsilon {
            (value - values[k]) / jump
        } else {
            1.0
        };
        crossings.push(lerp(&corners[k], &corners[next], fac));
    }
    Some(crossings)
}
