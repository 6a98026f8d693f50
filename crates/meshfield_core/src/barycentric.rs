//! Per-triangle linear coefficients for point-in-triangle tests.
//!
//! For a triangle with vertices `(x_i, y_i)`, `i = 0, 1, 2`, and `j, k` the
//! next two vertices in cyclic order:
//!
//! ```text
//! A_i = x_k - x_j
//! B_i = y_j - y_k
//! T_i = x_j * y_k - x_k * y_j
//! area = (T_0 + T_1 + T_2) / 2
//! S_i(x, y) = (T_i + B_i * x + A_i * y) / (2 * area)
//! ```
//!
//! `S_i` is the barycentric coordinate of vertex `i`; the three sum to one.
//! `area` is signed, so clockwise triangles work unchanged. Degenerate
//! triangles (zero area) divide by zero and are not guarded.

use crate::error::MeshError;
use crate::mesh::{Point, TriMesh, VERTS_PER_TRIANGLE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarycentricCoefficients {
    pub area: f64,
    pub a: [f64; VERTS_PER_TRIANGLE],
    pub b: [f64; VERTS_PER_TRIANGLE],
    pub t: [f64; VERTS_PER_TRIANGLE],
}

impl BarycentricCoefficients {
    pub fn from_triangle(corners: &[Point; VERTS_PER_TRIANGLE]) -> Self {
        let mut a = [0.0; VERTS_PER_TRIANGLE];
        let mut b = [0.0; VERTS_PER_TRIANGLE];
        let mut t = [0.0; VERTS_PER_TRIANGLE];
        for i in 0..VERTS_PER_TRIANGLE {
            let pj = corners[(i + 1) % VERTS_PER_TRIANGLE];
            let pk = corners[(i + 2) % VERTS_PER_TRIANGLE];
            a[i] = pk.x - pj.x;
            b[i] = pj.y - pk.y;
            t[i] = pj.x * pk.y - pk.x * pj.y;
        }
        let area = 0.5 * t.iter().sum::<f64>();
        Self { area, a, b, t }
    }

    pub fn coordinates(&self, point: &Point) -> [f64; VERTS_PER_TRIANGLE] {
        let fac = 0.5 / self.area;
        let mut s = [0.0; VERTS_PER_TRIANGLE];
        for (k, s_k) in s.iter_mut().enumerate() {
            *s_k = self.coordinate(k, point, fac);
        }
        s
    }

    /// True when every coordinate lies in `[-tolerance, 1 + tolerance]`.
    ///
    /// Coordinates are evaluated lazily; the first one out of range stops the
    /// test.
    pub fn contains(&self, point: &Point, tolerance: f64) -> bool {
        let fac = 0.5 / self.area;
        let upper = 1.0 + tolerance;
        let lower = 0.0 - tolerance;
        (0..VERTS_PER_TRIANGLE).all(|k| {
            let s = self.coordinate(k, point, fac);
            !(s > upper || s < lower)
        })
    }

    fn coordinate(&self, k: usize, point: &Point, fac: f64) -> f64 {
        (self.t[k] + self.b[k] * point.x + self.a[k] * point.y) * fac
    }
}

/// Host layout of a coefficient table: `area` holds one value per element and
/// `a`, `b`, `t` are `E x 3` column-major (`a[e + E * k]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoefficientColumns {
    pub area: Vec<f64>,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub t: Vec<f64>,
}

/// Coefficients for every triangle of a mesh, in element order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarycentricTable {
    triangles: Vec<BarycentricCoefficients>,
}

impl BarycentricTable {
    pub fn new(triangles: Vec<BarycentricCoefficients>) -> Self {
        Self { triangles }
    }

    pub fn from_mesh(mesh: &TriMesh) -> Self {
        let triangles = (0..mesh.element_count())
            .map(|index| BarycentricCoefficients::from_triangle(&mesh.triangle(index)))
            .collect();
        Self { triangles }
    }

    /// Builds the table from host-layout columns: `area` has one value per
    /// element and `a`, `b`, `t` are E x 3 column-major (`a[e + E * k]`).
    pub fn from_columns(area: &[f64], a: &[f64], b: &[f64], t: &[f64]) -> Result<Self, MeshError> {
        let count = area.len();
        let expected = count * VERTS_PER_TRIANGLE;
        for (name, column) in [("a", a), ("b", b), ("t", t)] {
            if column.len() != expected {
                return Err(MeshError::CoefficientShape {
                    name,
                    expected,
                    actual: column.len(),
                });
            }
        }
        let gather = |column: &[f64], e: usize| -> [f64; VERTS_PER_TRIANGLE] {
            std::array::from_fn(|k| column[e + count * k])
        };
        let triangles = (0..count)
            .map(|e| BarycentricCoefficients {
                area: area[e],
                a: gather(a, e),
                b: gather(b, e),
                t: gather(t, e),
            })
            .collect();
        Ok(Self { triangles })
    }

    /// Inverse of [`BarycentricTable::from_columns`].
    pub fn to_columns(&self) -> CoefficientColumns {
        let count = self.triangles.len();
        let mut columns = CoefficientColumns {
            area: Vec::with_capacity(count),
            a: vec![0.0; count * VERTS_PER_TRIANGLE],
            b: vec![0.0; count * VERTS_PER_TRIANGLE],
            t: vec![0.0; count * VERTS_PER_TRIANGLE],
        };
        for (e, coeffs) in self.triangles.iter().enumerate() {
            columns.area.push(coeffs.area);
            for k in 0..VERTS_PER_TRIANGLE {
                columns.a[e + count * k] = coeffs.a[k];
                columns.b[e + count * k] = coeffs.b[k];
                columns.t[e + count * k] = coeffs.t[k];
            }
        }
        columns
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BarycentricCoefficients> {
        self.triangles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BarycentricCoefficients> {
        self.triangles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn corners() -> [Point; 3] {
        [Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, 2.0)]
    }

    #[test]
    fn vertices_map_to_unit_coordinates() {
        let coeffs = BarycentricCoefficients::from_triangle(&corners());
        assert!((coeffs.area - 2.0).abs() < EPS);
        for (i, corner) in corners().iter().enumerate() {
            let s = coeffs.coordinates(corner);
            for (k, value) in s.iter().enumerate() {
                let expected = if i == k { 1.0 } else { 0.0 };
                assert!((value - expected).abs() < EPS, "S{k} at vertex {i} = {value}");
            }
        }
    }

    #[test]
    fn clockwise_triangles_have_negative_area_but_same_coordinates() {
        let [p0, p1, p2] = corners();
        let ccw = BarycentricCoefficients::from_triangle(&[p0, p1, p2]);
        let cw = BarycentricCoefficients::from_triangle(&[p0, p2, p1]);
        assert!(cw.area < 0.0);
        let probe = Point::new(0.5, 0.25);
        let s_ccw = ccw.coordinates(&probe);
        let s_cw = cw.coordinates(&probe);
        assert!((s_ccw[0] - s_cw[0]).abs() < EPS);
        assert!((s_ccw[1] - s_cw[2]).abs() < EPS);
        assert!((s_ccw[2] - s_cw[1]).abs() < EPS);
    }

    #[test]
    fn coordinates_sum_to_one_anywhere_in_the_plane() {
        let coeffs = BarycentricCoefficients::from_triangle(&corners());
        for probe in [Point::new(0.3, 0.4), Point::new(-5.0, 7.0), Point::new(10.0, -3.0)] {
            let sum: f64 = coeffs.coordinates(&probe).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn contains_respects_tolerance_band() {
        let coeffs = BarycentricCoefficients::from_triangle(&corners());
        let outside = Point::new(-0.01, 0.5);
        assert!(!coeffs.contains(&outside, 0.0));
        assert!(coeffs.contains(&outside, 0.01));
        // boundary points are inside at zero tolerance
        assert!(coeffs.contains(&Point::new(1.0, 1.0), 0.0));
        assert!(coeffs.contains(&Point::new(0.0, 0.0), 0.0));
    }

    #[test]
    fn from_columns_reads_column_major_layout() {
        let first = BarycentricCoefficients::from_triangle(&corners());
        let second = BarycentricCoefficients::from_triangle(&[
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ]);
        let column = |pick: fn(&BarycentricCoefficients) -> [f64; 3]| -> Vec<f64> {
            (0..3).flat_map(|k| [pick(&first)[k], pick(&second)[k]]).collect()
        };
        let table = BarycentricTable::from_columns(
            &[first.area, second.area],
            &column(|c| c.a),
            &column(|c| c.b),
            &column(|c| c.t),
        )
        .expect("well-formed columns");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0), Some(&first));
        assert_eq!(table.get(1), Some(&second));
    }

    #[test]
    fn to_columns_feeds_back_into_from_columns() {
        let table = BarycentricTable::new(vec![
            BarycentricCoefficients::from_triangle(&corners()),
            BarycentricCoefficients::from_triangle(&[
                Point::new(2.0, 0.0),
                Point::new(2.0, 2.0),
                Point::new(0.0, 2.0),
            ]),
        ]);
        let columns = table.to_columns();
        assert_eq!(columns.area.len(), 2);
        assert_eq!(columns.a.len(), 6);
        // second column of `a` starts after one entry per element
        assert_eq!(columns.a[2], table.get(0).expect("first").a[1]);
        let rebuilt =
            BarycentricTable::from_columns(&columns.area, &columns.a, &columns.b, &columns.t)
                .expect("well-formed columns");
        assert_eq!(rebuilt, table);
    }

    #[test]
    fn from_columns_rejects_short_columns() {
        let err = BarycentricTable::from_columns(&[1.0], &[0.0; 3], &[0.0; 2], &[0.0; 3])
            .expect_err("b is short");
        assert_eq!(
            err,
            MeshError::CoefficientShape {
                name: "b",
                expected: 3,
                actual: 2
            }
        );
    }
}
