//! Brute-force point location against a barycentric coefficient table.

use crate::barycentric::BarycentricTable;
use crate::error::MeshError;
use crate::mesh::Point;
use crate::traits::PointLocator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorSettings {
    /// Slack on each barycentric coordinate, accepted range is
    /// `[-tolerance, 1 + tolerance]`.
    pub tolerance: f64,
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self { tolerance: 0.0 }
    }
}

/// Scans every triangle in element order for each query point.
#[derive(Debug, Clone, Copy)]
pub struct BruteForceLocator<'a> {
    table: &'a BarycentricTable,
    settings: LocatorSettings,
}

impl<'a> BruteForceLocator<'a> {
    pub fn new(table: &'a BarycentricTable, settings: LocatorSettings) -> Self {
        Self { table, settings }
    }
}

impl PointLocator for BruteForceLocator<'_> {
    fn locate_one(&self, point: &Point) -> Option<usize> {
        self.table
            .iter()
            .position(|coeffs| coeffs.contains(point, self.settings.tolerance))
    }
}

/// Locates every query point, triangle by triangle.
///
/// Points resolved by an earlier triangle are not tested again, so a point
/// lying in several triangles keeps the lowest index. Equivalent to
/// [`PointLocator::locate_many`] on a [`BruteForceLocator`].
pub fn locate(
    points: &[Point],
    table: &BarycentricTable,
    settings: LocatorSettings,
) -> Vec<Option<usize>> {
    let mut found: Vec<Option<usize>> = vec![None; points.len()];
    let mut unresolved = points.len();
    for (index, coeffs) in table.iter().enumerate() {
        if unresolved == 0 {
            break;
        }
        for (slot, point) in found.iter_mut().zip(points) {
            if slot.is_some() {
                continue;
            }
            if coeffs.contains(point, settings.tolerance) {
                *slot = Some(index);
                unresolved -= 1;
            }
        }
    }
    tracing::debug!(
        triangles = table.len(),
        points = points.len(),
        located = points.len() - unresolved,
        "points located"
    );
    found
}

/// Pairs separate coordinate columns into query points.
pub fn query_points(x: &[f64], y: &[f64]) -> Result<Vec<Point>, MeshError> {
    if x.len() != y.len() {
        return Err(MeshError::QueryLengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    Ok(x.iter().zip(y).map(|(&x, &y)| Point::new(x, y)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::TriMesh;

    /// Unit square split along the diagonal (0,0)-(1,1).
    fn square_table() -> BarycentricTable {
        let mesh = TriMesh::from_coordinates(
            &[0.0, 1.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0, 1.0],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .expect("square mesh");
        BarycentricTable::from_mesh(&mesh)
    }

    #[test]
    fn centroids_resolve_to_their_triangle() {
        let table = square_table();
        let points = [Point::new(2.0 / 3.0, 1.0 / 3.0), Point::new(1.0 / 3.0, 2.0 / 3.0)];
        for tolerance in [0.0, 1e-6, 0.1] {
            let found = locate(&points, &table, LocatorSettings { tolerance });
            assert_eq!(found, vec![Some(0), Some(1)]);
        }
    }

    #[test]
    fn far_points_are_not_found() {
        let table = square_table();
        let found = locate(&[Point::new(50.0, -20.0)], &table, LocatorSettings::default());
        assert_eq!(found, vec![None]);
    }

    #[test]
    fn shared_edge_resolves_to_lower_index() {
        let table = square_table();
        let on_diagonal = [Point::new(0.5, 0.5), Point::new(0.0, 0.0)];
        let settings = LocatorSettings::default();
        assert_eq!(locate(&on_diagonal, &table, settings), vec![Some(0), Some(0)]);

        let locator = BruteForceLocator::new(&table, settings);
        assert_eq!(locator.locate_many(&on_diagonal), vec![Some(0), Some(0)]);
        assert_eq!(locator.par_locate_many(&on_diagonal), vec![Some(0), Some(0)]);
    }

    #[test]
    fn tolerance_widens_acceptance_band() {
        let table = square_table();
        let just_outside = [Point::new(1.001, 0.5)];
        assert_eq!(locate(&just_outside, &table, LocatorSettings::default()), vec![None]);
        assert_eq!(
            locate(&just_outside, &table, LocatorSettings { tolerance: 0.01 }),
            vec![Some(0)]
        );
    }

    #[test]
    fn out_of_range_test_rejects_at_exact_band_edges_only_when_beyond() {
        let table = square_table();
        // S values of exactly 0 and 1 are accepted, slightly beyond is not
        let corner = [Point::new(1.0, 0.0)];
        assert_eq!(locate(&corner, &table, LocatorSettings::default()), vec![Some(0)]);
        let beyond = [Point::new(1.0, -1e-9)];
        assert_eq!(locate(&beyond, &table, LocatorSettings::default()), vec![None]);
    }

    #[test]
    fn sequential_and_trait_locators_agree() {
        let table = square_table();
        let points: Vec<Point> = (0..25)
            .map(|i| Point::new(-0.1 + 0.05 * i as f64, 1.1 - 0.045 * i as f64))
            .collect();
        let settings = LocatorSettings { tolerance: 1e-9 };
        let locator = BruteForceLocator::new(&table, settings);
        let expected = locate(&points, &table, settings);
        assert_eq!(locator.locate_many(&points), expected);
        assert_eq!(locator.par_locate_many(&points), expected);
    }

    #[test]
    fn empty_table_finds_nothing() {
        let table = BarycentricTable::default();
        let found = locate(&[Point::new(0.0, 0.0)], &table, LocatorSettings::default());
        assert_eq!(found, vec![None]);
        assert!(locate(&[], &table, LocatorSettings::default()).is_empty());
    }

    #[test]
    fn query_points_requires_matching_columns() {
        assert_eq!(
            query_points(&[0.0], &[]),
            Err(MeshError::QueryLengthMismatch { x: 1, y: 0 })
        );
        assert_eq!(query_points(&[1.0], &[2.0]), Ok(vec![Point::new(1.0, 2.0)]));
    }
}
