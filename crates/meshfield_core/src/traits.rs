use crate::mesh::Point;
use rayon::prelude::*;

/// Finds the mesh triangle containing query points.
pub trait PointLocator {
    /// Index of the triangle containing `point`, or `None` when no triangle
    /// does. When several triangles contain the point the lowest index wins.
    fn locate_one(&self, point: &Point) -> Option<usize>;

    /// Locates several query points; results follow input order.
    fn locate_many(&self, points: &[Point]) -> Vec<Option<usize>> {
        points.iter().map(|point| self.locate_one(point)).collect()
    }

    /// Locates several query points in parallel; results follow input order.
    fn par_locate_many(&self, points: &[Point]) -> Vec<Option<usize>>
    where
        Self: Sync,
    {
        points
            .par_iter()
            .map(|point| self.locate_one(point))
            .collect()
    }
}
