//! Planar triangulation: node coordinates plus node-index triples.
//!
//! A `TriMesh` is immutable once built. Every constructor checks that each
//! element references a node inside `[0, node_count)`, so the extraction and
//! location code can index without bounds surprises.

use crate::error::MeshError;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Every element of the mesh is a triangle.
pub const VERTS_PER_TRIANGLE: usize = 3;

pub type Point = Point2<f64>;

/// Node indices of one triangle, 0-based. No winding order is assumed.
pub type Element = [usize; VERTS_PER_TRIANGLE];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriMesh {
    nodes: Vec<Point>,
    elements: Vec<Element>,
}

impl TriMesh {
    pub fn new(nodes: Vec<Point>, elements: Vec<Element>) -> Result<Self, MeshError> {
        let node_count = nodes.len();
        for (element, triple) in elements.iter().enumerate() {
            if let Some(&node) = triple.iter().find(|&&node| node >= node_count) {
                return Err(MeshError::NodeOutOfRange {
                    element,
                    node,
                    node_count,
                });
            }
        }
        Ok(Self { nodes, elements })
    }

    /// Builds a mesh from separate coordinate columns.
    pub fn from_coordinates(x: &[f64], y: &[f64], elements: Vec<Element>) -> Result<Self, MeshError> {
        if x.len() != y.len() {
            return Err(MeshError::CoordinateLengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let nodes = x.iter().zip(y).map(|(&x, &y)| Point::new(x, y)).collect();
        Self::new(nodes, elements)
    }

    /// Builds a mesh from 1-based node numbers stored as floating point in an
    /// `E x 3` column-major table: node `k` of element `e` is
    /// `flat_elements[e + E * k]`.
    pub fn from_one_based(x: &[f64], y: &[f64], flat_elements: &[f64]) -> Result<Self, MeshError> {
        let elements = one_based_elements(flat_elements)?;
        Self::from_coordinates(x, y, elements)
    }

    pub fn nodes(&self) -> &[Point] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Vertex coordinates of element `index`, in stored node order.
    pub fn triangle(&self, index: usize) -> [Point; VERTS_PER_TRIANGLE] {
        self.elements[index].map(|node| self.nodes[node])
    }

    /// A scalar field must carry exactly one value per node.
    pub fn check_field(&self, field: &[f64]) -> Result<(), MeshError> {
        if field.len() != self.nodes.len() {
            return Err(MeshError::FieldLengthMismatch {
                expected: self.nodes.len(),
                actual: field.len(),
            });
        }
        Ok(())
    }

    /// Gathers the field values of element `index` in stored node order.
    pub(crate) fn element_values(&self, index: usize, field: &[f64]) -> [f64; VERTS_PER_TRIANGLE] {
        self.elements[index].map(|node| field[node])
    }
}

/// Converts a column-major `E x 3` table of 1-based node numbers to 0-based
/// element triples.
///
/// Range checking against the node count happens in [`TriMesh::new`].
pub fn one_based_elements(flat: &[f64]) -> Result<Vec<Element>, MeshError> {
    if flat.len() % VERTS_PER_TRIANGLE != 0 {
        return Err(MeshError::ElementTableShape(flat.len()));
    }
    let count = flat.len() / VERTS_PER_TRIANGLE;
    (0..count)
        .map(|element| {
            let mut triple = [0usize; VERTS_PER_TRIANGLE];
            for (k, slot) in triple.iter_mut().enumerate() {
                let value = flat[element + count * k];
                if !value.is_finite() || value < 1.0 || value.fract() != 0.0 {
                    return Err(MeshError::InvalidNodeNumber { element, value });
                }
                *slot = value as usize - 1;
            }
            Ok(triple)
        })
        .collect()
}

/// Point on the segment `a -> b` at fraction `t`.
pub(crate) fn lerp(a: &Point, b: &Point, t: f64) -> Point {
    *a + (*b - *a) * t
}
