use thiserror::Error;

/// Input-shape failures detected before any algorithm runs.
///
/// The extraction and location algorithms themselves never fail: missing
/// values, degenerate triangles and unlocated points are ordinary outcomes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("Coordinate arrays differ in length (x: {x}, y: {y}).")]
    CoordinateLengthMismatch { x: usize, y: usize },

    #[error("Element table length {0} is not a multiple of 3.")]
    ElementTableShape(usize),

    #[error("Element {element} references node {node}, but the mesh has {node_count} nodes.")]
    NodeOutOfRange {
        element: usize,
        node: usize,
        node_count: usize,
    },

    #[error("Element {element} has invalid node number {value}; expected a positive integer.")]
    InvalidNodeNumber { element: usize, value: f64 },

    #[error("Field has {actual} values but the mesh has {expected} nodes.")]
    FieldLengthMismatch { expected: usize, actual: usize },

    #[error("Query coordinate arrays differ in length (x: {x}, y: {y}).")]
    QueryLengthMismatch { x: usize, y: usize },

    #[error("Coefficient table `{name}` has {actual} values; expected {expected}.")]
    CoefficientShape {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}
