//! The `meshfield_core` crate extracts features from scalar fields sampled on
//! unstructured triangular meshes.
//!
//! Key components:
//! - **Mesh**: `TriMesh`, validated node coordinates and element triples.
//! - **Contour**: per-triangle isoline segments of an ordinary field.
//! - **Phase**: isolines of an angular field, as break-separated polylines.
//! - **Barycentric**: per-triangle coefficients for inside tests.
//! - **Locate**: which triangle, if any, contains each query point.
//!
//! Flat host tables with three entries per element, the 1-based element
//! numbers of [`TriMesh::from_one_based`] as well as the `a`, `b`, `t`
//! coefficient columns of [`BarycentricTable::from_columns`], share one
//! layout: `E x 3` column-major, entry `k` of element `e` at `e + E * k`.

pub mod barycentric;
pub mod contour;
pub mod error;
pub mod locate;
pub mod mesh;
pub mod phase;
pub mod traits;

pub use barycentric::{BarycentricCoefficients, BarycentricTable, CoefficientColumns};
pub use contour::{extract_contour, par_extract_contour, ContourSettings, Segment};
pub use error::MeshError;
pub use locate::{locate, BruteForceLocator, LocatorSettings};
pub use mesh::{Point, TriMesh, VERTS_PER_TRIANGLE};
pub use phase::{extract_phase_contour, par_extract_phase_contour, PhaseContour, PhaseSettings};
pub use traits::PointLocator;
