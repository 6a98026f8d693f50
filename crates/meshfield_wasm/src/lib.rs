//! WASM bindings for `meshfield_core`.
//!
//! Host arrays arrive as flat `f64` slices with 1-based element numbers and
//! leave as `Float64Array`s sized to the result; missing results are `NaN`.
//! Per-element tables (element numbers and the `a`, `b`, `t` coefficients)
//! are `E x 3` column-major, so `WasmMesh::coefficients` output can be passed
//! straight back to `find_elements`.

mod extract;
mod marshal;
mod mesh;

pub use extract::{contour, find_elements, find_elements_in_mesh, phase_contour};
pub use mesh::WasmMesh;
