//! Host-array marshaling shared by the free functions and `WasmMesh`.
//!
//! Everything here is plain Rust over slices so it can be tested natively;
//! conversion to `JsValue` happens at the `#[wasm_bindgen]` boundary.

use anyhow::{Context, Result};
use meshfield_core::barycentric::BarycentricTable;
use meshfield_core::contour::flatten_segments;
use meshfield_core::locate::query_points;
use meshfield_core::{
    extract_contour, extract_phase_contour, locate, ContourSettings, LocatorSettings,
    PhaseSettings, TriMesh,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

/// Mesh from node columns and 1-based element numbers, column-major `E x 3`.
pub(crate) fn build_mesh(x: &[f64], y: &[f64], elements: &[f64]) -> Result<TriMesh> {
    TriMesh::from_one_based(x, y, elements).context("Invalid mesh")
}

/// Row-major `x1, y1, x2, y2` per segment; empty when nothing crosses.
pub(crate) fn contour_buffer(
    mesh: &TriMesh,
    field: &[f64],
    value: f64,
    settings: ContourSettings,
) -> Result<Vec<f64>> {
    let segments = extract_contour(mesh, field, value, settings).context("Invalid scalar field")?;
    Ok(flatten_segments(&segments))
}

/// Row-major `x, y` per point, break markers included.
pub(crate) fn phase_buffer(
    mesh: &TriMesh,
    field: &[f64],
    value: f64,
    settings: PhaseSettings,
) -> Result<Vec<f64>> {
    let contour = extract_phase_contour(mesh, field, value, settings).context("Invalid phase field")?;
    Ok(contour.flatten())
}

/// 1-based element number per query point, `NaN` where none contains it.
pub(crate) fn locate_buffer(
    xp: &[f64],
    yp: &[f64],
    table: &BarycentricTable,
    tolerance: f64,
) -> Result<Vec<f64>> {
    let points = query_points(xp, yp).context("Invalid query points")?;
    let found = locate(&points, table, LocatorSettings { tolerance });
    Ok(element_numbers(&found))
}

pub(crate) fn element_numbers(found: &[Option<usize>]) -> Vec<f64> {
    found
        .iter()
        .map(|hit| hit.map_or(f64::NAN, |index| (index + 1) as f64))
        .collect()
}

pub(crate) fn coefficient_table(area: &[f64], a: &[f64], b: &[f64], t: &[f64]) -> Result<BarycentricTable> {
    BarycentricTable::from_columns(area, a, b, t).context("Invalid coefficient table")
}

/// Deserializes an optional settings object; `undefined` or `null` gives defaults.
pub(crate) fn settings_from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))
}

pub(crate) fn js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}
