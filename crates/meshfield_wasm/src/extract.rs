//! Stateless entry points: each call receives the full mesh as host arrays.

use crate::marshal::{
    build_mesh, coefficient_table, contour_buffer, js_error, locate_buffer, phase_buffer,
    settings_from_js,
};
use js_sys::Float64Array;
use meshfield_core::{BarycentricTable, ContourSettings, PhaseSettings};
use wasm_bindgen::prelude::*;

/// Isoline segments as `4 * count` values, `x1, y1, x2, y2` per segment.
///
/// `elements` holds 1-based node numbers, `E x 3` column-major.
#[wasm_bindgen]
pub fn contour(
    x: &[f64],
    y: &[f64],
    elements: &[f64],
    field: &[f64],
    value: f64,
    settings: JsValue,
) -> Result<Float64Array, JsValue> {
    console_error_panic_hook::set_once();
    let settings: ContourSettings = settings_from_js(settings)?;
    let mesh = build_mesh(x, y, elements).map_err(js_error)?;
    let buffer = contour_buffer(&mesh, field, value, settings).map_err(js_error)?;
    Ok(Float64Array::from(buffer.as_slice()))
}

/// Phase isoline points as `2 * count` values with break pairs between
/// triangle groups.
#[wasm_bindgen]
pub fn phase_contour(
    x: &[f64],
    y: &[f64],
    elements: &[f64],
    field: &[f64],
    value: f64,
    settings: JsValue,
) -> Result<Float64Array, JsValue> {
    console_error_panic_hook::set_once();
    let settings: PhaseSettings = settings_from_js(settings)?;
    let mesh = build_mesh(x, y, elements).map_err(js_error)?;
    let buffer = phase_buffer(&mesh, field, value, settings).map_err(js_error)?;
    Ok(Float64Array::from(buffer.as_slice()))
}

/// 1-based element number for each query point, `NaN` when not found.
///
/// `area` has one value per element; `a`, `b` and `t` are `E x 3`
/// column-major.
#[wasm_bindgen]
pub fn find_elements(
    xp: &[f64],
    yp: &[f64],
    area: &[f64],
    a: &[f64],
    b: &[f64],
    t: &[f64],
    tolerance: f64,
) -> Result<Float64Array, JsValue> {
    console_error_panic_hook::set_once();
    let table = coefficient_table(area, a, b, t).map_err(js_error)?;
    let buffer = locate_buffer(xp, yp, &table, tolerance).map_err(js_error)?;
    Ok(Float64Array::from(buffer.as_slice()))
}

/// Like [`find_elements`], deriving the coefficient table from the mesh.
#[wasm_bindgen]
pub fn find_elements_in_mesh(
    x: &[f64],
    y: &[f64],
    elements: &[f64],
    xp: &[f64],
    yp: &[f64],
    tolerance: f64,
) -> Result<Float64Array, JsValue> {
    console_error_panic_hook::set_once();
    let mesh = build_mesh(x, y, elements).map_err(js_error)?;
    let table = BarycentricTable::from_mesh(&mesh);
    let buffer = locate_buffer(xp, yp, &table, tolerance).map_err(js_error)?;
    Ok(Float64Array::from(buffer.as_slice()))
}
