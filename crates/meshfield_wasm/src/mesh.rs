//! Long-lived mesh handle for repeated extraction and location calls.

use crate::marshal::{
    build_mesh, contour_buffer, js_error, locate_buffer, phase_buffer, settings_from_js,
};
use js_sys::Float64Array;
use meshfield_core::{BarycentricTable, ContourSettings, PhaseSettings, TriMesh};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmMesh {
    pub(crate) mesh: TriMesh,
    pub(crate) table: BarycentricTable,
}

impl WasmMesh {
    pub(crate) fn from_mesh(mesh: TriMesh) -> Self {
        let table = BarycentricTable::from_mesh(&mesh);
        Self { mesh, table }
    }
}

#[wasm_bindgen]
impl WasmMesh {
    /// `elements` holds 1-based node numbers, `E x 3` column-major.
    #[wasm_bindgen(constructor)]
    pub fn new(x: &[f64], y: &[f64], elements: &[f64]) -> Result<WasmMesh, JsValue> {
        console_error_panic_hook::set_once();
        let mesh = build_mesh(x, y, elements).map_err(js_error)?;
        Ok(WasmMesh::from_mesh(mesh))
    }

    pub fn node_count(&self) -> usize {
        self.mesh.node_count()
    }

    pub fn element_count(&self) -> usize {
        self.mesh.element_count()
    }

    pub fn contour(&self, field: &[f64], value: f64, settings: JsValue) -> Result<Float64Array, JsValue> {
        let settings: ContourSettings = settings_from_js(settings)?;
        let buffer = contour_buffer(&self.mesh, field, value, settings).map_err(js_error)?;
        Ok(Float64Array::from(buffer.as_slice()))
    }

    pub fn phase_contour(
        &self,
        field: &[f64],
        value: f64,
        settings: JsValue,
    ) -> Result<Float64Array, JsValue> {
        let settings: PhaseSettings = settings_from_js(settings)?;
        let buffer = phase_buffer(&self.mesh, field, value, settings).map_err(js_error)?;
        Ok(Float64Array::from(buffer.as_slice()))
    }

    pub fn find_elements(&self, xp: &[f64], yp: &[f64], tolerance: f64) -> Result<Float64Array, JsValue> {
        let buffer = locate_buffer(xp, yp, &self.table, tolerance).map_err(js_error)?;
        Ok(Float64Array::from(buffer.as_slice()))
    }

    /// Barycentric table as `{ area, a, b, t }` flat columns in the layout
    /// `find_elements` accepts.
    pub fn coefficients(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.table.to_columns())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
