//! WASM bindings for Tractionloss.
//!
//! This module provides JavaScript-friendly bindings so the engine can run
//! in the browser behind input sliders, with JSON on both sides of the
//! boundary.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmLossEngine } from 'tractionloss';
//!
//! await init();
//!
//! const engine = new WasmLossEngine();
//! const result = JSON.parse(engine.evaluate(
//!   JSON.stringify({ topology: 'vsi' }),
//!   JSON.stringify({
//!     dc_bus_voltage: 450, battery_voltage: 200, peak_phase_current: 220,
//!     modulation_index: 0.9, power_factor: 0.85, switching_frequency: 10e3,
//!   }),
//! ));
//! console.log(result.breakdown.total);
//! ```

use wasm_bindgen::prelude::*;

use crate::device::DeviceLibrary;
use crate::types::{Inverter, OperatingPoint};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible loss estimation engine.
///
/// Holds a device library; every evaluation is otherwise stateless.
#[wasm_bindgen]
pub struct WasmLossEngine {
    devices: DeviceLibrary,
}

impl Default for WasmLossEngine {
    fn default() -> Self {
        Self {
            devices: DeviceLibrary::default(),
        }
    }
}

#[wasm_bindgen]
impl WasmLossEngine {
    /// Create an engine with the built-in device characterization tables.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmLossEngine {
        Self::default()
    }

    /// Create an engine with a device library parsed from JSON.
    #[wasm_bindgen]
    pub fn with_devices(device_json: &str) -> Result<WasmLossEngine, JsValue> {
        let devices = DeviceLibrary::from_json_str(device_json).map_err(js_err)?;
        Ok(WasmLossEngine { devices })
    }

    /// Evaluate one topology at one operating point.
    ///
    /// # Arguments
    /// * `inverter_json` - Topology selection, e.g. `{"topology":"vsi"}` or
    ///   `{"topology":"csi","dc_link_current":300,"line_peak_voltage":380}`
    /// * `op_json` - The operating point fields in snake_case
    ///
    /// # Returns
    /// A JSON string holding the breakdown and derived metrics.
    #[wasm_bindgen]
    pub fn evaluate(&self, inverter_json: &str, op_json: &str) -> Result<String, JsValue> {
        let inverter: Inverter = serde_json::from_str(inverter_json).map_err(js_err)?;
        let op: OperatingPoint = serde_json::from_str(op_json).map_err(js_err)?;
        let result = crate::loss::evaluate(&inverter, &op, &self.devices).map_err(js_err)?;
        serde_json::to_string(&result).map_err(js_err)
    }

    /// Evaluate two topologies side by side at the same operating point.
    ///
    /// # Returns
    /// A JSON string holding both breakdowns and the total-loss delta.
    #[wasm_bindgen]
    pub fn compare(
        &self,
        first_json: &str,
        second_json: &str,
        op_json: &str,
    ) -> Result<String, JsValue> {
        let first: Inverter = serde_json::from_str(first_json).map_err(js_err)?;
        let second: Inverter = serde_json::from_str(second_json).map_err(js_err)?;
        let op: OperatingPoint = serde_json::from_str(op_json).map_err(js_err)?;
        let result = crate::loss::compare(&first, &second, &op, &self.devices).map_err(js_err)?;
        serde_json::to_string(&result).map_err(js_err)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
