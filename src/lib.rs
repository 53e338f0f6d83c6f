//! # Tractionloss
//!
//! Parametric power-loss estimation for voltage-source (VSI) and
//! current-source (CSI) traction inverters.
//!
//! This library provides:
//! - Closed-form switching, conduction, and DC-DC-stage loss models for
//!   both bridge topologies
//! - Device characterization tables (IGBT / diode / RB-IGBT), swappable
//!   per device family via JSON
//! - Derived metrics: efficiency and junction-temperature estimates
//! - Side-by-side topology comparison
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`device`] - Device characterization tables and their loading
//! - [`types`] - Operating point, topology selection, loss outputs
//! - [`validate`] - Input-domain validation before formula evaluation
//! - [`loss`] - The numeric core: VSI and CSI loss equations, aggregation,
//!   derived metrics
//!
//! ## Usage
//!
//! ```
//! use tractionloss::{estimate, DeviceLibrary, Inverter, OperatingPoint};
//!
//! let op = OperatingPoint {
//!     dc_bus_voltage: 450.0,
//!     battery_voltage: 200.0,
//!     peak_phase_current: 220.0,
//!     modulation_index: 0.9,
//!     power_factor: 0.85,
//!     switching_frequency: 10e3,
//! };
//!
//! let breakdown = estimate(&Inverter::Vsi, &op, &DeviceLibrary::default()).unwrap();
//! assert!(breakdown.total > 0.0);
//! ```
//!
//! ## Method
//!
//! The engine is pure and stateless. Each call:
//!
//! 1. Validates the device tables and the operating point
//! 2. Evaluates the topology's closed-form loss equations (period-averaged
//!    conduction terms, reference-scaled switching energies)
//! 3. Aggregates the three stage losses into a total with percentage shares
//!
//! Repeated calls with identical inputs return identical outputs, and the
//! engine touches no shared state, so concurrent callers need no
//! synchronization.

pub mod device;
pub mod error;
pub mod loss;
pub mod types;
pub mod validate;

// Re-export main types for convenience
pub use device::{DeviceCharacterization, DeviceLibrary};
pub use error::{LossError, Result};
pub use loss::{compare, estimate, evaluate, input_power};
pub use types::{
    Comparison, ConverterMode, DerivedMetrics, Evaluation, Inverter, LossBreakdown,
    OperatingPoint, ThermalEstimate,
};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmLossEngine;
