//! Derived metrics: input power, efficiency, and junction temperatures.
//!
//! These are recomputable from a [`LossBreakdown`] and the operating point;
//! they carry no state of their own.

use std::f64::consts::SQRT_2;

use crate::device::DeviceLibrary;
use crate::error::{LossError, Result};
use crate::types::{DerivedMetrics, Inverter, LossBreakdown, OperatingPoint, ThermalEstimate};

/// Ambient temperature assumed for junction-temperature estimates, in
/// degrees Celsius.
pub const AMBIENT_TEMPERATURE: f64 = 25.0;

/// Lower bound of the reported efficiency, in percent.
pub const EFFICIENCY_FLOOR: f64 = 50.0;

/// Upper bound of the reported efficiency, in percent.
pub const EFFICIENCY_CEILING: f64 = 99.9;

/// Three-phase real input power estimate from RMS bus voltage, RMS phase
/// current, and power factor: `(3/2) * (Vdc*m/sqrt2) * (Ipeak/sqrt2) * cos0`.
pub fn input_power(op: &OperatingPoint) -> f64 {
    1.5 * (op.dc_bus_voltage * op.modulation_index / SQRT_2)
        * (op.peak_phase_current / SQRT_2)
        * op.power_factor
}

/// Compute efficiency and thermal estimates for an evaluated breakdown.
///
/// Efficiency is clamped to `[50, 99.9]` percent so extreme inputs report a
/// sane metric instead of garbage; `efficiency_clamped` records when the
/// clamp engaged. Zero input power (`m = 0` or `cos0 = 0`) cannot support an
/// efficiency figure and is rejected.
pub(super) fn metrics(
    inverter: &Inverter,
    op: &OperatingPoint,
    devices: &DeviceLibrary,
    breakdown: &LossBreakdown,
) -> Result<DerivedMetrics> {
    let input_power = input_power(op);
    if input_power <= 0.0 {
        return Err(LossError::degenerate(
            "input power is zero (modulation index or power factor is 0), \
             efficiency is undefined",
        ));
    }

    let raw = (input_power - breakdown.total) / input_power * 100.0;
    let efficiency = raw.clamp(EFFICIENCY_FLOOR, EFFICIENCY_CEILING);

    Ok(DerivedMetrics {
        input_power,
        efficiency,
        efficiency_clamped: efficiency != raw,
        thermal: thermal(inverter, devices, breakdown),
    })
}

/// Junction-temperature estimate per stage: ambient plus the per-device
/// share of the stage loss times the switch's junction-to-ambient thermal
/// resistance.
fn thermal(inverter: &Inverter, devices: &DeviceLibrary, breakdown: &LossBreakdown) -> ThermalEstimate {
    let bridge_loss = breakdown.switching + breakdown.conduction;
    let (bridge_devices, bridge_rth, converter_devices, converter_rth) = match inverter {
        // Six switch positions in the VSI bridge, one in the boost/buck leg.
        Inverter::Vsi => (
            6.0,
            devices.vsi_bridge_igbt.thermal_resistance,
            1.0,
            devices.vsi_bridge_igbt.thermal_resistance,
        ),
        // Two conducting RB-IGBTs, two devices in the V-I converter.
        Inverter::Csi { .. } => (
            2.0,
            devices.csi_bridge_igbt.thermal_resistance,
            2.0,
            devices.csi_converter_igbt.thermal_resistance,
        ),
    };

    ThermalEstimate {
        bridge_junction: AMBIENT_TEMPERATURE + bridge_rth * bridge_loss / bridge_devices,
        converter_junction: AMBIENT_TEMPERATURE + converter_rth * breakdown.converter / converter_devices,
    }
}
