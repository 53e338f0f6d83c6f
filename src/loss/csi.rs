//! Current-source inverter loss formulas.
//!
//! The CSI bridge uses reverse-blocking IGBTs and needs no antiparallel
//! diodes, so diode conduction is exactly zero. At any instant exactly two
//! switches carry the regulated DC-link current:
//!
//! ```text
//! P_cond = 2 * Idc * (Vce0 + Idc * r)
//! ```
//!
//! Switching loss accounts explicitly for reverse recovery of the blocking
//! junction. The front-end V-I converter selects its mode from the bus and
//! battery voltages: `Vdc >= VB` holds the switches on continuously (boost,
//! zero switching loss); otherwise it chops at `d = Vdc/VB` (buck).

use crate::device::DeviceLibrary;
use crate::types::{ConverterMode, OperatingPoint};

use super::StageLosses;

/// Compute the CSI stage losses at an already-validated operating point.
pub(super) fn losses(
    op: &OperatingPoint,
    dc_link_current: f64,
    line_peak_voltage: f64,
    devices: &DeviceLibrary,
) -> StageLosses {
    let bridge = &devices.csi_bridge_igbt;
    let conv_igbt = &devices.csi_converter_igbt;
    let conv_diode = &devices.csi_converter_diode;
    let idc = dc_link_current;

    // Two RB-IGBTs conduct at any instant; no diode path exists.
    let igbt_conduction = 2.0 * bridge.conduction_power(idc);
    let diode_conduction = 0.0;

    let switching = 3.0
        * op.switching_frequency
        * bridge.reference_scale(line_peak_voltage, idc)
        * bridge.switching_energy();

    // V-I converter mode. Equality resolves to boost deterministically.
    let (converter_switching, converter_conduction, mode, label) =
        if op.dc_bus_voltage >= op.battery_voltage {
            // Switches held on continuously: no switching transitions.
            let conduction = 2.0 * conv_igbt.conduction_power(idc);
            let label = "V-I converter (boost mode, switches held on)".to_string();
            (0.0, conduction, ConverterMode::Boost, label)
        } else {
            let duty = op.dc_bus_voltage / op.battery_voltage;
            let converter_energy = conv_igbt.switching_energy() + conv_diode.switching_energy();
            let switching = op.switching_frequency
                * conv_igbt.reference_scale(op.battery_voltage, idc)
                * converter_energy;
            let conduction = (1.0 + duty) * conv_igbt.conduction_power(idc)
                + (1.0 - duty) * conv_diode.conduction_power(idc);
            let label = format!("V-I converter (buck mode, d = {duty:.3})");
            (switching, conduction, ConverterMode::Buck, label)
        };

    StageLosses {
        switching,
        igbt_conduction,
        diode_conduction,
        converter_switching,
        converter_conduction,
        converter_mode: mode,
        stage_label: label,
    }
}
