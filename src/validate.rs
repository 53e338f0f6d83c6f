//! Operating-point validation.
//!
//! Every check runs before any formula evaluation, so the numeric core
//! never sees a zero denominator or an out-of-range modulation depth.

use crate::error::{LossError, Result};
use crate::types::{Inverter, OperatingPoint};

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LossError::invalid_parameter(
            field,
            value,
            "must be finite and strictly positive",
        ));
    }
    Ok(())
}

fn require_fraction(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(LossError::invalid_parameter(
            field,
            value,
            "must be within [0, 1]",
        ));
    }
    Ok(())
}

/// Validate an operating point together with its topology selection.
///
/// Checks:
/// - switching frequency, voltages, and peak current are finite and positive
/// - modulation index and power factor are within [0, 1]
/// - CSI sub-inputs (DC-link current, line peak voltage) are positive
/// - the VSI boost/buck stage duty ratio `1 - VB/Vdc` stays non-negative,
///   which requires `VB <= Vdc`
pub fn validate(inverter: &Inverter, op: &OperatingPoint) -> Result<()> {
    require_positive("switching_frequency", op.switching_frequency)?;
    require_positive("dc_bus_voltage", op.dc_bus_voltage)?;
    require_positive("battery_voltage", op.battery_voltage)?;
    require_positive("peak_phase_current", op.peak_phase_current)?;
    require_fraction("modulation_index", op.modulation_index)?;
    require_fraction("power_factor", op.power_factor)?;

    match inverter {
        Inverter::Vsi => {
            if op.battery_voltage > op.dc_bus_voltage {
                return Err(LossError::degenerate(format!(
                    "VSI boost/buck duty ratio 1 - VB/Vdc is negative \
                     (VB = {} V > Vdc = {} V)",
                    op.battery_voltage, op.dc_bus_voltage
                )));
            }
        }
        Inverter::Csi {
            dc_link_current,
            line_peak_voltage,
        } => {
            require_positive("dc_link_current", *dc_link_current)?;
            require_positive("line_peak_voltage", *line_peak_voltage)?;
        }
    }

    Ok(())
}
