//! Voltage-source inverter loss formulas.
//!
//! The 3-phase bridge carries six IGBT/diode pairs. Averaged over one
//! fundamental period under sinusoidal PWM, conduction loss per device is
//!
//! ```text
//! P_igbt  = V0 * Ip * (1/(2pi) + m*cos0/8) + r * Ip^2 * (1/8 + m*cos0/(3pi))
//! P_diode = V0 * Ip * (1/(2pi) - m*cos0/8) + r * Ip^2 * (1/8 - m*cos0/(3pi))
//! ```
//!
//! with the diode taking the minus signs because it conducts during the
//! complementary duty interval. Switching loss scales linearly with the
//! actual bus voltage and peak current relative to the characterization
//! point of the devices.

use std::f64::consts::PI;

use crate::device::DeviceLibrary;
use crate::types::{ConverterMode, OperatingPoint};

use super::StageLosses;

/// Compute the VSI stage losses at an already-validated operating point.
pub(super) fn losses(op: &OperatingPoint, devices: &DeviceLibrary) -> StageLosses {
    let igbt = &devices.vsi_bridge_igbt;
    let diode = &devices.vsi_bridge_diode;
    let k = op.modulation_index * op.power_factor;
    let ip = op.peak_phase_current;

    // Bridge switching: six devices, IGBT Eon + Eoff plus the antiparallel
    // diode's reverse-recovery energy, scaled from the reference point.
    let bridge_energy = igbt.switching_energy() + diode.switching_energy();
    let switching = 6.0
        * op.switching_frequency
        * igbt.reference_scale(op.dc_bus_voltage, ip)
        * bridge_energy;

    let igbt_conduction = 6.0
        * (igbt.zero_current_voltage_drop * ip * (1.0 / (2.0 * PI) + k / 8.0)
            + igbt.on_resistance * ip * ip * (1.0 / 8.0 + k / (3.0 * PI)));

    let diode_conduction = 6.0
        * (diode.zero_current_voltage_drop * ip * (1.0 / (2.0 * PI) - k / 8.0)
            + diode.on_resistance * ip * ip * (1.0 / 8.0 - k / (3.0 * PI)));

    // Battery-side DC current from power balance, then the boost/buck stage.
    let battery_current =
        op.dc_bus_voltage * ip * k * 3.0_f64.sqrt() / (2.0 * op.battery_voltage);
    let duty = 1.0 - op.battery_voltage / op.dc_bus_voltage;

    let converter_switching = op.switching_frequency
        * igbt.reference_scale(op.dc_bus_voltage, battery_current)
        * bridge_energy;

    let converter_conduction = duty * igbt.conduction_power(battery_current)
        + (1.0 - duty) * diode.conduction_power(battery_current);

    let mode = if op.dc_bus_voltage > op.battery_voltage {
        ConverterMode::Boost
    } else {
        ConverterMode::Buck
    };

    StageLosses {
        switching,
        igbt_conduction,
        diode_conduction,
        converter_switching,
        converter_conduction,
        converter_mode: mode,
        stage_label: format!("Boost/buck converter ({mode} mode, d = {duty:.3})"),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::device::DeviceLibrary;
    use crate::types::{ConverterMode, OperatingPoint};

    use super::losses;

    fn nominal() -> OperatingPoint {
        OperatingPoint {
            dc_bus_voltage: 450.0,
            battery_voltage: 200.0,
            peak_phase_current: 220.0,
            modulation_index: 0.9,
            power_factor: 0.85,
            switching_frequency: 10e3,
        }
    }

    /// Golden regression vector from the reference device characterization
    /// at Vdc = 450 V, VB = 200 V, Ipeak = 220 A, fsw = 10 kHz, m = 0.9,
    /// cos0 = 0.85.
    #[test]
    fn test_golden_bridge_losses() {
        let stage = losses(&nominal(), &DeviceLibrary::default());
        assert_relative_eq!(stage.switching, 5461.0875, epsilon = 1e-6);
        assert_relative_eq!(stage.igbt_conduction, 420.0968217, epsilon = 1e-6);
        assert_relative_eq!(stage.diode_conduction, 107.5429056, epsilon = 1e-6);
    }

    #[test]
    fn test_golden_converter_losses() {
        let stage = losses(&nominal(), &DeviceLibrary::default());
        // IB = 450*220*0.9*0.85*sqrt(3)/400 = 327.94 A, d = 1 - 200/450
        assert_relative_eq!(stage.converter_switching, 1356.758246, epsilon = 1e-5);
        assert_relative_eq!(stage.converter_conduction, 517.3615748, epsilon = 1e-6);
        assert_eq!(stage.converter_mode, ConverterMode::Boost);
    }

    #[test]
    fn test_switching_loss_scales_linearly_with_frequency() {
        let devices = DeviceLibrary::default();
        let base = losses(&nominal(), &devices);
        let mut doubled = nominal();
        doubled.switching_frequency = 20e3;
        let fast = losses(&doubled, &devices);
        assert!(fast.switching > base.switching);
        assert!(fast.converter_switching > base.converter_switching);
        assert_relative_eq!(fast.switching, 2.0 * base.switching, epsilon = 1e-9);
    }

    #[test]
    fn test_diode_conduction_positive_at_full_modulation() {
        // Worst case for the minus-sign terms: m * cos0 = 1.
        let mut op = nominal();
        op.modulation_index = 1.0;
        op.power_factor = 1.0;
        let stage = losses(&op, &DeviceLibrary::default());
        assert!(stage.diode_conduction > 0.0);
    }

    #[test]
    fn test_equal_bus_and_battery_gives_zero_duty() {
        let mut op = nominal();
        op.battery_voltage = op.dc_bus_voltage;
        let stage = losses(&op, &DeviceLibrary::default());
        // d = 0: conduction falls entirely on the diode arm.
        let ib = op.dc_bus_voltage
            * op.peak_phase_current
            * op.modulation_index
            * op.power_factor
            * 3.0_f64.sqrt()
            / (2.0 * op.battery_voltage);
        let expected = DeviceLibrary::default()
            .vsi_bridge_diode
            .conduction_power(ib);
        assert_relative_eq!(stage.converter_conduction, expected, epsilon = 1e-9);
        assert_eq!(stage.converter_mode, ConverterMode::Buck);
    }
}
