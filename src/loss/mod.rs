//! Loss estimation engine.
//!
//! The engine is a pure function of `(topology, operating point, device
//! tables)` to a structured [`LossBreakdown`]:
//!
//! 1. Validate every input before any formula runs.
//! 2. Dispatch on the topology arm (VSI or CSI) to its closed-form stage
//!    losses: bridge switching, bridge conduction, and the DC-DC stage.
//! 3. Aggregate into a total with percentage shares.
//!
//! No state survives a call. Two evaluations of the same inputs return
//! identical outputs, and concurrent callers need no synchronization.

mod csi;
pub mod derived;
mod vsi;

pub use derived::{input_power, AMBIENT_TEMPERATURE, EFFICIENCY_CEILING, EFFICIENCY_FLOOR};

use crate::device::DeviceLibrary;
use crate::error::Result;
use crate::types::{Comparison, ConverterMode, Evaluation, Inverter, LossBreakdown, OperatingPoint};
use crate::validate::validate;

/// Raw per-stage losses produced by one topology arm, before aggregation.
struct StageLosses {
    switching: f64,
    igbt_conduction: f64,
    diode_conduction: f64,
    converter_switching: f64,
    converter_conduction: f64,
    converter_mode: ConverterMode,
    stage_label: String,
}

impl StageLosses {
    fn aggregate(self) -> LossBreakdown {
        let conduction = self.igbt_conduction + self.diode_conduction;
        let converter = self.converter_switching + self.converter_conduction;
        let total = self.switching + conduction + converter;
        let share = |part: f64| if total > 0.0 { part / total * 100.0 } else { 0.0 };

        LossBreakdown {
            switching: self.switching,
            igbt_conduction: self.igbt_conduction,
            diode_conduction: self.diode_conduction,
            conduction,
            converter_switching: self.converter_switching,
            converter_conduction: self.converter_conduction,
            converter,
            total,
            switching_share: share(self.switching),
            conduction_share: share(conduction),
            converter_share: share(converter),
            converter_mode: self.converter_mode,
            stage_label: self.stage_label,
        }
    }
}

/// Compute the loss breakdown for one topology at one operating point.
///
/// Validates the device tables and the operating point, then evaluates the
/// selected topology's closed-form loss equations.
pub fn estimate(
    inverter: &Inverter,
    op: &OperatingPoint,
    devices: &DeviceLibrary,
) -> Result<LossBreakdown> {
    devices.validate()?;
    validate(inverter, op)?;

    let stage = match inverter {
        Inverter::Vsi => vsi::losses(op, devices),
        Inverter::Csi {
            dc_link_current,
            line_peak_voltage,
        } => csi::losses(op, *dc_link_current, *line_peak_voltage, devices),
    };

    Ok(stage.aggregate())
}

/// Compute the loss breakdown together with its derived metrics
/// (input power, clamped efficiency, junction-temperature estimates).
pub fn evaluate(
    inverter: &Inverter,
    op: &OperatingPoint,
    devices: &DeviceLibrary,
) -> Result<Evaluation> {
    let breakdown = estimate(inverter, op, devices)?;
    let metrics = derived::metrics(inverter, op, devices, &breakdown)?;
    Ok(Evaluation { breakdown, metrics })
}

/// Evaluate two topology selections at the same operating point.
///
/// Both arms are explicit arguments and are computed independently; there
/// is no shared topology mode to swap and restore.
pub fn compare(
    first: &Inverter,
    second: &Inverter,
    op: &OperatingPoint,
    devices: &DeviceLibrary,
) -> Result<Comparison> {
    let first = estimate(first, op, devices)?;
    let second = estimate(second, op, devices)?;
    let total_delta = second.total - first.total;
    Ok(Comparison {
        first,
        second,
        total_delta,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::device::DeviceLibrary;
    use crate::types::{Inverter, OperatingPoint};

    use super::{compare, estimate};

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

    fn csi() -> Inverter {
        Inverter::Csi {
            dc_link_current: 300.0,
            line_peak_voltage: 380.0,
        }
    }

    fn topologies() -> Vec<Inverter> {
        vec![Inverter::Vsi, csi()]
    }

    #[test]
    fn test_conservation() {
        for inverter in topologies() {
            let b = estimate(&inverter, &nominal(), &DeviceLibrary::default()).unwrap();
            assert_relative_eq!(
                b.switching + b.conduction + b.converter,
                b.total,
                max_relative = 1e-9
            );
            assert_relative_eq!(
                b.igbt_conduction + b.diode_conduction,
                b.conduction,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_non_negativity() {
        for inverter in topologies() {
            let b = estimate(&inverter, &nominal(), &DeviceLibrary::default()).unwrap();
            for part in [b.switching, b.conduction, b.converter, b.total] {
                assert!(part >= 0.0, "negative loss component: {part}");
            }
        }
    }

    #[test]
    fn test_percentage_closure() {
        for inverter in topologies() {
            let b = estimate(&inverter, &nominal(), &DeviceLibrary::default()).unwrap();
            let sum = b.switching_share + b.conduction_share + b.converter_share;
            assert_relative_eq!(sum, 100.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_vsi_golden_total() {
        let b = estimate(&Inverter::Vsi, &nominal(), &DeviceLibrary::default()).unwrap();
        assert_relative_eq!(b.total, 7862.847048, epsilon = 1e-5);
    }

    #[test]
    fn test_csi_boost_golden_total() {
        let b = estimate(&csi(), &nominal(), &DeviceLibrary::default()).unwrap();
        // 1386 (conduction) + 2195.925 (switching) + 888 (converter)
        assert_relative_eq!(b.total, 4469.925, epsilon = 1e-6);
    }

    #[test]
    fn test_idempotence() {
        let devices = DeviceLibrary::default();
        for inverter in topologies() {
            let a = estimate(&inverter, &nominal(), &devices).unwrap();
            let b = estimate(&inverter, &nominal(), &devices).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_higher_frequency_strictly_increases_switching_loss() {
        let devices = DeviceLibrary::default();
        let base = estimate(&Inverter::Vsi, &nominal(), &devices).unwrap();
        let mut faster = nominal();
        faster.switching_frequency = 20e3;
        let fast = estimate(&Inverter::Vsi, &faster, &devices).unwrap();
        assert!(fast.switching > base.switching);
        assert!(fast.converter_switching > base.converter_switching);
        assert!(fast.total > base.total);
    }

    #[test]
    fn test_compare_matches_independent_estimates() {
        let devices = DeviceLibrary::default();
        let comparison = compare(&Inverter::Vsi, &csi(), &nominal(), &devices).unwrap();
        let vsi_alone = estimate(&Inverter::Vsi, &nominal(), &devices).unwrap();
        let csi_alone = estimate(&csi(), &nominal(), &devices).unwrap();
        assert_eq!(comparison.first, vsi_alone);
        assert_eq!(comparison.second, csi_alone);
        assert_relative_eq!(
            comparison.total_delta,
            csi_alone.total - vsi_alone.total,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_comparison_order_does_not_leak_state() {
        let devices = DeviceLibrary::default();
        let ab = compare(&Inverter::Vsi, &csi(), &nominal(), &devices).unwrap();
        let ba = compare(&csi(), &Inverter::Vsi, &nominal(), &devices).unwrap();
        assert_eq!(ab.first, ba.second);
        assert_eq!(ab.second, ba.first);
        assert_relative_eq!(ab.total_delta, -ba.total_delta, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_input_rejected_before_formulas() {
        let mut bad = nominal();
        bad.switching_frequency = -1.0;
        assert!(estimate(&Inverter::Vsi, &bad, &DeviceLibrary::default()).is_err());
    }
}
