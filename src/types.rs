//! Core types: operating point, topology selection, and loss outputs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime-variable electrical inputs shared by both topologies.
///
/// All values are caller-supplied; the engine keeps no state across calls,
/// so two evaluations of the same operating point return identical results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// DC bus voltage Vdc, in volts.
    pub dc_bus_voltage: f64,
    /// Battery / link voltage VB, in volts.
    pub battery_voltage: f64,
    /// Peak phase current, in amperes.
    pub peak_phase_current: f64,
    /// Modulation index m, 0 to 1.
    pub modulation_index: f64,
    /// Power factor cos(theta), 0 to 1.
    pub power_factor: f64,
    /// Switching frequency, in hertz. Strictly positive.
    pub switching_frequency: f64,
}

/// Topology selector. Each arm carries the sub-inputs only that topology
/// needs, so a VSI evaluation cannot read stale CSI fields and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topology", rename_all = "lowercase")]
pub enum Inverter {
    /// Voltage-source inverter: six IGBT/diode pairs fed from a voltage bus.
    Vsi,
    /// Current-source inverter: reverse-blocking switches fed from a
    /// regulated current source.
    Csi {
        /// Regulated DC-link current Idc, in amperes.
        dc_link_current: f64,
        /// Peak line-to-line voltage at the bridge, in volts.
        line_peak_voltage: f64,
    },
}

impl Inverter {
    /// Short topology name for reports.
    pub fn name(&self) -> &'static str {
        match self {
            Inverter::Vsi => "VSI",
            Inverter::Csi { .. } => "CSI",
        }
    }
}

impl fmt::Display for Inverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operating mode of the DC-DC stage in front of the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterMode {
    Boost,
    Buck,
}

impl fmt::Display for ConverterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterMode::Boost => f.write_str("boost"),
            ConverterMode::Buck => f.write_str("buck"),
        }
    }
}

/// Structured power-loss breakdown for one topology at one operating point.
///
/// Invariants (hold for every accepted input):
/// - `switching + conduction + converter == total` to within f64 epsilon,
/// - every component is non-negative,
/// - the three percentage shares sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossBreakdown {
    /// Bridge switching loss, in watts.
    pub switching: f64,
    /// Bridge IGBT conduction loss, in watts.
    pub igbt_conduction: f64,
    /// Bridge diode conduction loss, in watts. Exactly zero for CSI.
    pub diode_conduction: f64,
    /// Total bridge conduction loss (IGBT + diode), in watts.
    pub conduction: f64,
    /// DC-DC stage switching loss, in watts.
    pub converter_switching: f64,
    /// DC-DC stage conduction loss, in watts.
    pub converter_conduction: f64,
    /// Total DC-DC stage loss, in watts.
    pub converter: f64,
    /// Sum of switching, conduction, and converter losses, in watts.
    pub total: f64,
    /// Bridge switching share of total, in percent.
    pub switching_share: f64,
    /// Bridge conduction share of total, in percent.
    pub conduction_share: f64,
    /// DC-DC stage share of total, in percent.
    pub converter_share: f64,
    /// Operating mode of the DC-DC stage.
    pub converter_mode: ConverterMode,
    /// Qualitative label naming the DC-DC stage and its mode.
    pub stage_label: String,
}

/// Per-stage junction-temperature estimates, in degrees Celsius.
///
/// Computed as ambient plus junction-to-ambient thermal resistance times
/// the per-device share of the stage loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThermalEstimate {
    /// Hottest-case bridge switch junction temperature.
    pub bridge_junction: f64,
    /// DC-DC stage switch junction temperature.
    pub converter_junction: f64,
}

/// Derived metrics computed from a [`LossBreakdown`] and an independent
/// input-power estimate. Not independent state: recomputable from the
/// breakdown and operating point at any time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// Three-phase real input power estimate, in watts.
    pub input_power: f64,
    /// Efficiency in percent, clamped to [50, 99.9].
    pub efficiency: f64,
    /// True when the clamp altered the raw efficiency value.
    pub efficiency_clamped: bool,
    /// Junction-temperature estimates.
    pub thermal: ThermalEstimate,
}

/// Full evaluation result: the breakdown plus its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub breakdown: LossBreakdown,
    pub metrics: DerivedMetrics,
}

/// Side-by-side evaluation of two topology selections at one operating
/// point. Both arms are computed independently; nothing is shared or
/// mutated between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub first: LossBreakdown,
    pub second: LossBreakdown,
    /// `second.total - first.total`, in watts. Negative means the second
    /// topology loses less power.
    pub total_delta: f64,
}
