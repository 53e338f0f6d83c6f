//! Semiconductor device characterization tables.
//!
//! Each [`DeviceCharacterization`] holds the fixed electrical parameters of
//! one device role, measured at a reference operating point:
//!
//! - Conduction model: `V(I) = V0 + r * I`, so conduction power at a DC
//!   current I is `I * (V0 + r * I)`.
//! - Switching model: per-cycle energies Eon/Eoff/Err characterized at
//!   (Vref, Iref), scaled linearly with the actual voltage-current product:
//!   `P = fsw * (V * I) / (Vref * Iref) * (Eon + Eoff + Err)`.
//!
//! Five roles exist, one per physical device position in the two inverter
//! topologies. They are engine constants, not caller input, but the whole
//! library can be swapped per device family by loading a JSON document —
//! see [`DeviceLibrary::from_json_str`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LossError, Result};

/// Fixed electrical parameters of a semiconductor device, characterized
/// at a reference operating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCharacterization {
    /// Conduction-loss intercept (Vce0 for an IGBT, Vf0 for a diode), in volts.
    pub zero_current_voltage_drop: f64,
    /// Conduction-loss slope (on-state resistance), in ohms.
    pub on_resistance: f64,
    /// Turn-on energy at the reference point, in joules.
    #[serde(default)]
    pub turn_on_energy: Option<f64>,
    /// Turn-off energy at the reference point, in joules.
    #[serde(default)]
    pub turn_off_energy: Option<f64>,
    /// Reverse-recovery energy at the reference point, in joules.
    #[serde(default)]
    pub reverse_recovery_energy: Option<f64>,
    /// Voltage at which the switching energies were measured, in volts.
    pub reference_voltage: f64,
    /// Current at which the switching energies were measured, in amperes.
    pub reference_current: f64,
    /// Junction-to-ambient thermal resistance, in K/W.
    pub thermal_resistance: f64,
}

impl DeviceCharacterization {
    /// Conduction power at a DC current, in watts: `I * (V0 + r * I)`.
    pub fn conduction_power(&self, current: f64) -> f64 {
        current * (self.zero_current_voltage_drop + self.on_resistance * current)
    }

    /// Sum of all characterized switching energies, in joules.
    /// Uncharacterized terms contribute zero.
    pub fn switching_energy(&self) -> f64 {
        self.turn_on_energy.unwrap_or(0.0)
            + self.turn_off_energy.unwrap_or(0.0)
            + self.reverse_recovery_energy.unwrap_or(0.0)
    }

    /// Linear scaling of switching energy from the reference point to the
    /// actual operating voltage-current product.
    pub fn reference_scale(&self, voltage: f64, current: f64) -> f64 {
        (voltage * current) / (self.reference_voltage * self.reference_current)
    }

    fn validate(&self, role: &'static str) -> Result<()> {
        let positive = [
            ("reference_voltage", self.reference_voltage),
            ("reference_current", self.reference_current),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LossError::invalid_device_table(
                    role,
                    format!("{name} must be finite and positive, got {value}"),
                ));
            }
        }

        let non_negative = [
            ("zero_current_voltage_drop", self.zero_current_voltage_drop),
            ("on_resistance", self.on_resistance),
            ("thermal_resistance", self.thermal_resistance),
            ("turn_on_energy", self.turn_on_energy.unwrap_or(0.0)),
            ("turn_off_energy", self.turn_off_energy.unwrap_or(0.0)),
            (
                "reverse_recovery_energy",
                self.reverse_recovery_energy.unwrap_or(0.0),
            ),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(LossError::invalid_device_table(
                    role,
                    format!("{name} must be finite and non-negative, got {value}"),
                ));
            }
        }

        Ok(())
    }
}

/// VSI bridge IGBT (one of six in the 3-phase bridge).
pub const VSI_BRIDGE_IGBT: DeviceCharacterization = DeviceCharacterization {
    zero_current_voltage_drop: 0.782,
    on_resistance: 2.624e-3,
    turn_on_energy: Some(49.1e-3),
    turn_off_energy: Some(88.5e-3),
    reverse_recovery_energy: None,
    reference_voltage: 400.0,
    reference_current: 400.0,
    thermal_resistance: 0.064,
};

/// VSI bridge antiparallel diode.
pub const VSI_BRIDGE_DIODE: DeviceCharacterization = DeviceCharacterization {
    zero_current_voltage_drop: 1.098,
    on_resistance: 1.215e-3,
    turn_on_energy: None,
    turn_off_energy: None,
    reverse_recovery_energy: Some(9.5e-3),
    reference_voltage: 400.0,
    reference_current: 400.0,
    thermal_resistance: 0.11,
};

/// CSI bridge reverse-blocking IGBT. The RB structure blocks reverse
/// voltage itself, so the bridge carries no antiparallel diodes, but
/// reverse recovery of the blocking junction must be accounted for.
pub const CSI_BRIDGE_RB_IGBT: DeviceCharacterization = DeviceCharacterization {
    zero_current_voltage_drop: 1.35,
    on_resistance: 3.2e-3,
    turn_on_energy: Some(58.3e-3),
    turn_off_energy: Some(74.2e-3),
    reverse_recovery_energy: Some(21.6e-3),
    reference_voltage: 600.0,
    reference_current: 400.0,
    thermal_resistance: 0.085,
};

/// CSI input-stage (V-I converter) IGBT.
pub const CSI_CONVERTER_IGBT: DeviceCharacterization = DeviceCharacterization {
    zero_current_voltage_drop: 0.85,
    on_resistance: 2.1e-3,
    turn_on_energy: Some(32.4e-3),
    turn_off_energy: Some(41.7e-3),
    reverse_recovery_energy: None,
    reference_voltage: 400.0,
    reference_current: 400.0,
    thermal_resistance: 0.064,
};

/// CSI input-stage (V-I converter) freewheeling diode.
pub const CSI_CONVERTER_DIODE: DeviceCharacterization = DeviceCharacterization {
    zero_current_voltage_drop: 1.05,
    on_resistance: 1.4e-3,
    turn_on_energy: None,
    turn_off_energy: None,
    reverse_recovery_energy: Some(7.8e-3),
    reference_voltage: 400.0,
    reference_current: 400.0,
    thermal_resistance: 0.11,
};

/// The five device characterizations the engine computes with, one per
/// physical device role.
///
/// [`DeviceLibrary::default`] carries the built-in characterization set;
/// a different device family can be loaded from JSON without touching
/// any formula code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceLibrary {
    pub vsi_bridge_igbt: DeviceCharacterization,
    pub vsi_bridge_diode: DeviceCharacterization,
    pub csi_bridge_igbt: DeviceCharacterization,
    pub csi_converter_igbt: DeviceCharacterization,
    pub csi_converter_diode: DeviceCharacterization,
}

impl Default for DeviceLibrary {
    fn default() -> Self {
        Self {
            vsi_bridge_igbt: VSI_BRIDGE_IGBT,
            vsi_bridge_diode: VSI_BRIDGE_DIODE,
            csi_bridge_igbt: CSI_BRIDGE_RB_IGBT,
            csi_converter_igbt: CSI_CONVERTER_IGBT,
            csi_converter_diode: CSI_CONVERTER_DIODE,
        }
    }
}

impl DeviceLibrary {
    /// Parse a device library from a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let library: DeviceLibrary = serde_json::from_str(json)?;
        library.validate()?;
        Ok(library)
    }

    /// Load a device library from a JSON file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LossError::FileReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every table for finite, correctly signed parameters.
    pub fn validate(&self) -> Result<()> {
        self.vsi_bridge_igbt.validate("vsi_bridge_igbt")?;
        self.vsi_bridge_diode.validate("vsi_bridge_diode")?;
        self.csi_bridge_igbt.validate("csi_bridge_igbt")?;
        self.csi_converter_igbt.validate("csi_converter_igbt")?;
        self.csi_converter_diode.validate("csi_converter_diode")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_default_library_is_valid() {
        DeviceLibrary::default().validate().unwrap();
    }

    #[test]
    fn test_conduction_power() {
        // 220 A through the VSI IGBT: 220 * (0.782 + 2.624e-3 * 220)
        let p = VSI_BRIDGE_IGBT.conduction_power(220.0);
        assert_relative_eq!(p, 299.0416, epsilon = 1e-9);
    }

    #[test]
    fn test_switching_energy_treats_missing_terms_as_zero() {
        assert_relative_eq!(VSI_BRIDGE_IGBT.switching_energy(), 137.6e-3, epsilon = 1e-12);
        assert_relative_eq!(VSI_BRIDGE_DIODE.switching_energy(), 9.5e-3, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_scale() {
        // 450 V, 220 A against a 400 V / 400 A reference
        let s = VSI_BRIDGE_IGBT.reference_scale(450.0, 220.0);
        assert_relative_eq!(s, 0.61875, epsilon = 1e-12);
    }

    #[test]
    fn test_json_round_trip() {
        let json = serde_json::to_string(&DeviceLibrary::default()).unwrap();
        let parsed = DeviceLibrary::from_json_str(&json).unwrap();
        assert_eq!(parsed, DeviceLibrary::default());
    }

    #[test]
    fn test_json_missing_energies_default_to_none() {
        let json = r#"{
            "vsi_bridge_igbt": {
                "zero_current_voltage_drop": 0.782,
                "on_resistance": 2.624e-3,
                "turn_on_energy": 49.1e-3,
                "turn_off_energy": 88.5e-3,
                "reference_voltage": 400.0,
                "reference_current": 400.0,
                "thermal_resistance": 0.064
            },
            "vsi_bridge_diode": {
                "zero_current_voltage_drop": 1.098,
                "on_resistance": 1.215e-3,
                "reverse_recovery_energy": 9.5e-3,
                "reference_voltage": 400.0,
                "reference_current": 400.0,
                "thermal_resistance": 0.11
            },
            "csi_bridge_igbt": {
                "zero_current_voltage_drop": 1.35,
                "on_resistance": 3.2e-3,
                "turn_on_energy": 58.3e-3,
                "turn_off_energy": 74.2e-3,
                "reverse_recovery_energy": 21.6e-3,
                "reference_voltage": 600.0,
                "reference_current": 400.0,
                "thermal_resistance": 0.085
            },
            "csi_converter_igbt": {
                "zero_current_voltage_drop": 0.85,
                "on_resistance": 2.1e-3,
                "turn_on_energy": 32.4e-3,
                "turn_off_energy": 41.7e-3,
                "reference_voltage": 400.0,
                "reference_current": 400.0,
                "thermal_resistance": 0.064
            },
            "csi_converter_diode": {
                "zero_current_voltage_drop": 1.05,
                "on_resistance": 1.4e-3,
                "reverse_recovery_energy": 7.8e-3,
                "reference_voltage": 400.0,
                "reference_current": 400.0,
                "thermal_resistance": 0.11
            }
        }"#;
        let parsed = DeviceLibrary::from_json_str(json).unwrap();
        assert_eq!(parsed.vsi_bridge_igbt.reverse_recovery_energy, None);
        assert_eq!(parsed.vsi_bridge_diode.turn_on_energy, None);
    }

    #[test]
    fn test_rejects_non_positive_reference() {
        let mut library = DeviceLibrary::default();
        library.vsi_bridge_igbt.reference_voltage = 0.0;
        assert!(matches!(
            library.validate(),
            Err(crate::error::LossError::InvalidDeviceTable { device, .. })
                if device == "vsi_bridge_igbt"
        ));
    }

    #[test]
    fn test_rejects_negative_resistance() {
        let mut library = DeviceLibrary::default();
        library.csi_converter_diode.on_resistance = -1.0e-3;
        assert!(library.validate().is_err());
    }
}
