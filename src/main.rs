//! Tractionloss - Inverter Power-Loss Estimator
//!
//! Evaluates switching, conduction, and DC-DC-stage losses for a VSI or
//! CSI traction inverter at one operating point.
//!
//! # Usage
//!
//! ```bash
//! tractionloss vsi --vdc 450 --vb 200 --ipeak 220 --fsw 10e3 -m 0.9 --pf 0.85
//! tractionloss csi --vdc 450 --vb 200 --ipeak 220 --fsw 10e3 -m 0.9 --pf 0.85 \
//!     --idc 300 --vline 380
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tractionloss::{evaluate, DeviceLibrary, Evaluation, Inverter, OperatingPoint, Result};

/// Traction inverter power-loss estimator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    topology: Topology,

    /// DC bus voltage Vdc (V)
    #[arg(long, global = true, default_value_t = 450.0)]
    vdc: f64,

    /// Battery / link voltage VB (V)
    #[arg(long, global = true, default_value_t = 200.0)]
    vb: f64,

    /// Peak phase current (A)
    #[arg(long, global = true, default_value_t = 220.0)]
    ipeak: f64,

    /// Modulation index, 0 to 1
    #[arg(short, long, global = true, default_value_t = 0.9)]
    modulation: f64,

    /// Power factor cos(theta), 0 to 1
    #[arg(long, global = true, default_value_t = 0.85)]
    pf: f64,

    /// Switching frequency (Hz)
    #[arg(long, global = true, default_value_t = 10e3)]
    fsw: f64,

    /// Path to a device-library JSON file (defaults to the built-in tables)
    #[arg(long, global = true)]
    devices: Option<PathBuf>,

    /// Emit the result as JSON instead of a text report
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Topology {
    /// Voltage-source inverter
    Vsi,
    /// Current-source inverter
    Csi {
        /// Regulated DC-link current Idc (A)
        #[arg(long)]
        idc: f64,

        /// Peak line-to-line voltage at the bridge (V)
        #[arg(long)]
        vline: f64,
    },
}

fn print_report(inverter: &Inverter, result: &Evaluation) {
    let b = &result.breakdown;
    let m = &result.metrics;
    println!("{} loss breakdown", inverter);
    println!("  switching    {:10.1} W  ({:5.1} %)", b.switching, b.switching_share);
    println!("  conduction   {:10.1} W  ({:5.1} %)", b.conduction, b.conduction_share);
    println!("  converter    {:10.1} W  ({:5.1} %)", b.converter, b.converter_share);
    println!("  total        {:10.1} W", b.total);
    println!("  stage        {}", b.stage_label);
    println!("  input power  {:10.1} W", m.input_power);
    if m.efficiency_clamped {
        println!("  efficiency   {:10.1} %  (clamped)", m.efficiency);
    } else {
        println!("  efficiency   {:10.1} %", m.efficiency);
    }
    println!(
        "  junction     bridge {:.1} C, converter {:.1} C",
        m.thermal.bridge_junction, m.thermal.converter_junction
    );
}

fn main() -> Result<()> {
    let args = Args::parse();

    let devices = match &args.devices {
        Some(path) => DeviceLibrary::from_path(path)?,
        None => DeviceLibrary::default(),
    };

    let inverter = match args.topology {
        Topology::Vsi => Inverter::Vsi,
        Topology::Csi { idc, vline } => Inverter::Csi {
            dc_link_current: idc,
            line_peak_voltage: vline,
        },
    };

    let op = OperatingPoint {
        dc_bus_voltage: args.vdc,
        battery_voltage: args.vb,
        peak_phase_current: args.ipeak,
        modulation_index: args.modulation,
        power_factor: args.pf,
        switching_frequency: args.fsw,
    };

    let result = evaluate(&inverter, &op, &devices)?;

    if args.json {
        // Serialization of the plain output structs cannot fail.
        println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
    } else {
        print_report(&inverter, &result);
    }

    Ok(())
}
