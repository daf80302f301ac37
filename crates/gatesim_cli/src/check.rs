//! `gatesim check`: load a netlist, run level discovery, print its shape.

use gatesim_sim::System;

use crate::pipeline::{load_and_sequence, resolve_project};
use crate::{CheckArgs, GlobalArgs};

/// Runs the `gatesim check` command.
///
/// Structural problems (undriven wires, multiple drivers, loops) surface as
/// errors; a clean netlist prints its summary and exits 0.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = resolve_project(args.netlist.as_deref(), global)?;
    if !global.quiet {
        eprintln!("    Checking {}", project.netlist.display());
    }
    let system = load_and_sequence(&project.netlist)?;
    print!("{}", summarize(&system));
    Ok(0)
}

fn summarize(system: &System) -> String {
    let bundle_inputs: usize = system
        .input_bundles()
        .iter()
        .filter_map(|&b| system.bundle(b))
        .map(|b| b.width())
        .sum();
    let mut out = format!(
        "{}: {} components, {} wires\n",
        system.name(),
        system.component_count(),
        system.wires().count()
    );
    out.push_str(&format!(
        "  inputs: {} wires ({} in bundles), outputs: {} wires\n",
        system.inputs().len(),
        bundle_inputs,
        system.outputs().len()
    ));
    if let (Some(levels), Some(gates)) = (system.longest_path(), system.critical_path_gates()) {
        out.push_str(&format!("  longest path: {levels} levels ({gates} gate levels)\n"));
    }
    out
}
