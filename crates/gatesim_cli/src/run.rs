//! `gatesim run`: drive a netlist with random vectors and report activity.
//!
//! Flags override `gatesim.toml`; `gatesim.toml` overrides the built-in
//! defaults (100 vectors, seed 0, text output).

use gatesim_config::{ProjectConfig, StimulusConfig};
use gatesim_sim::{ActivityProfile, StimulusDriver, ToggleReport};
use serde::Serialize;
use tracing::info;

use crate::pipeline::{load_and_sequence, resolve_project, Project};
use crate::{GlobalArgs, ReportFormat, RunArgs};

/// Effective settings after merging flags and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunSettings {
    vectors: usize,
    seed: u64,
    format: ReportFormat,
    per_wire: bool,
}

impl RunSettings {
    fn from_config(config: &ProjectConfig) -> Self {
        Self {
            vectors: config.stimulus.vectors,
            seed: config.stimulus.seed,
            format: config.report.format.into(),
            per_wire: config.report.per_wire,
        }
    }

    fn merge(args: &RunArgs, project: &Project) -> Result<Self, Box<dyn std::error::Error>> {
        let base = project
            .config
            .as_ref()
            .map(Self::from_config)
            .unwrap_or_default();
        let settings = Self {
            vectors: args.vectors.unwrap_or(base.vectors),
            seed: args.seed.unwrap_or(base.seed),
            format: args.format.unwrap_or(base.format),
            per_wire: args.per_wire || base.per_wire,
        };
        if settings.vectors == 0 {
            return Err("--vectors must be positive".into());
        }
        Ok(settings)
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        let stimulus = StimulusConfig::default();
        Self {
            vectors: stimulus.vectors,
            seed: stimulus.seed,
            format: ReportFormat::Text,
            per_wire: false,
        }
    }
}

/// JSON document written by `--format json`.
#[derive(Serialize)]
struct RunOutput<'a> {
    seed: u64,
    vectors: usize,
    mean_toggles: f64,
    report: &'a ToggleReport,
    activity: &'a ActivityProfile,
}

/// Runs the `gatesim run` command.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = resolve_project(args.netlist.as_deref(), global)?;
    let settings = RunSettings::merge(args, &project)?;
    let mut system = load_and_sequence(&project.netlist)?;

    if !global.quiet {
        eprintln!(
            "   Simulating {} ({} vectors, seed {})",
            system.name(),
            settings.vectors,
            settings.seed
        );
    }

    let profile = StimulusDriver::new(settings.seed).run(&mut system, settings.vectors)?;
    info!(
        system = system.name(),
        initial = profile.initial_toggles,
        total = profile.total(),
        "stimulus finished"
    );
    let report = ToggleReport::collect(&system, settings.per_wire);
    print!("{}", render(&report, &profile, &settings)?);
    Ok(0)
}

fn render(
    report: &ToggleReport,
    profile: &ActivityProfile,
    settings: &RunSettings,
) -> Result<String, serde_json::Error> {
    match settings.format {
        ReportFormat::Text => Ok(format!(
            "{report}  vectors: {} (seed {}), {} toggles after init, {:.2} per vector\n",
            profile.samples.len(),
            settings.seed,
            profile.total(),
            profile.mean()
        )),
        ReportFormat::Json => {
            let output = RunOutput {
                seed: settings.seed,
                vectors: profile.samples.len(),
                mean_toggles: profile.mean(),
                report,
                activity: profile,
            };
            let mut json = serde_json::to_string_pretty(&output)?;
            json.push('\n');
            Ok(json)
        }
    }
}
