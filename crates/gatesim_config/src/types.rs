//! Configuration types deserialized from `gatesim.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The top-level project configuration parsed from `gatesim.toml`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// Project name and netlist location.
    pub project: ProjectMeta,
    /// Random stimulus settings.
    #[serde(default)]
    pub stimulus: StimulusConfig,
    /// Report output settings.
    #[serde(default)]
    pub report: ReportConfig,
}

impl ProjectConfig {
    /// Netlist path resolved against the project root.
    pub fn netlist_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.project.netlist)
    }
}

/// Core project metadata required in every `gatesim.toml`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// Netlist file, relative to the project root.
    pub netlist: String,
    /// A brief description of the project.
    #[serde(default)]
    pub description: String,
}

/// How many random vectors to apply and how to seed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StimulusConfig {
    /// Number of input vectors per run.
    pub vectors: usize,
    /// Seed for the vector generator.
    pub seed: u64,
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            vectors: 100,
            seed: 0,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format.
    pub format: ReportFormat,
    /// Include one row per wire.
    pub per_wire: bool,
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable table (default).
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}
