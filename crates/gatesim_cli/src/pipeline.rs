//! Shared pipeline helpers for CLI commands.
//!
//! Project root resolution, configuration loading, and the
//! load-then-sequence step used by both `check` and `run`.

use std::path::{Path, PathBuf};

use gatesim_config::{ProjectConfig, CONFIG_FILE};
use gatesim_sim::System;
use tracing::debug;

use crate::GlobalArgs;

/// A netlist to operate on, plus the project configuration if one applies.
pub struct Project {
    /// Netlist file to load.
    pub netlist: PathBuf,
    /// Configuration, when a `gatesim.toml` was found or named.
    pub config: Option<ProjectConfig>,
}

/// Walks up from `start` looking for the nearest directory containing `gatesim.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from the current directory looking for `gatesim.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Picks the netlist and configuration for a command.
///
/// An explicit netlist path is used as given; configuration is then only
/// loaded when `--config` names one. Without a path, the project's
/// `gatesim.toml` is required and its `project.netlist` is used.
pub fn resolve_project(
    netlist: Option<&str>,
    global: &GlobalArgs,
) -> Result<Project, Box<dyn std::error::Error>> {
    match netlist {
        Some(path) => {
            let config = match global.config {
                Some(_) => Some(gatesim_config::load_config(&resolve_project_root(global)?)?),
                None => None,
            };
            Ok(Project {
                netlist: PathBuf::from(path),
                config,
            })
        }
        None => {
            let root = resolve_project_root(global)?;
            let config = gatesim_config::load_config(&root)?;
            debug!(root = %root.display(), project = %config.project.name, "loaded configuration");
            Ok(Project {
                netlist: config.netlist_path(&root),
                config: Some(config),
            })
        }
    }
}

/// Loads the netlist and runs level discovery on it.
pub fn load_and_sequence(path: &Path) -> Result<System, Box<dyn std::error::Error>> {
    let mut system = gatesim_netlist::load_netlist(path)?;
    let levels = system.find_longest_path_in_system()?;
    debug!(system = system.name(), levels, "sequenced");
    Ok(system)
}
