//! Read-only switching-activity report over a [`System`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::system::System;

/// Per-wire activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRow {
    /// Wire name.
    pub name: String,
    /// Current value.
    pub value: bool,
    /// Number of reading port lanes.
    pub fanout: usize,
    /// Fan-out weighted toggles.
    pub toggles: u64,
}

/// Internal activity of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRow {
    /// Instance name.
    pub name: String,
    /// Kind keyword.
    pub kind: String,
    /// Toggles of nets not modeled as wires.
    pub internal_toggles: u64,
}

/// Snapshot of a system's structure and accumulated toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleReport {
    /// Design name.
    pub system: String,
    /// Registered components.
    pub components: usize,
    /// Wires, including internal ones created for composites.
    pub wires: usize,
    /// Frontier level count, if discovered.
    pub longest_path: Option<usize>,
    /// Deepest chain in gate-equivalent levels, if discovered.
    pub critical_path_gates: Option<usize>,
    /// Wire plus internal toggles.
    pub total_toggles: u64,
    /// One row per wire, in creation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wire_rows: Vec<WireRow>,
    /// Components with non-zero internal activity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component_rows: Vec<ComponentRow>,
}

impl ToggleReport {
    /// Collects the report. Per-wire rows are included when `per_wire` is set.
    pub fn collect(system: &System, per_wire: bool) -> Self {
        let wire_rows = if per_wire {
            system
                .wires()
                .map(|(_, w)| WireRow {
                    name: w.name.clone(),
                    value: w.value(),
                    fanout: w.fanout().len(),
                    toggles: w.toggle_count(),
                })
                .collect()
        } else {
            Vec::new()
        };
        let component_rows = system
            .components()
            .filter(|(_, c)| c.internal_toggles() > 0)
            .map(|(_, c)| ComponentRow {
                name: c.name().to_string(),
                kind: c.kind().to_string(),
                internal_toggles: c.internal_toggles(),
            })
            .collect();
        Self {
            system: system.name().to_string(),
            components: system.component_count(),
            wires: system.wires().count(),
            longest_path: system.longest_path(),
            critical_path_gates: system.critical_path_gates(),
            total_toggles: system.num_toggles(),
            wire_rows,
            component_rows,
        }
    }
}

fn or_dash(v: Option<usize>) -> String {
    v.map_or_else(|| "-".to_string(), |n| n.to_string())
}

impl fmt::Display for ToggleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} components, {} wires",
            self.system, self.components, self.wires
        )?;
        writeln!(
            f,
            "  longest path: {} levels ({} gate levels)",
            or_dash(self.longest_path),
            or_dash(self.critical_path_gates)
        )?;
        writeln!(f, "  toggles: {}", self.total_toggles)?;

        if !self.wire_rows.is_empty() {
            let width = self.wire_rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);
            writeln!(f)?;
            writeln!(f, "  {:<width$}  value  fanout  toggles", "wire")?;
            for row in &self.wire_rows {
                writeln!(
                    f,
                    "  {:<width$}  {:>5}  {:>6}  {:>7}",
                    row.name,
                    u8::from(row.value),
                    row.fanout,
                    row.toggles
                )?;
            }
        }

        if !self.component_rows.is_empty() {
            let width = self
                .component_rows
                .iter()
                .map(|r| r.name.len())
                .max()
                .unwrap_or(0)
                .max(9);
            writeln!(f)?;
            writeln!(f, "  {:<width$}  {:<12}  internal", "component", "kind")?;
            for row in &self.component_rows {
                writeln!(
                    f,
                    "  {:<width$}  {:<12}  {:>8}",
                    row.name, row.kind, row.internal_toggles
                )?;
            }
        }
        Ok(())
    }
}
