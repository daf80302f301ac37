//! Port declarations for component interfaces.
//!
//! A [`PortSpec`] names one port of a component kind, its direction and how
//! many single-bit lanes it has. Multi-lane ports bind one wire per lane.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of data flow through a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// The component reads the bound wires.
    Input,
    /// The component drives the bound wires.
    Output,
    /// The component both drives and reads the bound wires (composite-internal nets).
    Internal,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
            PortDirection::Internal => "internal",
        })
    }
}

/// Declaration of one port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// Port name as used in netlists, e.g. `"CIN"`.
    pub name: String,
    /// Data flow direction.
    pub direction: PortDirection,
    /// Number of lanes; 1 for scalar ports.
    pub width: usize,
}

impl PortSpec {
    /// A scalar input port.
    pub fn input(name: &str) -> Self {
        Self::new(name, PortDirection::Input, 1)
    }

    /// A scalar output port.
    pub fn output(name: &str) -> Self {
        Self::new(name, PortDirection::Output, 1)
    }

    /// A port with an explicit direction and lane count.
    pub fn new(name: &str, direction: PortDirection, width: usize) -> Self {
        Self {
            name: name.to_string(),
            direction,
            width,
        }
    }
}
