//! Parsed form of a netlist file.

use gatesim_ir::Representation;
use serde::{Deserialize, Serialize};

/// Whole netlist in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Netlist {
    /// `input`, `output` and `wire` declarations.
    pub nets: Vec<NetDecl>,
    /// Component instances.
    pub instances: Vec<Instance>,
}

/// How a declared net is exposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetRole {
    /// Global input, driven by stimulus.
    Input,
    /// Global output.
    Output,
    /// Internal net.
    Wire,
}

/// `input|output|wire NAME[ [W] [REPR] ]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetDecl {
    /// Declaration keyword.
    pub role: NetRole,
    /// Net name.
    pub name: String,
    /// Bundle width, or `None` for a single wire.
    pub width: Option<usize>,
    /// Bundle representation; defaults to two's complement.
    pub repr: Representation,
    /// Source line.
    pub line: usize,
}

/// `KIND[(N)] NAME PORT=NET ...`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Component keyword.
    pub kind: String,
    /// Width parameter.
    pub param: Option<usize>,
    /// Instance name.
    pub name: String,
    /// Port bindings in source order.
    pub bindings: Vec<Binding>,
    /// Source line.
    pub line: usize,
}

/// `PORT=NET`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Port name.
    pub port: String,
    /// Net bound to it.
    pub net: NetRef,
}

/// `NAME` or `NAME[I]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetRef {
    /// Wire or bundle name.
    pub name: String,
    /// Bundle lane, when one is selected.
    pub index: Option<usize>,
}

impl std::fmt::Display for NetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{i}]", self.name),
            None => f.write_str(&self.name),
        }
    }
}
