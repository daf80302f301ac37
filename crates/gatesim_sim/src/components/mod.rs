//! Reference component library.
//!
//! Gates, a multiplexer and adders implementing the [`Component`] contract,
//! plus [`ComponentKind`] for building them from netlist keywords.

pub mod arith;
pub mod gates;
pub mod mux;

pub use arith::{FullAdder, HalfAdder, RippleAdder, FULL_ADDER_DEPTH};
pub use gates::{Gate, GateOp};
pub use mux::Mux2;

use crate::component::Component;
use crate::error::SimError;

/// A buildable component kind, with its width parameter where it has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// One of the [`GateOp`] gates.
    Gate(GateOp),
    /// `mux2`
    Mux2,
    /// `half_adder`
    HalfAdder,
    /// `full_adder`
    FullAdder,
    /// `ripple_adder(N)`
    RippleAdder(usize),
}

impl ComponentKind {
    /// Resolves a netlist keyword and its optional `(N)` parameter.
    ///
    /// Returns `None` for unknown keywords, for a parameter on a kind that
    /// takes none, and for a missing parameter on a kind that needs one.
    pub fn parse(keyword: &str, param: Option<usize>) -> Option<Self> {
        let kind = match keyword {
            "mux2" => ComponentKind::Mux2,
            "half_adder" => ComponentKind::HalfAdder,
            "full_adder" => ComponentKind::FullAdder,
            "ripple_adder" => return param.map(ComponentKind::RippleAdder),
            other => ComponentKind::Gate(other.parse().ok()?),
        };
        param.is_none().then_some(kind)
    }

    /// Creates an unconnected instance named `name`.
    pub fn instantiate(self, name: &str) -> Result<Box<dyn Component>, SimError> {
        Ok(match self {
            ComponentKind::Gate(op) => Box::new(Gate::new(name, op)),
            ComponentKind::Mux2 => Box::new(Mux2::new(name)),
            ComponentKind::HalfAdder => Box::new(HalfAdder::new(name)),
            ComponentKind::FullAdder => Box::new(FullAdder::new(name)),
            ComponentKind::RippleAdder(width) => Box::new(RippleAdder::new(name, width)?),
        })
    }
}
