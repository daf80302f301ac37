//! Single-level boolean gates.

use std::str::FromStr;

use gatesim_ir::{PortSpec, WireId};

use crate::component::{Component, PortTable};
use crate::error::SimError;
use crate::nets::Signals;

/// Boolean function of a [`Gate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateOp {
    /// `O = A`
    Buf,
    /// `O = !A`
    Not,
    /// `O = A & B`
    And,
    /// `O = A | B`
    Or,
    /// `O = A ^ B`
    Xor,
    /// `O = !(A & B)`
    Nand,
    /// `O = !(A | B)`
    Nor,
    /// `O = !(A ^ B)`
    Xnor,
}

impl GateOp {
    /// Netlist keyword of this gate kind.
    pub fn keyword(self) -> &'static str {
        match self {
            GateOp::Buf => "buf",
            GateOp::Not => "not",
            GateOp::And => "and2",
            GateOp::Or => "or2",
            GateOp::Xor => "xor2",
            GateOp::Nand => "nand2",
            GateOp::Nor => "nor2",
            GateOp::Xnor => "xnor2",
        }
    }

    /// Whether the gate reads only `A`.
    pub fn is_unary(self) -> bool {
        matches!(self, GateOp::Buf | GateOp::Not)
    }

    /// Applies the function. `b` is ignored by unary gates.
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            GateOp::Buf => a,
            GateOp::Not => !a,
            GateOp::And => a & b,
            GateOp::Or => a | b,
            GateOp::Xor => a ^ b,
            GateOp::Nand => !(a & b),
            GateOp::Nor => !(a | b),
            GateOp::Xnor => !(a ^ b),
        }
    }
}

impl FromStr for GateOp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "buf" => GateOp::Buf,
            "not" => GateOp::Not,
            "and2" => GateOp::And,
            "or2" => GateOp::Or,
            "xor2" => GateOp::Xor,
            "nand2" => GateOp::Nand,
            "nor2" => GateOp::Nor,
            "xnor2" => GateOp::Xnor,
            _ => return Err(()),
        })
    }
}

const A: usize = 0;
const B: usize = 1;

/// A one- or two-input gate with output `O`.
#[derive(Debug, Clone)]
pub struct Gate {
    op: GateOp,
    ports: PortTable,
}

impl Gate {
    /// Creates an unconnected gate named `name`.
    pub fn new(name: impl Into<String>, op: GateOp) -> Self {
        let specs = if op.is_unary() {
            vec![PortSpec::input("A"), PortSpec::output("O")]
        } else {
            vec![
                PortSpec::input("A"),
                PortSpec::input("B"),
                PortSpec::output("O"),
            ]
        };
        Self {
            op,
            ports: PortTable::new(name, specs),
        }
    }

    /// Creates a two-input gate already bound to `a`, `b` and `o`.
    pub fn wired(
        name: impl Into<String>,
        op: GateOp,
        a: WireId,
        b: WireId,
        o: WireId,
    ) -> Result<Self, SimError> {
        let mut gate = Self::new(name, op);
        gate.connect("A", 0, a)?;
        gate.connect("B", 0, b)?;
        gate.connect("O", 0, o)?;
        Ok(gate)
    }

    /// The gate function.
    pub fn op(&self) -> GateOp {
        self.op
    }
}

impl Component for Gate {
    fn kind(&self) -> &str {
        self.op.keyword()
    }

    fn ports(&self) -> &PortTable {
        &self.ports
    }

    fn connect(&mut self, port: &str, index: usize, wire: WireId) -> Result<(), SimError> {
        self.ports.connect(port, index, wire)
    }

    fn evaluate(&mut self, signals: &mut Signals<'_>) -> Result<(), SimError> {
        let a = signals.get(self.ports.at(A, 0)?);
        let (b, out) = if self.op.is_unary() {
            (false, self.ports.at(1, 0)?)
        } else {
            (signals.get(self.ports.at(B, 0)?), self.ports.at(2, 0)?)
        };
        signals.set(out, self.op.apply(a, b));
        Ok(())
    }
}
