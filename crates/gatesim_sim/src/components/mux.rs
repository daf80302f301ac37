//! Two-way multiplexer.

use gatesim_ir::{PortSpec, WireId};

use crate::component::{Component, PortTable};
use crate::error::SimError;
use crate::nets::Signals;

const A: usize = 0;
const B: usize = 1;
const S: usize = 2;
const O: usize = 3;

/// 1-bit multiplexer: `O = if S { B } else { A }`.
#[derive(Debug, Clone)]
pub struct Mux2 {
    ports: PortTable,
}

impl Mux2 {
    /// Creates an unconnected multiplexer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            ports: PortTable::new(
                name,
                vec![
                    PortSpec::input("A"),
                    PortSpec::input("B"),
                    PortSpec::input("S"),
                    PortSpec::output("O"),
                ],
            ),
        }
    }
}

impl Component for Mux2 {
    fn kind(&self) -> &str {
        "mux2"
    }

    fn ports(&self) -> &PortTable {
        &self.ports
    }

    fn connect(&mut self, port: &str, index: usize, wire: WireId) -> Result<(), SimError> {
        self.ports.connect(port, index, wire)
    }

    fn longest_path(&self) -> usize {
        2
    }

    fn evaluate(&mut self, signals: &mut Signals<'_>) -> Result<(), SimError> {
        let routed = if signals.get(self.ports.at(S, 0)?) {
            self.ports.at(B, 0)?
        } else {
            self.ports.at(A, 0)?
        };
        let value = signals.get(routed);
        signals.set(self.ports.at(O, 0)?, value);
        Ok(())
    }
}
