//! The component capability contract.
//!
//! Every logic or arithmetic element implements [`Component`]. A component
//! owns no wires: it holds a [`PortTable`] binding each declared port lane to
//! a [`WireId`], reads and writes those wires through [`Signals`] during
//! evaluation, and may keep [`InternalSignal`]s for nets it does not expose.

use std::fmt;

use gatesim_ir::{PortDirection, PortSpec, WireId};

use crate::error::SimError;
use crate::nets::Signals;

/// Declared ports of one component and the wire bound to each lane.
#[derive(Debug, Clone)]
pub struct PortTable {
    owner: String,
    specs: Vec<PortSpec>,
    bindings: Vec<Vec<Option<WireId>>>,
}

impl PortTable {
    /// Creates an unbound table for the component `owner`.
    pub fn new(owner: impl Into<String>, specs: Vec<PortSpec>) -> Self {
        let bindings = specs.iter().map(|s| vec![None; s.width]).collect();
        Self {
            owner: owner.into(),
            specs,
            bindings,
        }
    }

    /// Name of the owning component.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Port declarations in declaration order.
    pub fn specs(&self) -> &[PortSpec] {
        &self.specs
    }

    /// Position of `port` in declaration order.
    pub fn position(&self, port: &str) -> Result<usize, SimError> {
        self.specs
            .iter()
            .position(|s| s.name == port)
            .ok_or_else(|| SimError::UnknownPort {
                component: self.owner.clone(),
                port: port.to_string(),
            })
    }

    /// Declaration of `port`.
    pub fn spec(&self, port: &str) -> Result<&PortSpec, SimError> {
        Ok(&self.specs[self.position(port)?])
    }

    fn check_index(&self, pos: usize, index: usize) -> Result<(), SimError> {
        let spec = &self.specs[pos];
        if index >= spec.width {
            return Err(SimError::PortIndexOutOfRange {
                component: self.owner.clone(),
                port: spec.name.clone(),
                index,
                width: spec.width,
            });
        }
        Ok(())
    }

    /// Binds lane `index` of `port` to `wire`.
    pub fn connect(&mut self, port: &str, index: usize, wire: WireId) -> Result<(), SimError> {
        let pos = self.position(port)?;
        self.check_index(pos, index)?;
        let slot = &mut self.bindings[pos][index];
        if slot.is_some() {
            return Err(SimError::PortAlreadyConnected {
                component: self.owner.clone(),
                port: port.to_string(),
                index,
            });
        }
        *slot = Some(wire);
        Ok(())
    }

    /// Wire bound to lane `index` of the port at declaration position `pos`.
    pub fn at(&self, pos: usize, index: usize) -> Result<WireId, SimError> {
        self.check_index(pos, index)?;
        self.bindings[pos][index].ok_or_else(|| SimError::UnconnectedPort {
            component: self.owner.clone(),
            port: self.specs[pos].name.clone(),
            index,
        })
    }

    /// Wire bound to lane `index` of `port`.
    pub fn wire(&self, port: &str, index: usize) -> Result<WireId, SimError> {
        self.at(self.position(port)?, index)
    }

    /// Whether lane `index` of `port` is bound.
    pub fn is_bound(&self, port: &str, index: usize) -> bool {
        self.position(port)
            .ok()
            .and_then(|pos| self.bindings[pos].get(index).copied().flatten())
            .is_some()
    }

    /// Bound wires of every port with the given direction, lane by lane.
    pub fn wires_with(&self, direction: PortDirection) -> Vec<WireId> {
        self.specs
            .iter()
            .zip(&self.bindings)
            .filter(|(spec, _)| spec.direction == direction)
            .flat_map(|(_, lanes)| lanes.iter().flatten().copied())
            .collect()
    }

    /// Fails on the first unbound lane.
    pub fn check_connected(&self) -> Result<(), SimError> {
        for pos in 0..self.specs.len() {
            for index in 0..self.specs[pos].width {
                self.at(pos, index)?;
            }
        }
        Ok(())
    }

    /// Unbound lanes of every port with the given direction, as
    /// `(port, lane)` pairs in declaration order.
    pub fn unbound(&self, direction: PortDirection) -> Vec<(String, usize)> {
        self.specs
            .iter()
            .zip(&self.bindings)
            .filter(|(spec, _)| spec.direction == direction)
            .flat_map(|(spec, lanes)| {
                lanes
                    .iter()
                    .enumerate()
                    .filter(|(_, lane)| lane.is_none())
                    .map(move |(index, _)| (spec.name.clone(), index))
            })
            .collect()
    }

    /// Like [`check_connected`](Self::check_connected), but ignores ports
    /// with the given direction.
    pub fn check_connected_except(&self, skip: PortDirection) -> Result<(), SimError> {
        for (pos, spec) in self.specs.iter().enumerate() {
            if spec.direction == skip {
                continue;
            }
            for index in 0..spec.width {
                self.at(pos, index)?;
            }
        }
        Ok(())
    }
}

/// A net inside a component that is not modeled as a [`Wire`](gatesim_ir::Wire).
///
/// Follows the wire accounting rule: only forced writes commit, and a
/// committed change adds one toggle per internal fan-out edge.
#[derive(Debug, Clone)]
pub struct InternalSignal {
    value: bool,
    fanout: u64,
    toggles: u64,
}

impl InternalSignal {
    /// An internal net read by `fanout` gate inputs.
    pub fn new(fanout: u64) -> Self {
        Self {
            value: false,
            fanout,
            toggles: 0,
        }
    }

    /// Records `value`; live writes are ignored.
    pub fn commit(&mut self, value: bool, propagating: bool) {
        if propagating {
            return;
        }
        if self.value != value {
            self.toggles += self.fanout;
        }
        self.value = value;
    }

    /// Value at the last forced write.
    pub fn value(&self) -> bool {
        self.value
    }

    /// Accumulated toggles.
    pub fn toggles(&self) -> u64 {
        self.toggles
    }
}

/// Capability contract of a simulated element.
///
/// Dirty-flag gating of live passes is performed by the owning
/// [`System`](crate::System); [`evaluate`](Component::evaluate) is only called
/// when the component must recompute.
pub trait Component: fmt::Debug {
    /// Short kind name, as used by the netlist format (e.g. `"and2"`).
    fn kind(&self) -> &str;

    /// Port declarations and bindings.
    fn ports(&self) -> &PortTable;

    /// Recomputes every output as a pure function of the current inputs,
    /// writing through `signals` in its pass mode.
    fn evaluate(&mut self, signals: &mut Signals<'_>) -> Result<(), SimError>;

    /// Binds lane `index` of `port` to `wire`. Composites override this to
    /// forward the binding to their parts.
    fn connect(&mut self, port: &str, index: usize, wire: WireId) -> Result<(), SimError>;

    /// Instance name.
    fn name(&self) -> &str {
        self.ports().owner()
    }

    /// Depth in two-input-gate-equivalent levels.
    fn longest_path(&self) -> usize {
        1
    }

    /// Toggles of nets not modeled as wires.
    fn internal_toggles(&self) -> u64 {
        0
    }

    /// Wire bound to lane `index` of `port`.
    fn wire(&self, port: &str, index: usize) -> Result<WireId, SimError> {
        self.ports().wire(port, index)
    }

    /// Direction of `port`.
    fn direction(&self, port: &str) -> Result<PortDirection, SimError> {
        Ok(self.ports().spec(port)?.direction)
    }

    /// Every wire this component reads, one entry per reading lane.
    fn input_wires(&self) -> Vec<WireId> {
        let mut wires = self.ports().wires_with(PortDirection::Input);
        wires.extend(self.internal_wires());
        wires
    }

    /// Nets both driven and read inside this component.
    fn internal_wires(&self) -> Vec<WireId> {
        self.ports().wires_with(PortDirection::Internal)
    }

    /// Every wire this component drives.
    fn output_wires(&self) -> Vec<WireId> {
        let mut wires = self.ports().wires_with(PortDirection::Output);
        wires.extend(self.internal_wires());
        wires
    }

    /// Every wire referenced by this component, without duplicates.
    fn wires(&self) -> Vec<WireId> {
        let mut wires = self.input_wires();
        wires.extend(self.output_wires());
        wires.sort_unstable();
        wires.dedup();
        wires
    }
}
