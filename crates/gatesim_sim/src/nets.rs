//! Wire storage, dirty flags, and the per-pass write context.
//!
//! [`Nets`] owns every [`Wire`] of a system together with one dirty flag per
//! component. Keeping the dirty flags here rather than inside the components
//! lets a wire write mark its fan-out while some other component is being
//! evaluated. [`Signals`] is the view a component gets during one
//! evaluation: reads of current values and writes in the pass's mode.

use gatesim_ir::{Arena, ArenaId, ComponentId, Wire, WireId};

/// All wires of a system plus the component dirty table.
#[derive(Debug, Default)]
pub struct Nets {
    wires: Arena<WireId, Wire>,
    dirty: Vec<bool>,
}

impl Nets {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a wire and returns its handle.
    pub fn alloc(&mut self, wire: Wire) -> WireId {
        self.wires.alloc(wire)
    }

    /// Grows the dirty table to cover `component`. New components start clean.
    pub fn track(&mut self, component: ComponentId) {
        if self.dirty.len() <= component.index() {
            self.dirty.resize(component.index() + 1, false);
        }
    }

    /// Read access to the wire arena.
    pub fn wires(&self) -> &Arena<WireId, Wire> {
        &self.wires
    }

    /// Returns the wire behind `id`, if issued.
    pub fn get(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id)
    }

    /// Mutable access for construction-time edge updates.
    pub fn get_mut(&mut self, id: WireId) -> Option<&mut Wire> {
        self.wires.get_mut(id)
    }

    /// Current value of `wire`.
    pub fn value(&self, wire: WireId) -> bool {
        self.wires[wire].value()
    }

    /// Writes `value` to `wire` in the given mode, marking the wire's
    /// readers dirty if the write counts as a change.
    pub fn set_value(&mut self, wire: WireId, value: bool, propagating: bool) {
        let w = &mut self.wires[wire];
        if w.apply(value, propagating) {
            for reader in w.external_fanout() {
                if let Some(flag) = self.dirty.get_mut(reader.index()) {
                    *flag = true;
                }
            }
        }
    }

    /// Whether `component` has seen an input change since its last live update.
    pub fn is_dirty(&self, component: ComponentId) -> bool {
        self.dirty.get(component.index()).copied().unwrap_or(false)
    }

    /// Clears the dirty flag of `component`.
    pub fn clear_dirty(&mut self, component: ComponentId) {
        if let Some(flag) = self.dirty.get_mut(component.index()) {
            *flag = false;
        }
    }

    /// Sum of every wire's toggle counter.
    pub fn wire_toggles(&self) -> u64 {
        self.wires.values().map(Wire::toggle_count).sum()
    }
}

/// Read/write view handed to a component during one evaluation.
pub struct Signals<'a> {
    nets: &'a mut Nets,
    propagating: bool,
}

impl<'a> Signals<'a> {
    /// Wraps `nets` for a pass in the given mode.
    pub fn new(nets: &'a mut Nets, propagating: bool) -> Self {
        Self { nets, propagating }
    }

    /// `true` in a live pass, `false` in a forced pass.
    pub fn propagating(&self) -> bool {
        self.propagating
    }

    /// Current value of `wire`.
    pub fn get(&self, wire: WireId) -> bool {
        self.nets.value(wire)
    }

    /// Drives `wire` with `value` in this pass's mode.
    pub fn set(&mut self, wire: WireId, value: bool) {
        self.nets.set_value(wire, value, self.propagating);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_readers() -> (Nets, WireId) {
        let mut nets = Nets::new();
        let mut w = Wire::new("n");
        w.add_fanout(ComponentId::from_raw(0));
        w.add_fanout(ComponentId::from_raw(1));
        let id = nets.alloc(w);
        nets.track(ComponentId::from_raw(1));
        (nets, id)
    }

    #[test]
    fn change_marks_readers_dirty() {
        let (mut nets, w) = two_readers();
        nets.set_value(w, true, true);
        assert!(nets.is_dirty(ComponentId::from_raw(0)));
        assert!(nets.is_dirty(ComponentId::from_raw(1)));
        assert_eq!(nets.wire_toggles(), 0);
    }

    #[test]
    fn unchanged_write_leaves_readers_clean() {
        let (mut nets, w) = two_readers();
        nets.set_value(w, false, false);
        assert!(!nets.is_dirty(ComponentId::from_raw(0)));
    }

    #[test]
    fn forced_change_toggles_per_edge() {
        let (mut nets, w) = two_readers();
        nets.set_value(w, true, false);
        assert_eq!(nets.wire_toggles(), 2);
        nets.clear_dirty(ComponentId::from_raw(0));
        assert!(!nets.is_dirty(ComponentId::from_raw(0)));
        assert!(nets.is_dirty(ComponentId::from_raw(1)));
    }

    #[test]
    fn signals_write_in_pass_mode() {
        let (mut nets, w) = two_readers();
        {
            let mut live = Signals::new(&mut nets, true);
            live.set(w, true);
            assert!(live.get(w));
            assert!(live.propagating());
        }
        assert!(!nets.get(w).unwrap().prev_value());
    }

    #[test]
    fn untracked_component_is_clean() {
        let nets = Nets::new();
        assert!(!nets.is_dirty(ComponentId::from_raw(7)));
    }
}
