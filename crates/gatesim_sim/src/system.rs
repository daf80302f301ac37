//! The netlist owner and pass scheduler.
//!
//! A [`System`] goes through three states. While it is being built, wires,
//! bundles and components are registered and every edge is checked as it is
//! added. [`System::find_longest_path_in_system`] validates the finished graph,
//! counts its frontier levels and seals it. After that
//! [`System::find_initial_state`] settles the graph from cold and
//! [`System::update`] applies one input vector at a time.

use std::collections::{HashMap, HashSet};

use gatesim_ir::{
    Arena, ArenaId, BundleId, ComponentId, PortDirection, Representation, Wire, WireBundle,
    WireId, MAX_BUNDLE_WIDTH,
};

use crate::component::Component;
use crate::error::SimError;
use crate::nets::{Nets, Signals};
use crate::schedule::{self, ComponentArena};

/// A gate-level netlist together with its simulation state.
#[derive(Debug)]
pub struct System {
    /// Design name, used in diagnostics and reports.
    name: String,
    /// Every wire plus the component dirty table.
    nets: Nets,
    /// Multi-bit views over wires.
    bundles: Arena<BundleId, WireBundle>,
    /// Components in registration order; passes visit them in this order.
    components: ComponentArena,
    wire_names: HashMap<String, WireId>,
    bundle_names: HashMap<String, BundleId>,
    component_names: HashMap<String, ComponentId>,
    /// Declared global input wires, in declaration order.
    inputs: Vec<WireId>,
    /// Declared global output wires, in declaration order.
    outputs: Vec<WireId>,
    input_bundles: Vec<BundleId>,
    output_bundles: Vec<BundleId>,
    /// Frontier level count; `Some` once the system is sealed.
    longest_path: Option<usize>,
    /// Whether cold initialization has run.
    initialized: bool,
}

impl System {
    /// Creates an empty system.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nets: Nets::new(),
            bundles: Arena::new(),
            components: ComponentArena::new(),
            wire_names: HashMap::new(),
            bundle_names: HashMap::new(),
            component_names: HashMap::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            input_bundles: Vec::new(),
            output_bundles: Vec::new(),
            longest_path: None,
            initialized: false,
        }
    }

    /// Design name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn check_open(&self) -> Result<(), SimError> {
        if self.longest_path.is_some() {
            return Err(SimError::Sealed(self.name.clone()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Creates a single-bit wire.
    pub fn add_wire(&mut self, name: impl Into<String>) -> Result<WireId, SimError> {
        self.check_open()?;
        let name = name.into();
        if self.wire_names.contains_key(&name) {
            return Err(SimError::DuplicateWire(name));
        }
        let id = self.nets.alloc(Wire::new(name.clone()));
        self.wire_names.insert(name, id);
        Ok(id)
    }

    /// Creates a `width`-bit bundle whose lanes are new wires `name[0]` to
    /// `name[width-1]`.
    pub fn add_bundle(
        &mut self,
        name: impl Into<String>,
        width: usize,
        repr: Representation,
    ) -> Result<BundleId, SimError> {
        self.check_open()?;
        let name = name.into();
        if self.bundle_names.contains_key(&name) {
            return Err(SimError::DuplicateBundle(name));
        }
        if width == 0 || width > MAX_BUNDLE_WIDTH {
            return Err(SimError::InvalidBundleWidth {
                bundle: name,
                width,
            });
        }
        let lanes = (0..width)
            .map(|i| self.add_wire(format!("{name}[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;
        let id = self.bundles.next_id();
        for &lane in &lanes {
            if let Some(wire) = self.nets.get_mut(lane) {
                wire.attach_to_bundle(id);
            }
        }
        let bundle = WireBundle::new(name.clone(), lanes, repr).ok_or_else(|| {
            SimError::InvalidBundleWidth {
                bundle: name.clone(),
                width,
            }
        })?;
        self.bundles.alloc(bundle);
        self.bundle_names.insert(name, id);
        Ok(id)
    }

    /// Declares `wire` a global input. Inputs seed level discovery.
    pub fn declare_input(&mut self, wire: WireId) -> Result<(), SimError> {
        self.check_open()?;
        let w = self
            .nets
            .get_mut(wire)
            .ok_or_else(|| SimError::UnknownWire(wire.to_string()))?;
        w.mark_input();
        if !self.inputs.contains(&wire) {
            self.inputs.push(wire);
        }
        Ok(())
    }

    /// Declares `wire` a global output.
    pub fn declare_output(&mut self, wire: WireId) -> Result<(), SimError> {
        self.check_open()?;
        let w = self
            .nets
            .get_mut(wire)
            .ok_or_else(|| SimError::UnknownWire(wire.to_string()))?;
        w.mark_output();
        if !self.outputs.contains(&wire) {
            self.outputs.push(wire);
        }
        Ok(())
    }

    /// Declares every lane of `bundle` a global input.
    pub fn declare_input_bundle(&mut self, bundle: BundleId) -> Result<(), SimError> {
        self.check_open()?;
        let lanes = self.bundle_lanes_mut(bundle, WireBundle::mark_input)?;
        for lane in lanes {
            self.declare_input(lane)?;
        }
        if !self.input_bundles.contains(&bundle) {
            self.input_bundles.push(bundle);
        }
        Ok(())
    }

    /// Declares every lane of `bundle` a global output.
    pub fn declare_output_bundle(&mut self, bundle: BundleId) -> Result<(), SimError> {
        self.check_open()?;
        let lanes = self.bundle_lanes_mut(bundle, WireBundle::mark_output)?;
        for lane in lanes {
            self.declare_output(lane)?;
        }
        if !self.output_bundles.contains(&bundle) {
            self.output_bundles.push(bundle);
        }
        Ok(())
    }

    fn bundle_lanes_mut(
        &mut self,
        bundle: BundleId,
        mark: fn(&mut WireBundle),
    ) -> Result<Vec<WireId>, SimError> {
        let b = self
            .bundles
            .get_mut(bundle)
            .ok_or_else(|| SimError::UnknownBundle(bundle.to_string()))?;
        mark(b);
        Ok(b.wires().to_vec())
    }

    /// Binds every lane of `port` to the matching lane of `bundle`.
    pub fn connect_bundle(
        &self,
        component: &mut dyn Component,
        port: &str,
        bundle: BundleId,
    ) -> Result<(), SimError> {
        let b = self
            .bundles
            .get(bundle)
            .ok_or_else(|| SimError::UnknownBundle(bundle.to_string()))?;
        let expected = component.ports().spec(port)?.width;
        if expected != b.width() {
            return Err(SimError::WidthMismatch {
                component: component.name().to_string(),
                port: port.to_string(),
                expected,
                found: b.width(),
            });
        }
        for (index, &lane) in b.wires().iter().enumerate() {
            component.connect(port, index, lane)?;
        }
        Ok(())
    }

    /// Registers a fully connected component.
    ///
    /// Unbound lanes of internal ports get fresh wires named
    /// `{component}.{port}{lane}` in lower case. Every other lane must already
    /// be bound to a wire of this system. Output and internal lanes become the
    /// wire's driver; input and internal lanes add one fan-out edge each.
    ///
    /// Nothing is added to the system unless every check passes.
    pub fn add_component(
        &mut self,
        mut component: Box<dyn Component>,
    ) -> Result<ComponentId, SimError> {
        self.check_open()?;
        let name = component.name().to_string();
        if self.component_names.contains_key(&name) {
            return Err(SimError::DuplicateComponent(name));
        }

        component
            .ports()
            .check_connected_except(PortDirection::Internal)?;
        for wire in component.wires() {
            if !self.nets.wires().contains(wire) {
                return Err(SimError::UnknownWire(wire.to_string()));
            }
        }

        let pending: Vec<(String, String, usize)> = component
            .ports()
            .unbound(PortDirection::Internal)
            .into_iter()
            .map(|(port, lane)| (format!("{name}.{}{lane}", port.to_lowercase()), port, lane))
            .collect();
        for (wire_name, _, _) in &pending {
            if self.wire_names.contains_key(wire_name) {
                return Err(SimError::DuplicateWire(wire_name.clone()));
            }
        }

        let mut driven = HashSet::new();
        for wire in component.output_wires() {
            let w = &self.nets.wires()[wire];
            if !driven.insert(wire) {
                return Err(SimError::MultipleDrivers {
                    wire: w.name.clone(),
                    existing: name.clone(),
                    conflicting: name,
                });
            }
            if let Some(existing) = w.driver() {
                return Err(SimError::MultipleDrivers {
                    wire: w.name.clone(),
                    existing: self.components[existing].name().to_string(),
                    conflicting: name,
                });
            }
        }

        for (wire_name, port, lane) in pending {
            let wire = self.add_wire(wire_name)?;
            component.connect(&port, lane, wire)?;
        }

        let id = self.components.next_id();
        for wire in component.output_wires() {
            if let Some(w) = self.nets.get_mut(wire) {
                w.set_driver(id).map_err(|existing| SimError::MultipleDrivers {
                    wire: w.name.clone(),
                    existing: existing.to_string(),
                    conflicting: name.clone(),
                })?;
            }
        }
        for wire in component.input_wires() {
            if let Some(w) = self.nets.get_mut(wire) {
                w.add_fanout(id);
            }
        }

        tracing::trace!(component = %name, kind = component.kind(), id = %id, "registered component");
        self.nets.track(id);
        self.components.alloc(component);
        self.component_names.insert(name, id);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    /// Every read wire must be driven or be a global input, and a global
    /// input must not also be driven.
    fn validate(&self) -> Result<(), SimError> {
        for (_, wire) in self.nets.wires().iter() {
            match (wire.driver(), wire.is_input()) {
                (None, false) => {
                    if let Some(&reader) = wire.fanout().first() {
                        return Err(SimError::UndrivenWire {
                            wire: wire.name.clone(),
                            reader: self.components[reader].name().to_string(),
                        });
                    }
                    if wire.is_output() {
                        tracing::warn!(wire = %wire.name, "global output has no driver");
                    }
                }
                (Some(driver), true) => {
                    return Err(SimError::MultipleDrivers {
                        wire: wire.name.clone(),
                        existing: "<global input>".to_string(),
                        conflicting: self.components[driver].name().to_string(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Counts the frontier levels from the global inputs and seals the
    /// system. Subsequent calls return the cached count.
    pub fn find_longest_path_in_system(&mut self) -> Result<usize, SimError> {
        if let Some(levels) = self.longest_path {
            return Ok(levels);
        }
        self.validate()?;
        let levels = schedule::count_levels(self.nets.wires(), &self.components, &self.inputs)?;
        tracing::debug!(
            system = %self.name,
            components = self.components.len(),
            wires = self.nets.wires().len(),
            levels,
            "level discovery complete"
        );
        self.longest_path = Some(levels);
        Ok(levels)
    }

    /// Settles the graph from cold with one forced pass per level.
    ///
    /// Runs level discovery first if it has not happened yet.
    pub fn find_initial_state(&mut self) -> Result<(), SimError> {
        let levels = self.find_longest_path_in_system()?;
        for _ in 0..levels {
            self.pass(false)?;
        }
        self.initialized = true;
        tracing::debug!(system = %self.name, toggles = self.num_toggles(), "initial state settled");
        Ok(())
    }

    /// Propagates the current input values: `levels - 1` dirty-gated live
    /// passes, then one forced pass that commits values and counts toggles.
    pub fn update(&mut self) -> Result<(), SimError> {
        let levels = match self.longest_path {
            Some(levels) if self.initialized => levels,
            _ => return Err(SimError::NotInitialized(self.name.clone())),
        };
        let mut evaluated = 0;
        for _ in 1..levels {
            evaluated += self.pass(true)?;
        }
        evaluated += self.pass(false)?;
        tracing::trace!(system = %self.name, evaluated, "vector applied");
        Ok(())
    }

    /// Updates one component under the dirty-flag rule.
    ///
    /// A forced update always evaluates and leaves the dirty flag alone. A
    /// live update evaluates only a dirty component and clears its flag.
    /// Returns whether the component was evaluated.
    pub fn update_component(&mut self, id: ComponentId, propagating: bool) -> Result<bool, SimError> {
        if propagating && !self.nets.is_dirty(id) {
            return Ok(false);
        }
        let component = self
            .components
            .get_mut(id)
            .ok_or_else(|| SimError::UnknownComponent(id.to_string()))?;
        let mut signals = Signals::new(&mut self.nets, propagating);
        component.evaluate(&mut signals)?;
        if propagating {
            self.nets.clear_dirty(id);
        }
        Ok(true)
    }

    fn pass(&mut self, propagating: bool) -> Result<usize, SimError> {
        let mut evaluated = 0;
        for raw in 0..self.components.len() as u32 {
            if self.update_component(ComponentId::from_raw(raw), propagating)? {
                evaluated += 1;
            }
        }
        Ok(evaluated)
    }

    // ------------------------------------------------------------------
    // Values and toggles
    // ------------------------------------------------------------------

    /// Writes a single wire, normally a global input, in the given mode.
    pub fn set_wire(&mut self, wire: WireId, value: bool, propagating: bool) -> Result<(), SimError> {
        if !self.nets.wires().contains(wire) {
            return Err(SimError::UnknownWire(wire.to_string()));
        }
        self.nets.set_value(wire, value, propagating);
        Ok(())
    }

    /// Writes the low `width` bits of `value` to `bundle`, most-significant
    /// lane first.
    pub fn set_bundle(&mut self, bundle: BundleId, value: i64, propagating: bool) -> Result<(), SimError> {
        let b = self
            .bundles
            .get(bundle)
            .ok_or_else(|| SimError::UnknownBundle(bundle.to_string()))?;
        for (lane, bit) in b.lane_bits(value as u64) {
            self.nets.set_value(lane, bit, propagating);
        }
        Ok(())
    }

    /// Writes a signed value using the bundle's representation.
    pub fn set_bundle_signed(
        &mut self,
        bundle: BundleId,
        value: i64,
        propagating: bool,
    ) -> Result<(), SimError> {
        let b = self
            .bundles
            .get(bundle)
            .ok_or_else(|| SimError::UnknownBundle(bundle.to_string()))?;
        let raw = b.representation().encode(value, b.width());
        self.set_bundle(bundle, raw as i64, propagating)
    }

    /// Current value of `wire`.
    pub fn wire_value(&self, wire: WireId) -> Result<bool, SimError> {
        self.nets
            .get(wire)
            .map(Wire::value)
            .ok_or_else(|| SimError::UnknownWire(wire.to_string()))
    }

    /// Raw unsigned bit pattern of `bundle`.
    pub fn bundle_value(&self, bundle: BundleId) -> Result<u64, SimError> {
        let b = self
            .bundles
            .get(bundle)
            .ok_or_else(|| SimError::UnknownBundle(bundle.to_string()))?;
        Ok(WireBundle::assemble(
            b.wires().iter().map(|&w| self.nets.value(w)),
        ))
    }

    /// Signed value of `bundle` decoded with its representation.
    pub fn bundle_value_2c(&self, bundle: BundleId) -> Result<i64, SimError> {
        let raw = self.bundle_value(bundle)?;
        Ok(self.bundles[bundle].decode(raw))
    }

    /// Total switching activity: every wire's toggles plus every
    /// component's internal toggles.
    pub fn num_toggles(&self) -> u64 {
        let internal: u64 = self
            .components
            .values()
            .map(|c| c.internal_toggles())
            .sum();
        self.nets.wire_toggles() + internal
    }

    /// Depth of the deepest chain weighted by each component's own depth.
    ///
    /// `None` until level discovery has run.
    pub fn critical_path_gates(&self) -> Option<usize> {
        self.longest_path
            .map(|levels| schedule::weighted_depth(self.nets.wires(), &self.components, levels))
    }

    // ------------------------------------------------------------------
    // Lookup and introspection
    // ------------------------------------------------------------------

    /// Frontier level count, once discovered.
    pub fn longest_path(&self) -> Option<usize> {
        self.longest_path
    }

    /// Whether level discovery has sealed the netlist.
    pub fn is_sealed(&self) -> bool {
        self.longest_path.is_some()
    }

    /// Whether cold initialization has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a live pass would evaluate `component`.
    pub fn needs_update(&self, component: ComponentId) -> bool {
        self.nets.is_dirty(component)
    }

    /// Handle of the wire named `name`.
    pub fn wire_id(&self, name: &str) -> Option<WireId> {
        self.wire_names.get(name).copied()
    }

    /// Handle of the bundle named `name`.
    pub fn bundle_id(&self, name: &str) -> Option<BundleId> {
        self.bundle_names.get(name).copied()
    }

    /// Handle of the component named `name`.
    pub fn component_id(&self, name: &str) -> Option<ComponentId> {
        self.component_names.get(name).copied()
    }

    /// The wire behind `id`.
    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.nets.get(id)
    }

    /// The bundle behind `id`.
    pub fn bundle(&self, id: BundleId) -> Option<&WireBundle> {
        self.bundles.get(id)
    }

    /// The component behind `id`.
    pub fn component(&self, id: ComponentId) -> Option<&dyn Component> {
        self.components.get(id).map(|c| &**c)
    }

    /// Every wire in creation order.
    pub fn wires(&self) -> impl Iterator<Item = (WireId, &Wire)> {
        self.nets.wires().iter()
    }

    /// Every bundle in creation order.
    pub fn bundles(&self) -> impl Iterator<Item = (BundleId, &WireBundle)> {
        self.bundles.iter()
    }

    /// Every component in registration order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &dyn Component)> {
        self.components.iter().map(|(id, c)| (id, &**c))
    }

    /// Number of registered components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Declared global input wires.
    pub fn inputs(&self) -> &[WireId] {
        &self.inputs
    }

    /// Declared global output wires.
    pub fn outputs(&self) -> &[WireId] {
        &self.outputs
    }

    /// Declared global input bundles.
    pub fn input_bundles(&self) -> &[BundleId] {
        &self.input_bundles
    }

    /// Declared global output bundles.
    pub fn output_bundles(&self) -> &[BundleId] {
        &self.output_bundles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Gate, GateOp, HalfAdder, Mux2, RippleAdder};

    fn and_gate() -> (System, WireId, WireId, WireId) {
        let mut sys = System::new("and");
        let a = sys.add_wire("a").unwrap();
        let b = sys.add_wire("b").unwrap();
        let o = sys.add_wire("o").unwrap();
        sys.declare_input(a).unwrap();
        sys.declare_input(b).unwrap();
        sys.declare_output(o).unwrap();
        sys.add_component(Box::new(Gate::wired("g", GateOp::And, a, b, o).unwrap()))
            .unwrap();
        (sys, a, b, o)
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let (mut sys, a, b, o) = and_gate();
        assert_eq!(sys.add_wire("a"), Err(SimError::DuplicateWire("a".into())));
        let again = Gate::wired("g", GateOp::Or, a, b, o).unwrap();
        assert_eq!(
            sys.add_component(Box::new(again)),
            Err(SimError::DuplicateComponent("g".into()))
        );
    }

    #[test]
    fn second_driver_is_rejected() {
        let (mut sys, a, b, o) = and_gate();
        let err = sys
            .add_component(Box::new(Gate::wired("g2", GateOp::Or, a, b, o).unwrap()))
            .unwrap_err();
        assert_eq!(
            err,
            SimError::MultipleDrivers {
                wire: "o".into(),
                existing: "g".into(),
                conflicting: "g2".into(),
            }
        );
    }

    #[test]
    fn unconnected_port_is_rejected() {
        let mut sys = System::new("s");
        let a = sys.add_wire("a").unwrap();
        let mut g = Gate::new("g", GateOp::Not);
        g.connect("A", 0, a).unwrap();
        let err = sys.add_component(Box::new(g)).unwrap_err();
        assert!(matches!(err, SimError::UnconnectedPort { ref port, .. } if port == "O"));
    }

    #[test]
    fn foreign_wire_is_rejected() {
        let mut sys = System::new("s");
        let a = sys.add_wire("a").unwrap();
        let stray = WireId::from_raw(40);
        let g = Gate::wired("g", GateOp::And, a, a, stray).unwrap();
        assert_eq!(
            sys.add_component(Box::new(g)),
            Err(SimError::UnknownWire("w40".into()))
        );
    }

    #[test]
    fn undriven_read_wire_fails_discovery() {
        let mut sys = System::new("s");
        let a = sys.add_wire("a").unwrap();
        let f = sys.add_wire("floating").unwrap();
        let o = sys.add_wire("o").unwrap();
        sys.declare_input(a).unwrap();
        sys.add_component(Box::new(Gate::wired("g", GateOp::And, a, f, o).unwrap()))
            .unwrap();
        assert_eq!(
            sys.find_longest_path_in_system(),
            Err(SimError::UndrivenWire {
                wire: "floating".into(),
                reader: "g".into(),
            })
        );
    }

    #[test]
    fn driven_global_input_fails_discovery() {
        let (mut sys, _, _, o) = and_gate();
        sys.declare_input(o).unwrap();
        assert!(matches!(
            sys.find_longest_path_in_system(),
            Err(SimError::MultipleDrivers { .. })
        ));
    }

    #[test]
    fn discovery_seals_the_system() {
        let (mut sys, ..) = and_gate();
        assert_eq!(sys.find_longest_path_in_system(), Ok(1));
        assert!(sys.is_sealed());
        assert_eq!(sys.add_wire("late"), Err(SimError::Sealed("and".into())));
        assert_eq!(sys.find_longest_path_in_system(), Ok(1));
    }

    #[test]
    fn update_before_init_fails() {
        let (mut sys, ..) = and_gate();
        assert_eq!(sys.update(), Err(SimError::NotInitialized("and".into())));
        sys.find_longest_path_in_system().unwrap();
        assert_eq!(sys.update(), Err(SimError::NotInitialized("and".into())));
    }

    #[test]
    fn live_update_respects_dirty_flag() {
        let (mut sys, a, b, o) = and_gate();
        sys.find_initial_state().unwrap();
        let g = sys.component_id("g").unwrap();
        assert!(!sys.needs_update(g));
        assert_eq!(sys.update_component(g, true), Ok(false));

        sys.set_wire(a, true, true).unwrap();
        sys.set_wire(b, true, true).unwrap();
        assert!(sys.needs_update(g));
        assert_eq!(sys.update_component(g, true), Ok(true));
        assert!(!sys.needs_update(g));
        assert!(sys.wire_value(o).unwrap());
        assert_eq!(sys.num_toggles(), 0, "live writes never count");
    }

    #[test]
    fn forced_update_ignores_dirty_flag() {
        let (mut sys, ..) = and_gate();
        sys.find_initial_state().unwrap();
        let g = sys.component_id("g").unwrap();
        assert_eq!(sys.update_component(g, false), Ok(true));
    }

    #[test]
    fn bundles_round_trip_through_lanes() {
        let mut sys = System::new("b");
        let x = sys.add_bundle("x", 4, Representation::Twos).unwrap();
        assert_eq!(sys.bundle(x).unwrap().width(), 4);
        let lane3 = sys.wire_id("x[3]").unwrap();
        assert_eq!(sys.wire(lane3).unwrap().bundle(), Some(x));

        sys.set_bundle(x, -3, false).unwrap();
        assert_eq!(sys.bundle_value(x), Ok(0b1101));
        assert_eq!(sys.bundle_value_2c(x), Ok(-3));
        assert!(sys.wire_value(lane3).unwrap());
    }

    #[test]
    fn signed_write_uses_representation() {
        let mut sys = System::new("b");
        let x = sys.add_bundle("x", 4, Representation::SignMagnitude).unwrap();
        sys.set_bundle_signed(x, -3, false).unwrap();
        assert_eq!(sys.bundle_value(x), Ok(0b1011));
        assert_eq!(sys.bundle_value_2c(x), Ok(-3));
    }

    #[test]
    fn invalid_bundle_width() {
        let mut sys = System::new("b");
        assert_eq!(
            sys.add_bundle("z", 0, Representation::Twos),
            Err(SimError::InvalidBundleWidth {
                bundle: "z".into(),
                width: 0,
            })
        );
        assert!(sys.add_bundle("wide", 65, Representation::Twos).is_err());
    }

    #[test]
    fn connect_bundle_checks_width() {
        let mut sys = System::new("b");
        let a = sys.add_bundle("a", 3, Representation::Twos).unwrap();
        let mut rca = RippleAdder::new("rca", 4).unwrap();
        assert_eq!(
            sys.connect_bundle(&mut rca, "A", a),
            Err(SimError::WidthMismatch {
                component: "rca".into(),
                port: "A".into(),
                expected: 4,
                found: 3,
            })
        );
    }

    #[test]
    fn internal_carry_wires_are_created() {
        let mut sys = System::new("add");
        let a = sys.add_bundle("a", 3, Representation::Twos).unwrap();
        let b = sys.add_bundle("b", 3, Representation::Twos).unwrap();
        let s = sys.add_bundle("s", 3, Representation::Twos).unwrap();
        let cin = sys.add_wire("cin").unwrap();
        let cout = sys.add_wire("cout").unwrap();
        let mut rca = RippleAdder::new("rca", 3).unwrap();
        sys.connect_bundle(&mut rca, "A", a).unwrap();
        sys.connect_bundle(&mut rca, "B", b).unwrap();
        sys.connect_bundle(&mut rca, "S", s).unwrap();
        rca.connect("CIN", 0, cin).unwrap();
        rca.connect("COUT", 0, cout).unwrap();
        let id = sys.add_component(Box::new(rca)).unwrap();

        let c0 = sys.wire_id("rca.c0").unwrap();
        assert!(sys.wire_id("rca.c1").is_some());
        assert!(sys.wire_id("rca.c2").is_none());
        let carry = sys.wire(c0).unwrap();
        assert_eq!(carry.driver(), Some(id));
        assert_eq!(carry.fanout(), &[id]);
        assert_eq!(carry.external_fanout().count(), 0);
    }

    #[test]
    fn mux_select_routes_in_update() {
        let mut sys = System::new("m");
        let [a, b, s, o] = ["a", "b", "s", "o"].map(|n| sys.add_wire(n).unwrap());
        for w in [a, b, s] {
            sys.declare_input(w).unwrap();
        }
        let mut mux = Mux2::new("mux");
        for (port, w) in [("A", a), ("B", b), ("S", s), ("O", o)] {
            mux.connect(port, 0, w).unwrap();
        }
        sys.add_component(Box::new(mux)).unwrap();
        sys.find_initial_state().unwrap();
        assert_eq!(sys.critical_path_gates(), Some(2));

        sys.set_wire(b, true, false).unwrap();
        sys.update().unwrap();
        assert!(!sys.wire_value(o).unwrap());
        sys.set_wire(s, true, false).unwrap();
        sys.update().unwrap();
        assert!(sys.wire_value(o).unwrap());
    }

    #[test]
    fn shorted_outputs_are_rejected() {
        let mut sys = System::new("short");
        let [a, b, o] = ["a", "b", "o"].map(|n| sys.add_wire(n).unwrap());
        let mut ha = HalfAdder::new("ha");
        for (port, w) in [("A", a), ("B", b), ("S", o), ("C", o)] {
            ha.connect(port, 0, w).unwrap();
        }
        assert_eq!(
            sys.add_component(Box::new(ha)),
            Err(SimError::MultipleDrivers {
                wire: "o".into(),
                existing: "ha".into(),
                conflicting: "ha".into(),
            })
        );
        assert_eq!(sys.wire(o).unwrap().driver(), None);
        assert_eq!(sys.component_count(), 0);
    }

    #[test]
    fn rejected_component_leaves_no_internal_wires() {
        let mut sys = System::new("add");
        let a = sys.add_bundle("a", 2, Representation::Twos).unwrap();
        let b = sys.add_bundle("b", 2, Representation::Twos).unwrap();
        let s = sys.add_bundle("s", 2, Representation::Twos).unwrap();
        let [cin, cout, x] = ["cin", "cout", "x"].map(|n| sys.add_wire(n).unwrap());
        sys.add_component(Box::new(Gate::wired("g", GateOp::And, cin, x, cout).unwrap()))
            .unwrap();

        let adder = |sys: &System, carry_out: WireId| {
            let mut rca = RippleAdder::new("rca", 2).unwrap();
            sys.connect_bundle(&mut rca, "A", a).unwrap();
            sys.connect_bundle(&mut rca, "B", b).unwrap();
            sys.connect_bundle(&mut rca, "S", s).unwrap();
            rca.connect("CIN", 0, cin).unwrap();
            rca.connect("COUT", 0, carry_out).unwrap();
            Box::new(rca)
        };

        let first = adder(&sys, cout);
        let err = sys.add_component(first).unwrap_err();
        assert!(matches!(err, SimError::MultipleDrivers { ref wire, .. } if wire == "cout"));
        assert!(sys.wire_id("rca.c0").is_none());

        let spare = sys.add_wire("cout2").unwrap();
        let second = adder(&sys, spare);
        let id = sys.add_component(second).unwrap();
        let c0 = sys.wire_id("rca.c0").unwrap();
        assert_eq!(sys.wire(c0).unwrap().driver(), Some(id));
    }

    #[test]
    fn self_feedback_fails_discovery() {
        let mut sys = System::new("fb");
        let [a, o] = ["a", "o"].map(|n| sys.add_wire(n).unwrap());
        sys.declare_input(a).unwrap();
        sys.add_component(Box::new(Gate::wired("g", GateOp::Xor, a, o, o).unwrap()))
            .unwrap();
        assert_eq!(
            sys.find_longest_path_in_system(),
            Err(SimError::CombinationalLoop { levels: 1 })
        );
        assert!(!sys.is_sealed());
    }

    #[test]
    fn ring_without_inputs_fails_discovery() {
        let mut sys = System::new("ring");
        let [a, b, o, x, y] = ["a", "b", "o", "x", "y"].map(|n| sys.add_wire(n).unwrap());
        sys.declare_input(a).unwrap();
        sys.declare_input(b).unwrap();
        sys.add_component(Box::new(Gate::wired("g", GateOp::And, a, b, o).unwrap()))
            .unwrap();
        for (name, from, to) in [("n1", x, y), ("n2", y, x)] {
            let mut inv = Gate::new(name, GateOp::Not);
            inv.connect("A", 0, from).unwrap();
            inv.connect("O", 0, to).unwrap();
            sys.add_component(Box::new(inv)).unwrap();
        }
        assert!(matches!(
            sys.find_longest_path_in_system(),
            Err(SimError::CombinationalLoop { .. })
        ));
    }
}
