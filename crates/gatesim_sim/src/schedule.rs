//! Level discovery over the wire/component fan-out graph.
//!
//! No topological order is ever computed. [`count_levels`] walks a frontier
//! of wires outwards from the global inputs and counts how many hops it takes
//! until no further component is reached; that count is how many forced
//! passes settle any acyclic netlist regardless of visiting order.

use std::collections::BTreeSet;

use gatesim_ir::{Arena, ArenaId, ComponentId, PortDirection, Wire, WireId};

use crate::component::Component;
use crate::error::SimError;

/// Components of a system, in registration order.
pub type ComponentArena = Arena<ComponentId, Box<dyn Component>>;

/// Counts frontier levels starting from `inputs`.
///
/// Each level collects the components fed by the current frontier and moves
/// the frontier to their outputs. A DAG cannot be deeper than its component
/// count, so exceeding it means the graph has a combinational loop. So does a
/// component reading its own output port, or one the walk never reaches:
/// every read wire is driven or a global input, so an unreached component
/// sits on or behind a cycle no input feeds.
pub fn count_levels(
    wires: &Arena<WireId, Wire>,
    components: &ComponentArena,
    inputs: &[WireId],
) -> Result<usize, SimError> {
    if let Some((id, _)) = components.iter().find(|(_, c)| reads_own_output(&***c)) {
        tracing::debug!(component = %id, "component feeds back into itself");
        return Err(SimError::CombinationalLoop { levels: 1 });
    }

    let mut frontier: BTreeSet<WireId> = inputs.iter().copied().collect();
    let mut seen: BTreeSet<ComponentId> = BTreeSet::new();
    let mut levels = 0;
    loop {
        let reached: BTreeSet<ComponentId> = frontier
            .iter()
            .filter_map(|&w| wires.get(w))
            .flat_map(|w| w.external_fanout())
            .collect();
        if reached.is_empty() {
            if seen.len() < components.len() {
                tracing::debug!(
                    unreached = components.len() - seen.len(),
                    "components not reachable from any input"
                );
                return Err(SimError::CombinationalLoop { levels });
            }
            return Ok(levels);
        }
        levels += 1;
        if levels > components.len() {
            return Err(SimError::CombinationalLoop { levels });
        }
        seen.extend(reached.iter().copied());
        frontier = reached
            .iter()
            .filter_map(|&c| components.get(c))
            .flat_map(|c| c.output_wires())
            .collect();
    }
}

/// Whether an input lane and an output lane share a wire. Internal lanes
/// are both driven and read by design and do not count.
fn reads_own_output(component: &dyn Component) -> bool {
    let outputs = component.ports().wires_with(PortDirection::Output);
    component
        .ports()
        .wires_with(PortDirection::Input)
        .iter()
        .any(|w| outputs.contains(w))
}

/// Depth of the deepest chain in gate-equivalent levels.
///
/// Each component's arrival time is the latest arrival among the drivers of
/// its inputs plus its own [`longest_path`](Component::longest_path). Like
/// evaluation, the relaxation sweeps every component `rounds` times in
/// registration order instead of sorting; `rounds` must be the level count.
pub fn weighted_depth(
    wires: &Arena<WireId, Wire>,
    components: &ComponentArena,
    rounds: usize,
) -> usize {
    let mut arrival = vec![0usize; components.len()];
    for _ in 0..rounds {
        for (id, component) in components.iter() {
            let ready = component
                .input_wires()
                .into_iter()
                .filter_map(|w| wires.get(w).and_then(Wire::driver))
                .filter(|&driver| driver != id)
                .map(|driver| arrival[driver.index()])
                .max()
                .unwrap_or(0);
            arrival[id.index()] = ready + component.longest_path();
        }
    }
    arrival.into_iter().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{FullAdder, Gate, GateOp, RippleAdder};

    /// Builds wires `n0..n{count}` and registers gate edges by hand.
    fn wire_table(count: u32) -> Arena<WireId, Wire> {
        let mut wires = Arena::new();
        for i in 0..count {
            wires.alloc(Wire::new(format!("n{i}")));
        }
        wires
    }

    fn link(wires: &mut Arena<WireId, Wire>, components: &mut ComponentArena, c: Box<dyn Component>) {
        let id = components.next_id();
        for w in c.input_wires() {
            wires[w].add_fanout(id);
        }
        for w in c.output_wires() {
            wires[w].set_driver(id).unwrap();
        }
        components.alloc(c);
    }

    fn gate(name: &str, a: u32, b: u32, o: u32) -> Box<dyn Component> {
        Box::new(
            Gate::wired(
                name,
                GateOp::And,
                WireId::from_raw(a),
                WireId::from_raw(b),
                WireId::from_raw(o),
            )
            .unwrap(),
        )
    }

    #[test]
    fn no_components_means_no_levels() {
        let wires = wire_table(2);
        let components = ComponentArena::new();
        let inputs = [WireId::from_raw(0)];
        assert_eq!(count_levels(&wires, &components, &inputs), Ok(0));
    }

    #[test]
    fn chain_depth_ignores_registration_order() {
        // n0,n1 -> g1 -> n4 ; n4,n2 -> g2 -> n5 ; n5,n3 -> g3 -> n6
        let mut wires = wire_table(7);
        let mut components = ComponentArena::new();
        link(&mut wires, &mut components, gate("g3", 5, 3, 6));
        link(&mut wires, &mut components, gate("g2", 4, 2, 5));
        link(&mut wires, &mut components, gate("g1", 0, 1, 4));
        let inputs: Vec<WireId> = (0..4).map(WireId::from_raw).collect();
        assert_eq!(count_levels(&wires, &components, &inputs), Ok(3));
        assert_eq!(weighted_depth(&wires, &components, 3), 3);
    }

    #[test]
    fn parallel_gates_share_a_level() {
        let mut wires = wire_table(6);
        let mut components = ComponentArena::new();
        link(&mut wires, &mut components, gate("g0", 0, 1, 4));
        link(&mut wires, &mut components, gate("g1", 2, 3, 5));
        let inputs: Vec<WireId> = (0..4).map(WireId::from_raw).collect();
        assert_eq!(count_levels(&wires, &components, &inputs), Ok(1));
    }

    #[test]
    fn loop_is_reported() {
        // g0: n0 & n2 -> n1 ; g1: n1 & n0 -> n2
        let mut wires = wire_table(3);
        let mut components = ComponentArena::new();
        link(&mut wires, &mut components, gate("g0", 0, 2, 1));
        link(&mut wires, &mut components, gate("g1", 1, 0, 2));
        let err = count_levels(&wires, &components, &[WireId::from_raw(0)]).unwrap_err();
        assert_eq!(err, SimError::CombinationalLoop { levels: 3 });
    }

    #[test]
    fn gate_reading_its_own_output_is_a_loop() {
        // g: n0 ^ n1 -> n1
        let mut wires = wire_table(2);
        let mut components = ComponentArena::new();
        let g = Gate::wired(
            "g",
            GateOp::Xor,
            WireId::from_raw(0),
            WireId::from_raw(1),
            WireId::from_raw(1),
        )
        .unwrap();
        link(&mut wires, &mut components, Box::new(g));
        let err = count_levels(&wires, &components, &[WireId::from_raw(0)]).unwrap_err();
        assert_eq!(err, SimError::CombinationalLoop { levels: 1 });
    }

    #[test]
    fn ring_unreachable_from_inputs_is_a_loop() {
        // g: n0 & n1 -> n2, plus n3 -> inv0 -> n4 -> inv1 -> n3
        let mut wires = wire_table(5);
        let mut components = ComponentArena::new();
        link(&mut wires, &mut components, gate("g", 0, 1, 2));
        for (name, a, o) in [("inv0", 3, 4), ("inv1", 4, 3)] {
            let mut inv = Gate::new(name, GateOp::Not);
            inv.connect("A", 0, WireId::from_raw(a)).unwrap();
            inv.connect("O", 0, WireId::from_raw(o)).unwrap();
            link(&mut wires, &mut components, Box::new(inv));
        }
        let inputs = [0, 1].map(WireId::from_raw);
        let err = count_levels(&wires, &components, &inputs).unwrap_err();
        assert_eq!(err, SimError::CombinationalLoop { levels: 1 });
    }

    #[test]
    fn composite_internal_lanes_are_not_feedback() {
        let mut wires = wire_table(8);
        let mut components = ComponentArena::new();
        let mut rca = RippleAdder::new("rca", 2).unwrap();
        for (port, lane, w) in [
            ("A", 0, 0),
            ("A", 1, 1),
            ("B", 0, 2),
            ("B", 1, 3),
            ("CIN", 0, 4),
            ("S", 0, 5),
            ("S", 1, 6),
            ("COUT", 0, 7),
        ] {
            rca.connect(port, lane, WireId::from_raw(w)).unwrap();
        }
        wires.alloc(Wire::new("rca.c0"));
        rca.connect("C", 0, WireId::from_raw(8)).unwrap();
        link(&mut wires, &mut components, Box::new(rca));
        let inputs: Vec<WireId> = (0..5).map(WireId::from_raw).collect();
        assert_eq!(count_levels(&wires, &components, &inputs), Ok(1));
    }

    #[test]
    fn weighted_depth_uses_component_depths() {
        // full adder (3) feeding an AND gate (1)
        let mut wires = wire_table(7);
        let mut components = ComponentArena::new();
        let mut fa = FullAdder::new("fa");
        for (port, w) in [("A", 0), ("B", 1), ("CIN", 2), ("S", 3), ("COUT", 4)] {
            fa.connect(port, 0, WireId::from_raw(w)).unwrap();
        }
        link(&mut wires, &mut components, Box::new(fa));
        link(&mut wires, &mut components, gate("g", 3, 5, 6));
        let inputs = [0, 1, 2, 5].map(WireId::from_raw);
        let levels = count_levels(&wires, &components, &inputs).unwrap();
        assert_eq!(levels, 2);
        assert_eq!(weighted_depth(&wires, &components, levels), 4);
    }
}
