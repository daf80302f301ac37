//! Lowers a parsed [`Netlist`] into a [`System`].
//!
//! All declarations are processed before any instance, so nets may be
//! declared anywhere in the file. Structural errors from the simulator are
//! wrapped with the line of the offending declaration or instance.

use gatesim_sim::{Component, ComponentKind, SimError, System};

use crate::ast::{Binding, Instance, NetDecl, NetRole, Netlist};
use crate::error::NetlistError;

/// Builds an unsealed system named `name` from `netlist`.
pub fn build(name: &str, netlist: &Netlist) -> Result<System, NetlistError> {
    let mut system = System::new(name);
    for decl in &netlist.nets {
        declare(&mut system, decl)?;
    }
    for instance in &netlist.instances {
        instantiate(&mut system, instance)?;
    }
    tracing::debug!(
        system = name,
        nets = netlist.nets.len(),
        instances = netlist.instances.len(),
        "netlist built"
    );
    Ok(system)
}

fn rejected(line: usize) -> impl Fn(SimError) -> NetlistError {
    move |source| NetlistError::Rejected { line, source }
}

fn declare(system: &mut System, decl: &NetDecl) -> Result<(), NetlistError> {
    let rejected = rejected(decl.line);
    // Scalar wires and bundles share one name space.
    if system.bundle_id(&decl.name).is_some() || system.wire_id(&decl.name).is_some() {
        return Err(rejected(SimError::DuplicateWire(decl.name.clone())));
    }
    match decl.width {
        Some(width) => {
            let bundle = system
                .add_bundle(decl.name.as_str(), width, decl.repr)
                .map_err(&rejected)?;
            match decl.role {
                NetRole::Input => system.declare_input_bundle(bundle),
                NetRole::Output => system.declare_output_bundle(bundle),
                NetRole::Wire => Ok(()),
            }
            .map_err(&rejected)
        }
        None => {
            let wire = system.add_wire(decl.name.as_str()).map_err(&rejected)?;
            match decl.role {
                NetRole::Input => system.declare_input(wire),
                NetRole::Output => system.declare_output(wire),
                NetRole::Wire => Ok(()),
            }
            .map_err(&rejected)
        }
    }
}

fn instantiate(system: &mut System, instance: &Instance) -> Result<(), NetlistError> {
    let line = instance.line;
    let kind = ComponentKind::parse(&instance.kind, instance.param).ok_or_else(|| {
        NetlistError::UnknownKind {
            line,
            kind: match instance.param {
                Some(n) => format!("{}({n})", instance.kind),
                None => instance.kind.clone(),
            },
        }
    })?;
    let mut component = kind.instantiate(&instance.name).map_err(rejected(line))?;
    for binding in &instance.bindings {
        bind(system, component.as_mut(), binding, line)?;
    }
    system.add_component(component).map_err(rejected(line))?;
    Ok(())
}

fn bind(
    system: &System,
    component: &mut dyn Component,
    binding: &Binding,
    line: usize,
) -> Result<(), NetlistError> {
    let rejected = rejected(line);
    let port = binding.port.as_str();
    let expected = component.ports().spec(port).map_err(&rejected)?.width;
    let net = &binding.net;
    let mismatch = |found| NetlistError::WidthMismatch {
        line,
        net: net.to_string(),
        port: port.to_string(),
        expected,
        found,
    };
    let undeclared = || NetlistError::UndeclaredNet {
        line,
        net: net.to_string(),
    };

    if net.index.is_some() {
        // Lane wires are registered under their `name[i]` spelling.
        let lane = system.wire_id(&net.to_string()).ok_or_else(undeclared)?;
        if expected != 1 {
            return Err(mismatch(1));
        }
        return component.connect(port, 0, lane).map_err(&rejected);
    }
    if let Some(bundle) = system.bundle_id(&net.name) {
        let found = system.bundle(bundle).map_or(0, |b| b.width());
        if expected != found {
            return Err(mismatch(found));
        }
        return system
            .connect_bundle(component, port, bundle)
            .map_err(&rejected);
    }
    let wire = system.wire_id(&net.name).ok_or_else(undeclared)?;
    if expected != 1 {
        return Err(mismatch(1));
    }
    component.connect(port, 0, wire).map_err(&rejected)
}
