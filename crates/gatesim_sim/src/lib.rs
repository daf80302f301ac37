//! Level-scheduled gate-level simulator with switching-activity accounting.
//!
//! This crate evaluates a combinational netlist built from the `gatesim_ir`
//! data model and counts, per applied input vector, how many wire transitions
//! occurred, weighted by fan-out. The count is a first-order proxy for dynamic
//! power.
//!
//! # Architecture
//!
//! No topological sort is performed. Instead the [`System`] counts how many
//! frontier levels separate the global inputs from the deepest component and
//! runs that many passes:
//!
//! - cold initialization runs one *forced* pass per level, recomputing every
//!   component unconditionally;
//! - each input vector runs `levels - 1` *live* passes, which only evaluate
//!   components whose inputs changed, followed by one forced pass that commits
//!   the settled values and attributes toggles.
//!
//! Glitches inside the live passes are never counted; only the net change
//! between consecutive forced passes is.
//!
//! # Usage
//!
//! ```ignore
//! use gatesim_sim::{components::{Gate, GateOp}, System};
//!
//! let mut sys = System::new("demo");
//! let (a, b, o) = (sys.add_wire("a")?, sys.add_wire("b")?, sys.add_wire("o")?);
//! sys.declare_input(a)?;
//! sys.declare_input(b)?;
//! sys.add_component(Box::new(Gate::wired("g", GateOp::And, a, b, o)?))?;
//! sys.find_initial_state()?;
//! sys.set_wire(a, true, false)?;
//! sys.update()?;
//! println!("{} toggles", sys.num_toggles());
//! ```
//!
//! # Modules
//!
//! - `error`: structural error type
//! - `nets`: wire storage, dirty flags, per-pass write context
//! - `component`: the component contract and port bookkeeping
//! - `components`: gates, multiplexer and adders
//! - `schedule`: frontier level counting and weighted depth
//! - `system`: netlist ownership and the two evaluation protocols
//! - `stimulus`: seeded random vectors and per-vector samples
//! - `report`: read-only toggle report

#![warn(missing_docs)]

pub mod component;
pub mod components;
pub mod error;
pub mod nets;
pub mod report;
pub mod schedule;
pub mod stimulus;
pub mod system;

pub use component::{Component, InternalSignal, PortTable};
pub use components::ComponentKind;
pub use error::SimError;
pub use nets::{Nets, Signals};
pub use report::{ComponentRow, ToggleReport, WireRow};
pub use stimulus::{apply_vector, ActivityProfile, StimulusDriver, VectorSample};
pub use system::System;
