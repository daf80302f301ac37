//! Single-bit nets.
//!
//! A [`Wire`] carries one boolean value plus the bookkeeping needed for
//! switching-activity accounting: the value seen at the last forced pass, a
//! change flag and a toggle counter weighted by fan-out.

use crate::ids::{BundleId, ComponentId};
use serde::{Deserialize, Serialize};

/// A boolean net with at most one driver and any number of readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wire {
    /// Net name, unique within a system.
    pub name: String,
    curr_value: bool,
    prev_value: bool,
    has_changed: bool,
    toggle_count: u64,
    is_input: bool,
    is_output: bool,
    driver: Option<ComponentId>,
    fanout: Vec<ComponentId>,
    bundle: Option<BundleId>,
}

impl Wire {
    /// Creates an undriven, unread wire at logic 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            curr_value: false,
            prev_value: false,
            has_changed: false,
            toggle_count: 0,
            is_input: false,
            is_output: false,
            driver: None,
            fanout: Vec::new(),
            bundle: None,
        }
    }

    /// Current value.
    pub fn value(&self) -> bool {
        self.curr_value
    }

    /// Value committed by the most recent forced write.
    pub fn prev_value(&self) -> bool {
        self.prev_value
    }

    /// Whether the most recent write changed the value, relative to the
    /// reference that write mode compares against.
    pub fn has_changed(&self) -> bool {
        self.has_changed
    }

    /// Accumulated fan-out weighted toggles.
    pub fn toggle_count(&self) -> u64 {
        self.toggle_count
    }

    /// The component driving this wire, if any.
    pub fn driver(&self) -> Option<ComponentId> {
        self.driver
    }

    /// Every reading port lane, one entry per edge.
    pub fn fanout(&self) -> &[ComponentId] {
        &self.fanout
    }

    /// Readers other than the wire's own driver.
    ///
    /// A composite that both drives and reads a wire (an internal carry, for
    /// instance) appears in its own fan-out; those edges are not scheduling
    /// edges.
    pub fn external_fanout(&self) -> impl Iterator<Item = ComponentId> + '_ {
        let driver = self.driver;
        self.fanout.iter().copied().filter(move |&c| Some(c) != driver)
    }

    /// Bundle this wire is a lane of, if any.
    pub fn bundle(&self) -> Option<BundleId> {
        self.bundle
    }

    /// Whether this wire is a declared global input.
    pub fn is_input(&self) -> bool {
        self.is_input
    }

    /// Whether this wire is a declared global output.
    pub fn is_output(&self) -> bool {
        self.is_output
    }

    /// Marks the wire as a global input.
    pub fn mark_input(&mut self) {
        self.is_input = true;
    }

    /// Marks the wire as a global output.
    pub fn mark_output(&mut self) {
        self.is_output = true;
    }

    /// Records the bundle this wire belongs to.
    pub fn attach_to_bundle(&mut self, bundle: BundleId) {
        self.bundle = Some(bundle);
    }

    /// Binds the single driver of this wire.
    ///
    /// Returns the existing driver as the error if the wire is already driven
    /// by a different component.
    pub fn set_driver(&mut self, component: ComponentId) -> Result<(), ComponentId> {
        match self.driver {
            Some(existing) if existing != component => Err(existing),
            _ => {
                self.driver = Some(component);
                Ok(())
            }
        }
    }

    /// Adds one fan-out edge towards `component`.
    pub fn add_fanout(&mut self, component: ComponentId) {
        self.fanout.push(component);
    }

    /// Writes `value` and returns whether the write counts as a change.
    ///
    /// In live mode (`propagating == true`) the change is measured against
    /// the current value and no toggles are attributed. In forced mode the
    /// change is measured against the value of the previous forced write,
    /// both values are committed, and a change adds one toggle per fan-out
    /// edge.
    pub fn apply(&mut self, value: bool, propagating: bool) -> bool {
        if propagating {
            self.has_changed = self.curr_value != value;
        } else {
            self.has_changed = self.prev_value != value;
            self.prev_value = value;
            if self.has_changed {
                self.toggle_count += self.fanout.len() as u64;
            }
        }
        self.curr_value = value;
        self.has_changed
    }
}
