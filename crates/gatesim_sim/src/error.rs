//! Structural error types for netlist construction and scheduling.
//!
//! Every failure the simulator can report is a defect in the netlist graph,
//! detected while it is being built or sealed. Each variant names the
//! offending wire, bundle, component or port.

/// Errors raised while building, sealing or driving a [`System`](crate::System).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SimError {
    /// A component with this name is already registered.
    #[error("duplicate component '{0}'")]
    DuplicateComponent(String),

    /// A wire with this name already exists.
    #[error("duplicate wire '{0}'")]
    DuplicateWire(String),

    /// A bundle with this name already exists.
    #[error("duplicate bundle '{0}'")]
    DuplicateBundle(String),

    /// No component has this name.
    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    /// No wire has this name or handle.
    #[error("unknown wire '{0}'")]
    UnknownWire(String),

    /// No bundle has this name or handle.
    #[error("unknown bundle '{0}'")]
    UnknownBundle(String),

    /// The component does not declare this port.
    #[error("component '{component}' has no port '{port}'")]
    UnknownPort {
        /// Component name.
        component: String,
        /// Requested port name.
        port: String,
    },

    /// A lane index past the port's width.
    #[error("port '{component}.{port}' has width {width}, index {index} is out of range")]
    PortIndexOutOfRange {
        /// Component name.
        component: String,
        /// Port name.
        port: String,
        /// Requested lane.
        index: usize,
        /// Declared width.
        width: usize,
    },

    /// The lane is already bound to a wire.
    #[error("port '{component}.{port}[{index}]' is already connected")]
    PortAlreadyConnected {
        /// Component name.
        component: String,
        /// Port name.
        port: String,
        /// Lane index.
        index: usize,
    },

    /// A declared lane was never bound.
    #[error("port '{component}.{port}[{index}]' is not connected")]
    UnconnectedPort {
        /// Component name.
        component: String,
        /// Port name.
        port: String,
        /// Lane index.
        index: usize,
    },

    /// A bundle was bound to a port of a different width.
    #[error("cannot bind {found}-bit bundle to {expected}-bit port '{component}.{port}'")]
    WidthMismatch {
        /// Component name.
        component: String,
        /// Port name.
        port: String,
        /// Port width.
        expected: usize,
        /// Bundle width.
        found: usize,
    },

    /// Two components drive the same wire.
    #[error("wire '{wire}' is driven by both '{existing}' and '{conflicting}'")]
    MultipleDrivers {
        /// Wire name.
        wire: String,
        /// Component that drove the wire first.
        existing: String,
        /// Component that tried to drive it as well.
        conflicting: String,
    },

    /// A wire is read but neither driven nor a declared global input.
    #[error("wire '{wire}' read by '{reader}' has no driver and is not a global input")]
    UndrivenWire {
        /// Wire name.
        wire: String,
        /// First component reading it.
        reader: String,
    },

    /// A bundle width outside `1..=64`.
    #[error("bundle '{bundle}' has invalid width {width}")]
    InvalidBundleWidth {
        /// Bundle name.
        bundle: String,
        /// Requested width.
        width: usize,
    },

    /// A parameterized component was given an unusable width.
    #[error("component '{component}' cannot have width {width}")]
    InvalidWidth {
        /// Component name.
        component: String,
        /// Requested width.
        width: usize,
    },

    /// Level discovery did not terminate within one level per component.
    #[error("combinational loop detected after {levels} levels")]
    CombinationalLoop {
        /// Levels walked before giving up.
        levels: usize,
    },

    /// The netlist was modified after level discovery sealed it.
    #[error("system '{0}' is sealed; netlist changes are not allowed after level discovery")]
    Sealed(String),

    /// A vector was applied before cold initialization.
    #[error("system '{0}' must be initialized before it can be updated")]
    NotInitialized(String),
}
