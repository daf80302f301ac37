//! Netlist data model for the gatesim gate-level simulator.
//!
//! This crate defines the passive building blocks shared by every other
//! gatesim crate: the handle-addressed [`Arena`], the [`WireId`] /
//! [`BundleId`] / [`ComponentId`] handles, single-bit [`Wire`]s, multi-bit
//! [`WireBundle`]s with their signed [`Representation`], and [`PortSpec`]
//! declarations. Evaluation lives in `gatesim_sim`.

#![warn(missing_docs)]

pub mod arena;
pub mod bundle;
pub mod ids;
pub mod port;
pub mod wire;

pub use arena::{Arena, ArenaId};
pub use bundle::{mask, Representation, WireBundle, MAX_BUNDLE_WIDTH};
pub use ids::{BundleId, ComponentId, WireId};
pub use port::{PortDirection, PortSpec};
pub use wire::Wire;
