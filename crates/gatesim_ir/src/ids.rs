//! Opaque handle newtypes for wires, bundles and components.
//!
//! Every handle is a `u32` slot index into the owning [`Arena`](crate::Arena).
//! Handles are `Copy`, so wires can list the components they feed and
//! components can list the wires they touch without borrowing either side.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates a handle from a raw slot index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw slot index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Handle of a single boolean net.
    WireId,
    "w"
);

define_id!(
    /// Handle of a multi-bit wire bundle.
    BundleId,
    "b"
);

define_id!(
    /// Handle of a component registered with a system.
    ComponentId,
    "c"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn raw_roundtrip() {
        assert_eq!(WireId::from_raw(42).as_raw(), 42);
        assert_eq!(ComponentId::from_raw(3).index(), 3);
    }

    #[test]
    fn display_uses_kind_prefix() {
        assert_eq!(WireId::from_raw(4).to_string(), "w4");
        assert_eq!(BundleId::from_raw(0).to_string(), "b0");
        assert_eq!(ComponentId::from_raw(11).to_string(), "c11");
    }

    #[test]
    fn ordered_set_dedups() {
        let set: BTreeSet<_> = [2, 1, 2, 0]
            .into_iter()
            .map(ComponentId::from_raw)
            .collect();
        let raw: Vec<u32> = set.into_iter().map(ComponentId::as_raw).collect();
        assert_eq!(raw, vec![0, 1, 2]);
    }
}
