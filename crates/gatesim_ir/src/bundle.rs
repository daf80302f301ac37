//! Multi-bit wire bundles and signed number representations.
//!
//! A [`WireBundle`] groups a fixed number of [`Wire`](crate::Wire)s into one
//! integer-valued signal. Lane 0 is the least-significant bit. How the raw bit
//! pattern maps to a signed integer is chosen by its [`Representation`].

use crate::ids::WireId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The widest bundle whose value fits a machine word.
pub const MAX_BUNDLE_WIDTH: usize = 64;

/// Signed-number encoding of a bundle's bit pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// Two's complement (default).
    #[default]
    Twos,
    /// One's complement; both all-zeros and all-ones read as zero.
    Ones,
    /// Sign bit in the MSB, magnitude in the remaining lanes.
    SignMagnitude,
}

impl Representation {
    /// Decodes a raw `width`-bit pattern into a signed value.
    pub fn decode(self, raw: u64, width: usize) -> i64 {
        let raw = raw & mask(width);
        let msb = 1u64 << (width - 1);
        if raw & msb == 0 {
            return raw as i64;
        }
        match self {
            Representation::Twos => (raw as i128 - (1i128 << width)) as i64,
            Representation::Ones => (raw as i128 - (1i128 << width) + 1) as i64,
            Representation::SignMagnitude => -((raw & !msb) as i64),
        }
    }

    /// Encodes a signed value as a raw `width`-bit pattern.
    ///
    /// Values outside the representable range are truncated to `width` bits.
    pub fn encode(self, value: i64, width: usize) -> u64 {
        let bits = match self {
            Representation::Twos => value as u64,
            Representation::Ones if value < 0 => !value.unsigned_abs(),
            Representation::SignMagnitude if value < 0 => {
                (1u64 << (width - 1)) | value.unsigned_abs()
            }
            _ => value as u64,
        };
        bits & mask(width)
    }

    /// Smallest and largest signed value a `width`-bit pattern can hold.
    pub fn range(self, width: usize) -> (i64, i64) {
        let max = (mask(width) >> 1) as i64;
        match self {
            Representation::Twos => (-max - 1, max),
            Representation::Ones | Representation::SignMagnitude => (-max, max),
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Representation::Twos => "twos",
            Representation::Ones => "ones",
            Representation::SignMagnitude => "sign_magnitude",
        })
    }
}

impl FromStr for Representation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twos" => Ok(Representation::Twos),
            "ones" => Ok(Representation::Ones),
            "sign_magnitude" => Ok(Representation::SignMagnitude),
            other => Err(format!("unknown representation '{other}'")),
        }
    }
}

/// Bit mask covering the low `width` bits.
pub fn mask(width: usize) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// A fixed-width ordered group of wires carrying one integer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireBundle {
    /// Bundle name, unique within a system.
    pub name: String,
    wires: Vec<WireId>,
    repr: Representation,
    is_input: bool,
    is_output: bool,
}

impl WireBundle {
    /// Creates a bundle over `wires` (lane 0 first).
    ///
    /// Returns `None` unless `0 < wires.len() <= 64`.
    pub fn new(name: impl Into<String>, wires: Vec<WireId>, repr: Representation) -> Option<Self> {
        if wires.is_empty() || wires.len() > MAX_BUNDLE_WIDTH {
            return None;
        }
        Some(Self {
            name: name.into(),
            wires,
            repr,
            is_input: false,
            is_output: false,
        })
    }

    /// Number of lanes.
    pub fn width(&self) -> usize {
        self.wires.len()
    }

    /// Lane handles, least-significant first.
    pub fn wires(&self) -> &[WireId] {
        &self.wires
    }

    /// Handle of lane `index`.
    pub fn lane(&self, index: usize) -> Option<WireId> {
        self.wires.get(index).copied()
    }

    /// Signed encoding of this bundle.
    pub fn representation(&self) -> Representation {
        self.repr
    }

    /// Whether this bundle is a declared global input.
    pub fn is_input(&self) -> bool {
        self.is_input
    }

    /// Whether this bundle is a declared global output.
    pub fn is_output(&self) -> bool {
        self.is_output
    }

    /// Marks the bundle as a global input.
    pub fn mark_input(&mut self) {
        self.is_input = true;
    }

    /// Marks the bundle as a global output.
    pub fn mark_output(&mut self) {
        self.is_output = true;
    }

    /// Splits `value` into per-lane bits, most-significant lane first.
    pub fn lane_bits(&self, value: u64) -> impl Iterator<Item = (WireId, bool)> + '_ {
        self.wires
            .iter()
            .enumerate()
            .rev()
            .map(move |(i, &w)| (w, (value >> i) & 1 == 1))
    }

    /// Reassembles a raw pattern from per-lane values (lane 0 first).
    pub fn assemble(bits: impl IntoIterator<Item = bool>) -> u64 {
        bits.into_iter()
            .enumerate()
            .fold(0u64, |acc, (i, b)| acc | ((b as u64) << i))
    }

    /// Decodes a raw pattern according to this bundle's representation.
    pub fn decode(&self, raw: u64) -> i64 {
        self.repr.decode(raw, self.width())
    }
}
