//! Random input vectors and per-vector switching-activity sampling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::system::System;

/// Toggles attributed to one applied vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorSample {
    /// Zero-based vector index.
    pub index: usize,
    /// Increase of [`System::num_toggles`] caused by this vector.
    pub toggles: u64,
}

/// Switching activity of a whole stimulus run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityProfile {
    /// Toggles counted while settling from cold.
    pub initial_toggles: u64,
    /// One sample per applied vector, in order.
    pub samples: Vec<VectorSample>,
}

impl ActivityProfile {
    /// Sum of all per-vector samples, excluding cold initialization.
    pub fn total(&self) -> u64 {
        self.samples.iter().map(|s| s.toggles).sum()
    }

    /// Mean toggles per vector, or `0.0` for an empty run.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.total() as f64 / self.samples.len() as f64
    }
}

/// Drives a system's global inputs with seeded random values.
#[derive(Debug)]
pub struct StimulusDriver {
    rng: StdRng,
}

impl StimulusDriver {
    /// Creates a driver; equal seeds produce equal vector sequences.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Initializes `system` if needed and applies `vectors` random vectors.
    ///
    /// Every declared input bundle receives a value drawn uniformly from its
    /// representable range; every declared input wire outside a bundle
    /// receives a random bit.
    pub fn run(&mut self, system: &mut System, vectors: usize) -> Result<ActivityProfile, SimError> {
        let initial_toggles = if system.is_initialized() {
            0
        } else {
            system.find_initial_state()?;
            system.num_toggles()
        };

        let bundles = system.input_bundles().to_vec();
        let loose: Vec<_> = system
            .inputs()
            .iter()
            .copied()
            .filter(|&w| system.wire(w).is_some_and(|wire| wire.bundle().is_none()))
            .collect();

        let mut samples = Vec::with_capacity(vectors);
        for index in 0..vectors {
            let before = system.num_toggles();
            for &bundle in &bundles {
                let (lo, hi) = match system.bundle(bundle) {
                    Some(b) => b.representation().range(b.width()),
                    None => return Err(SimError::UnknownBundle(bundle.to_string())),
                };
                let value = self.rng.gen_range(lo..=hi);
                system.set_bundle_signed(bundle, value, false)?;
            }
            for &wire in &loose {
                let bit: bool = self.rng.gen();
                system.set_wire(wire, bit, false)?;
            }
            system.update()?;
            let toggles = system.num_toggles() - before;
            tracing::trace!(vector = index, toggles, "sampled vector");
            samples.push(VectorSample { index, toggles });
        }

        let profile = ActivityProfile {
            initial_toggles,
            samples,
        };
        tracing::debug!(
            system = %system.name(),
            vectors,
            total = profile.total(),
            mean = profile.mean(),
            "stimulus run complete"
        );
        Ok(profile)
    }
}

/// Writes named inputs with forced writes, updates, and returns the toggles
/// the vector caused.
///
/// A name resolves to a bundle first (the value is taken as a signed integer
/// in the bundle's representation) and to a wire otherwise (any non-zero
/// value drives 1).
pub fn apply_vector(system: &mut System, values: &[(&str, i64)]) -> Result<u64, SimError> {
    let before = system.num_toggles();
    for &(name, value) in values {
        if let Some(bundle) = system.bundle_id(name) {
            system.set_bundle_signed(bundle, value, false)?;
        } else if let Some(wire) = system.wire_id(name) {
            system.set_wire(wire, value != 0, false)?;
        } else {
            return Err(SimError::UnknownWire(name.to_string()));
        }
    }
    system.update()?;
    Ok(system.num_toggles() - before)
}
