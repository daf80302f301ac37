//! Adders: half adder, full adder and the ripple-carry composite.
//!
//! The full adder is the reference case for internal toggle accounting. Its
//! gate-level form is
//!
//! ```text
//! hs   = A ^ B          (read by the sum XOR and the propagate AND)
//! hc   = A & B          (read by the carry OR)
//! pc   = hs & CIN       (read by the carry OR)
//! S    = hs ^ CIN
//! COUT = hc | pc
//! ```
//!
//! `hs`, `hc` and `pc` are not wires; they are [`InternalSignal`]s weighted
//! by the gate inputs they feed.

use gatesim_ir::{PortDirection, PortSpec, WireId};

use crate::component::{Component, InternalSignal, PortTable};
use crate::error::SimError;
use crate::nets::Signals;

/// `S = A ^ B`, `C = A & B`.
#[derive(Debug, Clone)]
pub struct HalfAdder {
    ports: PortTable,
}

impl HalfAdder {
    /// Creates an unconnected half adder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            ports: PortTable::new(
                name,
                vec![
                    PortSpec::input("A"),
                    PortSpec::input("B"),
                    PortSpec::output("S"),
                    PortSpec::output("C"),
                ],
            ),
        }
    }
}

impl Component for HalfAdder {
    fn kind(&self) -> &str {
        "half_adder"
    }

    fn ports(&self) -> &PortTable {
        &self.ports
    }

    fn connect(&mut self, port: &str, index: usize, wire: WireId) -> Result<(), SimError> {
        self.ports.connect(port, index, wire)
    }

    fn evaluate(&mut self, signals: &mut Signals<'_>) -> Result<(), SimError> {
        let a = signals.get(self.ports.at(0, 0)?);
        let b = signals.get(self.ports.at(1, 0)?);
        signals.set(self.ports.at(2, 0)?, a ^ b);
        signals.set(self.ports.at(3, 0)?, a & b);
        Ok(())
    }
}

/// Depth of a full adder in two-input gate levels.
pub const FULL_ADDER_DEPTH: usize = 3;

/// One-bit full adder with internal half-sum/half-carry accounting.
#[derive(Debug, Clone)]
pub struct FullAdder {
    ports: PortTable,
    half_sum: InternalSignal,
    half_carry: InternalSignal,
    propagate_carry: InternalSignal,
}

impl FullAdder {
    /// Creates an unconnected full adder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            ports: PortTable::new(
                name,
                vec![
                    PortSpec::input("A"),
                    PortSpec::input("B"),
                    PortSpec::input("CIN"),
                    PortSpec::output("S"),
                    PortSpec::output("COUT"),
                ],
            ),
            half_sum: InternalSignal::new(2),
            half_carry: InternalSignal::new(1),
            propagate_carry: InternalSignal::new(1),
        }
    }
}

impl Component for FullAdder {
    fn kind(&self) -> &str {
        "full_adder"
    }

    fn ports(&self) -> &PortTable {
        &self.ports
    }

    fn connect(&mut self, port: &str, index: usize, wire: WireId) -> Result<(), SimError> {
        self.ports.connect(port, index, wire)
    }

    fn longest_path(&self) -> usize {
        FULL_ADDER_DEPTH
    }

    fn internal_toggles(&self) -> u64 {
        self.half_sum.toggles() + self.half_carry.toggles() + self.propagate_carry.toggles()
    }

    fn evaluate(&mut self, signals: &mut Signals<'_>) -> Result<(), SimError> {
        let a = signals.get(self.ports.at(0, 0)?);
        let b = signals.get(self.ports.at(1, 0)?);
        let cin = signals.get(self.ports.at(2, 0)?);

        let hs = a ^ b;
        let hc = a & b;
        let pc = hs & cin;
        let live = signals.propagating();
        self.half_sum.commit(hs, live);
        self.half_carry.commit(hc, live);
        self.propagate_carry.commit(pc, live);

        signals.set(self.ports.at(3, 0)?, hs ^ cin);
        signals.set(self.ports.at(4, 0)?, hc | pc);
        Ok(())
    }
}

/// An `N`-bit ripple-carry adder built from `N` chained [`FullAdder`]s.
///
/// Ports: `A[N]`, `B[N]`, `CIN` in; `S[N]`, `COUT` out; and, for `N > 1`, the
/// internal carry chain `C[N-1]` where `C[i]` is stage `i`'s carry out. The
/// carry wires are created by the system when left unbound.
#[derive(Debug, Clone)]
pub struct RippleAdder {
    ports: PortTable,
    stages: Vec<FullAdder>,
}

impl RippleAdder {
    /// Creates an unconnected `width`-bit adder.
    pub fn new(name: impl Into<String>, width: usize) -> Result<Self, SimError> {
        let name = name.into();
        if width == 0 || width > gatesim_ir::MAX_BUNDLE_WIDTH {
            return Err(SimError::InvalidWidth {
                component: name,
                width,
            });
        }
        let mut specs = vec![
            PortSpec::new("A", PortDirection::Input, width),
            PortSpec::new("B", PortDirection::Input, width),
            PortSpec::input("CIN"),
            PortSpec::new("S", PortDirection::Output, width),
            PortSpec::output("COUT"),
        ];
        if width > 1 {
            specs.push(PortSpec::new("C", PortDirection::Internal, width - 1));
        }
        let stages = (0..width)
            .map(|i| FullAdder::new(format!("{name}.fa{i}")))
            .collect();
        Ok(Self {
            ports: PortTable::new(name, specs),
            stages,
        })
    }

    /// Number of bits.
    pub fn width(&self) -> usize {
        self.stages.len()
    }

    /// The chained full adders, least-significant first.
    pub fn stages(&self) -> &[FullAdder] {
        &self.stages
    }
}

impl Component for RippleAdder {
    fn kind(&self) -> &str {
        "ripple_adder"
    }

    fn ports(&self) -> &PortTable {
        &self.ports
    }

    fn connect(&mut self, port: &str, index: usize, wire: WireId) -> Result<(), SimError> {
        self.ports.connect(port, index, wire)?;
        let last = self.stages.len() - 1;
        match port {
            "A" | "B" | "S" => self.stages[index].connect(port, 0, wire),
            "CIN" => self.stages[0].connect("CIN", 0, wire),
            "COUT" => self.stages[last].connect("COUT", 0, wire),
            "C" => {
                self.stages[index].connect("COUT", 0, wire)?;
                self.stages[index + 1].connect("CIN", 0, wire)
            }
            _ => Ok(()),
        }
    }

    /// Carry-in to carry-out of the first stage is the full adder depth; each
    /// further stage adds the AND/OR carry pair.
    fn longest_path(&self) -> usize {
        FULL_ADDER_DEPTH + 2 * (self.stages.len() - 1)
    }

    fn internal_toggles(&self) -> u64 {
        self.stages.iter().map(Component::internal_toggles).sum()
    }

    fn evaluate(&mut self, signals: &mut Signals<'_>) -> Result<(), SimError> {
        for stage in &mut self.stages {
            stage.evaluate(signals)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nets::Nets;
    use gatesim_ir::Wire;

    fn wires(nets: &mut Nets, prefix: &str, n: usize) -> Vec<WireId> {
        (0..n)
            .map(|i| nets.alloc(Wire::new(format!("{prefix}{i}"))))
            .collect()
    }

    #[test]
    fn full_adder_truth_table() {
        let mut nets = Nets::new();
        let w = wires(&mut nets, "n", 5);
        let mut fa = FullAdder::new("fa");
        for (port, &id) in ["A", "B", "CIN", "S", "COUT"].iter().zip(&w) {
            fa.connect(port, 0, id).unwrap();
        }
        for bits in 0u8..8 {
            let (a, b, c) = (bits & 1 == 1, bits & 2 == 2, bits & 4 == 4);
            let mut s = Signals::new(&mut nets, false);
            s.set(w[0], a);
            s.set(w[1], b);
            s.set(w[2], c);
            fa.evaluate(&mut s).unwrap();
            let total = a as u8 + b as u8 + c as u8;
            assert_eq!(s.get(w[3]), total & 1 == 1, "sum for {bits:03b}");
            assert_eq!(s.get(w[4]), total >= 2, "carry for {bits:03b}");
        }
    }

    #[test]
    fn full_adder_internal_toggles_weighted_by_fanout() {
        let mut nets = Nets::new();
        let w = wires(&mut nets, "n", 5);
        let mut fa = FullAdder::new("fa");
        for (port, &id) in ["A", "B", "CIN", "S", "COUT"].iter().zip(&w) {
            fa.connect(port, 0, id).unwrap();
        }
        // A=1: hs rises (2 edges); hc and pc stay low.
        let mut s = Signals::new(&mut nets, false);
        s.set(w[0], true);
        fa.evaluate(&mut s).unwrap();
        assert_eq!(fa.internal_toggles(), 2);

        // CIN=1 as well: pc rises (1 edge).
        s.set(w[2], true);
        fa.evaluate(&mut s).unwrap();
        assert_eq!(fa.internal_toggles(), 3);
    }

    #[test]
    fn live_evaluation_does_not_touch_internal_counts() {
        let mut nets = Nets::new();
        let w = wires(&mut nets, "n", 5);
        let mut fa = FullAdder::new("fa");
        for (port, &id) in ["A", "B", "CIN", "S", "COUT"].iter().zip(&w) {
            fa.connect(port, 0, id).unwrap();
        }
        let mut s = Signals::new(&mut nets, true);
        s.set(w[0], true);
        fa.evaluate(&mut s).unwrap();
        assert!(s.get(w[3]));
        assert_eq!(fa.internal_toggles(), 0);
    }

    #[test]
    fn half_adder_outputs() {
        let mut nets = Nets::new();
        let w = wires(&mut nets, "h", 4);
        let mut ha = HalfAdder::new("ha");
        for (port, &id) in ["A", "B", "S", "C"].iter().zip(&w) {
            ha.connect(port, 0, id).unwrap();
        }
        let mut s = Signals::new(&mut nets, false);
        s.set(w[0], true);
        s.set(w[1], true);
        ha.evaluate(&mut s).unwrap();
        assert!(!s.get(w[2]));
        assert!(s.get(w[3]));
    }

    #[test]
    fn ripple_adder_declares_carry_chain() {
        let rca = RippleAdder::new("rca", 4).unwrap();
        assert_eq!(rca.width(), 4);
        assert_eq!(rca.direction("C"), Ok(PortDirection::Internal));
        assert_eq!(rca.ports().spec("C").unwrap().width, 3);
        assert_eq!(rca.longest_path(), 9);
        assert_eq!(rca.stages()[2].name(), "rca.fa2");
    }

    #[test]
    fn one_bit_ripple_adder_has_no_internal_port() {
        let rca = RippleAdder::new("r1", 1).unwrap();
        assert!(rca.direction("C").is_err());
        assert_eq!(rca.longest_path(), FULL_ADDER_DEPTH);
    }

    #[test]
    fn zero_width_is_rejected() {
        let err = RippleAdder::new("r0", 0).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidWidth {
                component: "r0".into(),
                width: 0
            }
        );
    }

    #[test]
    fn ripple_adder_forwards_bindings_to_stages() {
        let mut rca = RippleAdder::new("rca", 2).unwrap();
        let c = WireId::from_raw(40);
        rca.connect("C", 0, c).unwrap();
        assert_eq!(rca.stages()[0].wire("COUT", 0), Ok(c));
        assert_eq!(rca.stages()[1].wire("CIN", 0), Ok(c));
        assert_eq!(rca.internal_wires(), vec![c]);
        assert!(rca.connect("A", 2, c).is_err());
    }

    #[test]
    fn ripple_adder_adds() {
        let mut nets = Nets::new();
        let a = wires(&mut nets, "a", 3);
        let b = wires(&mut nets, "b", 3);
        let s = wires(&mut nets, "s", 3);
        let c = wires(&mut nets, "c", 2);
        let cin = nets.alloc(Wire::new("cin"));
        let cout = nets.alloc(Wire::new("cout"));
        let mut rca = RippleAdder::new("rca", 3).unwrap();
        for i in 0..3 {
            rca.connect("A", i, a[i]).unwrap();
            rca.connect("B", i, b[i]).unwrap();
            rca.connect("S", i, s[i]).unwrap();
        }
        for (i, &w) in c.iter().enumerate() {
            rca.connect("C", i, w).unwrap();
        }
        rca.connect("CIN", 0, cin).unwrap();
        rca.connect("COUT", 0, cout).unwrap();
        rca.ports().check_connected().unwrap();

        // 3 + 7 = 10 -> S = 0b010, COUT = 1
        let mut sig = Signals::new(&mut nets, false);
        for i in 0..3 {
            sig.set(a[i], (3 >> i) & 1 == 1);
            sig.set(b[i], (7 >> i) & 1 == 1);
        }
        rca.evaluate(&mut sig).unwrap();
        let sum: Vec<bool> = s.iter().map(|&w| sig.get(w)).collect();
        assert_eq!(sum, vec![false, true, false]);
        assert!(sig.get(cout));
    }
}
