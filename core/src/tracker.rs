//! Pad-coefficient tracker.
//!
//! Holds `(f_a, f_b)` per wire and updates them gate by gate:
//!
//! | gate | update |
//! |---|---|
//! | `H(i)` | swap `f_a[i]`, `f_b[i]` |
//! | `CNOT(c, t)` | `f_a[t] ^= f_a[c]`, `f_b[c] ^= f_b[t]` |
//! | `S(i)` | `f_b[i] ^= f_a[i]` |
//! | `X(i)` | `f_b[i] ^= 1` |
//! | `Z(i)` | `f_a[i] ^= 1` |
//! | `T(i)` at layer `l` | `f_a ^= c_{i,l}`, `f_b ^= f_a ⊕ k_{i,l} ⊕ c·f_a` |
//!
//! where `k` is the secret of the auxiliary state keyed by `(l, i, f_a)`,
//! with the outcome bits already bound fixed in `f_a`, and `c` the gadget
//! outcome. Pad gates are the encryption itself and leave the
//! coefficients untouched.

use crate::{
    assignment::VariableAssignment,
    auxiliary::AuxiliaryStateSource,
    circuit::DataCircuit,
    error::QheError,
    gadget::{GadgetOutcome, OutcomeResolver, TGadget},
    gate::Gate,
    layering::{Layer, LayeredCircuit},
    pad::{FinalPadCoefficients, PadCoefficients},
    term::Term,
    variable::Variable,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerState {
    Initialized,
    Finalized,
}

/// Output of a tracked run.
#[derive(Clone, Debug)]
pub struct TrackedCircuit {
    pub pads: FinalPadCoefficients,
    /// Pads plus every `k` and `c` bound along the way.
    pub assignment: VariableAssignment,
    pub data_circuit: DataCircuit,
}

pub struct PadTracker<'a, S: AuxiliaryStateSource, R: OutcomeResolver> {
    state: TrackerState,
    pads: Vec<PadCoefficients>,
    assignment: VariableAssignment,
    data_circuit: DataCircuit,
    gadget: TGadget<'a, S, R>,
}

impl<'a, S: AuxiliaryStateSource, R: OutcomeResolver> PadTracker<'a, S, R> {
    /// `assignment` must bind the initial pads of every wire.
    pub fn new(num_wires: usize, assignment: VariableAssignment, gadget: TGadget<'a, S, R>) -> Result<Self, QheError> {
        assignment.pads(num_wires)?;
        Ok(PadTracker {
            state: TrackerState::Initialized,
            pads: (0..num_wires).map(PadCoefficients::initial).collect(),
            assignment,
            data_circuit: DataCircuit::new(num_wires),
            gadget,
        })
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn pads(&self) -> &[PadCoefficients] {
        &self.pads
    }

    pub fn assignment(&self) -> &VariableAssignment {
        &self.assignment
    }

    fn check_live(&self) -> Result<(), QheError> {
        match self.state {
            TrackerState::Initialized => Ok(()),
            TrackerState::Finalized => Err(QheError::InvalidConfiguration(
                "pad tracker is already finalized".to_string(),
            )),
        }
    }

    pub fn apply_layer(&mut self, layer: &Layer) -> Result<(), QheError> {
        log::debug!("layer {:?} (T layer {:?}): {} gates", layer.kind(), layer.t_layer(), layer.len());
        layer
            .gates()
            .iter()
            .try_for_each(|gate| self.apply(*gate, layer.t_layer()))
    }

    /// Applies `gate`; T gates need the T-layer index they belong to.
    pub fn apply(&mut self, gate: Gate, t_layer: Option<usize>) -> Result<(), QheError> {
        self.check_live()?;
        if let Some(wire) = gate.wires().into_iter().find(|&w| w >= self.pads.len()) {
            return Err(QheError::InvalidConfiguration(format!(
                "gate {gate} uses wire {wire} of a {}-wire circuit",
                self.pads.len()
            )));
        }
        log::trace!("apply {gate}");

        match gate {
            Gate::PadX(_) | Gate::PadZ(_) => {}
            Gate::H(i) => {
                let pads: &mut PadCoefficients = &mut self.pads[i];
                std::mem::swap(&mut pads.f_a, &mut pads.f_b);
            }
            Gate::Cnot { control, target } => {
                let f_a_control: Term = self.pads[control].f_a.clone();
                let f_b_target: Term = self.pads[target].f_b.clone();
                self.pads[target].f_a ^= &f_a_control;
                self.pads[control].f_b ^= &f_b_target;
            }
            Gate::S(i) => {
                let f_a: Term = self.pads[i].f_a.clone();
                self.pads[i].f_b ^= &f_a;
            }
            Gate::X(i) => self.pads[i].f_b ^= &Term::one(),
            Gate::Z(i) => self.pads[i].f_a ^= &Term::one(),
            Gate::T(i) => {
                let layer: usize = t_layer.ok_or_else(|| {
                    QheError::InvalidConfiguration(format!("gate {gate} applied outside a T layer"))
                })?;
                return self.apply_t(i, layer);
            }
        }

        self.data_circuit.push_gate(gate);
        Ok(())
    }

    fn apply_t(&mut self, wire: usize, layer: usize) -> Result<(), QheError> {
        let f_a: Term = self.pads[wire].f_a.clone();
        let GadgetOutcome { state, c } = self.gadget.apply(layer, wire, &f_a, &self.assignment)?;

        let k_var: Variable = Variable::Secret { wire, layer };
        let c_var: Variable = Variable::Outcome { wire, layer };
        self.assignment.bind(k_var, state.k)?;
        self.assignment.bind(c_var, c)?;

        let pads: &mut PadCoefficients = &mut self.pads[wire];
        pads.f_a ^= &Term::var(c_var);
        pads.f_b ^= &f_a;
        pads.f_b ^= &Term::var(k_var);
        if c {
            pads.f_b ^= &f_a;
        }

        self.data_circuit.push_gadget(wire, state.key, c_var);
        Ok(())
    }

    /// Freezes the coefficients. The tracker accepts no gate afterwards.
    pub fn finalize(&mut self) -> Result<TrackedCircuit, QheError> {
        self.check_live()?;
        self.state = TrackerState::Finalized;
        Ok(TrackedCircuit {
            pads: FinalPadCoefficients::new(std::mem::take(&mut self.pads)),
            assignment: std::mem::take(&mut self.assignment),
            data_circuit: std::mem::take(&mut self.data_circuit),
        })
    }

    /// Applies every layer of `circuit` then finalizes.
    pub fn run(mut self, circuit: &LayeredCircuit) -> Result<TrackedCircuit, QheError> {
        if circuit.num_wires() != self.pads.len() {
            return Err(QheError::InvalidConfiguration(format!(
                "circuit has {} wires, tracker {}",
                circuit.num_wires(),
                self.pads.len()
            )));
        }
        circuit
            .layers()
            .iter()
            .try_for_each(|layer| self.apply_layer(layer))?;
        self.finalize()
    }
}
