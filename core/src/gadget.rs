use crate::{
    assignment::VariableAssignment,
    auxiliary::{AuxiliaryKey, AuxiliaryState, AuxiliaryStateSource},
    error::QheError,
    term::Term,
    variable::Variable,
};

/// Produces the measured bit of a gadget's auxiliary qubit.
pub trait OutcomeResolver {
    fn resolve(&mut self, state: &AuxiliaryState) -> Result<bool, QheError>;
}

/// Noiseless model: the auxiliary qubit is `|±⟩` with phase `s ⊕ k`, measured
/// in the X basis.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoiselessOutcomes;

impl OutcomeResolver for NoiselessOutcomes {
    fn resolve(&mut self, state: &AuxiliaryState) -> Result<bool, QheError> {
        Ok(state.phase())
    }
}

/// Replays outcomes reported by an external backend, in gadget order.
#[derive(Clone, Debug, Default)]
pub struct RecordedOutcomes {
    outcomes: Vec<bool>,
    next: usize,
}

impl RecordedOutcomes {
    pub fn new(outcomes: Vec<bool>) -> Self {
        RecordedOutcomes { outcomes, next: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len() - self.next
    }
}

impl OutcomeResolver for RecordedOutcomes {
    fn resolve(&mut self, state: &AuxiliaryState) -> Result<bool, QheError> {
        let outcome: bool = *self.outcomes.get(self.next).ok_or_else(|| {
            QheError::GadgetMeasurement(format!(
                "no recorded outcome for gadget #{} {}",
                self.next, state.key
            ))
        })?;
        self.next += 1;
        Ok(outcome)
    }
}

/// Result of one T gadget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GadgetOutcome {
    pub state: AuxiliaryState,
    pub c: bool,
}

/// T-gate teleportation gadget over a state source and an outcome model.
pub struct TGadget<'a, S: AuxiliaryStateSource, R: OutcomeResolver> {
    source: &'a S,
    resolver: &'a mut R,
}

impl<'a, S: AuxiliaryStateSource, R: OutcomeResolver> TGadget<'a, S, R> {
    pub fn new(source: &'a S, resolver: &'a mut R) -> Self {
        TGadget { source, resolver }
    }

    /// Consumes the state of `(layer, wire, f_a)` and measures it. Outcome
    /// bits of earlier gadgets are public and are fixed in the key before the
    /// lookup.
    pub fn apply(
        &mut self,
        layer: usize,
        wire: usize,
        f_a: &Term,
        assignment: &VariableAssignment,
    ) -> Result<GadgetOutcome, QheError> {
        let term: Term = f_a.substitute(|variable| match variable {
            Variable::Outcome { .. } => assignment.get(variable),
            _ => None,
        });
        let key: AuxiliaryKey = AuxiliaryKey::new(layer, wire, term);
        let state: AuxiliaryState = self.source.state(key, assignment)?;
        let c: bool = self.resolver.resolve(&state)?;
        log::trace!("gadget {}: k={} s={} c={}", state.key, state.k, state.s, c);
        Ok(GadgetOutcome { state, c })
    }
}
