use std::collections::BTreeSet;

use crate::{assignment::VariableAssignment, error::QheError, term::Term, variable::Variable};

/// Live X-pad and Z-pad polynomials of one wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PadCoefficients {
    pub f_a: Term,
    pub f_b: Term,
}

impl PadCoefficients {
    /// `(a_i, b_i)`.
    pub fn initial(wire: usize) -> Self {
        PadCoefficients {
            f_a: Term::var(Variable::PadX(wire)),
            f_b: Term::var(Variable::PadZ(wire)),
        }
    }
}

/// Frozen pad polynomials of every wire, input of the final-key evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalPadCoefficients {
    wires: Vec<PadCoefficients>,
}

impl FinalPadCoefficients {
    pub(crate) fn new(wires: Vec<PadCoefficients>) -> Self {
        FinalPadCoefficients { wires }
    }

    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    pub fn wire(&self, wire: usize) -> Option<&PadCoefficients> {
        self.wires.get(wire)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PadCoefficients> {
        self.wires.iter()
    }

    /// Every variable the final polynomials reference.
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.wires
            .iter()
            .flat_map(|pads| pads.f_a.variables().into_iter().chain(pads.f_b.variables()))
            .collect()
    }

    /// Plaintext X-pad and Z-pad bits; client side only.
    pub fn evaluate(&self, assignment: &VariableAssignment) -> Result<(Vec<bool>, Vec<bool>), QheError> {
        let pad_x: Vec<bool> = self
            .wires
            .iter()
            .map(|pads| pads.f_a.evaluate(assignment))
            .collect::<Result<_, _>>()?;
        let pad_z: Vec<bool> = self
            .wires
            .iter()
            .map(|pads| pads.f_b.evaluate(assignment))
            .collect::<Result<_, _>>()?;
        Ok((pad_x, pad_z))
    }
}
