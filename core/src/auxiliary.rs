//! Auxiliary states, one per (layer, wire, term) triple.
//!
//! The state's secret bit `k` is a pure function of its key: the low bit of a
//! BLAKE3 digest of the key's structural encoding. It does not depend on the
//! wire count or depth of the circuit that requests it, nor on any seed.
//!
//! T-set terms are single monomials. A gadget key whose term is a XOR of
//! several monomials is served by the states of its [parts](AuxiliaryKey::parts),
//! and its secret is the XOR of theirs.

use std::{
    fmt,
    io::{Result as IoResult, Write},
    sync::Arc,
};

use auxqhe_utils::Map;
use byteorder::{LittleEndian, WriteBytesExt};
use rayon::prelude::*;

use crate::{
    assignment::VariableAssignment,
    encoding::WriterTo,
    error::QheError,
    gate::Gate,
    term::Term,
    tset::TSets,
};

const SECRET_DOMAIN: &[u8] = b"auxqhe.gadget-secret.v1";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AuxiliaryKey {
    pub layer: usize,
    pub wire: usize,
    pub term: Term,
}

impl AuxiliaryKey {
    pub fn new(layer: usize, wire: usize, term: Term) -> Self {
        AuxiliaryKey { layer, wire, term }
    }

    /// One key per non-constant monomial of the term, in term order.
    pub fn parts(&self) -> Vec<AuxiliaryKey> {
        self.term
            .monomials()
            .filter(|monomial| !monomial.is_one())
            .map(|monomial| AuxiliaryKey::new(self.layer, self.wire, Term::from_monomial(monomial.clone())))
            .collect()
    }
}

impl fmt::Display for AuxiliaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(layer={}, wire={}, {})", self.layer, self.wire, self.term)
    }
}

impl WriterTo for AuxiliaryKey {
    fn write_to<W: Write>(&self, writer: &mut W) -> IoResult<()> {
        writer.write_u64::<LittleEndian>(self.layer as u64)?;
        writer.write_u64::<LittleEndian>(self.wire as u64)?;
        self.term.write_to(writer)
    }
}

/// Secret bit `k` of the auxiliary state keyed by `key`.
pub fn derive_secret(key: &AuxiliaryKey) -> Result<bool, QheError> {
    let mut hasher: blake3::Hasher = blake3::Hasher::new();
    hasher.update(SECRET_DOMAIN);
    key.write_to(&mut hasher)?;
    Ok(hasher.finalize().as_bytes()[0] & 1 == 1)
}

/// Single-qubit resource `Z^(s⊕k) H|0⟩`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuxiliaryState {
    pub key: AuxiliaryKey,
    /// Gadget secret.
    pub k: bool,
    /// Value of the key's term under the assignment at consumption time.
    pub s: bool,
}

impl AuxiliaryState {
    /// Phase bit of the prepared `|±⟩` state.
    pub fn phase(&self) -> bool {
        self.s ^ self.k
    }

    /// Gates preparing the state on auxiliary qubit 0 from `|0⟩`.
    pub fn preparation(&self) -> Vec<Gate> {
        if self.phase() {
            vec![Gate::H(0), Gate::Z(0)]
        } else {
            vec![Gate::H(0)]
        }
    }
}

/// Derives the state of `(layer, wire, term)` under `assignment`.
pub fn generate(
    layer: usize,
    wire: usize,
    term: &Term,
    assignment: &VariableAssignment,
) -> Result<AuxiliaryState, QheError> {
    let key: AuxiliaryKey = AuxiliaryKey::new(layer, wire, term.clone());
    let k: bool = derive_secret(&key)?;
    let s: bool = term.evaluate(assignment)?;
    Ok(AuxiliaryState { key, k, s })
}

/// Supplies the secrets of auxiliary states.
pub trait AuxiliaryStateSource {
    /// Secret of the single state keyed by `key`.
    fn secret(&self, key: &AuxiliaryKey) -> Result<bool, QheError>;

    /// State consumed by a gadget on `key`, assembled from the states of its
    /// parts. Every part must be available before the term is evaluated.
    fn state(&self, key: AuxiliaryKey, assignment: &VariableAssignment) -> Result<AuxiliaryState, QheError> {
        let k: bool = key
            .parts()
            .iter()
            .try_fold(false, |acc, part| Ok::<bool, QheError>(acc ^ self.secret(part)?))?;
        let s: bool = key.term.evaluate(assignment)?;
        Ok(AuxiliaryState { key, k, s })
    }
}

/// Eagerly derived secrets of every triple of a [`TSets`]. Strict: a key
/// outside the T-sets has no state.
#[derive(Clone, Debug)]
pub struct AuxiliaryStateBank {
    num_wires: usize,
    t_depth: usize,
    secrets: Map<AuxiliaryKey, bool>,
}

impl AuxiliaryStateBank {
    pub fn build(tsets: &TSets) -> Result<Self, QheError> {
        let num_wires: usize = tsets.num_wires();
        let keys: Vec<AuxiliaryKey> = tsets
            .iter()
            .flat_map(|tset| {
                (0..num_wires).flat_map(move |wire| {
                    tset.iter()
                        .map(move |term| AuxiliaryKey::new(tset.layer(), wire, term.clone()))
                })
            })
            .collect();

        let secrets: Vec<(AuxiliaryKey, bool)> = keys
            .into_par_iter()
            .map(|key| derive_secret(&key).map(|k| (key, k)))
            .collect::<Result<_, _>>()?;

        log::debug!(
            "auxiliary-state bank (n={}, L={}): {} states",
            num_wires,
            tsets.t_depth(),
            secrets.len()
        );

        Ok(AuxiliaryStateBank {
            num_wires,
            t_depth: tsets.t_depth(),
            secrets: secrets.into_iter().collect(),
        })
    }

    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    pub fn t_depth(&self) -> usize {
        self.t_depth
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    pub fn get(&self, key: &AuxiliaryKey) -> Option<bool> {
        self.secrets.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AuxiliaryKey, &bool)> {
        self.secrets.iter()
    }
}

impl AuxiliaryStateSource for AuxiliaryStateBank {
    fn secret(&self, key: &AuxiliaryKey) -> Result<bool, QheError> {
        self.get(key)
            .ok_or_else(|| QheError::GadgetMeasurement(format!("no auxiliary state for {key}")))
    }
}

/// Lazy source deriving any key's secret on request, reading a precomputed
/// bank first when one is attached. Unlike the bank it never reports a
/// missing state.
#[derive(Clone, Debug, Default)]
pub struct OnDemandStates {
    bank: Option<Arc<AuxiliaryStateBank>>,
}

impl OnDemandStates {
    pub fn new() -> Self {
        OnDemandStates::default()
    }

    pub fn with_bank(bank: Arc<AuxiliaryStateBank>) -> Self {
        OnDemandStates { bank: Some(bank) }
    }
}

impl AuxiliaryStateSource for OnDemandStates {
    fn secret(&self, key: &AuxiliaryKey) -> Result<bool, QheError> {
        match self.bank.as_ref().and_then(|bank| bank.get(key)) {
            Some(k) => Ok(k),
            None => derive_secret(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{
        AuxiliaryKey, AuxiliaryState, AuxiliaryStateBank, AuxiliaryStateSource, OnDemandStates, derive_secret,
        generate,
    };
    use crate::{
        assignment::VariableAssignment, error::QheError, gate::Gate, term::Term, tset::TSets, variable::Variable,
    };

    #[test]
    fn secret_is_deterministic_and_key_sensitive() {
        let key: AuxiliaryKey = AuxiliaryKey::new(1, 0, Term::var(Variable::PadX(0)));
        assert_eq!(derive_secret(&key), derive_secret(&key.clone()));

        // Over many keys both bit values occur.
        let secrets: Vec<bool> = (0..64)
            .map(|wire| derive_secret(&AuxiliaryKey::new(1, wire, Term::var(Variable::PadX(0)))).unwrap())
            .collect();
        assert!(secrets.iter().any(|&k| k));
        assert!(secrets.iter().any(|&k| !k));
    }

    #[test]
    fn generate_evaluates_the_term() {
        let assignment: VariableAssignment = VariableAssignment::from_pads(&[true], &[false]).unwrap();
        let term: Term = Term::var(Variable::PadX(0));
        let state = generate(1, 0, &term, &assignment).unwrap();
        assert!(state.s);
        assert_eq!(state.k, derive_secret(&state.key).unwrap());
        assert_eq!(state.phase(), !state.k);
        let want: Vec<Gate> = if state.phase() {
            vec![Gate::H(0), Gate::Z(0)]
        } else {
            vec![Gate::H(0)]
        };
        assert_eq!(state.preparation(), want);
    }

    #[test]
    fn generate_needs_bound_variables() {
        let assignment: VariableAssignment = VariableAssignment::new();
        assert_eq!(
            generate(1, 0, &Term::var(Variable::PadZ(0)), &assignment),
            Err(QheError::UnboundVariable(Variable::PadZ(0)))
        );
    }

    #[test]
    fn bank_covers_every_triple() {
        let tsets: TSets = TSets::build(3, 2).unwrap();
        let bank: AuxiliaryStateBank = AuxiliaryStateBank::build(&tsets).unwrap();
        assert_eq!(bank.len(), 135);
        assert_eq!(bank.len(), tsets.auxiliary_state_count());
    }

    #[test]
    fn bank_is_strict_and_on_demand_agrees() {
        let tsets: TSets = TSets::build(2, 2).unwrap();
        let bank: Arc<AuxiliaryStateBank> = Arc::new(AuxiliaryStateBank::build(&tsets).unwrap());
        let on_demand: OnDemandStates = OnDemandStates::new();
        let backed: OnDemandStates = OnDemandStates::with_bank(bank.clone());

        bank.iter().for_each(|(key, &k)| {
            assert_eq!(on_demand.secret(key), Ok(k));
            assert_eq!(backed.secret(key), Ok(k));
        });

        let outside: AuxiliaryKey = AuxiliaryKey::new(
            1,
            0,
            &Term::var(Variable::PadX(0)) ^ &Term::var(Variable::PadX(1)),
        );
        assert!(matches!(bank.secret(&outside), Err(QheError::GadgetMeasurement(_))));
        assert_eq!(on_demand.secret(&outside), derive_secret(&outside));
        assert_eq!(backed.secret(&outside), derive_secret(&outside));
    }

    #[test]
    fn parts_split_monomials_and_skip_the_constant() {
        let a0: Term = Term::var(Variable::PadX(0));
        let b1: Term = Term::var(Variable::PadZ(1));
        let key: AuxiliaryKey = AuxiliaryKey::new(2, 1, &(&a0 ^ &b1) ^ &Term::one());
        assert_eq!(
            key.parts(),
            vec![AuxiliaryKey::new(2, 1, a0.clone()), AuxiliaryKey::new(2, 1, b1)]
        );
        assert_eq!(AuxiliaryKey::new(1, 0, a0.clone()).parts(), vec![AuxiliaryKey::new(1, 0, a0)]);
        assert!(AuxiliaryKey::new(1, 0, Term::one()).parts().is_empty());
    }

    #[test]
    fn bank_assembles_states_from_parts() {
        let tsets: TSets = TSets::build(2, 1).unwrap();
        let bank: AuxiliaryStateBank = AuxiliaryStateBank::build(&tsets).unwrap();
        let assignment: VariableAssignment = VariableAssignment::from_pads(&[true, false], &[false, false]).unwrap();

        let a0: Term = Term::var(Variable::PadX(0));
        let a1: Term = Term::var(Variable::PadX(1));
        let key: AuxiliaryKey = AuxiliaryKey::new(1, 0, &a0 ^ &a1);
        let state: AuxiliaryState = bank.state(key.clone(), &assignment).unwrap();

        let k0: bool = bank.get(&AuxiliaryKey::new(1, 0, a0)).unwrap();
        let k1: bool = bank.get(&AuxiliaryKey::new(1, 0, a1)).unwrap();
        assert_eq!(state.k, k0 ^ k1);
        assert!(state.s);
        assert_eq!(OnDemandStates::new().state(key, &assignment), Ok(state));
    }

    #[test]
    fn bank_rejects_a_part_outside_the_tsets() {
        let tsets: TSets = TSets::build(2, 2).unwrap();
        let bank: AuxiliaryStateBank = AuxiliaryStateBank::build(&tsets).unwrap();
        let assignment: VariableAssignment = VariableAssignment::from_pads(&[true, false], &[false, false]).unwrap();

        let secret: Term = Term::var(Variable::Secret { wire: 0, layer: 1 });
        let key: AuxiliaryKey = AuxiliaryKey::new(2, 0, &Term::var(Variable::PadX(0)) ^ &secret);
        assert!(matches!(bank.state(key.clone(), &assignment), Err(QheError::GadgetMeasurement(_))));

        // The on-demand source derives the missing part; the term still needs
        // every variable bound.
        assert_eq!(
            OnDemandStates::new().state(key, &assignment),
            Err(QheError::UnboundVariable(Variable::Secret { wire: 0, layer: 1 }))
        );
    }
}
