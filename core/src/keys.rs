//! Encrypted key material and homomorphic evaluation of the final pads.

use auxqhe_backend::{SchemeDecrypt, SchemeEncrypt, SchemeEvaluate};
use auxqhe_sampling::Source;
use auxqhe_utils::Map;
use itertools::Itertools;
use rayon::prelude::*;

use crate::{
    assignment::VariableAssignment,
    error::QheError,
    pad::{FinalPadCoefficients, PadCoefficients},
    term::{Atom, Monomial, Term},
    variable::Variable,
};

/// Client-side ciphertexts of every bound variable.
#[derive(Clone, Debug)]
pub struct EncryptedKeyMaterial<C> {
    ciphertexts: Map<Variable, C>,
}

impl<C> EncryptedKeyMaterial<C> {
    pub fn new() -> Self {
        EncryptedKeyMaterial { ciphertexts: Map::new() }
    }

    /// Encrypts every variable of `assignment`, in variable order.
    pub fn encrypt<K>(encryptor: &K, assignment: &VariableAssignment, source: &mut Source) -> Self
    where
        K: SchemeEncrypt<Ciphertext = C>,
    {
        let ciphertexts: Map<Variable, C> = assignment
            .iter()
            .sorted_by_key(|(variable, _)| **variable)
            .map(|(variable, bit)| (*variable, encryptor.encrypt(*bit, source)))
            .collect();
        EncryptedKeyMaterial { ciphertexts }
    }

    pub fn insert(&mut self, variable: Variable, ct: C) -> Option<C> {
        self.ciphertexts.insert(variable, ct)
    }

    pub fn get(&self, variable: &Variable) -> Option<&C> {
        self.ciphertexts.get(variable)
    }

    pub fn ciphertext(&self, variable: &Variable) -> Result<&C, QheError> {
        self.get(variable).ok_or(QheError::UnknownVariable(*variable))
    }

    pub fn len(&self) -> usize {
        self.ciphertexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ciphertexts.is_empty()
    }
}

impl<C> Default for EncryptedKeyMaterial<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ciphertexts of the final X-pad and Z-pad bit of every wire.
#[derive(Clone, Debug)]
pub struct EncryptedPads<C> {
    wires: Vec<(C, C)>,
}

impl<C> EncryptedPads<C> {
    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    pub fn x(&self, wire: usize) -> Option<&C> {
        self.wires.get(wire).map(|(x, _)| x)
    }

    pub fn z(&self, wire: usize) -> Option<&C> {
        self.wires.get(wire).map(|(_, z)| z)
    }

    /// X-pad and Z-pad bits.
    pub fn decrypt<K>(&self, decryptor: &K) -> (Vec<bool>, Vec<bool>)
    where
        K: SchemeDecrypt<Ciphertext = C>,
    {
        self.wires
            .iter()
            .map(|(x, z)| (decryptor.decrypt(x), decryptor.decrypt(z)))
            .unzip()
    }
}

/// Server-side evaluator of pad polynomials: XOR maps to `add`, AND to
/// `multiply`. Only public operations are available to it.
pub struct FinalKeyEvaluator<'a, E: SchemeEvaluate> {
    evaluator: &'a E,
}

impl<'a, E> FinalKeyEvaluator<'a, E>
where
    E: SchemeEvaluate + Sync,
{
    pub fn new(evaluator: &'a E) -> Self {
        FinalKeyEvaluator { evaluator }
    }

    pub fn evaluate_term(&self, term: &Term, material: &EncryptedKeyMaterial<E::Ciphertext>) -> Result<E::Ciphertext, QheError> {
        let monomials: Vec<E::Ciphertext> = term
            .monomials()
            .map(|monomial| self.evaluate_monomial(monomial, material))
            .collect::<Result<_, _>>()?;
        Ok(self.evaluator.sum(&monomials))
    }

    fn evaluate_monomial(
        &self,
        monomial: &Monomial,
        material: &EncryptedKeyMaterial<E::Ciphertext>,
    ) -> Result<E::Ciphertext, QheError> {
        let atoms: Vec<E::Ciphertext> = monomial
            .atoms()
            .map(|atom| self.evaluate_atom(atom, material))
            .collect::<Result<_, _>>()?;
        Ok(self.evaluator.product(&atoms))
    }

    fn evaluate_atom(&self, atom: &Atom, material: &EncryptedKeyMaterial<E::Ciphertext>) -> Result<E::Ciphertext, QheError> {
        match atom {
            Atom::Var(variable) => material.ciphertext(variable).cloned(),
            Atom::Cross(cross) => {
                let (left, right) = cross.factors();
                let left: E::Ciphertext = self.evaluate_term(left, material)?;
                let right: E::Ciphertext = self.evaluate_term(right, material)?;
                Ok(self.evaluator.multiply(&left, &right))
            }
        }
    }

    /// Evaluates both coefficients of every wire, wires in parallel.
    pub fn evaluate(
        &self,
        pads: &FinalPadCoefficients,
        material: &EncryptedKeyMaterial<E::Ciphertext>,
    ) -> Result<EncryptedPads<E::Ciphertext>, QheError> {
        let wires: Vec<&PadCoefficients> = pads.iter().collect();
        let wires: Vec<(E::Ciphertext, E::Ciphertext)> = wires
            .par_iter()
            .map(|pads| {
                let (x, z) = rayon::join(
                    || self.evaluate_term(&pads.f_a, material),
                    || self.evaluate_term(&pads.f_b, material),
                );
                Ok((x?, z?))
            })
            .collect::<Result<_, QheError>>()?;
        Ok(EncryptedPads { wires })
    }
}

#[cfg(test)]
mod tests {
    use auxqhe_backend::clear::{ClearCiphertext, ClearScheme};
    use auxqhe_sampling::Source;

    use super::{EncryptedKeyMaterial, FinalKeyEvaluator};
    use crate::{assignment::VariableAssignment, error::QheError, term::Term, variable::Variable};

    #[test]
    fn term_maps_to_add_and_multiply() {
        let mut source: Source = Source::new([0u8; 32]);
        let assignment: VariableAssignment = VariableAssignment::from_pads(&[true, true], &[false, true]).unwrap();
        let material: EncryptedKeyMaterial<ClearCiphertext> =
            EncryptedKeyMaterial::encrypt(&ClearScheme, &assignment, &mut source);
        assert_eq!(material.len(), 4);

        let evaluator: FinalKeyEvaluator<ClearScheme> = FinalKeyEvaluator::new(&ClearScheme);
        let a0: Term = Term::var(Variable::PadX(0));
        let a1: Term = Term::var(Variable::PadX(1));
        let b0: Term = Term::var(Variable::PadZ(0));
        let b1: Term = Term::var(Variable::PadZ(1));

        let terms: [Term; 5] = [
            &(&a0 & &b1) ^ &b0,
            &a1 ^ &Term::one(),
            Term::zero(),
            Term::one(),
            Term::cross(2, a0.clone(), &b0 ^ &b1),
        ];
        terms.iter().for_each(|term| {
            assert_eq!(
                evaluator.evaluate_term(term, &material),
                Ok(ClearCiphertext(term.evaluate(&assignment).unwrap())),
                "{term}"
            );
        });
    }

    #[test]
    fn missing_ciphertext_is_unknown_variable() {
        let material: EncryptedKeyMaterial<ClearCiphertext> = EncryptedKeyMaterial::new();
        let evaluator: FinalKeyEvaluator<ClearScheme> = FinalKeyEvaluator::new(&ClearScheme);
        let k: Variable = Variable::Secret { wire: 1, layer: 2 };
        assert_eq!(
            evaluator.evaluate_term(&Term::var(k), &material),
            Err(QheError::UnknownVariable(k))
        );
    }
}
