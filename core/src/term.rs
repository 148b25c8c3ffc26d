//! GF(2) polynomials over [`Variable`]s in algebraic normal form.
//!
//! A [`Term`] is a XOR of [`Monomial`]s and a monomial an AND of [`Atom`]s.
//! Both levels are ordered sets, so the representation is canonical by
//! construction: `x·x = x` inside a monomial and `m ⊕ m = 0` across
//! monomials. The empty monomial is the constant 1, the empty term the
//! constant 0.
//!
//! An atom is either a variable or a [`CrossTerm`], the layer-tagged product
//! of two terms recorded when a T-set is built. A cross term evaluates to the
//! AND of its factors, but its identity also carries the layer that created
//! it.

use std::{
    collections::BTreeSet,
    fmt,
    io::{Result as IoResult, Write},
    ops::{BitAnd, BitXor, BitXorAssign},
};

use byteorder::{LittleEndian, WriteBytesExt};
use itertools::Itertools;

use crate::{assignment::VariableAssignment, encoding::WriterTo, error::QheError, variable::Variable};

const TAG_ATOM_VAR: u8 = 0;
const TAG_ATOM_CROSS: u8 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Atom {
    Var(Variable),
    Cross(Box<CrossTerm>),
}

/// Product `left · right` generated at T layer `layer`, with `left <= right`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrossTerm {
    layer: usize,
    left: Term,
    right: Term,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Monomial {
    atoms: BTreeSet<Atom>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    monomials: BTreeSet<Monomial>,
}

impl Atom {
    pub fn evaluate(&self, assignment: &VariableAssignment) -> Result<bool, QheError> {
        match self {
            Atom::Var(variable) => assignment.value(variable),
            Atom::Cross(cross) => cross.evaluate(assignment),
        }
    }

    fn collect_variables(&self, out: &mut BTreeSet<Variable>) {
        match self {
            Atom::Var(variable) => {
                out.insert(*variable);
            }
            Atom::Cross(cross) => {
                cross.left.collect_variables(out);
                cross.right.collect_variables(out);
            }
        }
    }
}

impl CrossTerm {
    pub fn new(layer: usize, a: Term, b: Term) -> Self {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        CrossTerm { layer, left, right }
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn factors(&self) -> (&Term, &Term) {
        #[cfg(debug_assertions)]
        {
            assert!(self.left <= self.right, "cross-term factors out of order");
        }
        (&self.left, &self.right)
    }

    pub fn evaluate(&self, assignment: &VariableAssignment) -> Result<bool, QheError> {
        let left: bool = self.left.evaluate(assignment)?;
        let right: bool = self.right.evaluate(assignment)?;
        Ok(left & right)
    }
}

impl Monomial {
    /// The empty product, i.e. the constant 1.
    pub fn one() -> Self {
        Monomial::default()
    }

    pub fn from_atoms<I: IntoIterator<Item = Atom>>(atoms: I) -> Self {
        Monomial {
            atoms: atoms.into_iter().collect(),
        }
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    pub fn is_one(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn degree(&self) -> usize {
        self.atoms.len()
    }

    pub fn product(&self, other: &Monomial) -> Monomial {
        Monomial {
            atoms: self.atoms.union(&other.atoms).cloned().collect(),
        }
    }

    /// AND of every atom. Every atom is evaluated, so an unbound variable is
    /// reported even when another factor is 0.
    pub fn evaluate(&self, assignment: &VariableAssignment) -> Result<bool, QheError> {
        let mut value: bool = true;
        for atom in self.atoms.iter() {
            value &= atom.evaluate(assignment)?;
        }
        Ok(value)
    }
}

impl Term {
    pub fn zero() -> Self {
        Term::default()
    }

    pub fn one() -> Self {
        Term::from_monomial(Monomial::one())
    }

    pub fn var(variable: Variable) -> Self {
        Term::atom(Atom::Var(variable))
    }

    pub fn atom(atom: Atom) -> Self {
        Term::from_monomial(Monomial::from_atoms([atom]))
    }

    pub fn from_monomial(monomial: Monomial) -> Self {
        Term {
            monomials: BTreeSet::from([monomial]),
        }
    }

    /// Single-atom term holding the layer-tagged product `a · b`.
    pub fn cross(layer: usize, a: Term, b: Term) -> Self {
        Term::atom(Atom::Cross(Box::new(CrossTerm::new(layer, a, b))))
    }

    /// XOR of every term yielded by `terms`.
    pub fn sum<I: IntoIterator<Item = Term>>(terms: I) -> Self {
        terms.into_iter().fold(Term::zero(), |mut acc, term| {
            acc ^= &term;
            acc
        })
    }

    /// Canonical term of a XOR of AND-products, each given as a list of atoms.
    pub fn canonicalize<I, P>(products: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = Atom>,
    {
        let mut term: Term = Term::zero();
        products
            .into_iter()
            .for_each(|product| term.toggle(Monomial::from_atoms(product)));
        term
    }

    fn toggle(&mut self, monomial: Monomial) {
        if !self.monomials.remove(&monomial) {
            self.monomials.insert(monomial);
        }
    }

    pub fn xor(&self, other: &Term) -> Term {
        Term {
            monomials: self
                .monomials
                .symmetric_difference(&other.monomials)
                .cloned()
                .collect(),
        }
    }

    pub fn and(&self, other: &Term) -> Term {
        let mut res: Term = Term::zero();
        for a in self.monomials.iter() {
            for b in other.monomials.iter() {
                res.toggle(a.product(b));
            }
        }
        res
    }

    /// XOR of every monomial, all of which are evaluated.
    pub fn evaluate(&self, assignment: &VariableAssignment) -> Result<bool, QheError> {
        let mut value: bool = false;
        for monomial in self.monomials.iter() {
            value ^= monomial.evaluate(assignment)?;
        }
        Ok(value)
    }

    /// Partial evaluation: every variable `value` maps to a bit is replaced by
    /// that constant. Cross terms are kept whole.
    pub fn substitute<F>(&self, value: F) -> Term
    where
        F: Fn(&Variable) -> Option<bool>,
    {
        let mut res: Term = Term::zero();
        'monomials: for monomial in self.monomials.iter() {
            let mut atoms: BTreeSet<Atom> = BTreeSet::new();
            for atom in monomial.atoms.iter() {
                match atom {
                    Atom::Var(variable) => match value(variable) {
                        Some(true) => {}
                        Some(false) => continue 'monomials,
                        None => {
                            atoms.insert(atom.clone());
                        }
                    },
                    Atom::Cross(_) => {
                        atoms.insert(atom.clone());
                    }
                }
            }
            res.toggle(Monomial { atoms });
        }
        res
    }

    pub fn monomials(&self) -> impl Iterator<Item = &Monomial> {
        self.monomials.iter()
    }

    pub fn is_zero(&self) -> bool {
        self.monomials.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.monomials.len() == 1 && self.monomials.iter().all(Monomial::is_one)
    }

    /// Largest number of atoms in a monomial; cross terms count as one atom.
    pub fn degree(&self) -> usize {
        self.monomials.iter().map(Monomial::degree).max().unwrap_or(0)
    }

    /// Every variable referenced, including inside cross terms.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut out: BTreeSet<Variable> = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<Variable>) {
        self.monomials
            .iter()
            .flat_map(|monomial| monomial.atoms.iter())
            .for_each(|atom| atom.collect_variables(out));
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Self {
        Term::var(variable)
    }
}

impl BitXor<&Term> for &Term {
    type Output = Term;

    fn bitxor(self, rhs: &Term) -> Term {
        self.xor(rhs)
    }
}

impl BitAnd<&Term> for &Term {
    type Output = Term;

    fn bitand(self, rhs: &Term) -> Term {
        self.and(rhs)
    }
}

impl BitXorAssign<&Term> for Term {
    fn bitxor_assign(&mut self, rhs: &Term) {
        rhs.monomials
            .iter()
            .for_each(|monomial| self.toggle(monomial.clone()));
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Var(variable) => write!(f, "{variable}"),
            Atom::Cross(cross) => write!(f, "[{}]·[{}]@{}", cross.left, cross.right, cross.layer),
        }
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        write!(f, "{}", self.atoms.iter().join("·"))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        write!(f, "{}", self.monomials.iter().join(" ⊕ "))
    }
}

impl WriterTo for Atom {
    fn write_to<W: Write>(&self, writer: &mut W) -> IoResult<()> {
        match self {
            Atom::Var(variable) => {
                writer.write_u8(TAG_ATOM_VAR)?;
                variable.write_to(writer)
            }
            Atom::Cross(cross) => {
                writer.write_u8(TAG_ATOM_CROSS)?;
                writer.write_u64::<LittleEndian>(cross.layer as u64)?;
                cross.left.write_to(writer)?;
                cross.right.write_to(writer)
            }
        }
    }
}

impl WriterTo for Monomial {
    fn write_to<W: Write>(&self, writer: &mut W) -> IoResult<()> {
        writer.write_u64::<LittleEndian>(self.atoms.len() as u64)?;
        for atom in self.atoms.iter() {
            atom.write_to(writer)?;
        }
        Ok(())
    }
}

impl WriterTo for Term {
    fn write_to<W: Write>(&self, writer: &mut W) -> IoResult<()> {
        writer.write_u64::<LittleEndian>(self.monomials.len() as u64)?;
        for monomial in self.monomials.iter() {
            monomial.write_to(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Atom, Term};
    use crate::{assignment::VariableAssignment, encoding::to_bytes, error::QheError, variable::Variable};

    fn a(i: usize) -> Term {
        Term::var(Variable::PadX(i))
    }

    fn b(i: usize) -> Term {
        Term::var(Variable::PadZ(i))
    }

    #[test]
    fn xor_cancels_pairs() {
        let t: Term = &a(0) ^ &b(1);
        assert!((&t ^ &t).is_zero());
        assert_eq!(&t ^ &b(1), a(0));
        assert_eq!(Term::sum([a(0), a(0), a(0)]), a(0));
    }

    #[test]
    fn and_is_idempotent_and_distributes() {
        assert_eq!(&a(0) & &a(0), a(0));
        assert_eq!(&a(0) & &Term::one(), a(0));
        assert!((&a(0) & &Term::zero()).is_zero());

        let lhs: Term = &a(0) & &(&a(1) ^ &b(0));
        let rhs: Term = &(&a(0) & &a(1)) ^ &(&a(0) & &b(0));
        assert_eq!(lhs, rhs);

        // (a_0 ⊕ 1)·a_0 = 0
        assert!((&(&a(0) ^ &Term::one()) & &a(0)).is_zero());
    }

    #[test]
    fn canonicalize_sorts_and_cancels() {
        let x: Atom = Atom::Var(Variable::PadX(0));
        let y: Atom = Atom::Var(Variable::PadZ(1));
        let t: Term = Term::canonicalize(vec![
            vec![y.clone(), x.clone()],
            vec![x.clone()],
            vec![x.clone(), y.clone(), x.clone()],
        ]);
        assert_eq!(t, a(0));
        assert!(Term::canonicalize(Vec::<Vec<Atom>>::new()).is_zero());
        assert!(Term::canonicalize([Vec::<Atom>::new()]).is_one());
    }

    #[test]
    fn cross_terms_are_layer_tagged() {
        let c1: Term = Term::cross(2, a(0), b(0));
        let c2: Term = Term::cross(2, b(0), a(0));
        let c3: Term = Term::cross(3, a(0), b(0));
        assert_eq!(c1, c2);
        assert_ne!(c1, c3);
        assert_ne!(c1, &a(0) & &b(0));
        assert_eq!(c1.degree(), 1);
        assert_eq!(
            c1.variables().into_iter().collect::<Vec<_>>(),
            vec![Variable::PadX(0), Variable::PadZ(0)]
        );
        assert_ne!(to_bytes(&c1).unwrap(), to_bytes(&c3).unwrap());
    }

    #[test]
    fn evaluate() {
        let assignment: VariableAssignment = VariableAssignment::from_pads(&[true, false], &[true, true]).unwrap();
        let t: Term = &(&a(0) & &b(1)) ^ &a(1);
        assert_eq!(t.evaluate(&assignment), Ok(true));
        assert_eq!(Term::cross(2, a(0), a(1)).evaluate(&assignment), Ok(false));
        assert_eq!(Term::one().evaluate(&assignment), Ok(true));
        assert_eq!(Term::zero().evaluate(&assignment), Ok(false));
    }

    #[test]
    fn evaluate_reports_unbound_even_behind_zero_factor() {
        let assignment: VariableAssignment = VariableAssignment::from_pads(&[false], &[false]).unwrap();
        let k: Variable = Variable::Secret { wire: 0, layer: 1 };
        let t: Term = &a(0) & &Term::var(k);
        assert_eq!(t.evaluate(&assignment), Err(QheError::UnboundVariable(k)));
    }

    #[test]
    fn display() {
        let k: Term = Term::var(Variable::Secret { wire: 0, layer: 1 });
        assert_eq!((&a(0) ^ &(&b(1) & &k)).to_string(), "a_0 ⊕ b_1·k_{0,1}");
        assert_eq!(Term::zero().to_string(), "0");
        assert_eq!((&a(0) ^ &Term::one()).to_string(), "1 ⊕ a_0");
        assert_eq!(Term::cross(2, b(0), a(0)).to_string(), "[a_0]·[b_0]@2");
    }

    #[test]
    fn substitute_fixes_chosen_variables() {
        let c: Variable = Variable::Outcome { wire: 0, layer: 1 };
        let t: Term = &(&a(0) ^ &Term::var(c)) ^ &(&b(0) & &Term::var(c));
        let outcome = |bit: bool| move |variable: &Variable| (*variable == c).then_some(bit);

        assert_eq!(t.substitute(outcome(false)), a(0));
        assert_eq!(t.substitute(outcome(true)), &(&a(0) ^ &Term::one()) ^ &b(0));
        assert_eq!(t.substitute(|_| None), t);

        // 1 ⊕ c with c = 1 cancels to 0.
        assert!((&Term::one() ^ &Term::var(c)).substitute(outcome(true)).is_zero());

        let cross: Term = Term::cross(2, Term::var(c), a(0));
        assert_eq!(cross.substitute(outcome(false)), cross);
    }
}
