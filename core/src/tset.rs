//! Per-layer sets of the terms that can occur in pad coefficients.
//!
//! Layer 1 holds the `2n` initial pad variables. Layer `l` copies layer
//! `l-1` and adds, as cross terms tagged with `l`,
//!
//! - the product of every unordered pair of distinct terms of layer `l-1`,
//! - the product of every term of layer `l-1` with the gadget secret
//!   `k_{i,l-1}` of every wire `i`.
//!
//! So `|T[1]| = 2n` and `|T[l]| = |T[l-1]| + C(|T[l-1]|, 2) + n·|T[l-1]|`.
//! Layer `l` depends only on layer `l-1` and `n`, never on the total depth,
//! which is what lets [`TSetCache`] answer shallower requests by truncation.

use std::sync::Arc;

use auxqhe_utils::Map;
use rayon::prelude::*;

use crate::{error::QheError, term::Term, variable::Variable};

/// Ordered, duplicate-free set of terms of one T layer.
#[derive(Clone, Debug)]
pub struct TSet {
    layer: usize,
    terms: Vec<Term>,
    index: Map<Term, usize>,
}

impl TSet {
    fn empty(layer: usize) -> Self {
        TSet {
            layer,
            terms: Vec::new(),
            index: Map::new(),
        }
    }

    fn insert(&mut self, term: Term) -> bool {
        if self.index.contains_key(&term) {
            return false;
        }
        self.index.insert(term.clone(), self.terms.len());
        self.terms.push(term);
        true
    }

    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in generation order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter()
    }

    pub fn contains(&self, term: &Term) -> bool {
        self.index.contains_key(term)
    }

    fn first(num_wires: usize) -> Self {
        let mut tset: TSet = TSet::empty(1);
        (0..num_wires).for_each(|i| {
            tset.insert(Term::var(Variable::PadX(i)));
            tset.insert(Term::var(Variable::PadZ(i)));
        });
        tset
    }

    fn next(&self, num_wires: usize) -> Self {
        let layer: usize = self.layer + 1;
        let prev: &[Term] = &self.terms;

        let pairs: Vec<Vec<Term>> = (0..prev.len())
            .into_par_iter()
            .map(|i| {
                prev[i + 1..]
                    .iter()
                    .map(|t| Term::cross(layer, prev[i].clone(), t.clone()))
                    .collect()
            })
            .collect();

        let secrets: Vec<Vec<Term>> = (0..num_wires)
            .into_par_iter()
            .map(|wire| {
                let k: Term = Term::var(Variable::Secret {
                    wire,
                    layer: self.layer,
                });
                prev.iter()
                    .map(|t| Term::cross(layer, k.clone(), t.clone()))
                    .collect()
            })
            .collect();

        let mut next: TSet = TSet {
            layer,
            terms: self.terms.clone(),
            index: self.index.clone(),
        };
        pairs
            .into_iter()
            .chain(secrets)
            .flatten()
            .for_each(|term| {
                next.insert(term);
            });

        log::debug!("t-set layer {}: {} terms", layer, next.len());
        next
    }
}

/// T-sets of layers `1..=t_depth` for `num_wires` wires.
#[derive(Clone, Debug)]
pub struct TSets {
    num_wires: usize,
    layers: Vec<TSet>,
}

impl TSets {
    pub fn build(num_wires: usize, t_depth: usize) -> Result<Self, QheError> {
        if num_wires == 0 {
            return Err(QheError::InvalidConfiguration(
                "a circuit needs at least one wire".to_string(),
            ));
        }
        let mut tsets: TSets = TSets {
            num_wires,
            layers: Vec::with_capacity(t_depth),
        };
        tsets.extend_to(t_depth);
        Ok(tsets)
    }

    /// Builds the missing layers up to `t_depth`.
    fn extend_to(&mut self, t_depth: usize) {
        while self.layers.len() < t_depth {
            let next: TSet = match self.layers.last() {
                None => TSet::first(self.num_wires),
                Some(last) => last.next(self.num_wires),
            };
            self.layers.push(next);
        }
    }

    /// Copy holding only layers `1..=t_depth`.
    pub fn truncated(&self, t_depth: usize) -> TSets {
        TSets {
            num_wires: self.num_wires,
            layers: self.layers.iter().take(t_depth).cloned().collect(),
        }
    }

    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    pub fn t_depth(&self) -> usize {
        self.layers.len()
    }

    /// T-set of layer `layer`, 1-based.
    pub fn layer(&self, layer: usize) -> Option<&TSet> {
        layer.checked_sub(1).and_then(|l| self.layers.get(l))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TSet> {
        self.layers.iter()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.layers.iter().map(TSet::len).collect()
    }

    /// Number of (layer, wire, term) triples, one auxiliary state each.
    pub fn auxiliary_state_count(&self) -> usize {
        self.num_wires * self.layers.iter().map(TSet::len).sum::<usize>()
    }
}

/// Owned cache of [`TSets`] keyed by `(num_wires, t_depth)`.
#[derive(Debug, Default)]
pub struct TSetCache {
    entries: Map<(usize, usize), Arc<TSets>>,
}

impl TSetCache {
    pub fn new() -> Self {
        TSetCache::default()
    }

    pub fn get(&mut self, num_wires: usize, t_depth: usize) -> Result<Arc<TSets>, QheError> {
        if let Some(tsets) = self.entries.get(&(num_wires, t_depth)) {
            return Ok(tsets.clone());
        }

        let deepest: Option<Arc<TSets>> = self
            .entries
            .iter()
            .filter(|((n, _), _)| *n == num_wires)
            .max_by_key(|((_, l), _)| *l)
            .map(|(_, tsets)| tsets.clone());

        let tsets: TSets = match deepest {
            Some(cached) if cached.t_depth() >= t_depth => cached.truncated(t_depth),
            Some(cached) => {
                let mut tsets: TSets = (*cached).clone();
                tsets.extend_to(t_depth);
                tsets
            }
            None => TSets::build(num_wires, t_depth)?,
        };

        let tsets: Arc<TSets> = Arc::new(tsets);
        self.entries.insert((num_wires, t_depth), tsets.clone());
        Ok(tsets)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
