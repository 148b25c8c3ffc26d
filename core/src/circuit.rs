use std::fmt;

use crate::{auxiliary::AuxiliaryKey, gate::Gate, variable::Variable};

/// Operation handed to the circuit backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataOp {
    Gate(Gate),
    /// Teleportation entangler between a data wire and auxiliary qubit `aux`.
    Entangle { wire: usize, aux: usize },
    /// Measures auxiliary qubit `aux`; the result is the bit of `outcome`.
    MeasureAux { aux: usize, outcome: Variable },
    /// Phase correction on `wire` conditioned on `outcome`.
    Correct { wire: usize, outcome: Variable },
}

impl fmt::Display for DataOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOp::Gate(gate) => write!(f, "{gate}"),
            DataOp::Entangle { wire, aux } => write!(f, "entangle(q{wire}, aux{aux})"),
            DataOp::MeasureAux { aux, outcome } => write!(f, "measure(aux{aux}) -> {outcome}"),
            DataOp::Correct { wire, outcome } => write!(f, "s(q{wire}) if {outcome}"),
        }
    }
}

/// Augmented gate sequence and the auxiliary states it consumes, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataCircuit {
    num_wires: usize,
    ops: Vec<DataOp>,
    auxiliary: Vec<AuxiliaryKey>,
}

impl DataCircuit {
    pub fn new(num_wires: usize) -> Self {
        DataCircuit {
            num_wires,
            ..Default::default()
        }
    }

    pub fn push_gate(&mut self, gate: Gate) {
        self.ops.push(DataOp::Gate(gate));
    }

    /// Appends the T gadget on `wire` consuming the state of `key`.
    pub fn push_gadget(&mut self, wire: usize, key: AuxiliaryKey, outcome: Variable) -> usize {
        let aux: usize = self.auxiliary.len();
        self.auxiliary.push(key);
        self.ops.push(DataOp::Gate(Gate::T(wire)));
        self.ops.push(DataOp::Entangle { wire, aux });
        self.ops.push(DataOp::MeasureAux { aux, outcome });
        self.ops.push(DataOp::Correct { wire, outcome });
        aux
    }

    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    pub fn ops(&self) -> &[DataOp] {
        &self.ops
    }

    pub fn auxiliary_keys(&self) -> &[AuxiliaryKey] {
        &self.auxiliary
    }

    pub fn num_auxiliary(&self) -> usize {
        self.auxiliary.len()
    }

    /// Logical and pad gates, without the gadget plumbing.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.ops.iter().filter_map(|op| match op {
            DataOp::Gate(gate) => Some(gate),
            _ => None,
        })
    }
}

impl fmt::Display for DataCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in self.ops.iter() {
            writeln!(f, "{op}")?;
        }
        Ok(())
    }
}
