use crate::{error::QheError, layering::LayeredCircuit};

/// Wire count `n` and T-depth bound `L` of a key generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QheParameters {
    pub num_wires: usize,
    pub t_depth: usize,
}

impl QheParameters {
    pub fn new(num_wires: usize, t_depth: usize) -> Self {
        QheParameters { num_wires, t_depth }
    }

    pub fn validate(&self) -> Result<(), QheError> {
        if self.num_wires == 0 {
            return Err(QheError::InvalidConfiguration(
                "a circuit needs at least one wire".to_string(),
            ));
        }
        Ok(())
    }

    /// Rejects circuits on another wire count or with more T layers than `L`.
    pub fn check_circuit(&self, circuit: &LayeredCircuit) -> Result<(), QheError> {
        if circuit.num_wires() != self.num_wires {
            return Err(QheError::InvalidConfiguration(format!(
                "circuit has {} wires, parameters {}",
                circuit.num_wires(),
                self.num_wires
            )));
        }
        if circuit.t_depth() > self.t_depth {
            return Err(QheError::InvalidConfiguration(format!(
                "circuit needs {} T layers, parameters allow {}",
                circuit.t_depth(),
                self.t_depth
            )));
        }
        Ok(())
    }

    pub fn check_pads(&self, pad_x: &[bool], pad_z: &[bool]) -> Result<(), QheError> {
        if pad_x.len() != self.num_wires || pad_z.len() != self.num_wires {
            return Err(QheError::InvalidConfiguration(format!(
                "pads of length ({}, {}) for {} wires",
                pad_x.len(),
                pad_z.len(),
                self.num_wires
            )));
        }
        Ok(())
    }
}
