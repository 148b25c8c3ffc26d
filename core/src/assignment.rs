use auxqhe_sampling::Source;
use auxqhe_utils::Map;

use crate::{error::QheError, variable::Variable};

/// Monotone map from variables to bits.
///
/// Starts from the caller's pad bits and only ever grows: binding a variable
/// again to the same bit is a no-op, to the other bit an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableAssignment {
    values: Map<Variable, bool>,
}

impl VariableAssignment {
    pub fn new() -> Self {
        VariableAssignment::default()
    }

    /// Binds `a_i = pad_x[i]` and `b_i = pad_z[i]`.
    pub fn from_pads(pad_x: &[bool], pad_z: &[bool]) -> Result<Self, QheError> {
        if pad_x.len() != pad_z.len() {
            return Err(QheError::InvalidConfiguration(format!(
                "X-pad has {} bits but Z-pad has {}",
                pad_x.len(),
                pad_z.len()
            )));
        }
        let mut values: Map<Variable, bool> = Map::with_capacity(2 * pad_x.len());
        pad_x.iter().enumerate().for_each(|(i, &bit)| {
            values.insert(Variable::PadX(i), bit);
        });
        pad_z.iter().enumerate().for_each(|(i, &bit)| {
            values.insert(Variable::PadZ(i), bit);
        });
        Ok(VariableAssignment { values })
    }

    /// Uniform initial pads for `num_wires` wires.
    pub fn sample_pads(num_wires: usize, source: &mut Source) -> Self {
        let pad_x: Vec<bool> = source.next_bits(num_wires);
        let pad_z: Vec<bool> = source.next_bits(num_wires);
        let mut values: Map<Variable, bool> = Map::with_capacity(2 * num_wires);
        (0..num_wires).for_each(|i| {
            values.insert(Variable::PadX(i), pad_x[i]);
            values.insert(Variable::PadZ(i), pad_z[i]);
        });
        VariableAssignment { values }
    }

    pub fn bind(&mut self, variable: Variable, bit: bool) -> Result<(), QheError> {
        match self.values.get(&variable) {
            Some(&bound) if bound != bit => Err(QheError::ConflictingBinding { variable, bound }),
            Some(_) => Ok(()),
            None => {
                self.values.insert(variable, bit);
                Ok(())
            }
        }
    }

    pub fn get(&self, variable: &Variable) -> Option<bool> {
        self.values.get(variable).copied()
    }

    /// Bound bit of `variable`, never a default.
    pub fn value(&self, variable: &Variable) -> Result<bool, QheError> {
        self.get(variable)
            .ok_or(QheError::UnboundVariable(*variable))
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.values.contains_key(variable)
    }

    /// X-pad and Z-pad bits of wires `0..num_wires`.
    pub fn pads(&self, num_wires: usize) -> Result<(Vec<bool>, Vec<bool>), QheError> {
        let pad_x: Vec<bool> = (0..num_wires)
            .map(|i| self.value(&Variable::PadX(i)))
            .collect::<Result<_, _>>()?;
        let pad_z: Vec<bool> = (0..num_wires)
            .map(|i| self.value(&Variable::PadZ(i)))
            .collect::<Result<_, _>>()?;
        Ok((pad_x, pad_z))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &bool)> {
        self.values.iter()
    }
}
