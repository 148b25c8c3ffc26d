use crate::variable::Variable;

/// Every way an AUX-QHE call can be rejected. None of them is transient.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum QheError {
    #[error("variable {0} is not bound")]
    UnboundVariable(Variable),

    #[error("unsupported gate `{kind}` on wires {wires:?}")]
    UnsupportedGate { kind: String, wires: Vec<usize> },

    #[error("gadget measurement failed: {0}")]
    GadgetMeasurement(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no ciphertext for variable {0}")]
    UnknownVariable(Variable),

    #[error("variable {variable} is already bound to {bound}")]
    ConflictingBinding { variable: Variable, bound: bool },

    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl From<std::io::Error> for QheError {
    fn from(err: std::io::Error) -> Self {
        QheError::Encoding(err.to_string())
    }
}
