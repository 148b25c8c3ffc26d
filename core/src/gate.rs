use std::fmt;

use crate::error::QheError;

/// Gate as supplied by the caller: a case-insensitive name and its wires.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GateRecord {
    pub kind: String,
    pub wires: Vec<usize>,
}

impl GateRecord {
    pub fn new(kind: impl Into<String>, wires: impl Into<Vec<usize>>) -> Self {
        GateRecord {
            kind: kind.into(),
            wires: wires.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// One-time-pad X applied by the client.
    PadX(usize),
    /// One-time-pad Z applied by the client.
    PadZ(usize),
    H(usize),
    Cnot { control: usize, target: usize },
    S(usize),
    X(usize),
    Z(usize),
    T(usize),
}

impl Gate {
    /// Parses a record. Unknown names and wrong arities are unsupported gates;
    /// wire ranges are checked by the layering.
    pub fn parse(record: &GateRecord) -> Result<Gate, QheError> {
        let unsupported = || QheError::UnsupportedGate {
            kind: record.kind.clone(),
            wires: record.wires.clone(),
        };
        let single = |f: fn(usize) -> Gate| match record.wires.as_slice() {
            [wire] => Ok(f(*wire)),
            _ => Err(unsupported()),
        };
        match record.kind.to_ascii_lowercase().as_str() {
            "pad_x" => single(Gate::PadX),
            "pad_z" => single(Gate::PadZ),
            "h" => single(Gate::H),
            "s" => single(Gate::S),
            "x" => single(Gate::X),
            "z" => single(Gate::Z),
            "t" => single(Gate::T),
            "cx" | "cnot" => match record.wires.as_slice() {
                [control, target] => Ok(Gate::Cnot {
                    control: *control,
                    target: *target,
                }),
                _ => Err(unsupported()),
            },
            _ => Err(unsupported()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Gate::PadX(_) => "pad_x",
            Gate::PadZ(_) => "pad_z",
            Gate::H(_) => "h",
            Gate::Cnot { .. } => "cx",
            Gate::S(_) => "s",
            Gate::X(_) => "x",
            Gate::Z(_) => "z",
            Gate::T(_) => "t",
        }
    }

    pub fn wires(&self) -> Vec<usize> {
        match self {
            Gate::Cnot { control, target } => vec![*control, *target],
            Gate::PadX(wire)
            | Gate::PadZ(wire)
            | Gate::H(wire)
            | Gate::S(wire)
            | Gate::X(wire)
            | Gate::Z(wire)
            | Gate::T(wire) => vec![*wire],
        }
    }

    pub fn is_init(&self) -> bool {
        matches!(self, Gate::PadX(_) | Gate::PadZ(_))
    }

    pub fn is_t(&self) -> bool {
        matches!(self, Gate::T(_))
    }

    pub fn is_clifford(&self) -> bool {
        !self.is_init() && !self.is_t()
    }
}

impl From<Gate> for GateRecord {
    fn from(gate: Gate) -> Self {
        GateRecord::new(gate.name(), gate.wires())
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Cnot { control, target } => write!(f, "cx({control}, {target})"),
            _ => write!(f, "{}({})", self.name(), self.wires()[0]),
        }
    }
}
