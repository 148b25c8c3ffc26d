use std::{
    fmt,
    io::{Result, Write},
};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::encoding::WriterTo;

/// Named boolean unknown of a pad polynomial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    /// Initial X-pad bit `a_i`.
    PadX(usize),
    /// Initial Z-pad bit `b_i`.
    PadZ(usize),
    /// Gadget secret `k_{i,l}` of the T gate on wire `i` at T layer `l`.
    Secret { wire: usize, layer: usize },
    /// Gadget outcome `c_{i,l}`.
    Outcome { wire: usize, layer: usize },
}

const TAG_PAD_X: u8 = 0;
const TAG_PAD_Z: u8 = 1;
const TAG_SECRET: u8 = 2;
const TAG_OUTCOME: u8 = 3;

impl Variable {
    pub fn wire(&self) -> usize {
        match self {
            Variable::PadX(wire) | Variable::PadZ(wire) => *wire,
            Variable::Secret { wire, .. } | Variable::Outcome { wire, .. } => *wire,
        }
    }

    /// T layer that introduced the variable, `None` for initial pads.
    pub fn layer(&self) -> Option<usize> {
        match self {
            Variable::PadX(_) | Variable::PadZ(_) => None,
            Variable::Secret { layer, .. } | Variable::Outcome { layer, .. } => Some(*layer),
        }
    }

    pub fn is_pad(&self) -> bool {
        matches!(self, Variable::PadX(_) | Variable::PadZ(_))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::PadX(wire) => write!(f, "a_{wire}"),
            Variable::PadZ(wire) => write!(f, "b_{wire}"),
            Variable::Secret { wire, layer } => write!(f, "k_{{{wire},{layer}}}"),
            Variable::Outcome { wire, layer } => write!(f, "c_{{{wire},{layer}}}"),
        }
    }
}

impl WriterTo for Variable {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            Variable::PadX(wire) => {
                writer.write_u8(TAG_PAD_X)?;
                writer.write_u64::<LittleEndian>(*wire as u64)
            }
            Variable::PadZ(wire) => {
                writer.write_u8(TAG_PAD_Z)?;
                writer.write_u64::<LittleEndian>(*wire as u64)
            }
            Variable::Secret { wire, layer } => {
                writer.write_u8(TAG_SECRET)?;
                writer.write_u64::<LittleEndian>(*wire as u64)?;
                writer.write_u64::<LittleEndian>(*layer as u64)
            }
            Variable::Outcome { wire, layer } => {
                writer.write_u8(TAG_OUTCOME)?;
                writer.write_u64::<LittleEndian>(*wire as u64)?;
                writer.write_u64::<LittleEndian>(*layer as u64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Variable;
    use crate::encoding::to_bytes;

    #[test]
    fn display() {
        assert_eq!(Variable::PadX(0).to_string(), "a_0");
        assert_eq!(Variable::PadZ(3).to_string(), "b_3");
        assert_eq!(Variable::Secret { wire: 0, layer: 1 }.to_string(), "k_{0,1}");
        assert_eq!(Variable::Outcome { wire: 2, layer: 4 }.to_string(), "c_{2,4}");
    }

    #[test]
    fn encoding_separates_kinds() {
        let secret: Vec<u8> = to_bytes(&Variable::Secret { wire: 1, layer: 1 }).unwrap();
        let outcome: Vec<u8> = to_bytes(&Variable::Outcome { wire: 1, layer: 1 }).unwrap();
        assert_ne!(secret, outcome);
        assert_eq!(secret.len(), 17);
        assert_eq!(to_bytes(&Variable::PadX(7)).unwrap(), [0u8, 7, 0, 0, 0, 0, 0, 0, 0]);
    }
}
