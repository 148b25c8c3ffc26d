use std::io::{Result, Write};

/// Structural, little-endian encoding of a symbolic value.
///
/// Two values have the same encoding iff they are structurally equal, which
/// makes the encoding a valid hash input for gadget secrets.
pub trait WriterTo {
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()>;
}

/// Encodes `value` into a fresh buffer.
pub fn to_bytes<T: WriterTo + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut bytes: Vec<u8> = Vec::new();
    value.write_to(&mut bytes)?;
    Ok(bytes)
}
