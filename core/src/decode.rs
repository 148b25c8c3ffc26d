use auxqhe_utils::Map;

use crate::error::QheError;

/// Plaintext bits of a raw measurement, indexed by wire.
///
/// `raw` lists wire `n-1` first, so wire `i` reads `raw[n-1-i] ⊕ pads[i]`.
pub fn decode_measurement(raw: &str, pads: &[bool]) -> Result<Vec<bool>, QheError> {
    let bits: Vec<bool> = raw
        .chars()
        .map(|ch| match ch {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(QheError::InvalidConfiguration(format!(
                "measurement `{raw}` holds `{ch}`"
            ))),
        })
        .collect::<Result<_, _>>()?;

    if bits.len() != pads.len() {
        return Err(QheError::InvalidConfiguration(format!(
            "measurement `{raw}` has {} bits for {} pads",
            bits.len(),
            pads.len()
        )));
    }

    let n: usize = pads.len();
    Ok((0..n).map(|i| bits[n - 1 - i] ^ pads[i]).collect())
}

/// Decodes a histogram of raw measurements.
pub fn decode_counts(counts: &Map<String, usize>, pads: &[bool]) -> Result<Map<Vec<bool>, usize>, QheError> {
    let mut decoded: Map<Vec<bool>, usize> = Map::with_capacity(counts.len());
    for (raw, count) in counts.iter() {
        *decoded.get_or_insert_with(decode_measurement(raw, pads)?, || 0) += count;
    }
    Ok(decoded)
}

/// Raw bitstring of wire-indexed `bits`, wire `n-1` first.
pub fn format_bitstring(bits: &[bool]) -> String {
    bits.iter().rev().map(|&bit| if bit { '1' } else { '0' }).collect()
}
