use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;

/// Seeded ChaCha8 stream.
///
/// Every random choice of the workspace (initial pad bits, scheme noise and
/// masks) is drawn from a [`Source`] passed in by the caller, so a fixed seed
/// replays a whole protocol run.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    #[inline(always)]
    pub fn next_bit(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }

    pub fn next_bits(&mut self, len: usize) -> Vec<bool> {
        (0..len).map(|_| self.next_bit()).collect()
    }

    /// Returns `bits` uniform random bits packed little-endian; bits above
    /// `bits` in the last byte are cleared.
    pub fn next_bytes_le(&mut self, bits: usize) -> Vec<u8> {
        let mut bytes: Vec<u8> = vec![0u8; bits.div_ceil(8)];
        self.fill_bytes(&mut bytes);
        let rem: usize = bits % 8;
        if rem != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= (1u8 << rem) - 1;
            }
        }
        bytes
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::Source;

    #[test]
    fn same_seed_same_stream() {
        let mut a: Source = Source::new([7u8; 32]);
        let mut b: Source = Source::new([7u8; 32]);
        assert_eq!(a.next_bits(64), b.next_bits(64));
    }

    #[test]
    fn next_bytes_le_clears_high_bits() {
        let mut source: Source = Source::new([3u8; 32]);
        (1..64).for_each(|bits| {
            let bytes: Vec<u8> = source.next_bytes_le(bits);
            assert_eq!(bytes.len(), bits.div_ceil(8));
            if bits % 8 != 0 {
                assert_eq!(bytes[bytes.len() - 1] >> (bits % 8), 0);
            }
        });
    }
}
