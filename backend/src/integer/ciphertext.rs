use num_bigint::BigUint;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerCiphertext {
    pub(crate) value: BigUint,
    pub(crate) noise_bits: usize,
}

impl IntegerCiphertext {
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Upper bound, in bits, on the noise term carried by the ciphertext.
    pub fn noise_bits(&self) -> usize {
        self.noise_bits
    }
}
