use crate::BackendError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegerParameters {
    /// Bit size of the secret odd integer `p`.
    pub secret_bits: usize,
    /// Bit size of the fresh noise term `r`.
    pub noise_bits: usize,
    /// Bit size of the random mask `q`.
    pub mask_bits: usize,
}

impl IntegerParameters {
    pub const TOY: IntegerParameters = IntegerParameters {
        secret_bits: 512,
        noise_bits: 16,
        mask_bits: 256,
    };

    pub fn validate(&self) -> Result<(), BackendError> {
        if self.secret_bits < 8 {
            return Err(BackendError::InvalidParameters(format!(
                "secret_bits={} < 8",
                self.secret_bits
            )));
        }
        if self.noise_bits == 0 || self.mask_bits == 0 {
            return Err(BackendError::InvalidParameters(
                "noise_bits and mask_bits must be non-zero".to_string(),
            ));
        }
        if self.fresh_noise_bits() > self.max_noise_bits() {
            return Err(BackendError::InvalidParameters(format!(
                "fresh noise of {} bits does not fit under a {}-bit secret",
                self.fresh_noise_bits(),
                self.secret_bits
            )));
        }
        Ok(())
    }

    /// Bound on the noise `2r + m` of a fresh encryption.
    pub fn fresh_noise_bits(&self) -> usize {
        self.noise_bits + 1
    }

    /// Largest noise bound that still decrypts correctly (`p >= 2^(secret_bits-1)`).
    pub fn max_noise_bits(&self) -> usize {
        self.secret_bits - 1
    }

    /// Number of successive squarings a fresh ciphertext survives.
    pub fn multiplicative_depth(&self) -> usize {
        let mut bits: usize = self.fresh_noise_bits();
        let mut depth: usize = 0;
        while bits * 2 <= self.max_noise_bits() {
            bits *= 2;
            depth += 1;
        }
        depth
    }
}

impl Default for IntegerParameters {
    fn default() -> Self {
        Self::TOY
    }
}
