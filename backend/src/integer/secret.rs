use auxqhe_sampling::Source;
use num_bigint::BigUint;

use crate::{
    BackendError, Scheme, SchemeDecrypt, SchemeEncrypt,
    integer::{IntegerCiphertext, IntegerEvaluator, IntegerParameters},
};

/// Client-side key: the secret odd integer `p`.
#[derive(Clone, Debug)]
pub struct IntegerSecretKey {
    params: IntegerParameters,
    p: BigUint,
}

impl IntegerSecretKey {
    /// Samples `p` with exactly `secret_bits` bits and its low bit set.
    pub fn generate(params: IntegerParameters, source: &mut Source) -> Result<Self, BackendError> {
        params.validate()?;

        let mut bytes: Vec<u8> = source.next_bytes_le(params.secret_bits);
        let top: usize = params.secret_bits - 1;
        bytes[top / 8] |= 1u8 << (top % 8);
        bytes[0] |= 1;

        Ok(Self {
            params,
            p: BigUint::from_bytes_le(&bytes),
        })
    }

    pub fn params(&self) -> &IntegerParameters {
        &self.params
    }

    /// Public evaluator sharing this key's parameters.
    pub fn evaluator(&self) -> IntegerEvaluator {
        IntegerEvaluator::new(self.params)
    }
}

impl Scheme for IntegerSecretKey {
    type Ciphertext = IntegerCiphertext;
}

impl SchemeEncrypt for IntegerSecretKey {
    fn encrypt(&self, bit: bool, source: &mut Source) -> IntegerCiphertext {
        let q: BigUint = BigUint::from_bytes_le(&source.next_bytes_le(self.params.mask_bits));
        let r: BigUint = BigUint::from_bytes_le(&source.next_bytes_le(self.params.noise_bits));
        let value: BigUint = &self.p * q + (r << 1u32) + BigUint::from(bit as u8);
        IntegerCiphertext {
            value,
            noise_bits: self.params.fresh_noise_bits(),
        }
    }
}

impl SchemeDecrypt for IntegerSecretKey {
    fn decrypt(&self, ct: &IntegerCiphertext) -> bool {
        #[cfg(debug_assertions)]
        {
            assert!(
                ct.noise_bits <= self.params.max_noise_bits(),
                "ciphertext noise bound {} exceeds the decryption bound {}",
                ct.noise_bits,
                self.params.max_noise_bits()
            );
        }
        (&ct.value % &self.p).bit(0)
    }
}

#[cfg(test)]
mod tests {
    use auxqhe_sampling::Source;
    use num_bigint::BigUint;

    use crate::integer::{IntegerParameters, IntegerSecretKey};

    #[test]
    fn secret_has_requested_size_and_is_odd() {
        let mut source: Source = Source::new([9u8; 32]);
        let sk: IntegerSecretKey = IntegerSecretKey::generate(IntegerParameters::TOY, &mut source).unwrap();
        assert_eq!(sk.p.bits(), IntegerParameters::TOY.secret_bits as u64);
        assert!(sk.p.bit(0));
        assert!(sk.p > BigUint::from(1u8));
    }
}
