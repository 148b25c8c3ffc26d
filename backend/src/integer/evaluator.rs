use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::{
    Scheme, SchemeEvaluate,
    integer::{IntegerCiphertext, IntegerParameters},
};

/// Server-side handle: performs homomorphic operations without any secret.
#[derive(Clone, Copy, Debug)]
pub struct IntegerEvaluator {
    params: IntegerParameters,
}

impl IntegerEvaluator {
    pub fn new(params: IntegerParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &IntegerParameters {
        &self.params
    }

    fn check_noise(&self, noise_bits: usize) {
        if noise_bits > self.params.max_noise_bits() {
            log::warn!(
                "integer scheme: noise bound {} bits exceeds decryption bound {} bits",
                noise_bits,
                self.params.max_noise_bits()
            );
        }
    }
}

impl Scheme for IntegerEvaluator {
    type Ciphertext = IntegerCiphertext;
}

impl SchemeEvaluate for IntegerEvaluator {
    fn trivial(&self, bit: bool) -> IntegerCiphertext {
        IntegerCiphertext {
            value: if bit { BigUint::one() } else { BigUint::zero() },
            noise_bits: 1,
        }
    }

    fn add(&self, a: &IntegerCiphertext, b: &IntegerCiphertext) -> IntegerCiphertext {
        let noise_bits: usize = a.noise_bits.max(b.noise_bits) + 1;
        self.check_noise(noise_bits);
        IntegerCiphertext {
            value: &a.value + &b.value,
            noise_bits,
        }
    }

    fn multiply(&self, a: &IntegerCiphertext, b: &IntegerCiphertext) -> IntegerCiphertext {
        let noise_bits: usize = a.noise_bits + b.noise_bits;
        self.check_noise(noise_bits);
        IntegerCiphertext {
            value: &a.value * &b.value,
            noise_bits,
        }
    }
}
