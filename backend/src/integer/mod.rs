//! Symmetric somewhat-homomorphic encryption of bits over the integers.
//!
//! A ciphertext of `m ∈ {0, 1}` is `c = p*q + 2r + m` where the odd integer `p`
//! is the secret, `q` a random mask and `r` a small noise term. Decryption is
//! `(c mod p) mod 2`, correct while the noise `2r + m` stays below `p`.
//! Addition and multiplication of ciphertexts are integer addition and
//! multiplication; both keep the noise non-negative, so its size is tracked as
//! a bit bound carried by every ciphertext.

mod ciphertext;
mod evaluator;
mod parameters;
mod secret;

pub use ciphertext::*;
pub use evaluator::*;
pub use parameters::*;
pub use secret::*;
