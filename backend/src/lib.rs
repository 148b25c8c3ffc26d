//! # auxqhe-backend
//!
//! The homomorphic-scheme collaborator of the AUX-QHE engine.
//!
//! The engine treats homomorphic encryption as an algebraic black box over
//! GF(2): encrypt a bit, decrypt a ciphertext, add and multiply ciphertexts.
//! This crate defines that boundary as a small set of traits in [`api`] and
//! provides two backends implementing it:
//!
//! - [`clear::ClearScheme`]: ciphertexts are the plaintext bits. Used as the
//!   correctness oracle in tests and benchmarks.
//! - [`integer::IntegerSecretKey`] / [`integer::IntegerEvaluator`]: a symmetric
//!   somewhat-homomorphic scheme over the integers (`c = p*q + 2r + m`) with
//!   tracked noise. Toy parameters, not a security claim.
//!
//! ## Roles
//!
//! Encryption and decryption need the client's secret and live on
//! [`api::SchemeEncrypt`] / [`api::SchemeDecrypt`]. Homomorphic operations
//! only need public material and live on [`api::SchemeEvaluate`]. Server-side
//! code is written against [`api::SchemeEvaluate`] alone, so it cannot decrypt
//! intermediate values.
//!
//! ## Testing
//!
//! [`test_suite`] holds backend-generic checks; every backend of this crate
//! runs them from a static [`test_suite::TestContext`].

pub mod api;
pub mod clear;
pub mod error;
pub mod integer;
pub mod test_suite;


pub use api::*;
pub use error::BackendError;
