//! # auxqhe-core
//!
//! Key-evolution and auxiliary-state engine of an auxiliary-state quantum
//! homomorphic evaluation (AUX-QHE) protocol.
//!
//! A client hides a Clifford+T circuit's data behind a one-time pad. Each
//! wire carries an X-pad and a Z-pad polynomial over GF(2) which evolve as
//! gates are applied. Clifford gates permute and combine the polynomials; a T
//! gate is executed by a teleportation gadget that consumes one auxiliary
//! state and introduces a gadget secret `k` and a measured outcome `c`. At the
//! end, the server evaluates the final pad polynomials under homomorphic
//! encryption so it never sees the keys.
//!
//! ## Components
//!
//! - [`term`]: GF(2) polynomials in algebraic normal form.
//! - [`tset`]: per-layer sets of terms that can occur in pad coefficients.
//! - [`auxiliary`]: one auxiliary state per (layer, wire, term) triple with a
//!   seedless, hash-derived secret bit.
//! - [`layering`]: groups a gate sequence into Init, Clifford and T layers.
//! - [`tracker`] and [`gadget`]: pad-coefficient updates and the T gadget.
//! - [`keys`]: encrypted key material and the homomorphic final-key
//!   evaluator, generic over [`auxqhe_backend`] schemes.
//! - [`decode`]: measurement decoding.
//! - [`protocol`]: key generation, caching and a full client/server run.
//!
//! ## Non-Goals
//!
//! The crate does not execute or simulate quantum circuits; it emits the
//! augmented gate sequence ([`circuit::DataCircuit`]) for an external backend.
//! Fault tolerance, multi-party settings and noise optimisation are out of
//! scope, as is any security claim about the bundled toy schemes.

pub mod assignment;
pub mod auxiliary;
pub mod circuit;
pub mod decode;
pub mod encoding;
pub mod error;
pub mod gadget;
pub mod gate;
pub mod keys;
pub mod layering;
pub mod pad;
pub mod parameters;
pub mod protocol;
pub mod term;
pub mod test_suite;
pub mod tracker;
pub mod tset;
pub mod variable;

#[cfg(test)]
mod tests;

pub use assignment::VariableAssignment;
pub use error::QheError;
pub use gate::{Gate, GateRecord};
pub use parameters::QheParameters;
pub use term::Term;
pub use variable::Variable;
