//! Client and server steps of one AUX-QHE run.
//!
//! Key generation builds the T-sets and the auxiliary-state bank of a
//! `(n, L)` pair once. A run then layers the circuit, tracks the pads
//! through it, encrypts the resulting key material, evaluates the final pads
//! homomorphically and decrypts them for measurement decoding.
//!
//! Gadgets draw their states from the strict bank unless the caller passes
//! another [`AuxiliaryStateSource`]. With the bank, a gadget key with a part
//! outside the T-sets aborts the run with [`QheError::GadgetMeasurement`].

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use auxqhe_backend::{SchemeDecrypt, SchemeEncrypt, SchemeEvaluate};
use auxqhe_sampling::Source;
use auxqhe_utils::Map;

use crate::{
    assignment::VariableAssignment,
    auxiliary::{AuxiliaryStateBank, AuxiliaryStateSource, OnDemandStates},
    decode::decode_measurement,
    error::QheError,
    gadget::{OutcomeResolver, TGadget},
    gate::GateRecord,
    keys::{EncryptedKeyMaterial, EncryptedPads, FinalKeyEvaluator},
    layering::LayeredCircuit,
    pad::FinalPadCoefficients,
    parameters::QheParameters,
    tracker::{PadTracker, TrackedCircuit},
    tset::{TSetCache, TSets},
};

/// Informational counters and timings of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub tset_sizes: Vec<usize>,
    pub auxiliary_states: usize,
    pub keygen_time: Duration,
    pub evaluation_time: Duration,
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t-set sizes {:?}, {} auxiliary states, keygen {:?}, evaluation {:?}",
            self.tset_sizes, self.auxiliary_states, self.keygen_time, self.evaluation_time
        )
    }
}

/// T-sets and auxiliary-state bank of one `(n, L)` pair.
#[derive(Clone, Debug)]
pub struct KeyGeneration {
    params: QheParameters,
    tsets: Arc<TSets>,
    bank: Arc<AuxiliaryStateBank>,
    elapsed: Duration,
}

impl KeyGeneration {
    pub fn new(params: QheParameters) -> Result<Self, QheError> {
        KeyCache::new().keygen(params)
    }

    pub fn params(&self) -> &QheParameters {
        &self.params
    }

    pub fn tsets(&self) -> &TSets {
        &self.tsets
    }

    pub fn bank(&self) -> &AuxiliaryStateBank {
        &self.bank
    }

    /// Lazy state source reading the bank first. Opt-in for circuits whose
    /// gadget keys leave the T-sets.
    pub fn on_demand(&self) -> OnDemandStates {
        OnDemandStates::with_bank(self.bank.clone())
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            tset_sizes: self.tsets.sizes(),
            auxiliary_states: self.bank.len(),
            keygen_time: self.elapsed,
            evaluation_time: Duration::ZERO,
        }
    }

    /// Tracks the pads of `assignment` through `circuit` with states from the
    /// bank.
    pub fn track<R: OutcomeResolver>(
        &self,
        circuit: &LayeredCircuit,
        assignment: VariableAssignment,
        resolver: &mut R,
    ) -> Result<TrackedCircuit, QheError> {
        self.track_with(self.bank(), circuit, assignment, resolver)
    }

    pub fn track_with<S: AuxiliaryStateSource, R: OutcomeResolver>(
        &self,
        states: &S,
        circuit: &LayeredCircuit,
        assignment: VariableAssignment,
        resolver: &mut R,
    ) -> Result<TrackedCircuit, QheError> {
        self.params.check_circuit(circuit)?;
        let tracker = PadTracker::new(self.params.num_wires, assignment, TGadget::new(states, resolver))?;
        tracker.run(circuit)
    }
}

/// Owned cache of key generations keyed by `(n, L)`.
#[derive(Debug, Default)]
pub struct KeyCache {
    tsets: TSetCache,
    banks: Map<QheParameters, Arc<AuxiliaryStateBank>>,
}

impl KeyCache {
    pub fn new() -> Self {
        KeyCache::default()
    }

    pub fn keygen(&mut self, params: QheParameters) -> Result<KeyGeneration, QheError> {
        params.validate()?;
        let start: Instant = Instant::now();

        let tsets: Arc<TSets> = self.tsets.get(params.num_wires, params.t_depth)?;
        let bank: Arc<AuxiliaryStateBank> = match self.banks.get(&params) {
            Some(bank) => bank.clone(),
            None => {
                let bank: Arc<AuxiliaryStateBank> = Arc::new(AuxiliaryStateBank::build(&tsets)?);
                self.banks.insert(params, bank.clone());
                bank
            }
        };

        let keys: KeyGeneration = KeyGeneration {
            params,
            tsets,
            bank,
            elapsed: start.elapsed(),
        };
        log::info!(
            "keygen n={} L={}: {}",
            params.num_wires,
            params.t_depth,
            keys.diagnostics()
        );
        Ok(keys)
    }

    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }
}

/// Server-side final-key evaluation with its timing.
pub struct Evaluation<C> {
    pub pads: EncryptedPads<C>,
    pub elapsed: Duration,
}

pub fn evaluate_final_keys<E>(
    evaluator: &E,
    pads: &FinalPadCoefficients,
    material: &EncryptedKeyMaterial<E::Ciphertext>,
) -> Result<Evaluation<E::Ciphertext>, QheError>
where
    E: SchemeEvaluate + Sync,
{
    let start: Instant = Instant::now();
    let pads: EncryptedPads<E::Ciphertext> = FinalKeyEvaluator::new(evaluator).evaluate(pads, material)?;
    Ok(Evaluation {
        pads,
        elapsed: start.elapsed(),
    })
}

/// Outcome of [`Protocol::run`].
pub struct ProtocolRun<C> {
    pub tracked: TrackedCircuit,
    pub encrypted_pads: EncryptedPads<C>,
    pub final_pad_x: Vec<bool>,
    pub final_pad_z: Vec<bool>,
    pub diagnostics: Diagnostics,
}

impl<C> ProtocolRun<C> {
    /// Plaintext wire bits of a raw measurement of the data circuit.
    pub fn decode(&self, raw: &str) -> Result<Vec<bool>, QheError> {
        decode_measurement(raw, &self.final_pad_x)
    }
}

/// A client key and a server evaluator over shared key generation.
pub struct Protocol<'a, K, E> {
    keys: &'a KeyGeneration,
    client: &'a K,
    server: &'a E,
}

impl<'a, K, E> Protocol<'a, K, E>
where
    K: SchemeEncrypt + SchemeDecrypt,
    E: SchemeEvaluate<Ciphertext = K::Ciphertext> + Sync,
{
    pub fn new(keys: &'a KeyGeneration, client: &'a K, server: &'a E) -> Self {
        Protocol { keys, client, server }
    }

    /// Runs `records` with states from the bank.
    pub fn run<R: OutcomeResolver>(
        &self,
        records: &[GateRecord],
        pad_x: &[bool],
        pad_z: &[bool],
        resolver: &mut R,
        source: &mut Source,
    ) -> Result<ProtocolRun<K::Ciphertext>, QheError> {
        self.run_with(self.keys.bank(), records, pad_x, pad_z, resolver, source)
    }

    pub fn run_with<S: AuxiliaryStateSource, R: OutcomeResolver>(
        &self,
        states: &S,
        records: &[GateRecord],
        pad_x: &[bool],
        pad_z: &[bool],
        resolver: &mut R,
        source: &mut Source,
    ) -> Result<ProtocolRun<K::Ciphertext>, QheError> {
        let params: &QheParameters = self.keys.params();
        params.check_pads(pad_x, pad_z)?;

        let circuit: LayeredCircuit = LayeredCircuit::classify(params.num_wires, records)?;
        let assignment: VariableAssignment = VariableAssignment::from_pads(pad_x, pad_z)?;
        let tracked: TrackedCircuit = self.keys.track_with(states, &circuit, assignment, resolver)?;

        let material: EncryptedKeyMaterial<K::Ciphertext> =
            EncryptedKeyMaterial::encrypt(self.client, &tracked.assignment, source);
        let evaluation: Evaluation<K::Ciphertext> = evaluate_final_keys(self.server, &tracked.pads, &material)?;
        let (final_pad_x, final_pad_z) = evaluation.pads.decrypt(self.client);

        let diagnostics: Diagnostics = Diagnostics {
            evaluation_time: evaluation.elapsed,
            ..self.keys.diagnostics()
        };
        log::info!(
            "run: {} gates, {} gadgets, {} encrypted variables; {}",
            circuit.num_gates(),
            tracked.data_circuit.num_auxiliary(),
            material.len(),
            diagnostics
        );

        Ok(ProtocolRun {
            tracked,
            encrypted_pads: evaluation.pads,
            final_pad_x,
            final_pad_z,
            diagnostics,
        })
    }
}
