//! Backend-generic protocol checks, instantiated per backend in `src/tests`.

use auxqhe_backend::{SchemeDecrypt, SchemeEncrypt, SchemeEvaluate, test_suite::TestContext};
use auxqhe_sampling::Source;
use auxqhe_utils::Map;
use rand_core::RngCore;

use crate::{
    assignment::VariableAssignment,
    auxiliary::OnDemandStates,
    circuit::{DataCircuit, DataOp},
    decode::format_bitstring,
    gadget::NoiselessOutcomes,
    gate::{Gate, GateRecord},
    parameters::QheParameters,
    protocol::{KeyGeneration, Protocol, ProtocolRun},
};

fn random_wire(source: &mut Source, num_wires: usize) -> usize {
    source.next_u32() as usize % num_wires
}

fn random_pair(source: &mut Source, num_wires: usize) -> (usize, usize) {
    let control: usize = random_wire(source, num_wires);
    let target: usize = (control + 1 + random_wire(source, num_wires - 1)) % num_wires;
    (control, target)
}

/// Pad gates for `pad_x`, `pad_z` followed by `logical`.
pub fn padded_records(pad_x: &[bool], pad_z: &[bool], logical: &[Gate]) -> Vec<GateRecord> {
    let pads = pad_x
        .iter()
        .enumerate()
        .filter(|(_, bit)| **bit)
        .map(|(i, _)| Gate::PadX(i))
        .chain(
            pad_z
                .iter()
                .enumerate()
                .filter(|(_, bit)| **bit)
                .map(|(i, _)| Gate::PadZ(i)),
        );
    pads.chain(logical.iter().copied()).map(GateRecord::from).collect()
}

/// `rounds` rounds of random Cliffords each closed by one T layer.
pub fn random_clifford_t(source: &mut Source, num_wires: usize, rounds: usize) -> Vec<Gate> {
    let mut gates: Vec<Gate> = Vec::new();
    (0..rounds).for_each(|_| {
        (0..2 * num_wires).for_each(|_| {
            let wire: usize = random_wire(source, num_wires);
            let gate: Gate = match source.next_u32() % 5 {
                0 => Gate::H(wire),
                1 => Gate::S(wire),
                2 => Gate::X(wire),
                3 => Gate::Z(wire),
                _ if num_wires > 1 => {
                    let (control, target) = random_pair(source, num_wires);
                    Gate::Cnot { control, target }
                }
                _ => Gate::H(wire),
            };
            gates.push(gate);
        });
        (0..num_wires)
            .filter(|_| source.next_bit())
            .for_each(|wire| gates.push(Gate::T(wire)));
    });
    gates
}

/// `rounds` rounds of `len` random X and CNOT gates, each closed by one T
/// layer. Every gate maps basis states to basis states up to a phase.
pub fn random_basis_circuit(source: &mut Source, num_wires: usize, rounds: usize, len: usize) -> Vec<Gate> {
    let mut gates: Vec<Gate> = Vec::new();
    (0..rounds).for_each(|_| {
        (0..len).for_each(|_| {
            let gate: Gate = if num_wires > 1 && source.next_bit() {
                let (control, target) = random_pair(source, num_wires);
                Gate::Cnot { control, target }
            } else {
                Gate::X(random_wire(source, num_wires))
            };
            gates.push(gate);
        });
        (0..num_wires)
            .filter(|_| source.next_bit())
            .for_each(|wire| gates.push(Gate::T(wire)));
    });
    gates
}

/// Applies `gates` to basis state `bits`. Diagonal gates leave it unchanged;
/// `None` on a gate that leaves the computational basis.
pub fn apply_basis<'a, I: IntoIterator<Item = &'a Gate>>(gates: I, bits: &[bool]) -> Option<Vec<bool>> {
    let mut bits: Vec<bool> = bits.to_vec();
    for gate in gates {
        match *gate {
            Gate::PadX(i) | Gate::X(i) => bits[i] ^= true,
            Gate::PadZ(_) | Gate::Z(_) | Gate::S(_) | Gate::T(_) => {}
            Gate::Cnot { control, target } => bits[target] ^= bits[control],
            Gate::H(_) => return None,
        }
    }
    Some(bits)
}

/// Executes a data circuit on basis input `bits` and returns the raw
/// measurement string.
///
/// A gadget teleports its wire through the auxiliary qubit, which leaves the
/// byproduct `X^c` of the measured outcome `c` on the wire. The phase
/// correction is diagonal. Outcomes are read from `outcomes`; `None` when one
/// is unbound or a gate leaves the computational basis.
pub fn execute_basis(circuit: &DataCircuit, outcomes: &VariableAssignment, bits: &[bool]) -> Option<String> {
    let mut bits: Vec<bool> = bits.to_vec();
    let mut entangled: Map<usize, usize> = Map::new();
    for op in circuit.ops() {
        match op {
            DataOp::Gate(gate) => bits = apply_basis([gate], &bits)?,
            DataOp::Entangle { wire, aux } => {
                entangled.insert(*aux, *wire);
            }
            DataOp::MeasureAux { aux, outcome } => {
                let wire: usize = *entangled.get(aux)?;
                bits[wire] ^= outcomes.get(outcome)?;
            }
            DataOp::Correct { .. } => {}
        }
    }
    Some(format_bitstring(&bits))
}

/// Homomorphically evaluated final pads decrypt to the plaintext evaluation
/// of the tracked polynomials.
pub fn test_final_keys<K, E>(test_context: &TestContext<K, E>)
where
    K: SchemeEncrypt + SchemeDecrypt,
    E: SchemeEvaluate<Ciphertext = K::Ciphertext> + Sync,
{
    let num_wires: usize = 3;
    let rounds: usize = 2;
    let keys: KeyGeneration = KeyGeneration::new(QheParameters::new(num_wires, rounds)).unwrap();
    let protocol: Protocol<K, E> = Protocol::new(&keys, &test_context.key, &test_context.evaluator);

    let mut source: Source = Source::new([7u8; 32]);
    // H after T moves gadget secrets into f_a, outside the T-sets.
    let states: OnDemandStates = keys.on_demand();
    (0..8).for_each(|_| {
        let (pad_x, pad_z) = VariableAssignment::sample_pads(num_wires, &mut source)
            .pads(num_wires)
            .unwrap();
        let logical: Vec<Gate> = random_clifford_t(&mut source, num_wires, rounds);
        let records: Vec<GateRecord> = padded_records(&pad_x, &pad_z, &logical);

        let run: ProtocolRun<K::Ciphertext> = protocol
            .run_with(&states, &records, &pad_x, &pad_z, &mut NoiselessOutcomes, &mut source)
            .unwrap();

        let (want_x, want_z) = run.tracked.pads.evaluate(&run.tracked.assignment).unwrap();
        assert_eq!(run.final_pad_x, want_x);
        assert_eq!(run.final_pad_z, want_z);
        assert_eq!(run.encrypted_pads.num_wires(), num_wires);
    });
}

/// Decoding the measurement of a padded X/CNOT/T circuit with the final
/// X-pads recovers the unpadded result. Every gadget state comes from the
/// bank.
pub fn test_basis_round_trip<K, E>(test_context: &TestContext<K, E>)
where
    K: SchemeEncrypt + SchemeDecrypt,
    E: SchemeEvaluate<Ciphertext = K::Ciphertext> + Sync,
{
    let num_wires: usize = 4;
    let rounds: usize = 2;
    let keys: KeyGeneration = KeyGeneration::new(QheParameters::new(num_wires, rounds)).unwrap();
    let protocol: Protocol<K, E> = Protocol::new(&keys, &test_context.key, &test_context.evaluator);

    let mut source: Source = Source::new([8u8; 32]);
    (0..16).for_each(|_| {
        let input: Vec<bool> = source.next_bits(num_wires);
        let (pad_x, pad_z) = VariableAssignment::sample_pads(num_wires, &mut source)
            .pads(num_wires)
            .unwrap();
        let logical: Vec<Gate> = random_basis_circuit(&mut source, num_wires, rounds, 6);
        let records: Vec<GateRecord> = padded_records(&pad_x, &pad_z, &logical);

        let run: ProtocolRun<K::Ciphertext> = protocol
            .run(&records, &pad_x, &pad_z, &mut NoiselessOutcomes, &mut source)
            .unwrap();

        let raw: String = execute_basis(&run.tracked.data_circuit, &run.tracked.assignment, &input).unwrap();
        let want: Vec<bool> = apply_basis(&logical, &input).unwrap();
        assert_eq!(run.decode(&raw).unwrap(), want, "input {input:?} pads {pad_x:?} raw {raw}");
    });
}
