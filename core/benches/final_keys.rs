use std::hint::black_box;

use auxqhe_backend::integer::{IntegerCiphertext, IntegerEvaluator, IntegerParameters, IntegerSecretKey};
use auxqhe_core::{
    QheParameters, VariableAssignment,
    gadget::NoiselessOutcomes,
    gate::GateRecord,
    keys::EncryptedKeyMaterial,
    layering::LayeredCircuit,
    protocol::{KeyGeneration, evaluate_final_keys},
    test_suite::{padded_records, random_clifford_t},
    tracker::TrackedCircuit,
};
use auxqhe_sampling::Source;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn bench_final_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("final_keys");

    struct Params {
        num_wires: usize,
        rounds: usize,
    }

    fn runner(p: Params) -> impl FnMut() {
        let mut source: Source = Source::new([0u8; 32]);
        let sk: IntegerSecretKey = IntegerSecretKey::generate(IntegerParameters::TOY, &mut source).unwrap();
        let evaluator: IntegerEvaluator = sk.evaluator();

        let keys: KeyGeneration = KeyGeneration::new(QheParameters::new(p.num_wires, p.rounds)).unwrap();
        let pad_x: Vec<bool> = source.next_bits(p.num_wires);
        let pad_z: Vec<bool> = source.next_bits(p.num_wires);
        let logical = random_clifford_t(&mut source, p.num_wires, p.rounds);
        let records: Vec<GateRecord> = padded_records(&pad_x, &pad_z, &logical);

        let circuit: LayeredCircuit = LayeredCircuit::classify(p.num_wires, &records).unwrap();
        let assignment: VariableAssignment = VariableAssignment::from_pads(&pad_x, &pad_z).unwrap();
        let tracked: TrackedCircuit = keys
            .track_with(&keys.on_demand(), &circuit, assignment, &mut NoiselessOutcomes)
            .unwrap();
        let material: EncryptedKeyMaterial<IntegerCiphertext> =
            EncryptedKeyMaterial::encrypt(&sk, &tracked.assignment, &mut source);

        move || {
            black_box(evaluate_final_keys(black_box(&evaluator), &tracked.pads, &material).unwrap());
        }
    }

    let params_set: Vec<Params> = vec![
        Params {
            num_wires: 3,
            rounds: 2,
        },
        Params {
            num_wires: 5,
            rounds: 2,
        },
    ];

    for params in params_set {
        let id = BenchmarkId::new("FINAL_KEYS_INTEGER", format!("n={}/L={}", params.num_wires, params.rounds));
        let mut runner = runner(params);
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}

criterion_group!(benches, bench_final_keys);
criterion_main!(benches);
