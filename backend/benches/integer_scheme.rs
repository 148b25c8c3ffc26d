use std::hint::black_box;

use auxqhe_backend::{
    SchemeEncrypt, SchemeEvaluate,
    integer::{IntegerCiphertext, IntegerEvaluator, IntegerParameters, IntegerSecretKey},
};
use auxqhe_sampling::Source;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn bench_integer_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("integer_multiply");

    fn runner(params: IntegerParameters) -> impl FnMut() {
        let mut source: Source = Source::new([0u8; 32]);
        let sk: IntegerSecretKey = IntegerSecretKey::generate(params, &mut source).unwrap();
        let evaluator: IntegerEvaluator = sk.evaluator();

        let ct_a: IntegerCiphertext = sk.encrypt(true, &mut source);
        let ct_b: IntegerCiphertext = sk.encrypt(false, &mut source);

        move || {
            black_box(evaluator.multiply(black_box(&ct_a), black_box(&ct_b)));
        }
    }

    let params_set: Vec<IntegerParameters> = vec![
        IntegerParameters::TOY,
        IntegerParameters {
            secret_bits: 2048,
            noise_bits: 32,
            mask_bits: 1024,
        },
    ];

    for params in params_set {
        let id = BenchmarkId::new("INTEGER_MULTIPLY", params.secret_bits);
        let mut runner = runner(params);
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}

fn bench_integer_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("integer_encrypt");

    let mut source: Source = Source::new([1u8; 32]);
    let sk: IntegerSecretKey = IntegerSecretKey::generate(IntegerParameters::TOY, &mut source).unwrap();

    group.bench_function(BenchmarkId::new("INTEGER_ENCRYPT", IntegerParameters::TOY.secret_bits), |b| {
        b.iter(|| black_box(sk.encrypt(black_box(true), &mut source)))
    });

    group.finish();
}

criterion_group!(benches, bench_integer_multiply, bench_integer_encrypt);
criterion_main!(benches);
