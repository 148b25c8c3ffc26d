//! Backend-generic checks.
//!
//! Each `test_*` function takes a [`TestContext`] and asserts the GF(2)
//! semantics every backend must provide. Backends instantiate them from a
//! static context, see `src/tests`.

use auxqhe_sampling::Source;

use crate::{SchemeDecrypt, SchemeEncrypt, SchemeEvaluate};

/// Client key and server evaluator of one backend.
pub struct TestContext<K, E> {
    pub key: K,
    pub evaluator: E,
}

impl<K, E> TestContext<K, E>
where
    K: SchemeEncrypt + SchemeDecrypt,
    E: SchemeEvaluate<Ciphertext = K::Ciphertext>,
{
    pub fn new(key: K, evaluator: E) -> Self {
        Self { key, evaluator }
    }
}

const TRUTH_TABLE: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

pub fn test_encrypt_decrypt<K, E>(test_context: &TestContext<K, E>)
where
    K: SchemeEncrypt + SchemeDecrypt,
    E: SchemeEvaluate<Ciphertext = K::Ciphertext>,
{
    let mut source: Source = Source::new([1u8; 32]);
    (0..64).for_each(|_| {
        let bit: bool = source.next_bit();
        let ct: K::Ciphertext = test_context.key.encrypt(bit, &mut source);
        assert_eq!(test_context.key.decrypt(&ct), bit);
    });
}

pub fn test_trivial<K, E>(test_context: &TestContext<K, E>)
where
    K: SchemeEncrypt + SchemeDecrypt,
    E: SchemeEvaluate<Ciphertext = K::Ciphertext>,
{
    let key: &K = &test_context.key;
    let evaluator: &E = &test_context.evaluator;
    assert!(!key.decrypt(&evaluator.trivial(false)));
    assert!(key.decrypt(&evaluator.trivial(true)));
}

pub fn test_add<K, E>(test_context: &TestContext<K, E>)
where
    K: SchemeEncrypt + SchemeDecrypt,
    E: SchemeEvaluate<Ciphertext = K::Ciphertext>,
{
    let key: &K = &test_context.key;
    let evaluator: &E = &test_context.evaluator;
    let mut source: Source = Source::new([2u8; 32]);

    TRUTH_TABLE.iter().for_each(|&(a, b)| {
        let ct_a: K::Ciphertext = key.encrypt(a, &mut source);
        let ct_b: K::Ciphertext = key.encrypt(b, &mut source);
        assert_eq!(key.decrypt(&evaluator.add(&ct_a, &ct_b)), a ^ b, "{a} xor {b}");

        let mut res: K::Ciphertext = ct_a.clone();
        evaluator.add_inplace(&mut res, &evaluator.trivial(b));
        assert_eq!(key.decrypt(&res), a ^ b, "{a} xor trivial {b}");
    });
}

pub fn test_multiply<K, E>(test_context: &TestContext<K, E>)
where
    K: SchemeEncrypt + SchemeDecrypt,
    E: SchemeEvaluate<Ciphertext = K::Ciphertext>,
{
    let key: &K = &test_context.key;
    let evaluator: &E = &test_context.evaluator;
    let mut source: Source = Source::new([3u8; 32]);

    TRUTH_TABLE.iter().for_each(|&(a, b)| {
        let ct_a: K::Ciphertext = key.encrypt(a, &mut source);
        let ct_b: K::Ciphertext = key.encrypt(b, &mut source);
        assert_eq!(key.decrypt(&evaluator.multiply(&ct_a, &ct_b)), a & b, "{a} and {b}");

        let mut res: K::Ciphertext = ct_a.clone();
        evaluator.multiply_inplace(&mut res, &evaluator.trivial(b));
        assert_eq!(key.decrypt(&res), a & b, "{a} and trivial {b}");
    });
}

pub fn test_sum_product<K, E>(test_context: &TestContext<K, E>)
where
    K: SchemeEncrypt + SchemeDecrypt,
    E: SchemeEvaluate<Ciphertext = K::Ciphertext>,
{
    let key: &K = &test_context.key;
    let evaluator: &E = &test_context.evaluator;
    let mut source: Source = Source::new([4u8; 32]);

    let empty: Vec<K::Ciphertext> = Vec::new();
    assert!(!key.decrypt(&evaluator.sum(&empty)));
    assert!(key.decrypt(&evaluator.product(&empty)));

    (0..8).for_each(|_| {
        let bits: Vec<bool> = source.next_bits(4);
        let cts: Vec<K::Ciphertext> = bits.iter().map(|&bit| key.encrypt(bit, &mut source)).collect();
        let want_sum: bool = bits.iter().fold(false, |acc, &bit| acc ^ bit);
        let want_product: bool = bits.iter().all(|&bit| bit);
        assert_eq!(key.decrypt(&evaluator.sum(&cts)), want_sum, "sum of {bits:?}");
        assert_eq!(key.decrypt(&evaluator.product(&cts)), want_product, "product of {bits:?}");
    });
}

/// `(a ∧ b) ⊕ c ⊕ 1` evaluated the way the final-key evaluator combines
/// monomials.
pub fn test_polynomial<K, E>(test_context: &TestContext<K, E>)
where
    K: SchemeEncrypt + SchemeDecrypt,
    E: SchemeEvaluate<Ciphertext = K::Ciphertext>,
{
    let key: &K = &test_context.key;
    let evaluator: &E = &test_context.evaluator;
    let mut source: Source = Source::new([5u8; 32]);

    (0..8u8).for_each(|x| {
        let (a, b, c) = (x & 1 == 1, x & 2 == 2, x & 4 == 4);
        let ct_a: K::Ciphertext = key.encrypt(a, &mut source);
        let ct_b: K::Ciphertext = key.encrypt(b, &mut source);
        let ct_c: K::Ciphertext = key.encrypt(c, &mut source);

        let monomials: Vec<K::Ciphertext> = vec![
            evaluator.product([&ct_a, &ct_b]),
            evaluator.product([&ct_c]),
            evaluator.product([]),
        ];
        let res: K::Ciphertext = evaluator.sum(&monomials);
        assert_eq!(key.decrypt(&res), (a & b) ^ c ^ true, "a={a} b={b} c={c}");
    });
}
