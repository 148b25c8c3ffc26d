use std::sync::LazyLock;

use auxqhe_backend::{
    integer::{IntegerEvaluator, IntegerParameters, IntegerSecretKey},
    test_suite::TestContext,
};
use auxqhe_sampling::Source;

use crate::test_suite;

static TEST_CONTEXT_INTEGER: LazyLock<TestContext<IntegerSecretKey, IntegerEvaluator>> = LazyLock::new(|| {
    let mut source: Source = Source::new([0u8; 32]);
    let key: IntegerSecretKey = IntegerSecretKey::generate(IntegerParameters::TOY, &mut source).unwrap();
    let evaluator: IntegerEvaluator = key.evaluator();
    TestContext::new(key, evaluator)
});

#[test_log::test]
fn final_keys() {
    test_suite::test_final_keys(&TEST_CONTEXT_INTEGER);
}

#[test_log::test]
fn basis_round_trip() {
    test_suite::test_basis_round_trip(&TEST_CONTEXT_INTEGER);
}
