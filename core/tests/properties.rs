use auxqhe_backend::clear::ClearScheme;
use auxqhe_core::{
    QheParameters, Term, Variable, VariableAssignment,
    auxiliary::{AuxiliaryStateBank, AuxiliaryStateSource, OnDemandStates},
    gadget::NoiselessOutcomes,
    gate::{Gate, GateRecord},
    protocol::{KeyGeneration, Protocol, ProtocolRun},
    term::Atom,
    test_suite::{apply_basis, execute_basis, padded_records, random_basis_circuit},
    tset::TSets,
};
use auxqhe_sampling::Source;
use proptest::prelude::*;

const NUM_VARS: usize = 4;

fn variable(index: usize) -> Variable {
    if index % 2 == 0 {
        Variable::PadX(index / 2)
    } else {
        Variable::PadZ(index / 2)
    }
}

fn term_strategy() -> impl Strategy<Value = Term> {
    prop::collection::vec(prop::collection::vec(0..2 * NUM_VARS, 0..3), 0..4).prop_map(|products| {
        Term::canonicalize(
            products
                .into_iter()
                .map(|product| product.into_iter().map(|i| Atom::Var(variable(i))).collect::<Vec<_>>()),
        )
    })
}

fn assignment_strategy() -> impl Strategy<Value = VariableAssignment> {
    (
        prop::collection::vec(any::<bool>(), NUM_VARS),
        prop::collection::vec(any::<bool>(), NUM_VARS),
    )
        .prop_map(|(pad_x, pad_z)| VariableAssignment::from_pads(&pad_x, &pad_z).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn xor_is_a_group(t1 in term_strategy(), t2 in term_strategy(), t3 in term_strategy()) {
        prop_assert_eq!(&t1 ^ &t2, &t2 ^ &t1);
        prop_assert_eq!(&(&t1 ^ &t2) ^ &t3, &t1 ^ &(&t2 ^ &t3));
        prop_assert!((&t1 ^ &t1).is_zero());
        prop_assert_eq!(&t1 ^ &Term::zero(), t1.clone());
    }

    #[test]
    fn and_is_a_commutative_monoid(t1 in term_strategy(), t2 in term_strategy(), t3 in term_strategy()) {
        prop_assert_eq!(&t1 & &t2, &t2 & &t1);
        prop_assert_eq!(&(&t1 & &t2) & &t3, &t1 & &(&t2 & &t3));
        prop_assert_eq!(&t1 & &t1, t1.clone());
        prop_assert_eq!(&t1 & &Term::one(), t1.clone());
        prop_assert_eq!(&t1 & &(&t2 ^ &t3), &(&t1 & &t2) ^ &(&t1 & &t3));
    }

    #[test]
    fn evaluation_is_a_homomorphism(
        t1 in term_strategy(),
        t2 in term_strategy(),
        assignment in assignment_strategy(),
    ) {
        let e1: bool = t1.evaluate(&assignment).unwrap();
        let e2: bool = t2.evaluate(&assignment).unwrap();
        prop_assert_eq!((&t1 ^ &t2).evaluate(&assignment), Ok(e1 ^ e2));
        prop_assert_eq!((&t1 & &t2).evaluate(&assignment), Ok(e1 & e2));
        prop_assert_eq!(Term::cross(2, t1.clone(), t2.clone()).evaluate(&assignment), Ok(e1 & e2));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn layers_are_monotone(num_wires in 1usize..=4, t_depth in 1usize..=3) {
        let tsets: TSets = TSets::build(num_wires, t_depth).unwrap();
        for layer in 2..=t_depth {
            let prev = tsets.layer(layer - 1).unwrap();
            let next = tsets.layer(layer).unwrap();
            prop_assert!(prev.iter().all(|term| next.contains(term)));
            prop_assert!(next.len() > prev.len());
        }
    }

    #[test]
    fn secrets_do_not_depend_on_the_circuit_shape(
        num_wires in 1usize..=3,
        t_depth in 1usize..=2,
        extra_wires in 0usize..=2,
        extra_depth in 0usize..=1,
    ) {
        let small: AuxiliaryStateBank = AuxiliaryStateBank::build(&TSets::build(num_wires, t_depth).unwrap()).unwrap();
        let large: AuxiliaryStateBank = AuxiliaryStateBank::build(
            &TSets::build(num_wires + extra_wires, t_depth + extra_depth).unwrap(),
        )
        .unwrap();
        let on_demand: OnDemandStates = OnDemandStates::new();
        for (key, &k) in small.iter() {
            prop_assert_eq!(large.get(key), Some(k), "{}", key);
            prop_assert_eq!(on_demand.secret(key), Ok(k));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn padded_basis_circuits_decode(
        seed in any::<[u8; 32]>(),
        num_wires in 1usize..=5,
        rounds in 1usize..=2,
        len in 0usize..8,
    ) {
        let mut source: Source = Source::new(seed);
        let keys: KeyGeneration = KeyGeneration::new(QheParameters::new(num_wires, rounds)).unwrap();
        let protocol: Protocol<ClearScheme, ClearScheme> = Protocol::new(&keys, &ClearScheme, &ClearScheme);

        let input: Vec<bool> = source.next_bits(num_wires);
        let pad_x: Vec<bool> = source.next_bits(num_wires);
        let pad_z: Vec<bool> = source.next_bits(num_wires);
        let logical: Vec<Gate> = random_basis_circuit(&mut source, num_wires, rounds, len);
        let records: Vec<GateRecord> = padded_records(&pad_x, &pad_z, &logical);

        let run: ProtocolRun<_> = protocol
            .run(&records, &pad_x, &pad_z, &mut NoiselessOutcomes, &mut source)
            .unwrap();
        let raw: String = execute_basis(&run.tracked.data_circuit, &run.tracked.assignment, &input).unwrap();
        prop_assert_eq!(run.decode(&raw).unwrap(), apply_basis(&logical, &input).unwrap());
    }
}
