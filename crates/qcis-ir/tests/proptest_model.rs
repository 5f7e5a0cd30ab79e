//! Property-based tests for the moment model.

use proptest::prelude::*;
use qcis_ir::{Circuit, Moment, Operation, ParameterExpression, QubitId};
use std::f64::consts::PI;

/// Single-qubit operations on distinct qubits, in arbitrary order.
fn arb_moment_ops() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::btree_set(0_u32..8, 0..=6)
        .prop_flat_map(|qubits| {
            let qubits: Vec<u32> = qubits.into_iter().collect();
            let n = qubits.len();
            (Just(qubits), prop::collection::vec(0_u8..3, n))
        })
        .prop_map(|(qubits, kinds)| {
            qubits
                .into_iter()
                .zip(kinds)
                .map(|(q, k)| match k {
                    0 => Operation::x(QubitId(q)),
                    1 => Operation::y(QubitId(q)),
                    _ => Operation::rx(PI / 2.0, QubitId(q)),
                })
                .collect()
        })
        .prop_shuffle()
}

proptest! {
    /// Moment equality does not depend on insertion order.
    #[test]
    fn test_moment_equality_is_order_insensitive(ops in arb_moment_ops()) {
        let forward = Moment::from_operations(ops.clone()).unwrap();
        let reversed = Moment::from_operations(ops.into_iter().rev()).unwrap();
        prop_assert_eq!(forward, reversed);
    }

    /// Normalized angles always land in (-π, π].
    #[test]
    fn test_normalized_angle_range(theta in -100.0_f64..100.0) {
        let wrapped = ParameterExpression::constant(theta).normalized().unwrap();
        prop_assert!(wrapped > -PI - 1e-12 && wrapped <= PI + 1e-12);
        let turns = (theta - wrapped) / (2.0 * PI);
        prop_assert!((turns - turns.round()).abs() < 1e-9);
    }

    /// Appending never places two operations on one qubit in a moment.
    #[test]
    fn test_append_keeps_moments_disjoint(pairs in prop::collection::vec((0_u32..4, 0_u32..4), 1..20)) {
        let mut circuit = Circuit::new();
        for (a, b) in pairs {
            if a == b {
                circuit.x(QubitId(a)).unwrap();
            } else {
                circuit.cz(QubitId(a), QubitId(b)).unwrap();
            }
        }
        for moment in circuit.moments() {
            let mut seen: Vec<QubitId> = moment.qubits().collect();
            let total = seen.len();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), total);
        }
    }
}
