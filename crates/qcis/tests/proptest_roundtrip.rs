//! Property-based tests for QCIS roundtrip conversion.
//!
//! Tests that circuit → QCIS → circuit preserves moments and operations for
//! circuits built only from native instructions.

use std::f64::consts::FRAC_PI_2;

use proptest::prelude::*;
use qcis::{CouplerRegistry, LabelLayout, circuit_to_qcis, qcis_to_circuit};
use qcis_ir::{Circuit, Moment, Operation, QubitId};

/// Per-qubit slot in a generated moment.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Idle,
    X,
    Y,
    RxPlus,
    RxMinus,
    RyPlus,
    RyMinus,
    Measure,
}

fn arb_slot() -> impl Strategy<Value = Slot> {
    prop_oneof![
        Just(Slot::Idle),
        Just(Slot::X),
        Just(Slot::Y),
        Just(Slot::RxPlus),
        Just(Slot::RxMinus),
        Just(Slot::RyPlus),
        Just(Slot::RyMinus),
        Just(Slot::Measure),
    ]
}

/// A moment from per-qubit slots and an optional CZ on `(j, j + 1)`,
/// written as `cz(j + 1, j)` when the flag is set.
///
/// Measured qubits share one operation, as the parser reads them back.
fn build_moment(slots: &[Slot], cz: Option<(u32, bool)>) -> Moment {
    let mut ops = Vec::new();
    let mut measured = Vec::new();
    for (i, slot) in slots.iter().enumerate() {
        let q = QubitId(i as u32);
        if cz.is_some_and(|(j, _)| q.0 == j || q.0 == j + 1) {
            continue;
        }
        match slot {
            Slot::Idle => {}
            Slot::X => ops.push(Operation::x(q)),
            Slot::Y => ops.push(Operation::y(q)),
            Slot::RxPlus => ops.push(Operation::rx(FRAC_PI_2, q)),
            Slot::RxMinus => ops.push(Operation::rx(-FRAC_PI_2, q)),
            Slot::RyPlus => ops.push(Operation::ry(FRAC_PI_2, q)),
            Slot::RyMinus => ops.push(Operation::ry(-FRAC_PI_2, q)),
            Slot::Measure => measured.push(q),
        }
    }
    if let Some((j, flipped)) = cz {
        let (a, b) = (QubitId(j), QubitId(j + 1));
        let cz = if flipped { Operation::cz(b, a) } else { Operation::cz(a, b) };
        ops.push(cz.unwrap());
    }
    if !measured.is_empty() {
        ops.push(Operation::measure(measured).unwrap());
    }
    Moment::from_operations(ops).unwrap()
}

/// Generate circuits over 2-5 qubits with 0-8 moments.
fn arb_native_circuit() -> impl Strategy<Value = (u32, Circuit)> {
    (2_u32..=5).prop_flat_map(|num_qubits| {
        let moment = (
            prop::collection::vec(arb_slot(), num_qubits as usize),
            prop::option::of((0..num_qubits - 1, any::<bool>())),
        );
        prop::collection::vec(moment, 0..=8).prop_map(move |moments| {
            let circuit: Circuit = moments
                .iter()
                .map(|(slots, cz)| build_moment(slots, *cz))
                .collect();
            (num_qubits, circuit)
        })
    })
}

/// Couplers `C{j}` joining neighbouring labels.
fn chain_couplers(num_qubits: u32) -> CouplerRegistry {
    CouplerRegistry::from_pairs(
        (0..num_qubits - 1).map(|j| (format!("C{j}"), (format!("Q{j:02}"), format!("Q{:02}", j + 1)))),
    )
}

fn agents(num_qubits: u32) -> Vec<String> {
    (0..num_qubits).map(|i| format!("Q{i:02}")).collect()
}

fn compile(num_qubits: u32, circuit: &Circuit) -> String {
    let layout = LabelLayout::sequential(num_qubits);
    circuit_to_qcis(
        circuit,
        |q| layout.label_of(q),
        &agents(num_qubits),
        Some(&chain_couplers(num_qubits)),
        None,
    )
    .unwrap()
}

proptest! {
    /// Parsing the compiled text gives back the same circuit.
    #[test]
    fn test_roundtrip_preserves_circuit((num_qubits, circuit) in arb_native_circuit()) {
        let qcis = compile(num_qubits, &circuit);
        let layout = LabelLayout::sequential(num_qubits);
        let parsed = qcis_to_circuit(
            &qcis,
            |l| layout.qubit_of(l),
            Some(&chain_couplers(num_qubits)),
            None,
        )
        .unwrap();
        prop_assert_eq!(parsed, circuit);
    }

    /// Every moment is closed by exactly one barrier.
    #[test]
    fn test_one_barrier_per_moment((num_qubits, circuit) in arb_native_circuit()) {
        let qcis = compile(num_qubits, &circuit);
        let barriers = qcis.lines().filter(|l| l.starts_with("B ")).count();
        prop_assert_eq!(barriers, circuit.num_moments());
    }

    /// Output does not depend on the order operations were added to a moment.
    #[test]
    fn test_output_ignores_operation_order((num_qubits, circuit) in arb_native_circuit()) {
        let reversed: Circuit = circuit
            .moments()
            .iter()
            .map(|m| Moment::from_operations(m.iter().rev().cloned()).unwrap())
            .collect();
        prop_assert_eq!(compile(num_qubits, &reversed), compile(num_qubits, &circuit));
    }
}
