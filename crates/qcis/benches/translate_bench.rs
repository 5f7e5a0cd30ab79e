//! Benchmarks for QCIS translation
//!
//! Run with: cargo bench -p qcis

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qcis::{CouplerRegistry, LabelLayout, circuit_to_qcis, qcis_to_circuit};
use qcis_ir::{Circuit, QubitId};
use std::f64::consts::FRAC_PI_2;

fn chain_couplers(num_qubits: u32) -> CouplerRegistry {
    CouplerRegistry::from_pairs(
        (0..num_qubits - 1).map(|j| (format!("C{j}"), (format!("Q{j:02}"), format!("Q{:02}", j + 1)))),
    )
}

/// Layers of Y2P on every qubit followed by CZ on even pairs, then measurement.
fn layered_circuit(num_qubits: u32, layers: usize) -> Circuit {
    let mut circuit = Circuit::new();
    for _ in 0..layers {
        for i in 0..num_qubits {
            circuit.ry(FRAC_PI_2, QubitId(i)).unwrap();
        }
        for i in (0..num_qubits - 1).step_by(2) {
            circuit.cz(QubitId(i), QubitId(i + 1)).unwrap();
        }
    }
    circuit.measure((0..num_qubits).map(QubitId)).unwrap();
    circuit
}

fn agents(num_qubits: u32) -> Vec<String> {
    (0..num_qubits).map(|i| format!("Q{i:02}")).collect()
}

/// Benchmark circuit → QCIS
fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for num_qubits in &[2, 10, 50] {
        let circuit = layered_circuit(*num_qubits, 20);
        let layout = LabelLayout::sequential(*num_qubits);
        let couplers = chain_couplers(*num_qubits);
        let agents = agents(*num_qubits);

        group.bench_with_input(
            BenchmarkId::new("layered", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    circuit_to_qcis(
                        black_box(circuit),
                        |q| layout.label_of(q),
                        &agents,
                        Some(&couplers),
                        None,
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark QCIS → circuit
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for num_qubits in &[2, 10, 50] {
        let layout = LabelLayout::sequential(*num_qubits);
        let couplers = chain_couplers(*num_qubits);
        let qcis = circuit_to_qcis(
            &layered_circuit(*num_qubits, 20),
            |q| layout.label_of(q),
            &agents(*num_qubits),
            Some(&couplers),
            None,
        )
        .unwrap();

        group.bench_with_input(BenchmarkId::new("layered", num_qubits), &qcis, |b, qcis| {
            b.iter(|| {
                qcis_to_circuit(
                    black_box(qcis),
                    |l| layout.qubit_of(l),
                    Some(&couplers),
                    None,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_parse);

criterion_main!(benches);
