//! Operations: an operation kind applied to an ordered list of qubits.

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::decoupling::DynamicalDecoupling;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::noise::{Annotation, NoiseModel};
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// The kind of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperationKind {
    /// A quantum gate.
    Gate(Gate),
    /// One measurement spanning all operand qubits.
    Measure,
    /// Idle on a single qubit.
    Delay {
        /// Duration in nanoseconds.
        duration_ns: u64,
    },
    /// A noise channel.
    NoiseChannel(NoiseModel),
    /// A bookkeeping annotation.
    Annotation(Annotation),
    /// A dynamical decoupling sequence on one qubit.
    Decoupling(DynamicalDecoupling),
    /// A nested circuit repeated `repetitions` times.
    Subcircuit {
        /// The nested circuit.
        circuit: Box<Circuit>,
        /// Number of repetitions.
        repetitions: u32,
    },
}

impl OperationKind {
    /// Get a short name for this operation kind.
    pub fn name(&self) -> &str {
        match self {
            OperationKind::Gate(g) => g.name(),
            OperationKind::Measure => "measure",
            OperationKind::Delay { .. } => "delay",
            OperationKind::NoiseChannel(model) => model.name(),
            OperationKind::Annotation(annotation) => annotation.name(),
            OperationKind::Decoupling(dd) => dd.name(),
            OperationKind::Subcircuit { .. } => "subcircuit",
        }
    }
}

/// An operation with its operands.
///
/// Equality compares operands in order, except for symmetric two-qubit
/// gates (see [`StandardGate::is_symmetric`]) where `cz(a, b) == cz(b, a)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// The kind of operation.
    pub kind: OperationKind,
    /// Qubits this operation acts on, in order.
    pub qubits: Vec<QubitId>,
}

impl Operation {
    /// Create a gate operation, checking arity and operand uniqueness.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        let gate = gate.into();
        let qubits: Vec<_> = qubits.into_iter().collect();
        if qubits.len() as u32 != gate.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: qubits.len() as u32,
            });
        }
        check_distinct(&qubits, gate.name())?;
        Ok(Self {
            kind: OperationKind::Gate(gate),
            qubits,
        })
    }

    /// Create a measurement spanning one or more qubits.
    pub fn measure(qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        if qubits.is_empty() {
            return Err(IrError::NoQubits("measure".into()));
        }
        check_distinct(&qubits, "measure")?;
        Ok(Self {
            kind: OperationKind::Measure,
            qubits,
        })
    }

    /// Create a delay on one qubit.
    pub fn delay(qubit: QubitId, duration_ns: u64) -> Self {
        Self {
            kind: OperationKind::Delay { duration_ns },
            qubits: vec![qubit],
        }
    }

    /// Create a noise channel on the given qubits.
    pub fn noise(model: NoiseModel, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        if qubits.is_empty() {
            return Err(IrError::NoQubits(model.name().to_string()));
        }
        check_distinct(&qubits, model.name())?;
        Ok(Self {
            kind: OperationKind::NoiseChannel(model),
            qubits,
        })
    }

    /// Create an annotation. Annotations may have no qubits.
    pub fn annotation(annotation: Annotation, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: OperationKind::Annotation(annotation),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a dynamical decoupling operation on one qubit.
    pub fn decoupling(dd: DynamicalDecoupling, qubit: QubitId) -> Self {
        Self {
            kind: OperationKind::Decoupling(dd),
            qubits: vec![qubit],
        }
    }

    /// Wrap a circuit as a repeated subcircuit acting on all of its qubits.
    pub fn subcircuit(circuit: Circuit, repetitions: u32) -> Self {
        let qubits = circuit.all_qubits().into_iter().collect();
        Self {
            kind: OperationKind::Subcircuit {
                circuit: Box::new(circuit),
                repetitions,
            },
            qubits,
        }
    }

    /// Pauli-X on `q`.
    pub fn x(q: QubitId) -> Self {
        Self::single(StandardGate::X, q)
    }

    /// Pauli-Y on `q`.
    pub fn y(q: QubitId) -> Self {
        Self::single(StandardGate::Y, q)
    }

    /// Rotation around X on `q`.
    pub fn rx(theta: impl Into<ParameterExpression>, q: QubitId) -> Self {
        Self::single(StandardGate::Rx(theta.into()), q)
    }

    /// Rotation around Y on `q`.
    pub fn ry(theta: impl Into<ParameterExpression>, q: QubitId) -> Self {
        Self::single(StandardGate::Ry(theta.into()), q)
    }

    /// Controlled-Z between `a` and `b`.
    pub fn cz(a: QubitId, b: QubitId) -> IrResult<Self> {
        Self::gate(StandardGate::CZ, [a, b])
    }

    fn single(gate: StandardGate, q: QubitId) -> Self {
        Self {
            kind: OperationKind::Gate(Gate::Standard(gate)),
            qubits: vec![q],
        }
    }

    /// Get the operation name.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Check whether this operation touches `qubit`.
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }

    /// Whether the operand order carries no meaning.
    pub fn is_symmetric(&self) -> bool {
        matches!(&self.kind, OperationKind::Gate(Gate::Standard(g)) if g.is_symmetric())
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        if self.is_symmetric() {
            let mut lhs = self.qubits.clone();
            let mut rhs = other.qubits.clone();
            lhs.sort();
            rhs.sort();
            lhs == rhs
        } else {
            self.qubits == other.qubits
        }
    }
}

fn check_distinct(qubits: &[QubitId], name: &str) -> IrResult<()> {
    for (i, q) in qubits.iter().enumerate() {
        if qubits[..i].contains(q) {
            return Err(IrError::DuplicateQubit {
                qubit: *q,
                gate_name: Some(name.to_string()),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::CustomGate;

    #[test]
    fn test_gate_arity_checked() {
        let err = Operation::gate(StandardGate::CZ, [QubitId(0)]).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
        assert!(Operation::gate(CustomGate::new("fsim", 2), [QubitId(0), QubitId(1)]).is_ok());
    }

    #[test]
    fn test_duplicate_operand_rejected() {
        assert!(matches!(
            Operation::cz(QubitId(1), QubitId(1)),
            Err(IrError::DuplicateQubit { .. })
        ));
        assert!(Operation::measure([QubitId(0), QubitId(0)]).is_err());
    }

    #[test]
    fn test_measure_requires_qubits() {
        assert!(matches!(
            Operation::measure(Vec::new()),
            Err(IrError::NoQubits(_))
        ));
        let m = Operation::measure([QubitId(2), QubitId(0)]).unwrap();
        assert_eq!(m.qubits, vec![QubitId(2), QubitId(0)]);
        assert_eq!(m.name(), "measure");
    }

    #[test]
    fn test_symmetric_operand_order() {
        let (a, b) = (QubitId(0), QubitId(1));
        assert_eq!(Operation::cz(b, a).unwrap(), Operation::cz(a, b).unwrap());
        assert!(Operation::cz(a, b).unwrap().is_symmetric());

        let cx = |c, t| Operation::gate(StandardGate::CX, [c, t]).unwrap();
        assert!(!cx(a, b).is_symmetric());
        assert_ne!(cx(a, b), cx(b, a));
        assert_ne!(
            Operation::cz(a, b).unwrap(),
            Operation::cz(a, QubitId(2)).unwrap()
        );
    }

    #[test]
    fn test_subcircuit_qubits() {
        let mut inner = Circuit::new();
        inner.append(Operation::x(QubitId(3))).unwrap();
        inner.append(Operation::cz(QubitId(1), QubitId(3)).unwrap()).unwrap();
        let op = Operation::subcircuit(inner, 2);
        assert_eq!(op.qubits, vec![QubitId(1), QubitId(3)]);
        assert!(op.acts_on(QubitId(1)));
        assert!(!op.acts_on(QubitId(0)));
    }
}
