//! Moment-structured circuits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::IrResult;
use crate::moment::Moment;
use crate::operation::Operation;
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// A quantum circuit: a totally ordered sequence of moments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    moments: Vec<Moment>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit from moments.
    pub fn from_moments(moments: impl IntoIterator<Item = Moment>) -> Self {
        Self {
            moments: moments.into_iter().collect(),
        }
    }

    /// Append a moment at the end.
    pub fn push_moment(&mut self, moment: Moment) -> &mut Self {
        self.moments.push(moment);
        self
    }

    /// Append an operation at the earliest moment after every moment that
    /// already touches one of its qubits.
    pub fn append(&mut self, op: Operation) -> IrResult<&mut Self> {
        let after = self
            .moments
            .iter()
            .rposition(|m| op.qubits.iter().any(|q| m.operates_on(*q)));
        let index = match after {
            Some(i) => i + 1,
            None if op.qubits.is_empty() => self.moments.len().saturating_sub(1),
            None => 0,
        };
        if index == self.moments.len() {
            self.moments.push(Moment::new());
        }
        self.moments[index].push(op)?;
        Ok(self)
    }

    /// Apply X gate.
    pub fn x(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::x(q))
    }

    /// Apply Y gate.
    pub fn y(&mut self, q: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::y(q))
    }

    /// Apply RX gate.
    pub fn rx(&mut self, theta: impl Into<ParameterExpression>, q: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::rx(theta, q))
    }

    /// Apply RY gate.
    pub fn ry(&mut self, theta: impl Into<ParameterExpression>, q: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::ry(theta, q))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.append(Operation::cz(a, b)?)
    }

    /// Measure the given qubits as one operation.
    pub fn measure(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.append(Operation::measure(qubits)?)
    }

    /// Get the moments.
    pub fn moments(&self) -> &[Moment] {
        &self.moments
    }

    /// Number of moments.
    pub fn num_moments(&self) -> usize {
        self.moments.len()
    }

    /// Total number of operations across all moments.
    pub fn num_operations(&self) -> usize {
        self.moments.iter().map(Moment::len).sum()
    }

    /// Whether the circuit has no moments.
    pub fn is_empty(&self) -> bool {
        self.moments.is_empty()
    }

    /// All qubits touched by any operation, sorted.
    pub fn all_qubits(&self) -> BTreeSet<QubitId> {
        self.moments.iter().flat_map(Moment::qubits).collect()
    }

    /// Iterate over every operation in moment order.
    pub fn all_operations(&self) -> impl Iterator<Item = &Operation> {
        self.moments.iter().flat_map(Moment::iter)
    }
}

impl FromIterator<Moment> for Circuit {
    fn from_iter<T: IntoIterator<Item = Moment>>(iter: T) -> Self {
        Self::from_moments(iter)
    }
}
