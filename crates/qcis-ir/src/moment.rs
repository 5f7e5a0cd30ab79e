//! Moments: sets of operations executed in the same time slice.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::operation::Operation;
use crate::qubit::QubitId;

/// Operations that run concurrently. No two of them share a qubit.
///
/// Equality ignores insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Moment {
    operations: Vec<Operation>,
}

impl Moment {
    /// Create an empty moment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a moment from operations, rejecting overlapping qubits.
    pub fn from_operations(ops: impl IntoIterator<Item = Operation>) -> IrResult<Self> {
        let mut moment = Self::new();
        for op in ops {
            moment.push(op)?;
        }
        Ok(moment)
    }

    /// Add an operation.
    ///
    /// Fails with [`IrError::DuplicateQubit`] when the operation touches a
    /// qubit already used in this moment.
    pub fn push(&mut self, op: Operation) -> IrResult<()> {
        if let Some(&qubit) = op.qubits.iter().find(|q| self.operates_on(**q)) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: Some(op.name().to_string()),
            });
        }
        self.operations.push(op);
        Ok(())
    }

    /// Whether any operation in this moment touches `qubit`.
    pub fn operates_on(&self, qubit: QubitId) -> bool {
        self.operations.iter().any(|op| op.acts_on(qubit))
    }

    /// Operations in insertion order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Iterate over the operations.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Qubits touched by this moment.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.operations.iter().flat_map(|op| op.qubits.iter().copied())
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the moment holds no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl PartialEq for Moment {
    fn eq(&self, other: &Self) -> bool {
        if self.operations.len() != other.operations.len() {
            return false;
        }
        let mut used = vec![false; other.operations.len()];
        self.operations.iter().all(|op| {
            let found = (0..other.operations.len())
                .find(|&i| !used[i] && other.operations[i] == *op);
            match found {
                Some(i) => {
                    used[i] = true;
                    true
                }
                None => false,
            }
        })
    }
}

impl<'a> IntoIterator for &'a Moment {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}
