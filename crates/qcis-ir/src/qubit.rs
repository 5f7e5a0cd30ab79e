//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a qubit in the circuit model.
///
/// Hardware labels such as `"Q01"` are not part of the model; they are
/// attached by the caller-supplied mapping when translating to QCIS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", QubitId::from(12)), "q12");
    }

    #[test]
    fn test_qubit_ordering() {
        let mut ids = vec![QubitId(3), QubitId(1), QubitId(2)];
        ids.sort();
        assert_eq!(ids, vec![QubitId(1), QubitId(2), QubitId(3)]);
    }
}
