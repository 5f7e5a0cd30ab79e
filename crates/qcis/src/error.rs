//! Error types for QCIS translation.

use qcis_ir::QubitId;
use thiserror::Error;

/// Errors that can occur while compiling to or parsing QCIS.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QcisError {
    /// Operation has no QCIS instruction and is not ignored.
    #[error("Cannot translate '{name}' on {qubits:?} to QCIS; add an ignore rule to drop it")]
    UnsupportedGate {
        /// Operation name.
        name: String,
        /// Operand qubits.
        qubits: Vec<QubitId>,
    },

    /// Mnemonic not in the instruction table.
    #[error("Unknown QCIS instruction '{mnemonic}' at line {line}")]
    UnknownMnemonic { line: usize, mnemonic: String },

    /// Two-qubit operations present but no coupler registry supplied.
    #[error("A coupler registry is required to translate two-qubit operations")]
    MissingCouplers,

    /// No coupler registered for a qubit pair or name.
    #[error("No coupler registered for {0}")]
    MissingCoupler(String),

    /// Label function returned nothing for a QCIS label.
    #[error("Label '{label}' at line {line} does not map to a qubit")]
    UnmappedLabel { label: String, line: usize },

    /// Label function returned nothing for a circuit qubit.
    #[error("Qubit {qubit} has no hardware label")]
    UnmappedQubit { qubit: QubitId },

    /// Instruction has the wrong number or shape of operands.
    #[error("Malformed instruction at line {line}: '{instruction}' ({reason})")]
    MalformedInstruction {
        line: usize,
        instruction: String,
        reason: String,
    },

    /// No blockable agents supplied for barrier lines.
    #[error("The blockable agent set must not be empty")]
    EmptyBarrierSet,

    /// Ignore prefix that would also match barrier lines.
    #[error("Ignore prefix '{0}' would match barrier instructions")]
    BarrierPrefix(String),

    /// Context block without an end marker.
    #[error("Context block opened at line {line} is never closed")]
    UnterminatedContext { line: usize },

    /// Context block with missing or unreadable headers.
    #[error("Invalid context block at line {line}: {reason}")]
    InvalidContext { line: usize, reason: String },

    /// Operation could not be serialized into a context block header.
    #[error("Cannot encode '{gate}' as a context block: {reason}")]
    ContextEncoding { gate: String, reason: String },

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    Ir(#[from] qcis_ir::IrError),
}

/// Result type for QCIS operations.
pub type QcisResult<T> = Result<T, QcisError>;
