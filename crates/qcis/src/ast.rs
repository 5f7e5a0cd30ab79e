//! Abstract Syntax Tree for QCIS.

use crate::table::Mnemonic;

/// A parsed QCIS program: its non-blank lines in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub lines: Vec<Line>,
}

/// A statement with its 1-based source line number.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub statement: Statement,
}

/// A QCIS statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Single-qubit gate: `X2P Q01`.
    Gate { mnemonic: Mnemonic, qubit: String },

    /// Two-qubit gate on a coupler: `CZ G0201`.
    Coupled { mnemonic: Mnemonic, coupler: String },

    /// Measurement: `M Q01 Q02`.
    Measure { qubits: Vec<String> },

    /// Barrier: `B Q01 Q02 R01`.
    Barrier { agents: Vec<String> },

    /// Idle: `I Q01 100`.
    Idle { qubit: String, duration_ns: u64 },

    /// `#` comment.
    Comment(String),

    /// Line skipped by an ignore prefix.
    Ignored(String),

    /// Extension context block.
    Context(ContextBlock),
}

/// Comment-delimited block carrying an extension gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextBlock {
    /// Payload of the `# Gate:` header.
    pub gate: String,
    /// Payload of the `# Targets:` header.
    pub targets: String,
    /// Lines between the headers and the end marker.
    pub body: Vec<String>,
}

impl Program {
    /// Whether any statement needs the coupler registry.
    pub fn uses_couplers(&self) -> bool {
        self.lines
            .iter()
            .any(|line| matches!(line.statement, Statement::Coupled { .. }))
    }

    /// Number of barrier statements.
    pub fn num_barriers(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line.statement, Statement::Barrier { .. }))
            .count()
    }
}
