//! Extension context blocks.
//!
//! Operations with their own QCIS expansion are wrapped in a comment-delimited
//! block that records the operation itself, so the parser can rebuild it
//! without re-interpreting the expansion:
//!
//! ```text
//! # CIRQ_CONTEXT_START
//! # Gate: {"XY":{"num_xy_pair":1,"total_duration_ns":500.0,"single_pi_gate_duration_ns":50.0}}
//! # Targets: ["Q00"]
//! I Q00 100
//! X Q00
//! I Q00 200
//! Y Q00
//! I Q00 100
//! # CIRQ_CONTEXT_END
//! ```

use qcis_ir::{DynamicalDecoupling, PiGate};
use serde::Serialize;

use crate::ast::ContextBlock;
use crate::error::{QcisError, QcisResult};
use crate::table::Mnemonic;

/// Opens a context block.
pub const CONTEXT_START: &str = "# CIRQ_CONTEXT_START";
/// Closes a context block.
pub const CONTEXT_END: &str = "# CIRQ_CONTEXT_END";
/// Prefix of the header carrying the serialized operation.
pub const GATE_HEADER: &str = "# Gate: ";
/// Prefix of the header carrying the target labels.
pub const TARGETS_HEADER: &str = "# Targets: ";

/// QCIS instructions realizing a decoupling sequence on `label`.
pub fn expand_decoupling(dd: &DynamicalDecoupling, label: &str) -> Vec<String> {
    let idle = dd.idle_ns();
    let edge = format!("{} {label} {}", Mnemonic::I, idle.trunc() as u64);
    let middle = format!("{} {label} {}", Mnemonic::I, (2.0 * idle).trunc() as u64);

    let mut lines = vec![edge.clone()];
    for (i, pulse) in dd.pi_pulse_sequence().into_iter().enumerate() {
        if i > 0 {
            lines.push(middle.clone());
        }
        let mnemonic = match pulse {
            PiGate::X => Mnemonic::X,
            PiGate::Y => Mnemonic::Y,
        };
        lines.push(format!("{mnemonic} {label}"));
    }
    lines.push(edge);
    lines
}

/// Wrap a decoupling expansion in a context block.
///
/// The sequence is validated first, so a hand-built value cannot expand
/// into an unbounded number of lines.
pub fn wrap_decoupling(dd: &DynamicalDecoupling, label: &str) -> QcisResult<Vec<String>> {
    dd.validate()?;
    let gate = encode(dd.name(), dd)?;
    let targets = encode(dd.name(), &[label])?;

    let mut lines = vec![
        CONTEXT_START.to_string(),
        format!("{GATE_HEADER}{gate}"),
        format!("{TARGETS_HEADER}{targets}"),
    ];
    lines.extend(expand_decoupling(dd, label));
    lines.push(CONTEXT_END.to_string());
    Ok(lines)
}

fn encode<T: Serialize + ?Sized>(gate: &str, value: &T) -> QcisResult<String> {
    serde_json::to_string(value).map_err(|e| QcisError::ContextEncoding {
        gate: gate.to_string(),
        reason: e.to_string(),
    })
}

/// Rebuild the operation and its target labels from a parsed block.
///
/// `line` is the line of the start marker, used in error messages.
pub fn decode(block: &ContextBlock, line: usize) -> QcisResult<(DynamicalDecoupling, Vec<String>)> {
    let invalid = |reason: String| QcisError::InvalidContext { line, reason };

    let dd: DynamicalDecoupling = serde_json::from_str(&block.gate)
        .map_err(|e| invalid(format!("unreadable gate header: {e}")))?;
    dd.validate()
        .map_err(|e| invalid(e.to_string()))?;
    let targets: Vec<String> = serde_json::from_str(&block.targets)
        .map_err(|e| invalid(format!("unreadable targets header: {e}")))?;
    if targets.len() != 1 {
        return Err(invalid(format!(
            "{} acts on one qubit, got {} targets",
            dd.name(),
            targets.len()
        )));
    }
    Ok((dd, targets))
}
