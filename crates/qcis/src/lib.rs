//! QCIS translator for moment-based circuits.
//!
//! This crate compiles [`qcis_ir::Circuit`]s into QCIS, the line-oriented
//! instruction set of superconducting devices, and parses QCIS text back into
//! circuits. Every moment becomes a group of instruction lines closed by a
//! barrier, so the moment structure survives the round trip.
//!
//! # Instruction Set
//!
//! | Instruction | Operands | Circuit operation |
//! |-------------|----------|-------------------|
//! | `X`, `Y` | qubit | π rotation |
//! | `X2P`, `X2M` | qubit | `rx(±π/2)` |
//! | `Y2P`, `Y2M` | qubit | `ry(±π/2)` |
//! | `CZ` | coupler | controlled-Z on the coupler's qubit pair |
//! | `M` | qubits | measurement |
//! | `I` | qubit, duration | idle (delay) in nanoseconds |
//! | `B` | agents | moment boundary |
//!
//! Lines starting with `#` are comments, except for context blocks that
//! carry dynamical decoupling sequences (see [`context`]).
//!
//! # Example: Compiling
//!
//! ```rust
//! use qcis::{CouplerRegistry, LabelLayout, circuit_to_qcis};
//! use qcis_ir::{Circuit, QubitId};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let mut circuit = Circuit::new();
//! circuit
//!     .ry(FRAC_PI_2, QubitId(1))
//!     .unwrap()
//!     .cz(QubitId(1), QubitId(2))
//!     .unwrap()
//!     .measure([QubitId(1), QubitId(2)])
//!     .unwrap();
//!
//! let layout: LabelLayout = [(QubitId(1), "Q01"), (QubitId(2), "Q02")].into_iter().collect();
//! let couplers = CouplerRegistry::from_pairs([("G0201", ("Q01", "Q02"))]);
//!
//! let qcis = circuit_to_qcis(
//!     &circuit,
//!     |q| layout.label_of(q),
//!     &["Q01", "Q02"],
//!     Some(&couplers),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(qcis, "Y2P Q01\nB Q01 Q02\nCZ G0201\nB Q01 Q02\nM Q01 Q02\nB Q01 Q02\n");
//! ```
//!
//! # Example: Parsing
//!
//! ```rust
//! use qcis::{LabelLayout, qcis_to_circuit};
//!
//! let layout = LabelLayout::sequential(3);
//! let circuit = qcis_to_circuit(
//!     "X2P Q01\nX2M Q02\nB Q01 Q02\nM Q01 Q02\nB Q01 Q02\n",
//!     |label| layout.qubit_of(label),
//!     None,
//!     None,
//! )
//! .unwrap();
//! assert_eq!(circuit.num_moments(), 2);
//! ```

mod ast;
pub mod config;
pub mod context;
pub mod coupler;
mod emitter;
pub mod error;
pub mod filter;
pub mod layout;
mod lexer;
mod parser;
pub mod table;

use qcis_ir::{Circuit, QubitId};
use tracing::{info, instrument};

pub use config::{ConfigError, DeviceConfig};
pub use coupler::CouplerRegistry;
pub use error::{QcisError, QcisResult};
pub use filter::{DEFAULT_IGNORE_RULES, GateFilter, IgnoreRule, PrefixFilter};
pub use layout::LabelLayout;
pub use parser::parse_program;
pub use table::{Mnemonic, Resolved, resolve_forward, resolve_reverse};

// Re-export AST types for advanced users
pub mod syntax {
    pub use crate::ast::*;
}

/// Compile a circuit to QCIS text.
///
/// `label_of` names the hardware qubit for each circuit qubit, and every
/// moment is closed by `B` followed by `blockable_agents`. `couplers` is
/// required only when the circuit contains two-qubit gates. Operations
/// matched by `filter` (or by [`DEFAULT_IGNORE_RULES`] when `None`) are
/// dropped.
#[instrument(skip(circuit, label_of, blockable_agents, couplers, filter))]
pub fn circuit_to_qcis<F, A>(
    circuit: &Circuit,
    label_of: F,
    blockable_agents: &[A],
    couplers: Option<&CouplerRegistry>,
    filter: Option<&GateFilter>,
) -> QcisResult<String>
where
    F: Fn(QubitId) -> Option<String>,
    A: AsRef<str>,
{
    let default_filter;
    let filter = match filter {
        Some(filter) => filter,
        None => {
            default_filter = GateFilter::default();
            &default_filter
        }
    };

    let qcis = emitter::emit(circuit, label_of, blockable_agents, couplers, filter)?;
    info!(
        "Compiled {} moments ({} operations) into {} QCIS lines",
        circuit.num_moments(),
        circuit.num_operations(),
        qcis.lines().count()
    );
    Ok(qcis)
}

/// Parse QCIS text into a circuit.
///
/// Each barrier closes one moment. `qubit_of` resolves hardware labels,
/// `couplers` is required only when the text contains coupler instructions,
/// and lines matching `ignored` are skipped.
#[instrument(skip(source, qubit_of, couplers, ignored))]
pub fn qcis_to_circuit<F>(
    source: &str,
    qubit_of: F,
    couplers: Option<&CouplerRegistry>,
    ignored: Option<&PrefixFilter>,
) -> QcisResult<Circuit>
where
    F: Fn(&str) -> Option<QubitId>,
{
    let circuit = parser::parse(source, qubit_of, couplers, ignored)?;
    info!(
        "Parsed {} moments ({} operations) from QCIS",
        circuit.num_moments(),
        circuit.num_operations()
    );
    Ok(circuit)
}
