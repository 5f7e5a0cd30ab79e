//! The QCIS instruction table.
//!
//! Maps circuit operations to mnemonics and back. Rotation angles are
//! wrapped into `(-π, π]` before comparison.

use qcis_ir::{Gate, OperationKind, ParameterExpression, StandardGate};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

/// Tolerance used when matching rotation angles to native pulses.
pub const ANGLE_TOLERANCE: f64 = 1e-10;

/// A QCIS instruction mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    /// π rotation around X.
    X,
    /// π rotation around Y.
    Y,
    /// +π/2 rotation around X.
    X2P,
    /// -π/2 rotation around X.
    X2M,
    /// +π/2 rotation around Y.
    Y2P,
    /// -π/2 rotation around Y.
    Y2M,
    /// Controlled-Z on a coupler.
    CZ,
    /// Measurement.
    M,
    /// Barrier over blockable agents.
    B,
    /// Idle.
    I,
}

/// Operand shape expected after a mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Exactly one qubit label.
    Qubit,
    /// Exactly one coupler name.
    Coupler,
    /// One or more qubit labels.
    Qubits,
    /// One or more blockable agents.
    Agents,
    /// One qubit label and a duration in nanoseconds.
    QubitDuration,
}

impl Mnemonic {
    /// Every mnemonic in the table.
    pub const ALL: [Mnemonic; 10] = [
        Mnemonic::X,
        Mnemonic::Y,
        Mnemonic::X2P,
        Mnemonic::X2M,
        Mnemonic::Y2P,
        Mnemonic::Y2M,
        Mnemonic::CZ,
        Mnemonic::M,
        Mnemonic::B,
        Mnemonic::I,
    ];

    /// The mnemonic as written in QCIS text.
    pub fn as_str(self) -> &'static str {
        match self {
            Mnemonic::X => "X",
            Mnemonic::Y => "Y",
            Mnemonic::X2P => "X2P",
            Mnemonic::X2M => "X2M",
            Mnemonic::Y2P => "Y2P",
            Mnemonic::Y2M => "Y2M",
            Mnemonic::CZ => "CZ",
            Mnemonic::M => "M",
            Mnemonic::B => "B",
            Mnemonic::I => "I",
        }
    }

    /// Operand shape of this mnemonic.
    pub fn operand(self) -> Operand {
        match self {
            Mnemonic::X
            | Mnemonic::Y
            | Mnemonic::X2P
            | Mnemonic::X2M
            | Mnemonic::Y2P
            | Mnemonic::Y2M => Operand::Qubit,
            Mnemonic::CZ => Operand::Coupler,
            Mnemonic::M => Operand::Qubits,
            Mnemonic::B => Operand::Agents,
            Mnemonic::I => Operand::QubitDuration,
        }
    }

    /// Canonical gate produced when parsing this mnemonic.
    pub fn gate(self) -> Option<StandardGate> {
        match self {
            Mnemonic::X => Some(StandardGate::X),
            Mnemonic::Y => Some(StandardGate::Y),
            Mnemonic::X2P => Some(StandardGate::Rx(ParameterExpression::constant(FRAC_PI_2))),
            Mnemonic::X2M => Some(StandardGate::Rx(ParameterExpression::constant(-FRAC_PI_2))),
            Mnemonic::Y2P => Some(StandardGate::Ry(ParameterExpression::constant(FRAC_PI_2))),
            Mnemonic::Y2M => Some(StandardGate::Ry(ParameterExpression::constant(-FRAC_PI_2))),
            Mnemonic::CZ => Some(StandardGate::CZ),
            Mnemonic::M | Mnemonic::B | Mnemonic::I => None,
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of looking up an operation in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// Emit this mnemonic.
    Instruction(Mnemonic),
    /// The operation acts as identity and produces no output.
    Identity,
}

/// Look up the mnemonic for an operation kind.
///
/// Returns `None` when the operation has no QCIS counterpart.
pub fn resolve_forward(kind: &OperationKind) -> Option<Resolved> {
    match kind {
        OperationKind::Gate(Gate::Standard(gate)) => resolve_gate(gate),
        OperationKind::Measure => Some(Resolved::Instruction(Mnemonic::M)),
        OperationKind::Delay { .. } => Some(Resolved::Instruction(Mnemonic::I)),
        OperationKind::Gate(Gate::Custom(_))
        | OperationKind::NoiseChannel(_)
        | OperationKind::Annotation(_)
        | OperationKind::Decoupling(_)
        | OperationKind::Subcircuit { .. } => None,
    }
}

fn resolve_gate(gate: &StandardGate) -> Option<Resolved> {
    use Resolved::{Identity, Instruction};

    match gate {
        StandardGate::I => Some(Identity),
        StandardGate::X => Some(Instruction(Mnemonic::X)),
        StandardGate::Y => Some(Instruction(Mnemonic::Y)),
        StandardGate::SX => Some(Instruction(Mnemonic::X2P)),
        StandardGate::SXdg => Some(Instruction(Mnemonic::X2M)),
        StandardGate::CZ => Some(Instruction(Mnemonic::CZ)),
        StandardGate::Rx(theta) => {
            resolve_rotation(theta, [Mnemonic::X, Mnemonic::X2P, Mnemonic::X2M])
        }
        StandardGate::Ry(theta) => {
            resolve_rotation(theta, [Mnemonic::Y, Mnemonic::Y2P, Mnemonic::Y2M])
        }
        StandardGate::Rz(theta) => {
            let angle = theta.normalized()?;
            is_close(angle, 0.0).then_some(Identity)
        }
        StandardGate::Z
        | StandardGate::H
        | StandardGate::S
        | StandardGate::Sdg
        | StandardGate::T
        | StandardGate::Tdg
        | StandardGate::CX
        | StandardGate::Swap => None,
    }
}

/// `[pi, half_plus, half_minus]` for one rotation axis.
fn resolve_rotation(theta: &ParameterExpression, axis: [Mnemonic; 3]) -> Option<Resolved> {
    let angle = theta.normalized()?;
    let [pi, half_plus, half_minus] = axis;
    if is_close(angle, 0.0) {
        Some(Resolved::Identity)
    } else if is_close(angle.abs(), PI) {
        Some(Resolved::Instruction(pi))
    } else if is_close(angle, FRAC_PI_2) {
        Some(Resolved::Instruction(half_plus))
    } else if is_close(angle, -FRAC_PI_2) {
        Some(Resolved::Instruction(half_minus))
    } else {
        None
    }
}

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() < ANGLE_TOLERANCE
}

/// Look up a mnemonic by its QCIS spelling.
pub fn resolve_reverse(word: &str) -> Option<Mnemonic> {
    Mnemonic::ALL.into_iter().find(|m| m.as_str() == word)
}
