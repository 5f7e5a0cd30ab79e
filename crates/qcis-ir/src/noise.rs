//! Noise channels and bookkeeping annotations.
//!
//! Neither has a hardware counterpart: the translator drops them by default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A noise channel model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NoiseModel {
    /// Symmetric depolarizing channel.
    Depolarizing {
        /// Error probability (0.0 to 1.0).
        p: f64,
    },

    /// Depolarizing channel with independent Pauli probabilities.
    AsymmetricDepolarizing {
        /// Probability of an X error.
        p_x: f64,
        /// Probability of a Y error.
        p_y: f64,
        /// Probability of a Z error.
        p_z: f64,
    },

    /// Amplitude damping: models energy relaxation (T1 decay).
    AmplitudeDamping {
        /// Damping parameter (0.0 to 1.0).
        gamma: f64,
    },

    /// Phase damping: models dephasing (T2 decay without energy loss).
    PhaseDamping {
        /// Dephasing parameter (0.0 to 1.0).
        gamma: f64,
    },

    /// Bit-flip channel: flips |0⟩ ↔ |1⟩ with probability `p`.
    BitFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },

    /// Phase-flip channel: applies Z with probability `p`.
    PhaseFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },

    /// Custom noise model for backend-specific channels.
    Custom {
        /// Descriptive name (e.g., "crosstalk", "leakage").
        name: String,
        /// Key-value parameters.
        params: BTreeMap<String, f64>,
    },
}

impl NoiseModel {
    /// Get a human-readable name for this noise model.
    pub fn name(&self) -> &str {
        match self {
            NoiseModel::Depolarizing { .. } => "depolarizing",
            NoiseModel::AsymmetricDepolarizing { .. } => "asymmetric_depolarizing",
            NoiseModel::AmplitudeDamping { .. } => "amplitude_damping",
            NoiseModel::PhaseDamping { .. } => "phase_damping",
            NoiseModel::BitFlip { .. } => "bit_flip",
            NoiseModel::PhaseFlip { .. } => "phase_flip",
            NoiseModel::Custom { name, .. } => name,
        }
    }
}

impl std::fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseModel::Depolarizing { p } => write!(f, "depolarizing(p={p:.4})"),
            NoiseModel::AsymmetricDepolarizing { p_x, p_y, p_z } => {
                write!(f, "asymmetric_depolarizing({p_x:.4}, {p_y:.4}, {p_z:.4})")
            }
            NoiseModel::AmplitudeDamping { gamma } => write!(f, "amplitude_damping(γ={gamma:.4})"),
            NoiseModel::PhaseDamping { gamma } => write!(f, "phase_damping(γ={gamma:.4})"),
            NoiseModel::BitFlip { p } => write!(f, "bit_flip(p={p:.4})"),
            NoiseModel::PhaseFlip { p } => write!(f, "phase_flip(p={p:.4})"),
            NoiseModel::Custom { name, .. } => write!(f, "custom({name})"),
        }
    }
}

/// Error-correction bookkeeping markers carried alongside a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Annotation {
    /// Parity check over earlier measurement results.
    Detector {
        /// Coordinates attached to the detector.
        coords: Vec<f64>,
    },
    /// Logical observable accumulator.
    Observable {
        /// Observable index.
        index: u32,
    },
    /// Offset applied to subsequent detector coordinates.
    ShiftCoords {
        /// Coordinate offsets.
        shift: Vec<f64>,
    },
}

impl Annotation {
    /// Get the annotation kind name.
    pub fn name(&self) -> &'static str {
        match self {
            Annotation::Detector { .. } => "detector",
            Annotation::Observable { .. } => "observable",
            Annotation::ShiftCoords { .. } => "shift_coords",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_names() {
        assert_eq!(NoiseModel::Depolarizing { p: 0.1 }.name(), "depolarizing");
        let custom = NoiseModel::Custom {
            name: "leakage".into(),
            params: BTreeMap::new(),
        };
        assert_eq!(custom.name(), "leakage");
        assert_eq!(format!("{custom}"), "custom(leakage)");
    }

    #[test]
    fn test_annotation_names() {
        assert_eq!(Annotation::Observable { index: 0 }.name(), "observable");
        assert_eq!(Annotation::Detector { coords: vec![] }.name(), "detector");
    }
}
