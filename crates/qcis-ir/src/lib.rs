//! Moment-based circuit model for the QCIS translator.
//!
//! A [`Circuit`] is an ordered list of [`Moment`]s; each moment holds
//! [`Operation`]s that run concurrently on disjoint qubits. The model is a
//! plain data structure: it has no simulation and no scheduling logic.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], opaque identities mapped to hardware labels by the caller
//! - **Gates**: [`StandardGate`] for built-in gates and [`CustomGate`] for everything else
//! - **Parameters**: [`ParameterExpression`] for rotation angles
//! - **Operations**: [`OperationKind`] covers gates, measurement, delays, noise,
//!   annotations, [`DynamicalDecoupling`] and repeated subcircuits
//!
//! # Example
//!
//! ```rust
//! use qcis_ir::{Circuit, QubitId};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let mut circuit = Circuit::new();
//! circuit
//!     .ry(FRAC_PI_2, QubitId(0))
//!     .unwrap()
//!     .cz(QubitId(0), QubitId(1))
//!     .unwrap()
//!     .measure([QubitId(0), QubitId(1)])
//!     .unwrap();
//!
//! assert_eq!(circuit.num_moments(), 3);
//! ```

pub mod circuit;
pub mod decoupling;
pub mod error;
pub mod gate;
pub mod moment;
pub mod noise;
pub mod operation;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use decoupling::{DEFAULT_PI_PULSE_NS, DynamicalDecoupling, MAX_DECOUPLING_PULSES, PiGate};
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, StandardGate};
pub use moment::Moment;
pub use noise::{Annotation, NoiseModel};
pub use operation::{Operation, OperationKind};
pub use parameter::ParameterExpression;
pub use qubit::QubitId;
