//! Dynamical decoupling sequences.
//!
//! A decoupling gate occupies one qubit for a fixed duration and fills it
//! with evenly spaced π pulses separated by idles. The gate itself carries
//! only its parameters; the translator expands it into pulses and idles.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Default duration of a single π pulse in nanoseconds.
pub const DEFAULT_PI_PULSE_NS: f64 = 50.0;

/// Upper bound on the number of π pulses in one sequence.
pub const MAX_DECOUPLING_PULSES: u64 = 100_000;

/// π pulse axis used inside a decoupling sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PiGate {
    /// π rotation around X.
    X,
    /// π rotation around Y.
    Y,
}

impl fmt::Display for PiGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PiGate::X => write!(f, "X"),
            PiGate::Y => write!(f, "Y"),
        }
    }
}

/// A dynamical decoupling gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DynamicalDecoupling {
    /// Carr-Purcell-Meiboom-Gill: `2n` identical π pulses.
    #[serde(rename = "CPMG")]
    Cpmg {
        /// Number of pulse pairs.
        num_pi_pair: u32,
        /// Total duration of the sequence.
        total_duration_ns: f64,
        /// Duration of one π pulse.
        single_pi_gate_duration_ns: f64,
        /// Pulse axis.
        pi_gate: PiGate,
    },
    /// Alternating X and Y pulses: `[X, Y] × n`.
    #[serde(rename = "XY")]
    Xy {
        /// Number of XY pairs.
        num_xy_pair: u32,
        /// Total duration of the sequence.
        total_duration_ns: f64,
        /// Duration of one π pulse.
        single_pi_gate_duration_ns: f64,
    },
    /// `[X, Y] × n` followed by `[Y, X] × n`.
    #[serde(rename = "XYYX")]
    Xyyx {
        /// Number of XYYX blocks.
        num_xyyx_pair: u32,
        /// Total duration of the sequence.
        total_duration_ns: f64,
        /// Duration of one π pulse.
        single_pi_gate_duration_ns: f64,
    },
}

impl DynamicalDecoupling {
    /// Create a CPMG sequence with the default pulse duration.
    pub fn cpmg(num_pi_pair: u32, total_duration_ns: f64, pi_gate: PiGate) -> IrResult<Self> {
        let dd = DynamicalDecoupling::Cpmg {
            num_pi_pair,
            total_duration_ns,
            single_pi_gate_duration_ns: DEFAULT_PI_PULSE_NS,
            pi_gate,
        };
        dd.validate()?;
        Ok(dd)
    }

    /// Create an XY sequence with the default pulse duration.
    pub fn xy(num_xy_pair: u32, total_duration_ns: f64) -> IrResult<Self> {
        let dd = DynamicalDecoupling::Xy {
            num_xy_pair,
            total_duration_ns,
            single_pi_gate_duration_ns: DEFAULT_PI_PULSE_NS,
        };
        dd.validate()?;
        Ok(dd)
    }

    /// Create an XYYX sequence with the default pulse duration.
    pub fn xyyx(num_xyyx_pair: u32, total_duration_ns: f64) -> IrResult<Self> {
        let dd = DynamicalDecoupling::Xyyx {
            num_xyyx_pair,
            total_duration_ns,
            single_pi_gate_duration_ns: DEFAULT_PI_PULSE_NS,
        };
        dd.validate()?;
        Ok(dd)
    }

    /// Replace the π pulse duration, re-validating the sequence.
    pub fn with_pulse_duration(mut self, duration_ns: f64) -> IrResult<Self> {
        match &mut self {
            DynamicalDecoupling::Cpmg {
                single_pi_gate_duration_ns,
                ..
            }
            | DynamicalDecoupling::Xy {
                single_pi_gate_duration_ns,
                ..
            }
            | DynamicalDecoupling::Xyyx {
                single_pi_gate_duration_ns,
                ..
            } => *single_pi_gate_duration_ns = duration_ns,
        }
        self.validate()?;
        Ok(self)
    }

    /// Short name of the sequence family.
    pub fn name(&self) -> &'static str {
        match self {
            DynamicalDecoupling::Cpmg { .. } => "CPMG",
            DynamicalDecoupling::Xy { .. } => "XY",
            DynamicalDecoupling::Xyyx { .. } => "XYYX",
        }
    }

    /// Total number of π pulses in the sequence.
    pub fn num_pulses(&self) -> u64 {
        match self {
            DynamicalDecoupling::Cpmg { num_pi_pair, .. } => 2 * u64::from(*num_pi_pair),
            DynamicalDecoupling::Xy { num_xy_pair, .. } => 2 * u64::from(*num_xy_pair),
            DynamicalDecoupling::Xyyx { num_xyyx_pair, .. } => 4 * u64::from(*num_xyyx_pair),
        }
    }

    fn durations(&self) -> (f64, f64) {
        match self {
            DynamicalDecoupling::Cpmg {
                total_duration_ns,
                single_pi_gate_duration_ns,
                ..
            }
            | DynamicalDecoupling::Xy {
                total_duration_ns,
                single_pi_gate_duration_ns,
                ..
            }
            | DynamicalDecoupling::Xyyx {
                total_duration_ns,
                single_pi_gate_duration_ns,
                ..
            } => (*total_duration_ns, *single_pi_gate_duration_ns),
        }
    }

    /// Check that the pulses fit into the total duration.
    pub fn validate(&self) -> IrResult<()> {
        let pulses = self.num_pulses();
        if pulses < 1 {
            return Err(IrError::InvalidDecoupling(format!(
                "{} needs at least one pulse",
                self.name()
            )));
        }
        if pulses > MAX_DECOUPLING_PULSES {
            return Err(IrError::InvalidDecoupling(format!(
                "{pulses} pulses exceed the limit of {MAX_DECOUPLING_PULSES}"
            )));
        }
        let (total, pulse) = self.durations();
        if !total.is_finite() || !pulse.is_finite() || pulse <= 0.0 {
            return Err(IrError::InvalidDecoupling(format!(
                "durations must be finite and positive, got total={total} pulse={pulse}"
            )));
        }
        if pulses as f64 * pulse >= total {
            return Err(IrError::InvalidDecoupling(format!(
                "{pulses} pulses of {pulse}ns exceed the total duration of {total}ns"
            )));
        }
        Ok(())
    }

    /// The π pulses in application order.
    pub fn pi_pulse_sequence(&self) -> Vec<PiGate> {
        match self {
            DynamicalDecoupling::Cpmg {
                num_pi_pair,
                pi_gate,
                ..
            } => vec![*pi_gate; 2 * *num_pi_pair as usize],
            DynamicalDecoupling::Xy { num_xy_pair, .. } => [PiGate::X, PiGate::Y]
                .repeat(*num_xy_pair as usize),
            DynamicalDecoupling::Xyyx { num_xyyx_pair, .. } => {
                let n = *num_xyyx_pair as usize;
                let mut seq = [PiGate::X, PiGate::Y].repeat(n);
                seq.extend([PiGate::Y, PiGate::X].repeat(n));
                seq
            }
        }
    }

    /// Idle time before the first and after the last pulse.
    ///
    /// Pulses are separated by twice this value.
    pub fn idle_ns(&self) -> f64 {
        let (total, pulse) = self.durations();
        let per_pulse = (total / self.num_pulses() as f64).floor();
        (per_pulse - pulse).floor() / 2.0
    }
}

impl fmt::Display for DynamicalDecoupling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicalDecoupling::Cpmg { pi_gate, .. } => {
                write!(f, "DD([{pi_gate}]*{})", self.num_pulses())
            }
            DynamicalDecoupling::Xy { num_xy_pair, .. } => write!(f, "DD([X--Y]*{num_xy_pair})"),
            DynamicalDecoupling::Xyyx { num_xyyx_pair, .. } => {
                write!(f, "DD([X--Y...Y--X]*{num_xyyx_pair})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpmg_sequence() {
        let dd = DynamicalDecoupling::cpmg(2, 1000.0, PiGate::Y).unwrap();
        assert_eq!(dd.pi_pulse_sequence(), vec![PiGate::Y; 4]);
        assert_eq!(dd.idle_ns(), 100.0);
        assert_eq!(dd.to_string(), "DD([Y]*4)");
    }

    #[test]
    fn test_xyyx_sequence() {
        let dd = DynamicalDecoupling::xyyx(2, 1000.0).unwrap();
        assert_eq!(
            dd.pi_pulse_sequence(),
            vec![
                PiGate::X,
                PiGate::Y,
                PiGate::X,
                PiGate::Y,
                PiGate::Y,
                PiGate::X,
                PiGate::Y,
                PiGate::X
            ]
        );
        assert_eq!(dd.idle_ns(), 37.5);
        assert_eq!(dd.to_string(), "DD([X--Y...Y--X]*2)");
    }

    #[test]
    fn test_xy_sequence() {
        let dd = DynamicalDecoupling::xy(1, 500.0).unwrap();
        assert_eq!(dd.pi_pulse_sequence(), vec![PiGate::X, PiGate::Y]);
        assert_eq!(dd.num_pulses(), 2);
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            DynamicalDecoupling::cpmg(0, 1000.0, PiGate::X),
            Err(IrError::InvalidDecoupling(_))
        ));
        assert!(matches!(
            DynamicalDecoupling::cpmg(20, 1000.0, PiGate::X),
            Err(IrError::InvalidDecoupling(_))
        ));
        let dd = DynamicalDecoupling::xy(2, 1000.0).unwrap();
        assert!(dd.clone().with_pulse_duration(300.0).is_err());
        assert!(dd.with_pulse_duration(20.0).is_ok());
    }

    #[test]
    fn test_validate_bounds_pulse_count() {
        let dd = DynamicalDecoupling::cpmg(2, 1000.0, PiGate::X).unwrap();
        assert!(dd.clone().with_pulse_duration(0.0).is_err());
        assert!(dd.with_pulse_duration(-1.0).is_err());

        let huge = DynamicalDecoupling::Cpmg {
            num_pi_pair: u32::MAX,
            total_duration_ns: f64::MAX,
            single_pi_gate_duration_ns: 1e-9,
            pi_gate: PiGate::X,
        };
        assert!(matches!(huge.validate(), Err(IrError::InvalidDecoupling(_))));

        let limit = (MAX_DECOUPLING_PULSES / 2) as u32;
        assert!(DynamicalDecoupling::cpmg(limit, 1e9, PiGate::Y).is_ok());
        assert!(DynamicalDecoupling::cpmg(limit + 1, 1e9, PiGate::Y).is_err());
    }

    #[test]
    fn test_serde_shape() {
        let dd = DynamicalDecoupling::cpmg(2, 1000.0, PiGate::X).unwrap();
        let json = serde_json::to_string(&dd).unwrap();
        assert!(json.starts_with("{\"CPMG\":"));
        let back: DynamicalDecoupling = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dd);
    }
}
