//! Device configuration for QCIS translation.
//!
//! A device file describes everything both directions need about a chip:
//!
//! ```yaml
//! qubits:
//!   Q01: 0
//!   Q02: 1
//! blockable_agents: [Q01, Q02, R01]
//! couplers:
//!   G0201: [Q01, Q02]
//! ignored_prefixes: [I]
//! ignored_gates: [h]
//! ```
//!
//! Files ending in `.json` are read as JSON, anything else as YAML.
//! Environment variables override file values:
//!
//! - `QCIS_BLOCKABLE_AGENTS`: space-separated barrier operands
//! - `QCIS_IGNORED_PREFIXES`: space-separated reverse ignore prefixes

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use qcis_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coupler::CouplerRegistry;
use crate::error::QcisResult;
use crate::filter::{GateFilter, IgnoreRule, PrefixFilter};
use crate::layout::LabelLayout;

/// Everything needed to translate circuits for one device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Hardware label to circuit qubit index.
    #[serde(default)]
    pub qubits: BTreeMap<String, u32>,

    /// Operands of every emitted barrier line.
    #[serde(default)]
    pub blockable_agents: Vec<String>,

    /// Coupler name to the pair of labels it joins.
    #[serde(default)]
    pub couplers: CouplerRegistry,

    /// QCIS line prefixes skipped when parsing.
    #[serde(default)]
    pub ignored_prefixes: Vec<String>,

    /// Gate names dropped when compiling, on top of the default rules.
    #[serde(default)]
    pub ignored_gates: Vec<String>,
}

impl DeviceConfig {
    /// Load configuration from a YAML or JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let config = if is_json {
            Self::from_json_str(&contents)?
        } else {
            Self::from_yaml_str(&contents)?
        };
        debug!("Loaded device config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: DeviceConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON text.
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: DeviceConfig =
            serde_json::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a file, then apply environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::from_file(path)?.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that are set override the current values.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        let words = |v: String| v.split_whitespace().map(str::to_string).collect::<Vec<_>>();
        if let Some(v) = var("QCIS_BLOCKABLE_AGENTS") {
            self.blockable_agents = words(v);
        }
        if let Some(v) = var("QCIS_IGNORED_PREFIXES") {
            self.ignored_prefixes = words(v);
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blockable_agents.is_empty() {
            return Err(ConfigError::ValidationError(
                "blockable_agents must not be empty".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        for (label, index) in &self.qubits {
            if !seen.insert(*index) {
                return Err(ConfigError::ValidationError(format!(
                    "Qubit index {index} is assigned to more than one label (including {label})"
                )));
            }
        }

        for (name, (a, b)) in self.couplers.iter() {
            if a == b {
                return Err(ConfigError::ValidationError(format!(
                    "Coupler {name} joins {a} to itself"
                )));
            }
            if let Some(unknown) = [a, b].into_iter().find(|l| !self.qubits.contains_key(*l)) {
                return Err(ConfigError::ValidationError(format!(
                    "Coupler {name} references unknown qubit label {unknown}"
                )));
            }
        }

        self.prefix_filter()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        Ok(())
    }

    /// Label layout built from `qubits`.
    pub fn layout(&self) -> LabelLayout {
        self.qubits
            .iter()
            .map(|(label, index)| (qcis_ir::QubitId(*index), label.as_str()))
            .collect()
    }

    /// Forward ignore policy: the default rules plus `ignored_gates`.
    pub fn gate_filter(&self) -> GateFilter {
        GateFilter::with_rules(self.ignored_gates.iter().cloned().map(IgnoreRule::GateName))
    }

    /// Reverse ignore policy from `ignored_prefixes`.
    pub fn prefix_filter(&self) -> QcisResult<PrefixFilter> {
        PrefixFilter::new(self.ignored_prefixes.iter().cloned())
    }

    fn registry(&self) -> Option<&CouplerRegistry> {
        (!self.couplers.is_empty()).then_some(&self.couplers)
    }

    /// Compile a circuit for this device.
    pub fn compile(&self, circuit: &Circuit) -> QcisResult<String> {
        let layout = self.layout();
        crate::circuit_to_qcis(
            circuit,
            |q| layout.label_of(q),
            &self.blockable_agents,
            self.registry(),
            Some(&self.gate_filter()),
        )
    }

    /// Parse QCIS text produced for this device.
    pub fn parse(&self, source: &str) -> QcisResult<Circuit> {
        let layout = self.layout();
        let prefixes = self.prefix_filter()?;
        crate::qcis_to_circuit(
            source,
            |label| layout.qubit_of(label),
            self.registry(),
            Some(&prefixes),
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcis_ir::QubitId;

    const DEVICE_YAML: &str = "
qubits:
  Q01: 0
  Q02: 1
blockable_agents: [Q01, Q02, R01]
couplers:
  G0201: [Q01, Q02]
ignored_prefixes: [I]
ignored_gates: [h]
";

    fn device() -> DeviceConfig {
        DeviceConfig::from_yaml_str(DEVICE_YAML).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = DeviceConfig::default();
        assert!(config.qubits.is_empty());
        assert!(config.couplers.is_empty());
        // A device needs at least one barrier operand.
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_device() {
        let config = device();
        assert_eq!(config.qubits["Q02"], 1);
        assert_eq!(config.couplers.name_for("Q02", "Q01"), Some("G0201"));
        assert_eq!(config.layout().label_of(QubitId(0)).as_deref(), Some("Q01"));
        assert!(config.gate_filter().rules().contains(&IgnoreRule::GateName("h".into())));
    }

    #[test]
    fn test_json_device() {
        let json = r#"{"qubits":{"Q00":0},"blockable_agents":["Q00"]}"#;
        let config = DeviceConfig::from_json_str(json).unwrap();
        assert_eq!(config.blockable_agents, vec!["Q00"]);
        assert!(config.ignored_prefixes.is_empty());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            DeviceConfig::from_yaml_str("qubits: [not, a, map]"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            DeviceConfig::from_file("/nonexistent/device.yaml"),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_validate_duplicate_index() {
        let mut config = device();
        config.qubits.insert("Q03".into(), 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_coupler_label() {
        let mut config = device();
        config.couplers.insert("G0302", "Q03", "Q02");
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_barrier_prefix() {
        let mut config = device();
        config.ignored_prefixes.push("B".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = device().merge_vars(|key| match key {
            "QCIS_BLOCKABLE_AGENTS" => Some("Q01 Q02".to_string()),
            _ => None,
        });
        assert_eq!(config.blockable_agents, vec!["Q01", "Q02"]);
        assert_eq!(config.ignored_prefixes, vec!["I"]);
    }

    #[test]
    fn test_compile_and_parse() {
        let config = device();
        let mut circuit = Circuit::new();
        circuit
            .x(QubitId(0))
            .unwrap()
            .cz(QubitId(0), QubitId(1))
            .unwrap();

        let qcis = config.compile(&circuit).unwrap();
        assert_eq!(qcis, "X Q01\nB Q01 Q02 R01\nCZ G0201\nB Q01 Q02 R01\n");
        assert_eq!(config.parse(&qcis).unwrap(), circuit);
    }
}
