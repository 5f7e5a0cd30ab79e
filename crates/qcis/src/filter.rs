//! Ignore policies for both translation directions.

use qcis_ir::{Gate, Operation, OperationKind, StandardGate};
use serde::{Deserialize, Serialize};

use crate::error::{QcisError, QcisResult};

/// A rule matching operations that are dropped during compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IgnoreRule {
    /// Every noise channel.
    AllNoise,
    /// Noise channels with this name.
    Noise(String),
    /// Every annotation.
    AllAnnotations,
    /// Annotations of this kind.
    Annotation(String),
    /// This exact gate instance, including its parameters.
    Gate(StandardGate),
    /// Every gate with this name, whatever its parameters.
    GateName(String),
    /// Custom gates with this name.
    Custom(String),
}

/// Rules that are always active.
pub const DEFAULT_IGNORE_RULES: &[IgnoreRule] = &[IgnoreRule::AllNoise, IgnoreRule::AllAnnotations];

impl IgnoreRule {
    /// Whether this rule matches `op`.
    pub fn matches(&self, op: &Operation) -> bool {
        match (self, &op.kind) {
            (IgnoreRule::AllNoise, OperationKind::NoiseChannel(_))
            | (IgnoreRule::AllAnnotations, OperationKind::Annotation(_)) => true,
            (IgnoreRule::Noise(name), OperationKind::NoiseChannel(model)) => {
                model.name() == name.as_str()
            }
            (IgnoreRule::Annotation(name), OperationKind::Annotation(a)) => a.name() == name.as_str(),
            (IgnoreRule::Gate(gate), OperationKind::Gate(Gate::Standard(g))) => g == gate,
            (IgnoreRule::GateName(name), OperationKind::Gate(g)) => g.name() == name.as_str(),
            (IgnoreRule::Custom(name), OperationKind::Gate(Gate::Custom(g))) => g.name == *name,
            _ => false,
        }
    }
}

/// Forward ignore policy: the default rules plus caller rules.
#[derive(Debug, Clone, PartialEq)]
pub struct GateFilter {
    rules: Vec<IgnoreRule>,
}

impl Default for GateFilter {
    fn default() -> Self {
        Self {
            rules: DEFAULT_IGNORE_RULES.to_vec(),
        }
    }
}

impl GateFilter {
    /// Union of the default rules and `rules`.
    pub fn with_rules(rules: impl IntoIterator<Item = IgnoreRule>) -> Self {
        let mut filter = Self::default();
        for rule in rules {
            filter.add(rule);
        }
        filter
    }

    /// Add a rule unless already present.
    pub fn add(&mut self, rule: IgnoreRule) {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
    }

    /// Active rules.
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// Whether `op` should be dropped.
    pub fn should_ignore(&self, op: &Operation) -> bool {
        self.rules.iter().any(|rule| rule.matches(op))
    }
}

/// Reverse ignore policy: lines starting with any prefix are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixFilter {
    prefixes: Vec<String>,
}

impl PrefixFilter {
    /// Build a prefix filter.
    ///
    /// Rejects prefixes that could match a barrier line, since skipping a
    /// barrier would merge two moments.
    pub fn new<S: Into<String>>(prefixes: impl IntoIterator<Item = S>) -> QcisResult<Self> {
        let prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        if let Some(bad) = prefixes.iter().find(|p| matches_barrier(p)) {
            return Err(QcisError::BarrierPrefix(bad.clone()));
        }
        Ok(Self { prefixes })
    }

    /// Configured prefixes.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Whether the trimmed `line` starts with any prefix.
    pub fn should_ignore(&self, line: &str) -> bool {
        let line = line.trim();
        self.prefixes.iter().any(|p| line.starts_with(p.as_str()))
    }
}

fn matches_barrier(prefix: &str) -> bool {
    match prefix.strip_prefix('B') {
        None => prefix.is_empty(),
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
    }
}
