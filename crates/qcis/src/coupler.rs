//! Coupler registry: named two-qubit resources.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

type PairMap = BTreeMap<String, (String, String)>;

/// Maps coupler names to the pair of qubit labels they join.
///
/// Pair lookups ignore order. When several couplers join the same pair,
/// the lexicographically smallest name is returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PairMap", into = "PairMap")]
pub struct CouplerRegistry {
    couplers: PairMap,
    by_pair: FxHashMap<(String, String), String>,
}

impl CouplerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(name, (label, label))` entries.
    pub fn from_pairs<N, L>(pairs: impl IntoIterator<Item = (N, (L, L))>) -> Self
    where
        N: Into<String>,
        L: Into<String>,
    {
        let mut registry = Self::new();
        for (name, (a, b)) in pairs {
            registry.insert(name, a, b);
        }
        registry
    }

    /// Register or replace a coupler.
    pub fn insert(&mut self, name: impl Into<String>, a: impl Into<String>, b: impl Into<String>) {
        let name = name.into();
        let pair = (a.into(), b.into());
        let key = pair_key(&pair.0, &pair.1);
        if self.couplers.insert(name.clone(), pair).is_some() {
            self.rebuild_index();
            return;
        }
        match self.by_pair.get(&key) {
            Some(existing) if *existing <= name => {}
            _ => {
                self.by_pair.insert(key, name);
            }
        }
    }

    fn rebuild_index(&mut self) {
        self.by_pair.clear();
        // BTreeMap iterates names in order, so the first insert wins.
        for (name, (a, b)) in &self.couplers {
            self.by_pair
                .entry(pair_key(a, b))
                .or_insert_with(|| name.clone());
        }
    }

    /// Coupler joining `a` and `b`, in either order.
    pub fn name_for(&self, a: &str, b: &str) -> Option<&str> {
        self.by_pair.get(&pair_key(a, b)).map(String::as_str)
    }

    /// Labels joined by the coupler `name`, in registration order.
    pub fn pair_for(&self, name: &str) -> Option<(&str, &str)> {
        self.couplers
            .get(name)
            .map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Number of couplers.
    pub fn len(&self) -> usize {
        self.couplers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.couplers.is_empty()
    }

    /// Iterate over `(name, (label, label))` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, (&str, &str))> {
        self.couplers
            .iter()
            .map(|(name, (a, b))| (name.as_str(), (a.as_str(), b.as_str())))
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl From<PairMap> for CouplerRegistry {
    fn from(couplers: PairMap) -> Self {
        let mut registry = Self {
            couplers,
            by_pair: FxHashMap::default(),
        };
        registry.rebuild_index();
        registry
    }
}

impl From<CouplerRegistry> for PairMap {
    fn from(registry: CouplerRegistry) -> Self {
        registry.couplers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_order_insensitive() {
        let registry = CouplerRegistry::from_pairs([("G0201", ("Q01", "Q02"))]);
        assert_eq!(registry.name_for("Q01", "Q02"), Some("G0201"));
        assert_eq!(registry.name_for("Q02", "Q01"), Some("G0201"));
        assert_eq!(registry.name_for("Q01", "Q03"), None);
        assert_eq!(registry.pair_for("G0201"), Some(("Q01", "Q02")));
        assert_eq!(registry.pair_for("G9999"), None);
    }

    #[test]
    fn test_smallest_name_wins() {
        let registry = CouplerRegistry::from_pairs([("G2", ("Q01", "Q02")), ("G1", ("Q02", "Q01"))]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name_for("Q01", "Q02"), Some("G1"));
    }

    #[test]
    fn test_replace_rebuilds_index() {
        let mut registry = CouplerRegistry::new();
        registry.insert("G1", "Q01", "Q02");
        registry.insert("G1", "Q02", "Q03");
        assert_eq!(registry.name_for("Q01", "Q02"), None);
        assert_eq!(registry.name_for("Q03", "Q02"), Some("G1"));
    }

    #[test]
    fn test_serde_as_map() {
        let json = r#"{"G0201": ["Q01", "Q02"], "G0302": ["Q02", "Q03"]}"#;
        let registry: CouplerRegistry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name_for("Q03", "Q02"), Some("G0302"));

        let back = serde_json::to_value(&registry).unwrap();
        assert_eq!(back["G0201"][1], "Q02");
    }
}
