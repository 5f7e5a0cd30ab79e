//! Qubit-to-label layouts.

use qcis_ir::QubitId;
use rustc_hash::FxHashMap;

/// Bijection between circuit qubits and hardware labels such as `"Q01"`.
///
/// [`LabelLayout::label_of`] and [`LabelLayout::qubit_of`] have the shapes
/// expected by [`crate::circuit_to_qcis`] and [`crate::qcis_to_circuit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelLayout {
    qubit_to_label: FxHashMap<QubitId, String>,
    label_to_qubit: FxHashMap<String, QubitId>,
}

impl LabelLayout {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// `QubitId(i)` ↔ `Q{i:02}` for `i` in `0..num_qubits`.
    pub fn sequential(num_qubits: u32) -> Self {
        (0..num_qubits)
            .map(|i| (QubitId(i), format!("Q{i:02}")))
            .collect()
    }

    /// Map `qubit` to `label`.
    ///
    /// Any earlier mapping of either side is removed so both directions stay
    /// consistent.
    pub fn add(&mut self, qubit: QubitId, label: impl Into<String>) {
        let label = label.into();
        if let Some(old_qubit) = self.label_to_qubit.get(&label).copied() {
            if old_qubit != qubit {
                self.qubit_to_label.remove(&old_qubit);
            }
        }
        if let Some(old_label) = self.qubit_to_label.get(&qubit) {
            if *old_label != label {
                self.label_to_qubit.remove(old_label);
            }
        }
        self.qubit_to_label.insert(qubit, label.clone());
        self.label_to_qubit.insert(label, qubit);
    }

    /// Hardware label of `qubit`.
    pub fn label_of(&self, qubit: QubitId) -> Option<String> {
        self.qubit_to_label.get(&qubit).cloned()
    }

    /// Qubit addressed by `label`.
    pub fn qubit_of(&self, label: &str) -> Option<QubitId> {
        self.label_to_qubit.get(label).copied()
    }

    /// Number of mapped qubits.
    pub fn len(&self) -> usize {
        self.qubit_to_label.len()
    }

    /// Check if the layout is empty.
    pub fn is_empty(&self) -> bool {
        self.qubit_to_label.is_empty()
    }

    /// Iterate over `(qubit, label)` pairs in qubit order.
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, &str)> {
        let mut pairs: Vec<_> = self
            .qubit_to_label
            .iter()
            .map(|(q, l)| (*q, l.as_str()))
            .collect();
        pairs.sort_unstable_by_key(|(q, _)| *q);
        pairs.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(QubitId, S)> for LabelLayout {
    fn from_iter<T: IntoIterator<Item = (QubitId, S)>>(iter: T) -> Self {
        let mut layout = Self::new();
        for (qubit, label) in iter {
            layout.add(qubit, label);
        }
        layout
    }
}
