//! QCIS emitter for serializing circuits.

use qcis_ir::{Circuit, IrError, Moment, Operation, OperationKind, QubitId};
use tracing::{debug, trace};

use crate::context;
use crate::coupler::CouplerRegistry;
use crate::error::{QcisError, QcisResult};
use crate::filter::GateFilter;
use crate::table::{Mnemonic, Operand, Resolved, resolve_forward};

/// Emit a circuit as QCIS text.
pub(crate) fn emit<F, A>(
    circuit: &Circuit,
    label_of: F,
    blockable_agents: &[A],
    couplers: Option<&CouplerRegistry>,
    filter: &GateFilter,
) -> QcisResult<String>
where
    F: Fn(QubitId) -> Option<String>,
    A: AsRef<str>,
{
    if blockable_agents.is_empty() {
        return Err(QcisError::EmptyBarrierSet);
    }
    if couplers.is_none() && needs_couplers(circuit, filter) {
        return Err(QcisError::MissingCouplers);
    }

    let agents: Vec<&str> = blockable_agents.iter().map(AsRef::as_ref).collect();
    let mut emitter = Emitter {
        label_of,
        barrier: format!("{} {}", Mnemonic::B, agents.join(" ")),
        couplers,
        filter,
        output: String::new(),
        num_lines: 0,
        ends_with_barrier: false,
    };
    emitter.emit_moments(circuit.moments())?;
    Ok(emitter.finish())
}

/// Whether any kept operation compiles to a coupler instruction.
fn needs_couplers(circuit: &Circuit, filter: &GateFilter) -> bool {
    circuit.all_operations().any(|op| {
        if filter.should_ignore(op) {
            return false;
        }
        match &op.kind {
            OperationKind::Subcircuit { circuit, .. } => needs_couplers(circuit, filter),
            kind => matches!(
                resolve_forward(kind),
                Some(Resolved::Instruction(m)) if m.operand() == Operand::Coupler
            ),
        }
    })
}

/// QCIS emitter.
struct Emitter<'a, F> {
    label_of: F,
    /// The full barrier line.
    barrier: String,
    couplers: Option<&'a CouplerRegistry>,
    filter: &'a GateFilter,
    output: String,
    num_lines: usize,
    ends_with_barrier: bool,
}

impl<F> Emitter<'_, F>
where
    F: Fn(QubitId) -> Option<String>,
{
    fn emit_moments(&mut self, moments: &[Moment]) -> QcisResult<()> {
        for moment in moments {
            self.emit_moment(moment)?;
        }
        Ok(())
    }

    fn emit_moment(&mut self, moment: &Moment) -> QcisResult<()> {
        // (smallest label, lines) per operation
        let mut entries: Vec<(String, Vec<String>)> = Vec::new();
        let mut measured: Vec<String> = Vec::new();
        let mut subcircuits: Vec<(String, &Circuit, u32)> = Vec::new();

        for op in moment {
            if self.filter.should_ignore(op) {
                debug!("Ignoring {} on {:?}", op.name(), op.qubits);
                continue;
            }
            match &op.kind {
                OperationKind::Measure => {
                    for q in &op.qubits {
                        measured.push(self.label(*q)?);
                    }
                }
                OperationKind::Subcircuit {
                    circuit,
                    repetitions,
                } => {
                    let key = self.smallest_label(&op.qubits)?;
                    subcircuits.push((key, circuit.as_ref(), *repetitions));
                }
                OperationKind::Decoupling(dd) => {
                    let label = self.single_label(op)?;
                    entries.push((label.clone(), context::wrap_decoupling(dd, &label)?));
                }
                kind => match resolve_forward(kind) {
                    Some(Resolved::Instruction(mnemonic)) => {
                        let (key, line) = self.instruction(mnemonic, op)?;
                        entries.push((key, vec![line]));
                    }
                    Some(Resolved::Identity) => {
                        debug!("Dropping identity {} on {:?}", op.name(), op.qubits);
                    }
                    None => {
                        return Err(QcisError::UnsupportedGate {
                            name: op.name().to_string(),
                            qubits: op.qubits.clone(),
                        });
                    }
                },
            }
        }

        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for line in entries.into_iter().flat_map(|(_, lines)| lines) {
            self.writeln(&line);
        }

        if !measured.is_empty() {
            measured.sort();
            self.writeln(&format!("{} {}", Mnemonic::M, measured.join(" ")));
        }

        subcircuits.sort_by(|a, b| a.0.cmp(&b.0));
        let before = self.num_lines;
        for (_, circuit, repetitions) in subcircuits {
            for _ in 0..repetitions {
                self.emit_moments(circuit.moments())?;
            }
        }

        // An inlined subcircuit's last barrier already closes this moment.
        if !(self.num_lines > before && self.ends_with_barrier) {
            self.write_barrier();
        }
        Ok(())
    }

    /// Sort key and text of a single-line instruction.
    fn instruction(&self, mnemonic: Mnemonic, op: &Operation) -> QcisResult<(String, String)> {
        match mnemonic.operand() {
            Operand::Qubit => {
                let label = self.single_label(op)?;
                let line = format!("{mnemonic} {label}");
                Ok((label, line))
            }
            Operand::Coupler => {
                let [a, b] = op.qubits[..] else {
                    return Err(arity_error(op, 2));
                };
                let (la, lb) = (self.label(a)?, self.label(b)?);
                let registry = self.couplers.ok_or(QcisError::MissingCouplers)?;
                let name = registry
                    .name_for(&la, &lb)
                    .ok_or_else(|| QcisError::MissingCoupler(format!("pair ({la}, {lb})")))?;
                let line = format!("{mnemonic} {name}");
                Ok((la.min(lb), line))
            }
            Operand::QubitDuration => {
                let OperationKind::Delay { duration_ns } = op.kind else {
                    return Err(unsupported(op));
                };
                let label = self.single_label(op)?;
                let line = format!("{mnemonic} {label} {duration_ns}");
                Ok((label, line))
            }
            Operand::Qubits | Operand::Agents => Err(unsupported(op)),
        }
    }

    fn label(&self, qubit: QubitId) -> QcisResult<String> {
        (self.label_of)(qubit).ok_or(QcisError::UnmappedQubit { qubit })
    }

    fn single_label(&self, op: &Operation) -> QcisResult<String> {
        match op.qubits[..] {
            [q] => self.label(q),
            _ => Err(arity_error(op, 1)),
        }
    }

    fn smallest_label(&self, qubits: &[QubitId]) -> QcisResult<String> {
        let mut smallest: Option<String> = None;
        for q in qubits {
            let label = self.label(*q)?;
            if smallest.as_ref().is_none_or(|s| label < *s) {
                smallest = Some(label);
            }
        }
        Ok(smallest.unwrap_or_default())
    }

    fn writeln(&mut self, line: &str) {
        trace!("{}", line);
        self.output.push_str(line);
        self.output.push('\n');
        self.num_lines += 1;
        self.ends_with_barrier = false;
    }

    fn write_barrier(&mut self) {
        trace!("{}", self.barrier);
        self.output.push_str(&self.barrier);
        self.output.push('\n');
        self.num_lines += 1;
        self.ends_with_barrier = true;
    }

    fn finish(self) -> String {
        if self.output.is_empty() {
            "\n".to_string()
        } else {
            self.output
        }
    }
}

fn arity_error(op: &Operation, expected: u32) -> QcisError {
    QcisError::Ir(IrError::QubitCountMismatch {
        gate_name: op.name().to_string(),
        expected,
        got: op.qubits.len() as u32,
    })
}

fn unsupported(op: &Operation) -> QcisError {
    QcisError::UnsupportedGate {
        name: op.name().to_string(),
        qubits: op.qubits.clone(),
    }
}
