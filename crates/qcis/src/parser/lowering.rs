//! AST-to-Circuit lowering for QCIS.

use qcis_ir::{Circuit, Moment, Operation, QubitId, StandardGate};
use tracing::{debug, trace};

use crate::ast::{Line, Program, Statement};
use crate::context;
use crate::coupler::CouplerRegistry;
use crate::error::{QcisError, QcisResult};
use crate::table::Mnemonic;

/// Lower an AST Program to a Circuit.
pub(crate) fn lower_to_circuit<F>(
    program: &Program,
    qubit_of: F,
    couplers: Option<&CouplerRegistry>,
) -> QcisResult<Circuit>
where
    F: Fn(&str) -> Option<QubitId>,
{
    let lowerer = Lowerer {
        qubit_of,
        couplers,
        circuit: Circuit::new(),
        current: Moment::new(),
    };
    lowerer.lower(program)
}

/// Accumulates operations into the open moment until a barrier closes it.
struct Lowerer<'a, F> {
    qubit_of: F,
    couplers: Option<&'a CouplerRegistry>,
    circuit: Circuit,
    current: Moment,
}

impl<F> Lowerer<'_, F>
where
    F: Fn(&str) -> Option<QubitId>,
{
    fn lower(mut self, program: &Program) -> QcisResult<Circuit> {
        for line in &program.lines {
            self.lower_line(line)?;
        }
        if !self.current.is_empty() {
            self.close_moment();
        }
        Ok(self.circuit)
    }

    fn lower_line(&mut self, line: &Line) -> QcisResult<()> {
        let number = line.number;
        match &line.statement {
            Statement::Barrier { .. } => self.close_moment(),

            Statement::Comment(_) => {}

            Statement::Ignored(text) => debug!("Ignoring line {}: {}", number, text),

            Statement::Gate { mnemonic, qubit } => {
                let gate = gate_for(*mnemonic, number)?;
                let q = self.resolve(qubit, number)?;
                self.current.push(Operation::gate(gate, [q])?)?;
            }

            Statement::Coupled { mnemonic, coupler } => {
                let couplers = self.couplers.ok_or(QcisError::MissingCouplers)?;
                let (a, b) = couplers
                    .pair_for(coupler)
                    .ok_or_else(|| QcisError::MissingCoupler(format!("'{coupler}'")))?;
                let gate = gate_for(*mnemonic, number)?;
                let qa = self.resolve(a, number)?;
                let qb = self.resolve(b, number)?;
                self.current.push(Operation::gate(gate, [qa, qb])?)?;
            }

            Statement::Measure { qubits } => {
                let qs = qubits
                    .iter()
                    .map(|label| self.resolve(label, number))
                    .collect::<QcisResult<Vec<_>>>()?;
                self.current.push(Operation::measure(qs)?)?;
            }

            Statement::Idle { qubit, duration_ns } => {
                let q = self.resolve(qubit, number)?;
                self.current.push(Operation::delay(q, *duration_ns))?;
            }

            Statement::Context(block) => {
                let (dd, targets) = context::decode(block, number)?;
                let q = self.resolve(&targets[0], number)?;
                debug!("Rebuilt {} on {} from context block at line {}", dd.name(), q, number);
                self.current.push(Operation::decoupling(dd, q))?;
            }
        }
        Ok(())
    }

    fn close_moment(&mut self) {
        let moment = std::mem::take(&mut self.current);
        trace!("Closing moment {} with {} operations", self.circuit.num_moments(), moment.len());
        self.circuit.push_moment(moment);
    }

    fn resolve(&self, label: &str, line: usize) -> QcisResult<QubitId> {
        (self.qubit_of)(label).ok_or_else(|| QcisError::UnmappedLabel {
            label: label.to_string(),
            line,
        })
    }
}

fn gate_for(mnemonic: Mnemonic, line: usize) -> QcisResult<StandardGate> {
    mnemonic.gate().ok_or_else(|| QcisError::MalformedInstruction {
        line,
        instruction: mnemonic.to_string(),
        reason: "mnemonic has no gate form".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;
    use qcis_ir::IrError;

    fn lower(source: &str, couplers: Option<&CouplerRegistry>) -> QcisResult<Circuit> {
        let program = parse_program(source, None)?;
        lower_to_circuit(
            &program,
            |label| label.strip_prefix('Q').and_then(|n| n.parse().ok()).map(QubitId),
            couplers,
        )
    }

    #[test]
    fn test_barriers_close_moments() {
        let circuit = lower("X Q01\nY Q02\nB Q01 Q02\nB Q01 Q02\nX2P Q01\n", None).unwrap();
        assert_eq!(circuit.num_moments(), 3);
        assert_eq!(circuit.moments()[0].len(), 2);
        assert!(circuit.moments()[1].is_empty());
        assert_eq!(circuit.moments()[2].len(), 1);
    }

    #[test]
    fn test_comment_only_tail_adds_no_moment() {
        let circuit = lower("X Q01\nB Q01\n# done\n", None).unwrap();
        assert_eq!(circuit.num_moments(), 1);
    }

    #[test]
    fn test_coupler_resolution() {
        let registry = CouplerRegistry::from_pairs([("G0201", ("Q01", "Q02"))]);
        let circuit = lower("CZ G0201\n", Some(&registry)).unwrap();
        let op = &circuit.moments()[0].operations()[0];
        assert_eq!(op.qubits, vec![QubitId(1), QubitId(2)]);

        let err = lower("CZ G0302\n", Some(&CouplerRegistry::new())).unwrap_err();
        assert!(matches!(err, QcisError::MissingCoupler(_)));
    }

    #[test]
    fn test_unmapped_label() {
        let err = lower("X R01\n", None).unwrap_err();
        assert!(matches!(err, QcisError::UnmappedLabel { line: 1, ref label } if label == "R01"));
    }

    #[test]
    fn test_overlap_in_moment_is_rejected() {
        let err = lower("X Q01\nM Q01\nB Q01\n", None).unwrap_err();
        assert!(matches!(err, QcisError::Ir(IrError::DuplicateQubit { .. })));
    }

    #[test]
    fn test_idle_becomes_delay() {
        let circuit = lower("I Q03 250\nB Q03\n", None).unwrap();
        assert_eq!(
            circuit.moments()[0].operations()[0],
            Operation::delay(QubitId(3), 250)
        );
    }
}
