//! Statement parsing for QCIS.

use super::{Parser, SourceLine};
use crate::ast::{ContextBlock, Line, Statement};
use crate::context::{CONTEXT_END, CONTEXT_START, GATE_HEADER, TARGETS_HEADER};
use crate::error::{QcisError, QcisResult};
use crate::lexer::Token;
use crate::table::{Operand, resolve_reverse};

impl Parser<'_> {
    /// Parse one line, consuming following lines for context blocks.
    pub(super) fn parse_line(&mut self, line: SourceLine<'_>) -> QcisResult<Line> {
        let number = line.number;
        let statement = match line.tokens.first() {
            Some(Token::Comment(text)) if text == CONTEXT_START => {
                Statement::Context(self.parse_context(number)?)
            }
            Some(Token::Comment(text)) => Statement::Comment(text.clone()),
            _ if self.ignored.is_some_and(|f| f.should_ignore(line.text)) => {
                Statement::Ignored(line.text.to_string())
            }
            _ => parse_instruction(&line)?,
        };
        Ok(Line { number, statement })
    }

    /// Parse the rest of a context block opened at line `start`.
    fn parse_context(&mut self, start: usize) -> QcisResult<ContextBlock> {
        let mut gate = None;
        let mut targets = None;
        let mut body = Vec::new();

        loop {
            let line = self
                .advance()
                .ok_or(QcisError::UnterminatedContext { line: start })?;
            match line.tokens.first() {
                Some(Token::Comment(text)) if text == CONTEXT_END => break,
                Some(Token::Comment(text)) if text == CONTEXT_START => {
                    return Err(QcisError::InvalidContext {
                        line: line.number,
                        reason: "context blocks cannot be nested".into(),
                    });
                }
                Some(Token::Comment(text)) if text.starts_with(GATE_HEADER) => {
                    gate = Some(text[GATE_HEADER.len()..].to_string());
                }
                Some(Token::Comment(text)) if text.starts_with(TARGETS_HEADER) => {
                    targets = Some(text[TARGETS_HEADER.len()..].to_string());
                }
                _ => body.push(line.text.to_string()),
            }
        }

        let missing = |header: &str| QcisError::InvalidContext {
            line: start,
            reason: format!("missing '{}' header", header.trim_end()),
        };
        Ok(ContextBlock {
            gate: gate.ok_or_else(|| missing(GATE_HEADER))?,
            targets: targets.ok_or_else(|| missing(TARGETS_HEADER))?,
            body,
        })
    }
}

/// Decode an instruction line into a statement.
fn parse_instruction(line: &SourceLine<'_>) -> QcisResult<Statement> {
    let malformed = |reason: &str| QcisError::MalformedInstruction {
        line: line.number,
        instruction: line.text.to_string(),
        reason: reason.to_string(),
    };

    let mut words = line.tokens.iter().filter_map(|t| match t {
        Token::Word(w) => Some(w.as_str()),
        _ => None,
    });
    let head = words.next().ok_or_else(|| malformed("empty instruction"))?;
    let mnemonic = resolve_reverse(head).ok_or_else(|| QcisError::UnknownMnemonic {
        line: line.number,
        mnemonic: head.to_string(),
    })?;
    let args: Vec<&str> = words.collect();

    match (mnemonic.operand(), args.as_slice()) {
        (Operand::Qubit, [qubit]) => Ok(Statement::Gate {
            mnemonic,
            qubit: (*qubit).to_string(),
        }),
        (Operand::Qubit, _) => Err(malformed("expected one qubit label")),

        (Operand::Coupler, [coupler]) => Ok(Statement::Coupled {
            mnemonic,
            coupler: (*coupler).to_string(),
        }),
        (Operand::Coupler, _) => Err(malformed("expected one coupler name")),

        (Operand::Qubits, []) => Err(malformed("expected at least one qubit label")),
        (Operand::Qubits, qubits) => Ok(Statement::Measure {
            qubits: qubits.iter().map(|q| (*q).to_string()).collect(),
        }),

        (Operand::Agents, []) => Err(malformed("expected at least one blockable agent")),
        (Operand::Agents, agents) => Ok(Statement::Barrier {
            agents: agents.iter().map(|a| (*a).to_string()).collect(),
        }),

        (Operand::QubitDuration, [qubit, duration]) => {
            let duration_ns = duration
                .parse::<u64>()
                .map_err(|_| malformed("duration must be a non-negative integer"))?;
            Ok(Statement::Idle {
                qubit: (*qubit).to_string(),
                duration_ns,
            })
        }
        (Operand::QubitDuration, _) => Err(malformed("expected a qubit label and a duration")),
    }
}
