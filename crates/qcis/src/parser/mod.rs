//! Parser for QCIS text.

mod lowering;
mod statement;

pub(crate) use lowering::lower_to_circuit;

use std::collections::VecDeque;

use qcis_ir::{Circuit, QubitId};
use tracing::debug;

use crate::ast::Program;
use crate::coupler::CouplerRegistry;
use crate::error::{QcisError, QcisResult};
use crate::filter::PrefixFilter;
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse QCIS text into a circuit.
pub(crate) fn parse<F>(
    source: &str,
    qubit_of: F,
    couplers: Option<&CouplerRegistry>,
    ignored: Option<&PrefixFilter>,
) -> QcisResult<Circuit>
where
    F: Fn(&str) -> Option<QubitId>,
{
    let program = parse_program(source, ignored)?;
    debug!(
        "Read {} instruction lines with {} barriers",
        program.lines.len(),
        program.num_barriers()
    );
    if couplers.is_none() && program.uses_couplers() {
        return Err(QcisError::MissingCouplers);
    }
    lower_to_circuit(&program, qubit_of, couplers)
}

/// Parse QCIS text into an AST program without resolving labels.
pub fn parse_program(source: &str, ignored: Option<&PrefixFilter>) -> QcisResult<Program> {
    let mut parser = Parser::new(source, ignored)?;
    parser.parse_program()
}

/// One non-blank source line.
#[derive(Debug)]
pub(super) struct SourceLine<'a> {
    /// 1-based line number.
    pub(super) number: usize,
    /// The line with surrounding whitespace removed.
    pub(super) text: &'a str,
    pub(super) tokens: Vec<Token>,
}

/// Parser state.
pub(super) struct Parser<'a> {
    pub(super) lines: VecDeque<SourceLine<'a>>,
    pub(super) ignored: Option<&'a PrefixFilter>,
}

impl<'a> Parser<'a> {
    /// Create a new parser from source, grouping tokens into lines.
    fn new(source: &'a str, ignored: Option<&'a PrefixFilter>) -> QcisResult<Self> {
        let mut lines = VecDeque::new();
        let mut current: Vec<SpannedToken> = Vec::new();
        let mut number = 1;

        for result in tokenize(source) {
            let spanned = result.map_err(|(span, message)| QcisError::MalformedInstruction {
                line: number,
                instruction: source[span].to_string(),
                reason: message,
            })?;
            if spanned.token == Token::Newline {
                if let Some(line) = Self::finish_line(source, number, &mut current) {
                    lines.push_back(line);
                }
                number += 1;
            } else {
                current.push(spanned);
            }
        }
        if let Some(line) = Self::finish_line(source, number, &mut current) {
            lines.push_back(line);
        }

        Ok(Self { lines, ignored })
    }

    fn finish_line(
        source: &'a str,
        number: usize,
        tokens: &mut Vec<SpannedToken>,
    ) -> Option<SourceLine<'a>> {
        let start = tokens.first()?.span.start;
        let end = tokens.last()?.span.end;
        Some(SourceLine {
            number,
            text: &source[start..end],
            tokens: tokens.drain(..).map(|t| t.token).collect(),
        })
    }

    /// Check if we've reached the end.
    pub(super) fn is_eof(&self) -> bool {
        self.lines.is_empty()
    }

    /// Take the next line.
    pub(super) fn advance(&mut self) -> Option<SourceLine<'a>> {
        self.lines.pop_front()
    }

    /// Parse the entire program.
    fn parse_program(&mut self) -> QcisResult<Program> {
        let mut lines = Vec::new();
        while !self.is_eof() {
            if let Some(line) = self.advance() {
                lines.push(self.parse_line(line)?);
            }
        }
        Ok(Program { lines })
    }
}
