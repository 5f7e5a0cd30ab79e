//! Lexer for QCIS text.

use logos::Logos;

/// Tokens for QCIS.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")]
pub enum Token {
    #[token("\n")]
    Newline,

    /// A `#` comment running to the end of the line.
    #[regex(r"#[^\n]*", |lex| lex.slice().trim_end().to_string())]
    Comment(String),

    /// A mnemonic, label, coupler name or number.
    #[regex(r"[^ \t\r\n#]+", |lex| lex.slice().to_string())]
    Word(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Newline => write!(f, "newline"),
            Token::Comment(s) | Token::Word(s) => write!(f, "{s}"),
        }
    }
}

/// A token with its span information.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize a QCIS source string.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken, (std::ops::Range<usize>, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        if let Ok(token) = result {
            tokens.push(Ok(SpannedToken { token, span }));
        } else {
            let slice = &source[span.clone()];
            tokens.push(Err((span, format!("Invalid token: '{slice}'"))));
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source)
            .into_iter()
            .filter_map(Result::ok)
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_gate_line() {
        assert_eq!(
            tokens("X2P Q01\n"),
            vec![
                Token::Word("X2P".into()),
                Token::Word("Q01".into()),
                Token::Newline
            ]
        );
    }

    #[test]
    fn test_comment_keeps_inner_spaces() {
        let toks = tokens("# Gate: {\"XY\": 1}  \r\nB Q01");
        assert_eq!(toks[0], Token::Comment("# Gate: {\"XY\": 1}".into()));
        assert_eq!(toks[1], Token::Newline);
        assert_eq!(toks[2], Token::Word("B".into()));
    }

    #[test]
    fn test_trailing_comment() {
        let toks = tokens("I Q00 100 # idle");
        assert_eq!(toks.len(), 4);
        assert_eq!(toks[2], Token::Word("100".into()));
        assert!(matches!(toks[3], Token::Comment(_)));
    }

    #[test]
    fn test_spans() {
        let spanned: Vec<_> = tokenize("  M Q01").into_iter().filter_map(Result::ok).collect();
        assert_eq!(spanned[0].span, 2..3);
        assert_eq!(spanned[1].span, 4..7);
    }
}
