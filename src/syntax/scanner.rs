use std::collections::BTreeSet;
use std::fmt::Display;

use crate::error_handling::*;
use crate::grammar::Grammar;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    Terminal(char),
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Terminal(c) => write!(f, "Terminal({})", c),
            TokenKind::Eof => write!(f, "Eof"),
        }
    }
}

// Lines and columns both start at 1
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, PartialEq)]
pub enum ScanErrorType {
    UnexpectedCharacter(char),
}

impl ErrorType for ScanErrorType {}

impl Display for ScanErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanErrorType::UnexpectedCharacter(c) => write!(f, "Unexpected character `{}`", c),
        }
    }
}

pub type ScanError = Error<ScanErrorType>;

// Splits text into one token per alphabet character, skipping whitespace.
pub struct Scanner {
    alphabet: BTreeSet<char>,
}

impl Scanner {
    pub fn new(alphabet: impl IntoIterator<Item = char>) -> Self {
        Scanner { alphabet: alphabet.into_iter().collect() }
    }

    pub fn for_grammar(grammar: &Grammar) -> Self {
        Scanner::new(grammar.terminals().iter().copied())
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        let (mut line, mut column) = (1, 1);

        for c in text.chars() {
            if c == '\n' {
                line += 1;
                column = 1;
                continue;
            }

            if !c.is_whitespace() {
                if !self.alphabet.contains(&c) {
                    return Err(ScanError {
                        location: Location::at(line, column),
                        error: ScanErrorType::UnexpectedCharacter(c),
                    });
                }
                tokens.push(Token { kind: TokenKind::Terminal(c), value: c.to_string(), line, column });
            }
            column += 1;
        }

        tokens.push(Token { kind: TokenKind::Eof, value: String::new(), line, column });
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn positions(tokens: &[Token]) -> Vec<(TokenKind, usize, usize)> {
        tokens.iter().map(|t| (t.kind, t.line, t.column)).collect()
    }

    #[test]
    fn tokenize_positions() {
        let scanner = Scanner::for_grammar(&Grammar::sample());
        let texts = vec!["dab", "d a\nb", ""];
        let answers = vec![
            vec![
                (TokenKind::Terminal('d'), 1, 1),
                (TokenKind::Terminal('a'), 1, 2),
                (TokenKind::Terminal('b'), 1, 3),
                (TokenKind::Eof, 1, 4),
            ],
            vec![
                (TokenKind::Terminal('d'), 1, 1),
                (TokenKind::Terminal('a'), 1, 3),
                (TokenKind::Terminal('b'), 2, 1),
                (TokenKind::Eof, 2, 2),
            ],
            vec![(TokenKind::Eof, 1, 1)],
        ];

        for (text, answer) in zip(texts, answers) {
            assert_eq!(positions(&scanner.tokenize(text).unwrap()), answer);
        }
    }

    #[test]
    fn tokenize_values() {
        let tokens = Scanner::new(['x']).tokenize("x").unwrap();

        assert_eq!(tokens[0].value, "x");
        assert_eq!(tokens[1].value, "");
    }

    #[test]
    fn display_kinds() {
        assert_eq!(TokenKind::Terminal('a').to_string(), "Terminal(a)");
        assert_eq!(TokenKind::Eof.to_string(), "Eof");
    }

    #[test]
    fn unexpected_character() {
        let scanner = Scanner::for_grammar(&Grammar::sample());

        assert_eq!(scanner.tokenize("da\n bxc"), Err(ScanError {
            location: Location::at(2, 3),
            error: ScanErrorType::UnexpectedCharacter('x'),
        }));
    }
}
