use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Equals,
    Or,
    Nonterminal(char),
    Terminal(char),
}

// Every character inside quotes is a terminal, even `=`, `|` and uppercase
// letters
pub fn lex_quoted(line: &mut impl PeekingNext<Item = char>) -> Result<Vec<Token>> {
    line.next(); // Consume open quote
    let tokens = line.peeking_take_while(|&c| c != '\"').map(Token::Terminal).collect();

    // Check if there is a close quote and consume it if there is
    if line.next() != Some('\"') {
        return Err(CompileErrorType::UnmatchedQuote);
    }

    Ok(tokens)
}

pub fn lex_symbol(c: char) -> Token {
    if c.is_ascii_uppercase() {
        Token::Nonterminal(c)
    } else {
        Token::Terminal(c)
    }
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        if c == '=' {
            line_chars.next();
            tokens.push(Token::Equals);
        } else if c == '|' {
            line_chars.next();
            tokens.push(Token::Or);
        } else if c == '\"' {
            tokens.extend(lex_quoted(&mut line_chars)?);
        } else {
            line_chars.next();
            if !c.is_whitespace() {
                tokens.push(lex_symbol(c));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn lex_normal_quoted() {
        let lines = vec![
            "\"=\" bA",
            "\"A|b\"",
            "\"\"\"c\""
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (vec![Token::Terminal('=')], " bA"),
            (vec![Token::Terminal('A'), Token::Terminal('|'), Token::Terminal('b')], ""),
            (vec![], "\"c\"")
        ];

        for (line, (answer_tokens, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_quoted(&mut chars).unwrap(), answer_tokens);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_mismatched_quoted() {
        let lines = vec![
            "\"a",
            "\"abc = d"
        ];

        for line in lines {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_quoted(&mut chars).unwrap_err(), CompileErrorType::UnmatchedQuote);
        }
    }

    #[test]
    fn lex_symbols() {
        assert_eq!(lex_symbol('S'), Token::Nonterminal('S'));
        assert_eq!(lex_symbol('s'), Token::Terminal('s'));
        assert_eq!(lex_symbol('0'), Token::Terminal('0'));
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "A = aB | b",
            "C=c B|\"|\"A"
        ];
        let answers = vec![
            vec![
                Token::Nonterminal('A'),
                Token::Equals,
                Token::Terminal('a'),
                Token::Nonterminal('B'),
                Token::Or,
                Token::Terminal('b')
            ],
            vec![
                Token::Nonterminal('C'),
                Token::Equals,
                Token::Terminal('c'),
                Token::Nonterminal('B'),
                Token::Or,
                Token::Terminal('|'),
                Token::Nonterminal('A')
            ]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line).unwrap(), answer)
        }
    }
}
