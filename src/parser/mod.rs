/*
    This module loads grammars from line based rule files:

        ; comment
        S = dA
        A = aB | b

    Uppercase letters are nonterminals, every other character is a terminal,
    and the first rule's nonterminal is the start symbol
*/

mod lexer;
mod verifier;

use std::collections::BTreeSet;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error_handling::*;
use crate::grammar::*;
use itertools::Itertools;
use lexer::*;
use log::info;
use verifier::verify_rules;
use verifier::IntermediateRuleset;

#[derive(Debug)]
pub enum CompileErrorType {
    // A line which should contain a rule does not
    MissingEquals,
    // A rule has multiple equals signs
    UnexpectedEquals,
    // The user starts a rule line with something other than a nonterminal
    MissingNonterminal,
    // There is an unclosed quote
    UnmatchedQuote,
    // An alternative has no symbols, as in `A = a |`
    EmptyAlternative,
    // A nonterminal is used but never defined
    UndefinedNonterminal(char),
    // The file has no rules in it at all
    NoRules,
    // The rules parsed but do not form a valid grammar
    InvalidGrammar(GrammarError),
    // Somehow a full rewrite was parsed as a base alternative
    // This is a problem with regula, not the grammar
    UnsplitRewrite,
    // A blank line got too deep into the parser
    // This is a problem with regula, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        use CompileErrorType::*;

        match (self, other) {
            (FileError(a), FileError(b)) => a.kind() == b.kind(),
            (UndefinedNonterminal(a), UndefinedNonterminal(b)) => a == b,
            (InvalidGrammar(a), InvalidGrammar(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingEquals => write!(f, "Expected `=` after nonterminal"),
            CompileErrorType::UnexpectedEquals => write!(f, "Unexpected `=` encountered"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a single nonterminal"),
            CompileErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            CompileErrorType::EmptyAlternative => write!(f, "Alternative has no symbols"),
            CompileErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            CompileErrorType::NoRules => write!(f, "No rules found"),
            CompileErrorType::InvalidGrammar(e) => write!(f, "Invalid grammar: {}", e),
            CompileErrorType::UnsplitRewrite => write!(f, "Rewrite was not fully split (this is a problem with regula, not the grammar)"),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a problem with regula, not the grammar)"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn file_error(error: CompileErrorType, file: &Path) -> CompileError {
    CompileError {
        location: Location::in_file(file.to_path_buf(), 0),
        error
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: char,
    rewrite: Rewrite,
    location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    if tokens.is_empty() {
        return Err(CompileErrorType::EmptyAlternative);
    }

    tokens.iter().map(|t| match t {
        Token::Equals => Err(CompileErrorType::UnexpectedEquals),
        Token::Or => Err(CompileErrorType::UnsplitRewrite),
        Token::Nonterminal(c) => Ok(Symbol::Nonterminal(*c)),
        Token::Terminal(c) => Ok(Symbol::Terminal(*c))
    }).collect()
}

fn parse_rewrite(tokens: &[Token]) -> Result<Rewrite> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let symbol = match tokens.first() {
        Some(Token::Nonterminal(c)) => Ok(*c),
        Some(_) => Err(CompileErrorType::MissingNonterminal),
        None => Err(CompileErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Equals) {
        return Err(CompileErrorType::MissingEquals)
    }

    let rewrite = parse_rewrite(&tokens[2..])?;

    Ok(Rule {
        symbol,
        rewrite,
        location
    })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|lexed_line| parse_line(&lexed_line, location.clone()))
        .map_err(|error| CompileError { location, error })
}

fn is_rule_line(line: &String) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with(';')
}

// Returns an iterator over the rule lines of a reader, with the io errors
// wrapped in CompileError and numbered from 1
fn numbered_lines<'a, R: BufRead + 'a>(reader: R, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    reader
        .lines()
        .map(move |line| line.map_err(|e| file_error(CompileErrorType::FileError(e), path)))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

// Merges repeated definitions of a nonterminal, keeping the first location
fn ruleset_from_rules(rules: Vec<Rule>) -> IntermediateRuleset {
    let mut ruleset = IntermediateRuleset::new();
    for rule in rules {
        ruleset.entry(rule.symbol)
            .or_insert_with(|| (Vec::new(), rule.location))
            .0
            .extend(rule.rewrite);
    }
    ruleset
}

fn grammar_from_rules(rule_list: Vec<Rule>, path: &Path) -> FileResult<Grammar> {
    let start_symbol = match rule_list.first() {
        Some(rule) => rule.symbol,
        None => return Err(vec![file_error(CompileErrorType::NoRules, path)]),
    };

    let ruleset = ruleset_from_rules(rule_list);
    verify_rules(&ruleset)?;

    let non_terminals: BTreeSet<char> = ruleset.keys().copied().collect();
    let terminals: BTreeSet<char> = ruleset.values()
        .flat_map(|(rewrite, _)| rewrite.iter().flatten())
        .filter_map(|symbol| match symbol {
            Symbol::Terminal(c) => Some(*c),
            Symbol::Nonterminal(_) => None,
        })
        .collect();
    let rules = ruleset.into_iter().map(|(symbol, (rewrite, _))| (symbol, rewrite)).collect();

    Grammar::from_parts(non_terminals, terminals, rules, start_symbol)
        .map_err(|e| vec![file_error(CompileErrorType::InvalidGrammar(e), path)])
}

fn parse_reader<R: BufRead>(reader: R, path: &Path) -> FileResult<Grammar> {
    let parsed_lines = numbered_lines(reader, path).map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location::in_file(path.to_path_buf(), num)))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }

    grammar_from_rules(rules, path)
}

pub fn parse_file(path: &PathBuf) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![file_error(CompileErrorType::FileError(e), path)])?;
    let grammar = parse_reader(BufReader::new(file), path)?;
    info!("loaded grammar with {} rules from {}", grammar.rules().len(), path.display());
    Ok(grammar)
}

pub fn parse_str(text: &str) -> FileResult<Grammar> {
    parse_reader(text.as_bytes(), Path::new(""))
}
