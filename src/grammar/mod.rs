/*
    This module is for storing and classifying grammars
*/

mod chomsky;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;

pub use chomsky::ChomskyType;

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(char),
}

impl Symbol {
    pub fn character(&self) -> char {
        match self {
            Symbol::Terminal(c) | Symbol::Nonterminal(c) => *c,
        }
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.character())
    }
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, PartialEq, Clone)]
pub enum GrammarError {
    // The start symbol is not one of the nonterminals
    StartNotNonterminal(char),
    // A symbol was declared as both a terminal and a nonterminal
    OverlappingSymbol(char),
    // A rule is defined for something that is not a nonterminal
    UndefinedLeftHandSide(char),
    // A rule has no alternatives at all
    EmptyRewrite(char),
    // A rule has an alternative without any symbols
    EmptyAlternative(char),
    // A rule uses a symbol that was never declared
    UnknownSymbol { rule: char, symbol: char },
}

impl ErrorType for GrammarError {}

impl Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::StartNotNonterminal(s) => write!(f, "Start symbol `{}` is not a nonterminal", s),
            GrammarError::OverlappingSymbol(s) => write!(f, "Symbol `{}` is both a terminal and a nonterminal", s),
            GrammarError::UndefinedLeftHandSide(s) => write!(f, "Rule defined for `{}`, which is not a nonterminal", s),
            GrammarError::EmptyRewrite(s) => write!(f, "Rule for `{}` has no alternatives", s),
            GrammarError::EmptyAlternative(s) => write!(f, "Rule for `{}` has an empty alternative", s),
            GrammarError::UnknownSymbol { rule, symbol } => {
                write!(f, "Rule for `{}` uses undeclared symbol `{}`", rule, symbol)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

// A grammar (VN, VT, P, S) over single character symbols. Read only once built
#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    non_terminals: BTreeSet<char>,
    terminals: BTreeSet<char>,
    rules: BTreeMap<char, Rewrite>,
    start_symbol: char,
}

impl Grammar {
    // Each character of an alternative is looked up in the declared sets.
    // Repeating a left hand side appends to its alternatives
    pub fn new<N, T, R, A>(non_terminals: N, terminals: T, rules: R, start_symbol: char) -> Result<Grammar, GrammarError>
    where
        N: IntoIterator<Item = char>,
        T: IntoIterator<Item = char>,
        R: IntoIterator<Item = (char, Vec<A>)>,
        A: AsRef<str>,
    {
        let non_terminals: BTreeSet<char> = non_terminals.into_iter().collect();
        let terminals: BTreeSet<char> = terminals.into_iter().collect();

        let mut typed_rules = BTreeMap::<char, Rewrite>::new();
        for (lhs, alternatives) in rules {
            let rewrite = typed_rules.entry(lhs).or_default();
            for alternative in alternatives {
                let symbols = alternative.as_ref().chars()
                    .map(|c| classify_character(c, lhs, &non_terminals, &terminals))
                    .collect::<Result<Alternative, _>>()?;
                rewrite.push(symbols);
            }
        }

        Grammar::from_parts(non_terminals, terminals, typed_rules, start_symbol)
    }

    pub fn from_parts(non_terminals: BTreeSet<char>, terminals: BTreeSet<char>, rules: BTreeMap<char, Rewrite>, start_symbol: char) -> Result<Grammar, GrammarError> {
        let grammar = Grammar { non_terminals, terminals, rules, start_symbol };
        grammar.verify()?;
        Ok(grammar)
    }

    // S = dA, A = aB | b, B = bC | d, C = cB | aA
    pub fn sample() -> Grammar {
        let rules = BTreeMap::from([
            ('S', vec![vec![Symbol::Terminal('d'), Symbol::Nonterminal('A')]]),
            ('A', vec![
                vec![Symbol::Terminal('a'), Symbol::Nonterminal('B')],
                vec![Symbol::Terminal('b')],
            ]),
            ('B', vec![
                vec![Symbol::Terminal('b'), Symbol::Nonterminal('C')],
                vec![Symbol::Terminal('d')],
            ]),
            ('C', vec![
                vec![Symbol::Terminal('c'), Symbol::Nonterminal('B')],
                vec![Symbol::Terminal('a'), Symbol::Nonterminal('A')],
            ]),
        ]);

        Grammar {
            non_terminals: BTreeSet::from(['S', 'A', 'B', 'C']),
            terminals: BTreeSet::from(['a', 'b', 'c', 'd']),
            rules,
            start_symbol: 'S',
        }
    }

    fn verify(&self) -> Result<(), GrammarError> {
        if !self.non_terminals.contains(&self.start_symbol) {
            return Err(GrammarError::StartNotNonterminal(self.start_symbol));
        }

        if let Some(shared) = self.non_terminals.intersection(&self.terminals).next() {
            return Err(GrammarError::OverlappingSymbol(*shared));
        }

        for (lhs, rewrite) in &self.rules {
            if !self.non_terminals.contains(lhs) {
                return Err(GrammarError::UndefinedLeftHandSide(*lhs));
            }
            if rewrite.is_empty() {
                return Err(GrammarError::EmptyRewrite(*lhs));
            }

            for alternative in rewrite {
                if alternative.is_empty() {
                    return Err(GrammarError::EmptyAlternative(*lhs));
                }
                if let Some(symbol) = alternative.iter().find(|s| !self.declares(s)) {
                    return Err(GrammarError::UnknownSymbol { rule: *lhs, symbol: symbol.character() });
                }
            }
        }

        Ok(())
    }

    fn declares(&self, symbol: &Symbol) -> bool {
        match symbol {
            Symbol::Terminal(c) => self.terminals.contains(c),
            Symbol::Nonterminal(c) => self.non_terminals.contains(c),
        }
    }

    pub fn start_symbol(&self) -> char {
        self.start_symbol
    }

    pub fn non_terminals(&self) -> &BTreeSet<char> {
        &self.non_terminals
    }

    pub fn terminals(&self) -> &BTreeSet<char> {
        &self.terminals
    }

    pub fn rules(&self) -> &BTreeMap<char, Rewrite> {
        &self.rules
    }

    pub fn alternatives(&self, non_terminal: char) -> Option<&Rewrite> {
        self.rules.get(&non_terminal)
    }

    pub fn is_non_terminal(&self, c: char) -> bool {
        self.non_terminals.contains(&c)
    }

    pub fn is_terminal(&self, c: char) -> bool {
        self.terminals.contains(&c)
    }
}

// Writes the rules in the rule file format, start symbol first, so the output
// loads back into the same grammar
impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start_rule = self.rules.get_key_value(&self.start_symbol);
        let other_rules = self.rules.iter().filter(|(lhs, _)| **lhs != self.start_symbol);

        for (lhs, rewrite) in start_rule.into_iter().chain(other_rules) {
            let alternatives = rewrite.iter().map(|alternative| write_alternative(alternative)).join(" | ");
            writeln!(f, "{} = {}", lhs, alternatives)?;
        }
        Ok(())
    }
}

// Terminals the rule file lexer would read as something else unless quoted.
// `"` has no escape in that format
fn needs_quotes(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_whitespace() || matches!(c, '=' | '|')
}

fn write_alternative(alternative: &Alternative) -> String {
    alternative.iter()
        .map(|symbol| match symbol {
            Symbol::Terminal(c) if needs_quotes(*c) => format!("\"{}\"", c),
            _ => symbol.character().to_string(),
        })
        .collect()
}

fn classify_character(c: char, rule: char, non_terminals: &BTreeSet<char>, terminals: &BTreeSet<char>) -> Result<Symbol, GrammarError> {
    if non_terminals.contains(&c) {
        Ok(Symbol::Nonterminal(c))
    } else if terminals.contains(&c) {
        Ok(Symbol::Terminal(c))
    } else {
        Err(GrammarError::UnknownSymbol { rule, symbol: c })
    }
}
