use std::collections::BTreeMap;

use crate::grammar::Symbol::Nonterminal;
use super::CompileErrorType::UndefinedNonterminal;
use super::{Alternative, CompileError, CompileErrors, FileResult, Location, Rewrite};

// Rules keyed by nonterminal, with the location of their first definition
pub type IntermediateRuleset = BTreeMap<char, (Rewrite, Location)>;

fn get_alternative_undefined_symbols(alternative: &Alternative, location: &Location, rules: &IntermediateRuleset) -> CompileErrors {
    // Keep only the nonterminals, then only the ones without a rule
    alternative.iter()
        .filter_map(|symbol| match symbol {
            Nonterminal(c) => Some(*c),
            _ => None
        })
        .filter(|c| !rules.contains_key(c))
        .map(|c| CompileError {
            location: location.to_owned(),
            error: UndefinedNonterminal(c)
        })
        .collect()
}

fn get_rewrite_undefined_symbols(rewrite: &Rewrite, location: &Location, rules: &IntermediateRuleset) -> CompileErrors {
    rewrite.iter()
        .flat_map(|alternative| get_alternative_undefined_symbols(alternative, location, rules))
        .collect()
}

fn get_undefined_symbols(rules: &IntermediateRuleset) -> CompileErrors {
    rules.values()
        .flat_map(|(rewrite, location)| get_rewrite_undefined_symbols(rewrite, location, rules))
        .collect()
}

pub fn verify_rules(rules: &IntermediateRuleset) -> FileResult<()> {
    let errors = get_undefined_symbols(rules);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::Symbol::Terminal;

    use super::*;

    #[test]
    fn undefined_symbols_are_reported() {
        let rules = IntermediateRuleset::from([
            ('S', (vec![vec![Terminal('a'), Nonterminal('A')], vec![Terminal('b'), Nonterminal('X')]], Location::at(1, 0))),
            ('A', (vec![vec![Terminal('a'), Nonterminal('Y')]], Location::at(2, 0))),
        ]);

        assert_eq!(verify_rules(&rules), Err(vec![
            CompileError { location: Location::at(2, 0), error: UndefinedNonterminal('Y') },
            CompileError { location: Location::at(1, 0), error: UndefinedNonterminal('X') },
        ]));
    }

    #[test]
    fn defined_symbols_pass() {
        let rules = IntermediateRuleset::from([
            ('S', (vec![vec![Terminal('a'), Nonterminal('S')], vec![Terminal('b')]], Location::at(1, 0))),
        ]);

        assert_eq!(verify_rules(&rules), Ok(()));
    }
}
