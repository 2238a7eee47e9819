use std::fmt::Display;

use super::{Alternative, Grammar, Symbol};

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub enum ChomskyType {
    Unrestricted = 0,
    ContextSensitive = 1,
    ContextFree = 2,
    Regular = 3,
}

impl ChomskyType {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChomskyType::Unrestricted => "unrestricted",
            ChomskyType::ContextSensitive => "context-sensitive",
            ChomskyType::ContextFree => "context-free",
            ChomskyType::Regular => "regular",
        }
    }
}

impl Display for ChomskyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type {} ({})", self.number(), self.name())
    }
}

// Every left hand side in this representation is exactly one nonterminal
const LEFT_HAND_SIDE_LENGTH: usize = 1;

// Right linear: `t` or `t N`
fn is_right_linear(alternative: &Alternative) -> bool {
    match alternative.as_slice() {
        [Symbol::Terminal(_)] => true,
        [Symbol::Terminal(_), Symbol::Nonterminal(_)] => true,
        _ => false,
    }
}

impl Grammar {
    fn all_alternatives(&self) -> impl Iterator<Item = (char, &Alternative)> {
        self.rules.iter()
            .flat_map(|(lhs, rewrite)| rewrite.iter().map(move |alternative| (*lhs, alternative)))
    }

    // Most restrictive type first. Left hand sides are always one nonterminal,
    // so the context-free check passes whenever the regular one fails
    pub fn chomsky_type(&self) -> ChomskyType {
        if self.all_alternatives().all(|(_, alternative)| is_right_linear(alternative)) {
            ChomskyType::Regular
        } else if self.all_alternatives().all(|(lhs, _)| self.is_non_terminal(lhs)) {
            ChomskyType::ContextFree
        } else if self.all_alternatives().all(|(_, alternative)| alternative.len() >= LEFT_HAND_SIDE_LENGTH) {
            ChomskyType::ContextSensitive
        } else {
            ChomskyType::Unrestricted
        }
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn sample_is_regular() {
        assert_eq!(Grammar::sample().chomsky_type(), ChomskyType::Regular);
        assert_eq!(Grammar::sample().chomsky_type().number(), 3);
    }

    #[test]
    fn classify_shapes() {
        let rule_sets = vec![
            vec!["a", "aS"],
            vec!["Sa", "a"],
            vec!["aSb", "ab"],
            vec!["S"],
            vec!["ab"],
        ];
        let answers = vec![
            ChomskyType::Regular,
            ChomskyType::ContextFree,
            ChomskyType::ContextFree,
            ChomskyType::ContextFree,
            ChomskyType::ContextFree,
        ];

        for (rules, answer) in zip(rule_sets, answers) {
            let grammar = Grammar::new(['S'], ['a', 'b'], [('S', rules)], 'S').unwrap();
            assert_eq!(grammar.chomsky_type(), answer);
        }
    }

    #[test]
    fn display_type() {
        assert_eq!(ChomskyType::Regular.to_string(), "Type 3 (regular)");
        assert_eq!(ChomskyType::Unrestricted.to_string(), "Type 0 (unrestricted)");
    }
}
