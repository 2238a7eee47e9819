/*
    This module turns right linear grammars into deterministic finite
    automata and tests strings against them
*/

mod run;

use itertools::Itertools;
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

use crate::error_handling::ErrorType;
use crate::grammar::{Grammar, Symbol};

pub use run::{Outcome, Run};

// (state, input symbol) -> state
pub type Transitions = BTreeMap<(char, char), char>;

#[derive(Debug, PartialEq, Clone)]
pub enum AutomatonError {
    // Two rules want different targets for the same state and symbol
    NondeterministicTransition { state: char, symbol: char, existing: char, replacement: char },
    // The start state is not one of the states
    StartNotState(char),
    // A transition or accepting state refers to an unknown state
    UnknownState(char),
    // A transition is labelled with a symbol outside the alphabet
    UnknownSymbol(char),
}

impl ErrorType for AutomatonError {}

impl Display for AutomatonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutomatonError::NondeterministicTransition { state, symbol, existing, replacement } => write!(
                f,
                "Conflicting transitions from `{}` on `{}`: `{}` and `{}`",
                state, symbol, existing, replacement
            ),
            AutomatonError::StartNotState(s) => write!(f, "Start state `{}` is not a state", s),
            AutomatonError::UnknownState(s) => write!(f, "Unknown state `{}`", s),
            AutomatonError::UnknownSymbol(s) => write!(f, "Symbol `{}` is not in the alphabet", s),
        }
    }
}

impl std::error::Error for AutomatonError {}

// What to do when a grammar asks for a second, different target on a
// `(state, symbol)` pair that already has one.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum ConflictPolicy {
    #[default]
    Reject,
    // Rules are visited by left hand side, then in alternative order
    LastWriteWins,
}

// A deterministic finite automaton `(Q, Σ, δ, q0, F)` over characters.
#[derive(Debug, PartialEq, Clone)]
pub struct FiniteAutomaton {
    states: BTreeSet<char>,
    alphabet: BTreeSet<char>,
    transitions: Transitions,
    start: char,
    accepting: BTreeSet<char>,
}

impl FiniteAutomaton {
    pub fn new(states: BTreeSet<char>, alphabet: BTreeSet<char>, transitions: Transitions, start: char, accepting: BTreeSet<char>) -> Result<FiniteAutomaton, AutomatonError> {
        if !states.contains(&start) {
            return Err(AutomatonError::StartNotState(start));
        }
        if let Some(unknown) = accepting.iter().find(|s| !states.contains(s)) {
            return Err(AutomatonError::UnknownState(*unknown));
        }

        for (&(from, symbol), &to) in &transitions {
            if !alphabet.contains(&symbol) {
                return Err(AutomatonError::UnknownSymbol(symbol));
            }
            if let Some(unknown) = [from, to].into_iter().find(|s| !states.contains(s)) {
                return Err(AutomatonError::UnknownState(unknown));
            }
        }

        Ok(FiniteAutomaton { states, alphabet, transitions, start, accepting })
    }

    /// Builds the automaton for a right linear grammar.
    ///
    /// Every nonterminal becomes a state and every nonterminal except the
    /// start symbol accepts. That acceptance is a fixed policy, not the result
    /// of checking which states can still finish a derivation, so the
    /// automaton may accept strings the grammar cannot generate.
    ///
    /// `A -> tB` becomes `δ(A, t) = B` and `A -> t` becomes `δ(A, t) = A`.
    /// Alternatives of any other shape add no transition.
    pub fn from_grammar(grammar: &Grammar, policy: ConflictPolicy) -> Result<FiniteAutomaton, AutomatonError> {
        let mut transitions = Transitions::new();

        for (&lhs, rewrite) in grammar.rules() {
            for alternative in rewrite {
                match alternative.as_slice() {
                    [Symbol::Terminal(t), Symbol::Nonterminal(n)] => add_transition(&mut transitions, policy, lhs, *t, *n)?,
                    [Symbol::Terminal(t)] => add_transition(&mut transitions, policy, lhs, *t, lhs)?,
                    _ => debug!(
                        "no transition for `{} = {}`: not right linear",
                        lhs,
                        alternative.iter().map(Symbol::character).join("")
                    ),
                }
            }
        }

        let accepting = grammar.non_terminals().iter()
            .copied()
            .filter(|&s| s != grammar.start_symbol())
            .collect();

        let automaton = FiniteAutomaton::new(
            grammar.non_terminals().clone(),
            grammar.terminals().clone(),
            transitions,
            grammar.start_symbol(),
            accepting,
        )?;
        info!(
            "built automaton with {} states and {} transitions",
            automaton.states.len(),
            automaton.transitions.len()
        );

        Ok(automaton)
    }

    pub fn states(&self) -> &BTreeSet<char> {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    pub fn start_state(&self) -> char {
        self.start
    }

    pub fn accepting_states(&self) -> &BTreeSet<char> {
        &self.accepting
    }

    pub fn transition(&self, state: char, symbol: char) -> Option<char> {
        self.transitions.get(&(state, symbol)).copied()
    }

    pub fn is_accepting(&self, state: char) -> bool {
        self.accepting.contains(&state)
    }
}

fn add_transition(transitions: &mut Transitions, policy: ConflictPolicy, state: char, symbol: char, target: char) -> Result<(), AutomatonError> {
    match transitions.insert((state, symbol), target) {
        Some(existing) if existing != target => match policy {
            ConflictPolicy::Reject => Err(AutomatonError::NondeterministicTransition {
                state,
                symbol,
                existing,
                replacement: target,
            }),
            ConflictPolicy::LastWriteWins => {
                debug!("δ({}, {}) = {} replaces {}", state, symbol, target, existing);
                Ok(())
            }
        },
        _ => Ok(()),
    }
}

impl Display for FiniteAutomaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Q  = {{{}}}", self.states.iter().join(", "))?;
        writeln!(f, "Σ  = {{{}}}", self.alphabet.iter().join(", "))?;
        writeln!(f, "q0 = {}", self.start)?;
        writeln!(f, "F  = {{{}}}", self.accepting.iter().join(", "))?;
        for ((state, symbol), target) in &self.transitions {
            writeln!(f, "δ({}, {}) = {}", state, symbol, target)?;
        }
        Ok(())
    }
}

impl Grammar {
    pub fn to_finite_automaton(&self) -> Result<FiniteAutomaton, AutomatonError> {
        FiniteAutomaton::from_grammar(self, ConflictPolicy::default())
    }

    pub fn to_finite_automaton_with(&self, policy: ConflictPolicy) -> Result<FiniteAutomaton, AutomatonError> {
        FiniteAutomaton::from_grammar(self, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ambiguous_grammar() -> Grammar {
        Grammar::new(
            ['S', 'A', 'B'],
            ['a', 'b', 'c'],
            [('S', vec!["aA", "aB"]), ('A', vec!["b"]), ('B', vec!["c"])],
            'S',
        ).unwrap()
    }

    #[test]
    fn sample_table() {
        let automaton = Grammar::sample().to_finite_automaton().unwrap();

        let expected = Transitions::from([
            (('A', 'a'), 'B'),
            (('A', 'b'), 'A'),
            (('B', 'b'), 'C'),
            (('B', 'd'), 'B'),
            (('C', 'c'), 'B'),
            (('C', 'a'), 'A'),
            (('S', 'd'), 'A'),
        ]);
        assert_eq!(automaton.transitions(), &expected);
        assert_eq!(automaton.start_state(), 'S');
        assert_eq!(automaton.accepting_states(), &BTreeSet::from(['A', 'B', 'C']));
        assert_eq!(automaton.alphabet(), &BTreeSet::from(['a', 'b', 'c', 'd']));
        assert_eq!(automaton.states(), &BTreeSet::from(['S', 'A', 'B', 'C']));
    }

    #[test]
    fn building_twice_gives_equal_automata() {
        let grammar = Grammar::sample();

        assert_eq!(grammar.to_finite_automaton().unwrap(), grammar.to_finite_automaton().unwrap());
    }

    #[test]
    fn conflict_is_rejected_by_default() {
        assert_eq!(
            ambiguous_grammar().to_finite_automaton(),
            Err(AutomatonError::NondeterministicTransition { state: 'S', symbol: 'a', existing: 'A', replacement: 'B' })
        );
    }

    #[test]
    fn conflict_last_write_wins() {
        let automaton = ambiguous_grammar().to_finite_automaton_with(ConflictPolicy::LastWriteWins).unwrap();

        assert_eq!(automaton.transition('S', 'a'), Some('B'));
        assert!(automaton.accepts("ac"));
        assert!(!automaton.accepts("ab"));
    }

    #[test]
    fn repeated_edge_is_not_a_conflict() {
        let grammar = Grammar::new(['S'], ['a'], [('S', vec!["a", "aS"])], 'S').unwrap();
        let automaton = grammar.to_finite_automaton().unwrap();

        assert_eq!(automaton.transitions(), &Transitions::from([(('S', 'a'), 'S')]));
    }

    #[test]
    fn other_shapes_add_no_transitions() {
        let grammar = Grammar::new(['S'], ['a', 'b', 'c'], [('S', vec!["aSb", "c"])], 'S').unwrap();
        let automaton = grammar.to_finite_automaton().unwrap();

        assert_eq!(automaton.transitions(), &Transitions::from([(('S', 'c'), 'S')]));
    }

    #[test]
    fn malformed_automata() {
        let states = BTreeSet::from(['S', 'A']);
        let alphabet = BTreeSet::from(['a']);

        assert_eq!(
            FiniteAutomaton::new(states.clone(), alphabet.clone(), Transitions::new(), 'X', BTreeSet::new()),
            Err(AutomatonError::StartNotState('X'))
        );
        assert_eq!(
            FiniteAutomaton::new(states.clone(), alphabet.clone(), Transitions::new(), 'S', BTreeSet::from(['Y'])),
            Err(AutomatonError::UnknownState('Y'))
        );
        assert_eq!(
            FiniteAutomaton::new(states.clone(), alphabet.clone(), Transitions::from([(('S', 'z'), 'A')]), 'S', BTreeSet::new()),
            Err(AutomatonError::UnknownSymbol('z'))
        );
        assert_eq!(
            FiniteAutomaton::new(states, alphabet, Transitions::from([(('S', 'a'), 'Q')]), 'S', BTreeSet::new()),
            Err(AutomatonError::UnknownState('Q'))
        );
    }

    #[test]
    fn display_table() {
        let grammar = Grammar::new(['S', 'A'], ['a', 'b'], [('S', vec!["aA"]), ('A', vec!["b"])], 'S').unwrap();
        let automaton = grammar.to_finite_automaton().unwrap();

        assert_eq!(
            automaton.to_string(),
            "Q  = {A, S}\nΣ  = {a, b}\nq0 = S\nF  = {A}\nδ(A, b) = A\nδ(S, a) = A\n"
        );
    }
}
