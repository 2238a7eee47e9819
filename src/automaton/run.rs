use log::trace;
use std::fmt::Display;

use super::FiniteAutomaton;

// Why a run stopped
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Outcome {
    Accepted,
    EndedInNonAccepting(char),
    SymbolOutsideAlphabet { position: usize, symbol: char },
    MissingTransition { position: usize, state: char, symbol: char },
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Accepted => write!(f, "accepted"),
            Outcome::EndedInNonAccepting(state) => write!(f, "rejected, ended in non-accepting state `{}`", state),
            Outcome::SymbolOutsideAlphabet { position, symbol } => {
                write!(f, "rejected, `{}` at position {} is not in the alphabet", symbol, position)
            }
            Outcome::MissingTransition { position, state, symbol } => {
                write!(f, "rejected, no transition from `{}` on `{}` at position {}", state, symbol, position)
            }
        }
    }
}

// The states visited while reading one input, starting with the start state.
#[derive(Debug, PartialEq, Clone)]
pub struct Run {
    pub path: Vec<char>,
    pub outcome: Outcome,
}

impl Run {
    pub fn is_accepted(&self) -> bool {
        self.outcome == Outcome::Accepted
    }
}

impl FiniteAutomaton {
    pub fn run(&self, input: &str) -> Run {
        let mut state = self.start;
        let mut path = vec![state];

        for (position, symbol) in input.chars().enumerate() {
            if !self.alphabet.contains(&symbol) {
                return Run { path, outcome: Outcome::SymbolOutsideAlphabet { position, symbol } };
            }
            match self.transition(state, symbol) {
                Some(next) => {
                    trace!("δ({}, {}) = {}", state, symbol, next);
                    state = next;
                    path.push(state);
                }
                None => return Run { path, outcome: Outcome::MissingTransition { position, state, symbol } },
            }
        }

        let outcome = if self.is_accepting(state) {
            Outcome::Accepted
        } else {
            Outcome::EndedInNonAccepting(state)
        };
        Run { path, outcome }
    }

    // Whether the automaton ends in an accepting state after reading all of
    // `input`. A symbol outside the alphabet or a missing transition is a
    // rejection, not an error.
    pub fn accepts(&self, input: &str) -> bool {
        self.run(input).is_accepted()
    }
}
