//! Regular grammars: random generation, Chomsky classification and
//! conversion to deterministic finite automata.

pub mod automaton;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;
pub mod syntax;

pub use automaton::{AutomatonError, ConflictPolicy, FiniteAutomaton};
pub use generator::{GenerateError, GenerationLimits};
pub use grammar::{ChomskyType, Grammar, GrammarError, Symbol};
