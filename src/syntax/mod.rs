/*
    This module splits input strings into tokens and shows them as a tree,
    for looking at what the automaton is fed
*/

pub mod scanner;
pub mod tree;

pub use scanner::{ScanError, ScanErrorType, Scanner, Token, TokenKind};
pub use tree::{parse, print, Node};
