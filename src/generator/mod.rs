/*
    This module generates strings by repeatedly rewriting the leftmost
    nonterminal of a sentential form
*/

use log::{debug, trace};
use rand::prelude::*;
use std::fmt::Display;

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug, PartialEq, Clone)]
pub enum GenerateError {
    // A nonterminal has no rule to expand it with
    UndefinedNonterminal(char),
    // The derivation ran past one of the configured limits
    BoundExceeded { steps: usize, length: usize },
}

impl ErrorType for GenerateError {}

impl Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateError::BoundExceeded { steps, length } => {
                write!(f, "Derivation did not terminate within its limits ({} steps, form of length {})", steps, length)
            }
        }
    }
}

impl std::error::Error for GenerateError {}

pub type GenResult<T> = Result<T, GenerateError>;

// Upper bounds on a single derivation. `None` means unbounded, in which case
// a grammar whose rules never reach an all-terminal alternative loops forever.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct GenerationLimits {
    pub max_steps: Option<usize>,
    pub max_length: Option<usize>,
}

impl GenerationLimits {
    pub fn unbounded() -> Self {
        GenerationLimits::default()
    }

    fn steps_exhausted(&self, steps: usize) -> bool {
        self.max_steps.is_some_and(|max| steps >= max)
    }

    fn too_long(&self, length: usize) -> bool {
        self.max_length.is_some_and(|max| length > max)
    }
}

// Every sentential form visited while deriving one string, starting with the
// start symbol on its own.
#[derive(Debug, PartialEq, Clone)]
pub struct Derivation {
    pub forms: Vec<Vec<Symbol>>,
}

impl Derivation {
    pub fn steps(&self) -> usize {
        self.forms.len().saturating_sub(1)
    }

    pub fn result(&self) -> String {
        self.forms.last().map(|form| to_string(form)).unwrap_or_default()
    }
}

impl Display for Derivation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let chain = self.forms.iter().map(|form| to_string(form)).collect::<Vec<_>>();
        write!(f, "{}", chain.join(" => "))
    }
}

fn to_string(form: &[Symbol]) -> String {
    form.iter().map(Symbol::character).collect()
}

fn first_nonterminal(form: &[Symbol]) -> Option<(usize, char)> {
    form.iter()
        .position(Symbol::is_nonterminal)
        .map(|index| (index, form[index].character()))
}

// Replaces the symbol at `index` with `expansion`, keeping everything around it
fn splice(form: &[Symbol], index: usize, expansion: &[Symbol]) -> Vec<Symbol> {
    let mut next = Vec::with_capacity(form.len() + expansion.len());
    next.extend_from_slice(&form[..index]);
    next.extend_from_slice(expansion);
    next.extend_from_slice(&form[index + 1..]);
    next
}

fn derive_with<R, F>(grammar: &Grammar, start: char, rng: &mut R, limits: &GenerationLimits, mut on_step: F) -> GenResult<Vec<Symbol>>
where
    R: Rng + ?Sized,
    F: FnMut(&[Symbol]),
{
    if !grammar.is_non_terminal(start) {
        return Err(GenerateError::UndefinedNonterminal(start));
    }

    let mut form = vec![Symbol::Nonterminal(start)];
    let mut steps = 0;
    on_step(&form);

    while let Some((index, nonterminal)) = first_nonterminal(&form) {
        if limits.steps_exhausted(steps) {
            return Err(GenerateError::BoundExceeded { steps, length: form.len() });
        }

        let alternative = grammar.alternatives(nonterminal)
            .and_then(|rewrite| rewrite.choose(&mut *rng))
            .ok_or(GenerateError::UndefinedNonterminal(nonterminal))?;

        form = splice(&form, index, alternative);
        steps += 1;
        trace!("step {}: {} -> {} gives {}", steps, nonterminal, to_string(alternative), to_string(&form));
        on_step(&form);

        if limits.too_long(form.len()) {
            return Err(GenerateError::BoundExceeded { steps, length: form.len() });
        }
    }

    Ok(form)
}

impl Grammar {
    pub fn generate_string<R: Rng + ?Sized>(&self, rng: &mut R) -> GenResult<String> {
        self.generate_with_limits(rng, &GenerationLimits::unbounded())
    }

    pub fn generate_with_limits<R: Rng + ?Sized>(&self, rng: &mut R, limits: &GenerationLimits) -> GenResult<String> {
        self.generate_from(self.start_symbol(), rng, limits)
    }

    // Generates a string in the grammar starting with the given nonterminal
    pub fn generate_from<R: Rng + ?Sized>(&self, start: char, rng: &mut R, limits: &GenerationLimits) -> GenResult<String> {
        let form = derive_with(self, start, rng, limits, |_| ())?;
        let generated = to_string(&form);
        debug!("generated `{}` from `{}`", generated, start);
        Ok(generated)
    }

    // Keeps every intermediate sentential form
    pub fn derive<R: Rng + ?Sized>(&self, rng: &mut R, limits: &GenerationLimits) -> GenResult<Derivation> {
        self.derive_from(self.start_symbol(), rng, limits)
    }

    pub fn derive_from<R: Rng + ?Sized>(&self, start: char, rng: &mut R, limits: &GenerationLimits) -> GenResult<Derivation> {
        let mut forms = Vec::new();
        derive_with(self, start, rng, limits, |form| forms.push(form.to_vec()))?;
        Ok(Derivation { forms })
    }
}
