mod cli;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::prelude::*;
use rand::rngs::StdRng;

use regula::automaton::ConflictPolicy;
use regula::error_handling::report;
use regula::generator::GenerationLimits;
use regula::grammar::Grammar;
use regula::parser;
use regula::syntax::{self, Scanner};

// Membership queries shown when running on the built-in grammar
const SAMPLE_CHECKS: [&str; 5] = ["dab", "dabc", "dcac", "dbac", "dca"];

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);

    let grammar = match &cli.file {
        Some(path) => parser::parse_file(path)
            .map_err(|errors| anyhow!(report(&errors)))
            .with_context(|| format!("failed to load grammar from {}", path.display()))?,
        None => Grammar::sample(),
    };

    println!("Grammar:\n{}", grammar);
    println!("Classification: {}", grammar.chomsky_type());

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let limits = GenerationLimits { max_steps: cli.max_steps, max_length: cli.max_length };
    let start = cli.start.unwrap_or(grammar.start_symbol());

    println!("\nGenerated strings:");
    for _ in 0..cli.amount {
        let line = if cli.derivation {
            grammar.derive_from(start, &mut rng, &limits)?.to_string()
        } else {
            grammar.generate_from(start, &mut rng, &limits)?
        };
        println!("{}", line);
    }

    let policy = if cli.last_write_wins {
        ConflictPolicy::LastWriteWins
    } else {
        ConflictPolicy::Reject
    };
    let automaton = grammar.to_finite_automaton_with(policy).context("failed to build automaton")?;

    if cli.table {
        println!("\nAutomaton:\n{}", automaton);
    }

    let checks: Vec<String> = if cli.checks.is_empty() && cli.file.is_none() {
        SAMPLE_CHECKS.iter().map(|s| s.to_string()).collect()
    } else {
        cli.checks.clone()
    };
    if !checks.is_empty() {
        println!("\nChecking language membership:");
    }
    for input in &checks {
        let run = automaton.run(input);
        println!("{} belongs to language: {} ({})", input, run.is_accepted(), run.outcome);
    }

    if let Some(text) = &cli.tree {
        let tokens = Scanner::for_grammar(&grammar).tokenize(text).context("failed to scan input")?;
        print!("\n{}", syntax::print(&syntax::parse(&tokens)));
    }

    Ok(())
}
