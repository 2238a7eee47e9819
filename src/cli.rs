use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar (default: the built-in sample grammar)
    pub file: Option<PathBuf>,

    /// Start symbol to generate from (default: the grammar's start symbol)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<char>,

    /// Amount of strings to generate
    #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 5)]
    pub amount: u32,

    /// Seed for the random generator (default: fresh entropy)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Give up on a derivation after this many rewrite steps
    #[arg(long, value_name = "STEPS")]
    pub max_steps: Option<usize>,

    /// Give up on a derivation once a sentential form grows past this length
    #[arg(long, value_name = "LENGTH")]
    pub max_length: Option<usize>,

    /// Let later rules overwrite conflicting transitions instead of failing
    #[arg(long)]
    pub last_write_wins: bool,

    /// Test a string for membership (repeatable)
    #[arg(short, long = "check", value_name = "STRING")]
    pub checks: Vec<String>,

    /// Print full derivations instead of only the generated strings
    #[arg(long)]
    pub derivation: bool,

    /// Print the automaton built from the grammar
    #[arg(long)]
    pub table: bool,

    /// Scan a string with the grammar's terminals and print its tree
    #[arg(long, value_name = "STRING")]
    pub tree: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}
