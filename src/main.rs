//! Command-line front end: print the strings a pattern can match.
//!
//! Usage:
//!   regex-enumerate `<pattern>` [--limit N] [--format lines|json|tree|tree-json]

use std::process;

use clap::{Parser, ValueEnum};
use regex_enumerate::{
    EnumerateOptions, enumerate_with_provenance, generate_matches_with, parse,
    snapshot_from_provenance, take_results, to_treeviz_str,
};

/// Limit applied to patterns with unbounded quantifiers when none is given.
const DEFAULT_UNBOUNDED_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One match per line
    Lines,
    /// JSON array of matches
    Json,
    /// Provenance tree of each match
    Tree,
    /// Provenance trees as JSON
    TreeJson,
}

#[derive(Debug, Parser)]
#[command(name = "regex-enumerate", version, about = "Enumerate the strings a regular expression can match")]
struct Cli {
    /// Pattern, bare (`a|b`) or slash-delimited (`/a|b/`)
    pattern: String,

    /// Maximum number of matches; 0 means no limit
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Lines)]
    format: Format,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let pattern = match parse(&cli.pattern) {
        Ok(pattern) => pattern,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let limit = match cli.limit {
        Some(0) => None,
        Some(n) => Some(n),
        None if pattern.is_unbounded() => Some(DEFAULT_UNBOUNDED_LIMIT),
        None => None,
    };
    let options = EnumerateOptions {
        limit,
        ..EnumerateOptions::default()
    };

    match cli.format {
        Format::Lines => {
            for value in generate_matches_with(&pattern, &options) {
                println!("{value}");
            }
        }
        Format::Json => {
            let values = take_results(generate_matches_with(&pattern, &options), None);
            print_json(&values);
        }
        Format::Tree => {
            for provenance in take_results(enumerate_with_provenance(&pattern), limit) {
                print!("{}", to_treeviz_str(&provenance));
            }
        }
        Format::TreeJson => {
            let snapshots: Vec<_> = take_results(enumerate_with_provenance(&pattern), limit)
                .iter()
                .map(|provenance| snapshot_from_provenance(provenance))
                .collect();
            print_json(&snapshots);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
