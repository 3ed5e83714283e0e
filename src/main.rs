use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use tracing::level_filters::LevelFilter;

use editmask::{EditMask, MaskOptions, Validity};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mask to apply
    #[arg(value_name = "MASK")]
    mask: String,

    /// Values to mask; read one per line from stdin if omitted
    #[arg(value_name = "VALUE")]
    values: Vec<String>,

    /// Do not skip ahead to a later token on a mismatch
    #[arg(long)]
    no_lookahead: bool,

    /// Stop at the first unmatched character instead of discarding it
    #[arg(long)]
    no_eat_invalid: bool,

    /// Keep inserting literals once the value runs out
    #[arg(short = 'a', long)]
    append_literals: bool,

    /// Cursor position (selection start) in the value
    #[arg(short = 'c', long, value_name = "N", default_value_t = 0)]
    cursor: usize,

    /// Selection end; defaults to the cursor position
    #[arg(short = 'e', long, value_name = "N")]
    selection_end: Option<usize>,

    /// Report whether each character could start a value instead of masking
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = MaskOptions {
        lookahead: !args.no_lookahead,
        eat_invalid: !args.no_eat_invalid,
        append_literals: args.append_literals,
    };
    let mask = EditMask::with_options(&args.mask, options)
        .with_context(|| format!("Invalid mask {:?}", args.mask))?;

    let values = if args.values.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("Failed to read stdin")?
    } else {
        args.values.clone()
    };

    let selection_end = args.selection_end.unwrap_or(args.cursor);
    for value in &values {
        if args.check {
            println!("{}", check_line(&mask, value));
        } else {
            println!("{}", mask.process(value, args.cursor, selection_end));
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn check_line(mask: &EditMask, value: &str) -> String {
    value
        .chars()
        .map(|ch| {
            let verdict = match mask.validate_char(ch) {
                Validity::Accepted => "accepted",
                Validity::Rejected => "rejected",
                Validity::DeferredOptional => "deferred",
            };
            format!("{ch:?}={verdict}")
        })
        .join(" ")
}
