//! docseq CLI - sequential placeholder numbering for Word documents
//!
//! Replaces placeholders such as `[REQ-XXX]` with `[REQ-001]`, `[REQ-002]`, ...
//! keeping an independent counter for each prefix.

mod logging;

use clap::{ArgAction, Parser};
use colored::*;
use docseq::{ReplaceOptions, Replacements, DEFAULT_PATTERN};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Number of example numbers shown per prefix in the summary.
const EXAMPLE_COUNT: usize = 5;

/// Find and replace text patterns with sequential numbers
#[derive(Parser, Debug)]
#[command(
    name = "docseq",
    author = "iyulab",
    version,
    about = "Find and replace text patterns with sequential numbers",
    long_about = "docseq - Sequential placeholder numbering for Word documents.\n\n\
                  Replaces placeholders such as [REQ-XXX] with [REQ-001], [REQ-002], ...\n\
                  in body text, tables, headers and footers, with one counter per prefix."
)]
struct Cli {
    /// Input Word document path
    input_file: PathBuf,

    /// Output Word document path
    output_file: PathBuf,

    /// Prefixes to process
    #[arg(long, num_args = 1.., default_values = ["REQ", "SYS"])]
    prefixes: Vec<String>,

    /// Number every prefix the pattern captures
    #[arg(long, conflicts_with = "prefixes")]
    all_prefixes: bool,

    /// Regex pattern to match; its single capture group is the prefix
    #[arg(long, default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Minimum number of digits in generated numbers
    #[arg(long, default_value_t = docseq::options::DEFAULT_MIN_WIDTH)]
    width: usize,

    /// Leave header parts untouched
    #[arg(long)]
    no_headers: bool,

    /// Leave footer parts untouched
    #[arg(long)]
    no_footers: bool,

    /// Print the generated numbers as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> ReplaceOptions {
        let options = ReplaceOptions::new()
            .with_pattern(self.pattern.as_str())
            .with_min_width(self.width)
            .with_headers(!self.no_headers)
            .with_footers(!self.no_footers);

        if self.all_prefixes {
            options.allow_all_prefixes()
        } else {
            options.with_prefixes(self.prefixes.iter().cloned())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Numbering placeholders...");
    let result = docseq::find_and_replace_patterns_with_options(
        &cli.input_file,
        &cli.output_file,
        &cli.options(),
    );
    pb.finish_and_clear();
    let replacements = result?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&replacements)?);
    } else {
        println!(
            "{} Successfully processed '{}' -> '{}'",
            "✓".green().bold(),
            cli.input_file.display(),
            cli.output_file.display()
        );
        for line in summary_lines(&replacements) {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Per-prefix count lines with up to five example numbers each.
fn summary_lines(replacements: &Replacements) -> Vec<String> {
    if replacements.is_empty() {
        return vec![format!("{} No placeholders found", "!".yellow().bold())];
    }

    let mut lines = Vec::new();
    for (prefix, numbers) in replacements.iter() {
        lines.push(format!("{}: {} replacements", prefix.bold(), numbers.len()));
        let shown = numbers.len().min(EXAMPLE_COUNT);
        lines.push(format!("  Examples: {}", numbers[..shown].join(", ")));
        if numbers.len() > EXAMPLE_COUNT {
            lines.push(format!("  ... and {} more", numbers.len() - EXAMPLE_COUNT));
        }
    }
    lines
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
