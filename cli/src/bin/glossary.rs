//! docseq-glossary - build abbreviation and term tables from review comments
//!
//! Comments starting with `@` mark the commented word as an abbreviation,
//! comments of the form `#Term: Definition` define a term. Both lists are
//! written as two-column tables into `<name>_abbr.docx` and `<name>_terms.docx`.

#[path = "../logging.rs"]
mod logging;

use clap::{ArgAction, Parser};
use colored::*;
use docseq::Glossary;
use std::path::PathBuf;

/// Extract abbreviations and terms from document comments
#[derive(Parser, Debug)]
#[command(name = "docseq-glossary", author = "iyulab", version)]
struct Cli {
    /// Input Word document path
    doc_path: PathBuf,

    /// Directory for the generated documents
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
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
    let glossary = Glossary::extract(&cli.doc_path)?;

    for (abbreviation, meaning) in glossary.abbreviations.as_slice() {
        println!("{} {}: {}", "@".cyan(), abbreviation.bold(), meaning);
    }
    for (term, definition) in glossary.terms.as_slice() {
        println!("{} {}: {}", "#".cyan(), term.bold(), definition);
    }

    std::fs::create_dir_all(&cli.output_dir)?;
    let output = glossary.write_documents(&cli.doc_path, &cli.output_dir)?;

    println!(
        "{} Abbreviations table has been written to {}",
        "✓".green().bold(),
        output.abbreviations.display()
    );
    println!(
        "{} Terms table has been written to {}",
        "✓".green().bold(),
        output.terms.display()
    );
    Ok(())
}
