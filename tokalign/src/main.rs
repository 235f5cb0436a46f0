use anyhow::Result;
use clap::Parser;
use tokalign::{align, batch};

#[derive(Parser)]
#[command(version, about)]
enum Cli {
    /// Align a single hypothesis to a single reference and print the alignment.
    Align(align::Cli),

    /// Compute the corpus error rate of a file of reference and hypothesis pairs.
    Batch(batch::Cli),
}

fn main() -> Result<()> {
    match Cli::parse() {
        Cli::Align(cli) => align::cli(cli),
        Cli::Batch(cli) => batch::cli(cli),
    }
}
