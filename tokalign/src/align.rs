use std::{
    fs,
    io::{Write, stdout},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use lib_tokalign::{aligner::TokenAligner, alignment_result::AlignmentResult, costs::EditCost};
use log::{LevelFilter, info};
use noisy_float::types::R64;

use crate::{config::load_configuration, logging::initialise_logging};

#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// The reference sentence.
    ///
    /// Tokens are separated by whitespace.
    reference: String,

    /// The hypothesis sentence, e.g. a transcription or translation.
    ///
    /// Tokens are separated by whitespace.
    hypothesis: String,

    /// A toml file containing the edit costs.
    ///
    /// Recognised keys are `match_cost`, `substitution_cost`, `insertion_cost` and `deletion_cost`.
    /// If not given, matches are free and all other operations cost one.
    #[clap(long, short = 'c')]
    configuration: Option<PathBuf>,

    /// The file to store the alignment summary in toml format.
    #[clap(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct AlignmentSummary {
    error_rate: f64,
    cost: f64,
    insertions: usize,
    deletions: usize,
    substitutions: usize,
    reference_length: usize,
    hypothesis_length: usize,
    cigar: String,
}

pub fn cli(cli: Cli) -> Result<()> {
    cli_with_output(cli, &mut stdout().lock())
}

/// Runs the align command, printing the report into `output`.
pub fn cli_with_output(cli: Cli, output: &mut impl Write) -> Result<()> {
    initialise_logging(cli.log_level);

    let configuration = load_configuration(cli.configuration.as_deref())?;
    let mut aligner = TokenAligner::new(configuration)?;

    let reference: Vec<_> = cli.reference.split_whitespace().collect();
    let hypothesis: Vec<_> = cli.hypothesis.split_whitespace().collect();
    let result = aligner.compute(&reference, &hypothesis);
    let error_rate = result
        .error_rate()
        .context("The reference must contain at least one token")?;

    write_report(
        output,
        &cli.reference,
        &cli.hypothesis,
        &reference,
        &hypothesis,
        &result,
        error_rate,
    )?;

    if let Some(path) = &cli.output {
        info!("Writing alignment summary to {path:?}");
        let summary = AlignmentSummary {
            error_rate,
            cost: result.cost().as_f64(),
            insertions: result.insertions(),
            deletions: result.deletions(),
            substitutions: result.substitutions(),
            reference_length: result.reference_length(),
            hypothesis_length: result.hypothesis_length(),
            cigar: result.cigar(),
        };
        fs::write(path, toml::to_string(&summary)?)
            .with_context(|| format!("Writing alignment summary {path:?}"))?;
    }

    Ok(())
}

fn write_report(
    output: &mut impl Write,
    reference_string: &str,
    hypothesis_string: &str,
    reference: &[&str],
    hypothesis: &[&str],
    result: &AlignmentResult<R64>,
    error_rate: f64,
) -> Result<()> {
    writeln!(output, " * Computing edit distance between:")?;
    writeln!(output, " * ref: {reference_string}")?;
    writeln!(output, " * hyp: {hypothesis_string}")?;
    writeln!(output, " ---")?;
    writeln!(output, " * ER: {error_rate:.2}")?;
    writeln!(output, " * Errors:")?;
    writeln!(output, " * ins: {}", result.insertions())?;
    writeln!(output, " * del: {}", result.deletions())?;
    writeln!(output, " * sub: {}", result.substitutions())?;
    writeln!(output, " ---")?;
    writeln!(output, "* Alignment:")?;
    for operation in result.operations() {
        let (reference_token, hypothesis_token) = operation.resolve(reference, hypothesis);
        writeln!(
            output,
            " * {}) r:{}, h:{}",
            operation.name(),
            reference_token.unwrap_or("-"),
            hypothesis_token.unwrap_or("-"),
        )?;
    }
    writeln!(output, " ---")?;
    Ok(())
}
