use std::{
    fs::{self, File},
    io::{BufRead, BufReader, Write, stdout},
    path::PathBuf,
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use lib_tokalign::{
    aligner::TokenAligner,
    interner::{DEFAULT_INTERNER_THRESHOLD, TokenInterner},
    statistics::ErrorStatistics,
};
use log::{LevelFilter, debug, info, warn};

use crate::{config::load_configuration, logging::initialise_logging};

#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// A file with one sentence pair per line.
    ///
    /// Each line contains the reference and the hypothesis separated by a tab character.
    /// Empty lines are ignored.
    #[clap(long, short = 'i')]
    input: PathBuf,

    /// The file to store the corpus statistics in toml format.
    #[clap(long, short = 'o')]
    output: Option<PathBuf>,

    /// A toml file containing the edit costs.
    ///
    /// See `tokalign align --help`.
    #[clap(long, short = 'c')]
    configuration: Option<PathBuf>,

    /// The amount of distinct tokens after which the token interner is cleared.
    #[clap(long, default_value_t = DEFAULT_INTERNER_THRESHOLD)]
    interner_threshold: usize,
}

#[derive(serde::Serialize)]
struct CorpusSummary {
    error_rate: f64,

    #[serde(flatten)]
    statistics: ErrorStatistics,
}

pub fn cli(cli: Cli) -> Result<()> {
    cli_with_output(cli, &mut stdout().lock())
}

/// Runs the batch command, printing the report into `output`.
pub fn cli_with_output(cli: Cli, output: &mut impl Write) -> Result<()> {
    initialise_logging(cli.log_level);

    let configuration = load_configuration(cli.configuration.as_deref())?;
    let mut aligner = TokenAligner::with_interner(
        configuration,
        TokenInterner::with_threshold(cli.interner_threshold),
    )?;

    info!("Reading sentence pairs from {:?}", cli.input);
    let input = BufReader::new(
        File::open(&cli.input).with_context(|| format!("Opening input file {:?}", cli.input))?,
    );

    let mut statistics = ErrorStatistics::new();
    let mut skipped_pairs = 0;
    for (line_index, line) in input.lines().enumerate() {
        let line_number = line_index + 1;
        let line = line.with_context(|| format!("Reading line {line_number}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let (reference, hypothesis) = line
            .split_once('\t')
            .ok_or_else(|| anyhow!("Line {line_number} contains no tab character"))?;
        let result = aligner.compute_str(reference, hypothesis);

        if result.reference_length() == 0 {
            warn!("Skipping line {line_number} because its reference is empty");
            skipped_pairs += 1;
            continue;
        }

        debug!("Line {line_number}: {result}");
        statistics += &result;
    }

    info!(
        "Evaluated {} sentence pairs, skipped {skipped_pairs}; the token interner was cleared {} times",
        statistics.sentence_pairs,
        aligner.interner().reset_count(),
    );
    let error_rate = statistics
        .error_rate()
        .context("The input contains no reference tokens")?;

    writeln!(output, " * Sentence pairs: {}", statistics.sentence_pairs)?;
    writeln!(output, " * ER: {error_rate:.2}")?;
    writeln!(output, " * Errors:")?;
    writeln!(output, " * ins: {}", statistics.insertions)?;
    writeln!(output, " * del: {}", statistics.deletions)?;
    writeln!(output, " * sub: {}", statistics.substitutions)?;
    writeln!(output, " ---")?;

    if let Some(path) = &cli.output {
        info!("Writing corpus statistics to {path:?}");
        let summary = CorpusSummary {
            error_rate,
            statistics,
        };
        fs::write(path, toml::to_string(&summary)?)
            .with_context(|| format!("Writing corpus statistics {path:?}"))?;
    }

    Ok(())
}
