use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use tokalign::{align, batch};

/// Returns the absolute path of a file given relative to the repository root.
pub fn repo_file(path: &str) -> Result<String> {
    // The manifest directory is this crate, a.k.a. "[...]/tokalign-tests".
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .ok_or(anyhow!("No parent directory"))?
        .to_path_buf();
    root.join(path)
        .into_os_string()
        .into_string()
        .map_err(|path| anyhow!("Non-unicode path {path:?}"))
}

/// Runs a tokalign subcommand in-process and returns what it printed.
pub fn run(args: &[&str]) -> Result<String> {
    let mut output = Vec::new();

    match args.first() {
        Some(&"align") => align::cli_with_output(align::Cli::try_parse_from(args)?, &mut output)?,
        Some(&"batch") => batch::cli_with_output(batch::Cli::try_parse_from(args)?, &mut output)?,
        other => bail!("Unknown subcommand {other:?}"),
    }

    Ok(String::from_utf8(output)?)
}

pub fn temporary_file(name: &str) -> Result<String> {
    std::env::temp_dir()
        .join(format!("tokalign-{}-{name}", std::process::id()))
        .into_os_string()
        .into_string()
        .map_err(|path| anyhow!("Non-unicode path {path:?}"))
}
