use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use insn2yaml_core::load::load_record_json;
use insn2yaml_core::write_document;

mod logging;

/// Instruction compiled into this binary.
const INSTRUCTION_JSON: &str = include_str!("../data/instruction.json");

const USAGE: &str = "Usage: insn2yaml <output_yaml_file>";

#[derive(Parser, Debug)]
#[command(name = "insn2yaml")]
#[command(about = "Write the compiled-in instruction as a YAML document.", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Destination file; created or truncated.
    output: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            println!("{USAGE}");
            return ExitCode::from(1);
        }
    };

    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(1)
        }
    }
}

fn try_main(cli: &Cli) -> Result<()> {
    logging::init()?;

    let record = load_record_json(INSTRUCTION_JSON.as_bytes())
        .context("load compiled-in instruction record")?;

    // Unbuffered; write errors carry the document key.
    let mut out = File::create(&cli.output).context("Error opening output file")?;
    let bytes = write_document(&mut out, &record)
        .with_context(|| format!("write output: {}", cli.output.display()))?;

    tracing::debug!(
        name = %record.name,
        path = %cli.output.display(),
        bytes,
        "wrote instruction document"
    );
    Ok(())
}
