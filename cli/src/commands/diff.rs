//! Diff command implementation - residue substitutions of a target against a reference

use nwalign_core::{call_substitutions, Substitution};
use std::io::Write;
use std::path::Path;

use crate::config::{Config, OutputFormat};
use crate::error::CliResult;

use super::open_output;

pub fn execute(config: &Config, target: &str, reference: &str, out: Option<&Path>) -> CliResult<()> {
    let aligner = config.align.build_aligner()?;
    let calls = call_substitutions(target, reference, &aligner)?;
    log::info!("Found {} substitutions", calls.len());

    let mut writer = open_output(out)?;
    write_substitutions(&mut writer, &calls, config.output.format)?;
    writer.flush()?;

    Ok(())
}

fn write_substitutions<W: Write>(
    writer: &mut W,
    calls: &[Substitution],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, calls)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            for call in calls {
                writeln!(writer, "{}\t{}", call.position, call)?;
            }
        }
    }
    Ok(())
}
