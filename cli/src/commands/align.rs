//! Align command implementation - global alignment of two sequences

use nwalign_core::Alignment;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::config::{Config, OutputFormat};
use crate::error::{CliError, CliResult};

use super::open_output;

/// Machine-readable alignment summary
#[derive(Debug, Serialize)]
struct AlignmentReport<'a> {
    matrix: &'a str,
    gap_penalty: i32,
    score: i64,
    length: usize,
    matches: usize,
    mismatches: usize,
    gaps: usize,
    identity: f64,
    aligned_s1: &'a str,
    aligned_s2: &'a str,
}

pub fn execute(config: &Config, s1: &str, s2: &str, out: Option<&Path>) -> CliResult<()> {
    if config.output.line_width == 0 {
        return Err(CliError::validation("line width must be at least 1"));
    }

    let aligner = config.align.build_aligner()?;
    log::info!("Aligning {} x {} residues", s1.chars().count(), s2.chars().count());

    let alignment = aligner.align(s1, s2)?;
    log::info!(
        "Score {} over {} columns ({} gaps)",
        alignment.score(),
        alignment.len(),
        alignment.gaps()
    );

    let mut writer = open_output(out)?;
    write_alignment(&mut writer, &alignment, aligner.matrix().name(), config)?;
    writer.flush()?;

    Ok(())
}

fn write_alignment<W: Write>(
    writer: &mut W,
    alignment: &Alignment,
    matrix_name: &str,
    config: &Config,
) -> CliResult<()> {
    match config.output.format {
        OutputFormat::Json => {
            let report = AlignmentReport {
                matrix: matrix_name,
                gap_penalty: config.align.gap_penalty,
                score: alignment.score(),
                length: alignment.len(),
                matches: alignment.matches(),
                mismatches: alignment.mismatches(),
                gaps: alignment.gaps(),
                identity: alignment.identity(),
                aligned_s1: alignment.aligned_s1(),
                aligned_s2: alignment.aligned_s2(),
            };
            serde_json::to_writer_pretty(&mut *writer, &report)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            let length = alignment.len();
            writeln!(writer, "# Matrix: {}", matrix_name)?;
            writeln!(writer, "# Gap penalty: {}", config.align.gap_penalty)?;
            writeln!(writer, "# Length: {}", length)?;
            writeln!(
                writer,
                "# Identity: {}/{} ({:.1}%)",
                alignment.matches(),
                length,
                alignment.identity() * 100.0
            )?;
            writeln!(writer, "# Gaps: {}/{}", alignment.gaps(), length)?;
            writeln!(writer, "# Score: {}", alignment.score())?;
            writeln!(writer)?;
            write!(writer, "{}", alignment.render(config.output.line_width))?;
        }
    }

    Ok(())
}
