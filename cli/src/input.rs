//! Sequence input: literal strings or the first record of a FASTA/FASTQ file

use needletail::parse_fastx_file;
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Resolve a sequence given either literally or as a file path
pub fn resolve_sequence(literal: Option<String>, file: Option<PathBuf>, label: &str) -> CliResult<String> {
    match (literal, file) {
        (Some(sequence), None) => Ok(sequence.trim().to_string()),
        (None, Some(path)) => read_first_record(&path),
        (Some(_), Some(_)) => Err(CliError::validation(format!(
            "{} was given both as a sequence and as a file",
            label
        ))),
        (None, None) => Err(CliError::validation(format!("no {} sequence given", label))),
    }
}

/// Read the first record of a FASTA/FASTQ file as a residue string
pub fn read_first_record(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }

    let file_label = path.display().to_string();
    let mut reader = parse_fastx_file(path)
        .map_err(|e| CliError::parse(file_label.clone(), e.to_string()))?;

    let record = match reader.next() {
        Some(record) => record.map_err(|e| CliError::parse(file_label.clone(), e.to_string()))?,
        None => {
            return Err(CliError::invalid_format(format!(
                "no sequence records in {}",
                file_label
            )))
        }
    };

    let id = String::from_utf8_lossy(record.id()).to_string();
    let sequence = String::from_utf8(record.seq().to_vec()).map_err(|_| {
        CliError::invalid_format(format!("record '{}' in {} is not valid UTF-8", id, file_label))
    })?;

    log::info!("Read '{}' ({} residues) from {}", id, sequence.len(), file_label);
    Ok(sequence)
}
