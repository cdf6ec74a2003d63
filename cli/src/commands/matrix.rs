//! Matrix command implementation - validate a matrix resource or print a bundled one

use nwalign_core::{BuiltinMatrix, SubstitutionMatrix};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

pub fn execute(validate: Option<PathBuf>, size: usize, show: Option<BuiltinMatrix>) -> CliResult<()> {
    match (validate, show) {
        (Some(path), _) => {
            let report = validate_matrix(&path, size)?;
            println!("{}", report);
        }
        (None, Some(builtin)) => {
            print!("{}", builtin.load());
        }
        (None, None) => {
            return Err(CliError::validation("either --validate or --show is required"));
        }
    }
    Ok(())
}

fn validate_matrix(path: &Path, size: usize) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }

    log::info!("Validating {}x{} matrix: {}", size, size, path.display());
    let matrix = SubstitutionMatrix::from_file_with_size(path, size)?;

    let alphabet: String = matrix.alphabet().iter().collect();
    let symmetry = if matrix.is_symmetric() {
        "symmetric"
    } else {
        log::warn!("Matrix {} is not symmetric", matrix.name());
        "asymmetric"
    };

    Ok(format!(
        "OK: {} ({} symbols: {}, {})",
        path.display(),
        matrix.size(),
        alphabet,
        symmetry
    ))
}
