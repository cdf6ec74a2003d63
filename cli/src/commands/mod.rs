//! Command implementations for the nwalign CLI

pub mod align;
pub mod diff;
pub mod matrix;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::CliResult;

/// Open the output file, or stdout when no path is given
pub(crate) fn open_output(out: Option<&Path>) -> CliResult<Box<dyn Write>> {
    match out {
        Some(path) => {
            log::info!("Writing output to: {}", path.display());
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
