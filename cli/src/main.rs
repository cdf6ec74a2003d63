use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use nwalign_core::BuiltinMatrix;
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod input;

use config::{Config, OutputFormat};
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "nwalign")]
#[command(about = "nwalign - Needleman-Wunsch global alignment for protein sequences")]
#[command(version)]
#[command(long_about = "
nwalign computes an optimal global alignment of two protein sequences using a
substitution matrix (BLOSUM62 by default) and a constant per-residue gap penalty.

Examples:
  nwalign align --s1 HEAGAWGHEE --s2 PAWHEAE --matrix blosum50
  nwalign align --s1-file target.fa --s2-file reference.fa --format json
  nwalign diff --target-file variant.fa --reference-file wildtype.fa
  nwalign matrix --validate my_matrix.txt
  nwalign config --example > nwalign.toml
  nwalign --config nwalign.toml config --save effective.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Globally align two sequences
    Align {
        /// First sequence (rows of the DP grid)
        #[arg(long, required_unless_present = "s1_file", conflicts_with = "s1_file")]
        s1: Option<String>,

        /// FASTA/FASTQ file holding the first sequence
        #[arg(long)]
        s1_file: Option<PathBuf>,

        /// Second sequence (columns of the DP grid)
        #[arg(long, required_unless_present = "s2_file", conflicts_with = "s2_file")]
        s2: Option<String>,

        /// FASTA/FASTQ file holding the second sequence
        #[arg(long)]
        s2_file: Option<PathBuf>,

        #[command(flatten)]
        scoring: ScoringArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List residue substitutions of a target relative to a reference
    Diff {
        /// Target sequence; positions are numbered along it
        #[arg(long, required_unless_present = "target_file", conflicts_with = "target_file")]
        target: Option<String>,

        /// FASTA/FASTQ file holding the target sequence
        #[arg(long)]
        target_file: Option<PathBuf>,

        /// Reference sequence
        #[arg(long, required_unless_present = "reference_file", conflicts_with = "reference_file")]
        reference: Option<String>,

        /// FASTA/FASTQ file holding the reference sequence
        #[arg(long)]
        reference_file: Option<PathBuf>,

        #[command(flatten)]
        scoring: ScoringArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Validate a matrix resource or print a bundled matrix
    Matrix {
        /// Matrix resource to validate
        #[arg(long, required_unless_present = "show", conflicts_with = "show")]
        validate: Option<PathBuf>,

        /// Expected alphabet size of the validated matrix
        #[arg(long, default_value = "20")]
        size: usize,

        /// Bundled matrix to print (blosum62, blosum50)
        #[arg(long)]
        show: Option<BuiltinMatrix>,
    },

    /// Print the effective configuration
    Config {
        /// Print a sample configuration with default values instead
        #[arg(long)]
        example: bool,

        /// Write the effective configuration to this file
        #[arg(long, conflicts_with = "example")]
        save: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Score per gap column (e.g. -8)
    #[arg(long, allow_negative_numbers = true)]
    pub gap_penalty: Option<i32>,

    /// Bundled substitution matrix (blosum62, blosum50)
    #[arg(long, conflicts_with = "matrix_file")]
    pub matrix: Option<BuiltinMatrix>,

    /// Custom substitution matrix resource
    #[arg(long)]
    pub matrix_file: Option<PathBuf>,

    /// Alphabet size of --matrix-file
    #[arg(long, requires = "matrix_file")]
    pub matrix_size: Option<usize>,
}

impl ScoringArgs {
    /// Overlay command-line values on the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(gap_penalty) = self.gap_penalty {
            config.align.gap_penalty = gap_penalty;
        }
        if let Some(matrix) = self.matrix {
            config.align.matrix = matrix;
            config.align.matrix_path = None;
        }
        if let Some(ref path) = self.matrix_file {
            config.align.matrix_path = Some(path.clone());
        }
        if let Some(size) = self.matrix_size {
            config.align.matrix_size = size;
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Columns per block in text output
    #[arg(long)]
    pub width: Option<usize>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

impl OutputArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(width) = self.width {
            config.output.line_width = width;
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = Config::load(cli.config.as_deref())
        .map_err(|e| CliError::config(format!("{:#}", e)))?;

    match cli.command {
        Commands::Align {
            s1,
            s1_file,
            s2,
            s2_file,
            scoring,
            output,
        } => {
            scoring.apply(&mut config);
            output.apply(&mut config);
            let s1 = input::resolve_sequence(s1, s1_file, "s1")?;
            let s2 = input::resolve_sequence(s2, s2_file, "s2")?;
            commands::align::execute(&config, &s1, &s2, output.out.as_deref())?;
        }

        Commands::Diff {
            target,
            target_file,
            reference,
            reference_file,
            scoring,
            output,
        } => {
            scoring.apply(&mut config);
            output.apply(&mut config);
            let target = input::resolve_sequence(target, target_file, "target")?;
            let reference = input::resolve_sequence(reference, reference_file, "reference")?;
            commands::diff::execute(&config, &target, &reference, output.out.as_deref())?;
        }

        Commands::Matrix { validate, size, show } => {
            commands::matrix::execute(validate, size, show)?;
        }

        Commands::Config { example, save } => {
            if let Some(path) = save {
                config
                    .save_to_file(&path)
                    .map_err(|e| CliError::config(format!("{:#}", e)))?;
                log::info!("Configuration written to: {}", path.display());
            } else if example {
                print!("{}", Config::example_toml());
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        error::print_error_and_exit(&err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_gap_penalty_parses() {
        let cli = Cli::try_parse_from([
            "nwalign", "align", "--s1", "PAW", "--s2", "HEAE", "--gap-penalty", "-10",
        ])
        .unwrap();
        match cli.command {
            Commands::Align { scoring, .. } => assert_eq!(scoring.gap_penalty, Some(-10)),
            _ => panic!("expected align"),
        }
    }

    #[test]
    fn test_scoring_overrides_config() {
        let mut config = Config::default();
        let scoring = ScoringArgs {
            gap_penalty: Some(-4),
            matrix: Some(BuiltinMatrix::Blosum50),
            ..Default::default()
        };
        scoring.apply(&mut config);
        assert_eq!(config.align.gap_penalty, -4);
        assert_eq!(config.align.matrix, BuiltinMatrix::Blosum50);
    }

    #[test]
    fn test_sequence_and_file_conflict() {
        let result = Cli::try_parse_from([
            "nwalign", "align", "--s1", "PAW", "--s1-file", "a.fa", "--s2", "HEAE",
        ]);
        assert!(result.is_err());
    }
}
