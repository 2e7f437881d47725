use crate::config::ToleranceConfig;
use crate::messages::Verbosity;
use crate::objects::DataKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tallycmp")]
#[command(about = "Tolerance- and uncertainty-aware comparison of simulation results", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .tallycmp.toml)
    #[arg(long, global = true, env = "TALLYCMP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Minimum severity of reported comparison messages
    #[arg(short, long, global = true, value_enum)]
    pub verbosity: Option<Verbosity>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two result or detector documents
    Compare {
        /// Reference document
        first: PathBuf,

        /// Document compared against the reference
        second: PathBuf,

        /// Relative differences (%) at or below this pass silently
        #[arg(long)]
        lower: Option<f64>,

        /// Relative differences (%) at or above this fail
        #[arg(long)]
        upper: Option<f64>,

        /// Confidence interval in standard deviations; 0 compares values directly
        #[arg(long, allow_negative_numbers = true)]
        sigma: Option<i64>,
    },

    /// Print a slice of detector data as JSON
    Slice {
        /// Detector document
        detector: PathBuf,

        /// Hold an axis at one bin, e.g. `--fix energy=0` (repeatable)
        #[arg(long = "fix", value_parser = parse_fixed_axis)]
        fixed: Vec<(String, usize)>,

        /// Data set to slice
        #[arg(long, value_enum, default_value = "tallies")]
        data: DataKind,
    },

    /// Print the bin edges of a detector grid or axis as JSON
    Edges {
        /// Detector document
        detector: PathBuf,

        /// Grid or axis name, e.g. `energy`
        quantity: String,
    },

    /// Write a default .tallycmp.toml to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    /// Tolerances given on the command line, unset fields left to the config.
    pub fn tolerance_overrides(&self) -> ToleranceConfig {
        match self {
            Self::Compare {
                lower,
                upper,
                sigma,
                ..
            } => ToleranceConfig {
                lower: *lower,
                upper: *upper,
                sigma: *sigma,
            },
            _ => ToleranceConfig::default(),
        }
    }
}

/// Parse `NAME=INDEX`.
fn parse_fixed_axis(arg: &str) -> Result<(String, usize), String> {
    let (name, index) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=INDEX, got {arg:?}"))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid bin index {index:?}: {e}"))?;
    Ok((name.trim().to_string(), index))
}
