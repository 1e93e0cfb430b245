use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "icplace CLI - internal-coordinate table generation and random rigid-body placement for molecular structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an internal-coordinate table and splice it into a topology file.
    Ic(IcArgs),
    /// Randomly re-orient a movable point cloud until it clears a fixed cloud.
    Place(PlaceArgs),
}

/// Arguments for the `ic` subcommand.
#[derive(Args, Debug)]
pub struct IcArgs {
    /// Path to the input structure file (e.g., ligand.pdb).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub structure: PathBuf,

    /// Path to the companion topology file holding the RESI block.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub topology: PathBuf,

    /// Path to the target file that receives the spliced block and table.
    #[arg(short = 'T', long, required = true, value_name = "PATH")]
    pub target: PathBuf,

    /// Override the bond-length cutoff applied to both bracketing pairs.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Override the structure atom capacity (input truncates at this count).
    #[arg(long, value_name = "INT")]
    pub max_atoms: Option<usize>,
}

/// Arguments for the `place` subcommand.
#[derive(Args, Debug)]
pub struct PlaceArgs {
    /// Path to the fixed point-cloud file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub fixed: PathBuf,

    /// Path to the movable point-cloud file (rewritten in place).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub movable: PathBuf,

    /// Path for the rotation-matrix output.
    #[arg(long, value_name = "PATH", default_value = "rotation_matrix.txt")]
    pub matrix: PathBuf,

    /// Path to a placement configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the minimum-distance threshold from the config file.
    #[arg(short, long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    /// Override the random-generator seed.
    #[arg(short, long, value_name = "INT")]
    pub seed: Option<i32>,

    /// Abort after this many rotations instead of retrying forever.
    #[arg(long, value_name = "INT")]
    pub max_rotations: Option<usize>,

    /// Override the point-cloud atom capacity.
    #[arg(long, value_name = "INT")]
    pub max_atoms: Option<usize>,

    /// Write the movable cloud's initial coordinates to this path first.
    #[arg(long, value_name = "PATH")]
    pub backup: Option<PathBuf>,
}
