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
    author,
    version,
    about = "ComplexBuilder CLI - Reconstructs a multi-chain macromolecular complex from pairwise interaction fragments in PDB format.",
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

    /// Set the number of threads for parallel superposition.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a complex from a directory of two-chain fragment files.
    Assemble(AssembleArgs),
    /// List the chains of each fragment with their molecule kind and key-atom count.
    Inspect(InspectArgs),
}

/// Arguments for the `assemble` subcommand.
#[derive(Args, Debug)]
pub struct AssembleArgs {
    // --- Core Arguments ---
    /// Directory containing the pairwise fragment files.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub input: PathBuf,

    /// Directory the assembled complex and the report are written to.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fragment used as the starting structure. Defaults to the first fragment by file name.
    #[arg(long, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    // --- Assembly Overrides ---
    /// Number of chains the complex should contain.
    #[arg(short, long, value_name = "INT")]
    pub stoichiometry: Option<usize>,

    /// Maximum RMSD (in Angstroms) for two chains to be considered the same.
    #[arg(short, long, value_name = "FLOAT")]
    pub rmsd: Option<f64>,

    /// Maximum number of key-atom contacts tolerated between a new chain and one existing chain.
    #[arg(short, long, value_name = "INT")]
    pub clashes: Option<usize>,

    /// Contact distance (in Angstroms) used when counting clashes.
    #[arg(long, value_name = "FLOAT")]
    pub clash_radius: Option<f64>,

    /// Stop after this many fragment attempts.
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Skip unreadable or malformed fragments instead of aborting.
    #[arg(long)]
    pub skip_bad_fragments: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S thresholds.rmsd=1.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// A fragment file, or a directory of fragment files.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// File extensions considered fragment files when `--input` is a directory.
    #[arg(short, long = "extension", value_name = "EXT", default_values_t = ["pdb".to_string(), "ent".to_string()])]
    pub extensions: Vec<String>,
}
