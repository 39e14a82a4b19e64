use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "gdata",
    about = "Build padded molecular datasets from quantum-chemistry output",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    /// Suppress progress output and informational logging (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read a file or a directory of files into a dataset directory
    #[command(visible_alias = "r")]
    Read(ReadArgs),

    /// Summarise a saved dataset
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Merge two saved datasets by record name
    #[command(visible_alias = "m")]
    Merge(MergeArgs),

    /// Change the atom axis of a saved dataset
    Resize(ResizeArgs),

    /// Write every structure of a saved dataset as an .xyz file
    #[command(name = "export-xyz", visible_alias = "x")]
    ExportXyz(ExportArgs),

    /// Rotate every structure into its principal-axis frame
    #[command(name = "mi-coor")]
    MiCoor(MiCoorArgs),
}

/// Parser options for input files.
#[derive(Args)]
#[command(next_help_heading = "Parsing")]
pub struct ParseOptions {
    /// Input format (inferred from the file extension or directory contents)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<InputFormat>,

    /// Treat .xyz files as headerless (no count and comment lines)
    #[arg(long)]
    pub no_xyz_header: bool,

    /// Accept Gaussian logs without a normal termination line
    #[arg(long)]
    pub no_validate_log: bool,
}

/// Dataset shape options used when a new dataset is created.
#[derive(Args)]
#[command(next_help_heading = "Dataset")]
pub struct DatasetOptions {
    /// Number of atom slots per record
    #[arg(long, value_name = "N")]
    pub max_atom: Option<usize>,

    /// Charge scheme extracted from Gaussian logs
    #[arg(long = "charge-type", value_name = "SCHEME")]
    pub charge_type: Option<ChargeScheme>,
}

#[derive(Args)]
pub struct ReadArgs {
    /// Input file or directory
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Dataset directory to write
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Append to the dataset already saved in the output directory
    #[arg(short, long)]
    pub append: bool,

    /// Shrink the atom axis to the largest record before saving
    #[arg(long)]
    pub minimise: bool,

    #[command(flatten)]
    pub parse: ParseOptions,

    #[command(flatten)]
    pub dataset: DatasetOptions,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Dataset directory
    #[arg(value_name = "DIR")]
    pub dataset: PathBuf,

    /// List every record name
    #[arg(short, long)]
    pub names: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    /// First dataset directory (its unmatched records come first)
    #[arg(value_name = "LEFT")]
    pub left: PathBuf,

    /// Second dataset directory
    #[arg(value_name = "RIGHT")]
    pub right: PathBuf,

    /// Dataset directory to write the merged result to
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct ResizeArgs {
    /// Dataset directory
    #[arg(value_name = "DIR")]
    pub dataset: PathBuf,

    /// New number of atom slots
    #[arg(long, value_name = "N", required_unless_present = "minimise")]
    pub max_atom: Option<usize>,

    /// Shrink to the smallest atom axis that holds every record
    #[arg(long, conflicts_with = "max_atom")]
    pub minimise: bool,

    /// Write the result here instead of overwriting the input
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Dataset directory
    #[arg(value_name = "DIR")]
    pub dataset: PathBuf,

    /// Directory for the .xyz files
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Omit the atom-count and comment lines
    #[arg(long)]
    pub no_header: bool,
}

#[derive(Args)]
pub struct MiCoorArgs {
    /// Dataset directory
    #[arg(value_name = "DIR")]
    pub dataset: PathBuf,

    /// Write the result here instead of overwriting the input
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Plain XYZ coordinates
    Xyz,
    /// Gaussian newzmat input (.com, .gjf)
    #[value(alias = "com", alias = "gjf")]
    Zmat,
    /// Gaussian output log
    #[value(alias = "out")]
    Log,
    /// MDL-style connection table
    Mol,
    /// Tripos MOL2
    Mol2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum ChargeScheme {
    /// Mulliken population analysis
    #[default]
    Mulliken,
    /// Hirshfeld partitioning
    Hirshfeld,
}

pub fn parse() -> Cli {
    Cli::parse()
}
