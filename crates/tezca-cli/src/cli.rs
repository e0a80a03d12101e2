use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tezca",
    about = "Tezca — side-by-side comparison of legal documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory holding one sub-directory per document
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two documents article by article
    Compare(CompareArgs),
    /// Print the rendered outline of one document
    Outline(OutlineArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// Reference document
    pub left: String,
    pub right: String,
    /// TOML file with comparison settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct OutlineArgs {
    pub id: String,
    #[arg(long)]
    pub config: Option<PathBuf>,
}
