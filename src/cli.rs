use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "chardex",
    version,
    about = "Character dataset ingestion and reporting tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Ingest(IngestArgs),
    Report(ReportArgs),
    Status(StatusArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Dataset {
    Disney,
    Heroes,
}

impl Dataset {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disney => "disney",
            Self::Heroes => "heroes",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    #[arg(long, value_enum)]
    pub dataset: Dataset,

    #[arg(long, default_value = ".cache/chardex")]
    pub data_root: PathBuf,

    #[arg(long)]
    pub db_path: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, default_value_t = 25)]
    pub quota: usize,

    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[arg(long, value_enum)]
    pub dataset: Dataset,

    #[arg(long, default_value = ".cache/chardex")]
    pub data_root: PathBuf,

    #[arg(long)]
    pub db_path: Option<PathBuf>,

    #[arg(long, default_value_t = 10)]
    pub top_n: usize,

    #[arg(long)]
    pub summary_path: Option<PathBuf>,

    #[arg(long)]
    pub aggregates_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/chardex")]
    pub data_root: PathBuf,

    #[arg(long)]
    pub db_path: Option<PathBuf>,
}
