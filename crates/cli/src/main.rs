mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use woplab_core::config::{ConfigLoader, ConfigOverrides};

#[derive(Debug, Parser)]
#[command(name = "woplab", version, about = "Words of Power Laboratory")]
struct Cli {
    /// Config file to use instead of the default lookup
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    /// Words of Power Vault root
    #[arg(long = "vault", global = true)]
    vault_path: Option<PathBuf>,

    /// Directory holding the destination alphabets
    #[arg(long = "alphabets", global = true)]
    alphabets_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show config files and the effective configuration
    Config,

    /// Words of Power Vault commands
    #[command(subcommand)]
    Vault(VaultCommands),
}

#[derive(Debug, Subcommand)]
enum VaultCommands {
    /// Print vault statistics
    Stats(StatsArgs),

    /// Render an HTML report with vault charts
    Report(ReportArgs),

    /// Export vault drawings into destination alphabets
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Directory to write the report into
    #[arg(short = 'O', long, default_value = "vault-report")]
    pub result_dir: PathBuf,

    /// Open the report in a web browser
    #[arg(short = 'w', long)]
    pub open_web: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Only export alphabet(s) with the given handle
    #[arg(short = 'a', long = "abc")]
    pub abcs: Vec<String>,

    /// Only export symbol(s) with the given handle
    #[arg(short = 's', long = "symbol")]
    pub symbols: Vec<String>,

    /// Only export drawings with the given tag(s)
    #[arg(short = 't', long = "drawings-tag")]
    pub tags: Vec<String>,

    /// Minimum score to export [default: from config]
    #[arg(short = 'm', long, allow_negative_numbers = true)]
    pub min_score: Option<f64>,

    /// Maximum score to export [default: from config]
    #[arg(short = 'M', long, allow_negative_numbers = true)]
    pub max_score: Option<f64>,

    /// Normalize drawings before scoring and saving
    #[arg(long, overrides_with = "no_norm")]
    pub norm: bool,

    /// Keep raw drawing coordinates
    #[arg(long, overrides_with = "norm")]
    pub no_norm: bool,

    /// Only report, don't write anything
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Only report new drawings
    #[arg(short = 'n', long)]
    pub only_new: bool,

    /// Overwrite drawings already present in the destination
    #[arg(long)]
    pub overwrite: bool,
}

impl ExportArgs {
    /// Normalization flag, `None` when neither `--norm` nor `--no-norm` is given.
    pub fn norm(&self) -> Option<bool> {
        match (self.norm, self.no_norm) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        profile: cli.profile.clone(),
        vault_path: cli.vault_path.clone(),
        alphabets_dir: cli.alphabets_dir.clone(),
        log_level: None,
    };
    let cfg = match ConfigLoader::load(cli.config.as_deref(), &overrides) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    logging::init(&cfg);

    match cli.command {
        Commands::Config => cmd::config::run(&cfg),
        Commands::Vault(VaultCommands::Stats(args)) => cmd::stats::run(&cfg, &args),
        Commands::Vault(VaultCommands::Report(args)) => cmd::report::run(&cfg, &args),
        Commands::Vault(VaultCommands::Export(args)) => cmd::export::run(&cfg, &args),
    }
}
