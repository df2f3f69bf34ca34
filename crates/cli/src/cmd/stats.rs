//! `vault stats` command.

use serde::Serialize;
use woplab_core::config::ResolvedConfig;
use woplab_core::vault::stats::{BAD, GOOD};
use woplab_core::vault::{SymbolBadnessRow, VaultIndex, VaultStats};

#[derive(Serialize)]
struct StatsOutput<'a> {
    vault_path: String,
    #[serde(flatten)]
    stats: &'a VaultStats,
    symbols_badness: Vec<SymbolBadnessRow>,
}

pub fn run(cfg: &ResolvedConfig, args: &crate::StatsArgs) {
    let stats = load_stats(cfg);

    if args.json {
        let output = StatsOutput {
            vault_path: cfg.vault_path.display().to_string(),
            stats: &stats,
            symbols_badness: stats.symbols_badness_rows(),
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize stats: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!(
        "{} total drawings: {} good, {} bad",
        stats.n_drawings,
        stats.tag_count(GOOD),
        stats.tag_count(BAD)
    );
    println!();
    println!("{} symbols:", stats.n_symbols.len());
    for (symbol, n) in &stats.n_symbols {
        println!(
            "  {} {} drawings: {} good, {} bad",
            n,
            symbol,
            stats.symbol_tag_count(symbol, GOOD),
            stats.symbol_tag_count(symbol, BAD)
        );
    }
}

/// Index the configured vault and compute its statistics.
pub fn load_stats(cfg: &ResolvedConfig) -> VaultStats {
    let index = match VaultIndex::build(&cfg.vault_path) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Failed to index vault {}: {e}", cfg.vault_path.display());
            std::process::exit(1);
        }
    };
    tracing::debug!("indexed {} drawings", index.len());
    VaultStats::compute(&index)
}
