//! `vault export` command.

use woplab_core::abcs::FsAlphabetRegistry;
use woplab_core::config::ResolvedConfig;
use woplab_core::export::{
    Counter, Disposition, ExportCounters, ExportEvent, ExportPolicy, Exporter,
};
use woplab_core::vault::VaultIndex;

use crate::ExportArgs;

pub fn run(cfg: &ResolvedConfig, args: &ExportArgs) {
    let policy = build_policy(cfg, args);
    tracing::debug!("export policy: {policy:?}");

    let index = match VaultIndex::build(&cfg.vault_path) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Failed to index vault {}: {e}", cfg.vault_path.display());
            std::process::exit(1);
        }
    };

    let registry = match FsAlphabetRegistry::open(&cfg.alphabets_dir, &cfg.alphabet_tag) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    let mut exporter = Exporter::new(&registry, &policy, &cfg.alphabet_tag);
    let result = exporter.run(&index, &mut |event: &ExportEvent<'_>| {
        if let Some(line) = event_line(event, &policy) {
            println!("{line}");
        }
    });

    if let Err(e) = result {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }

    println!();
    print!("{}", summary(exporter.counters()));
}

fn build_policy(cfg: &ResolvedConfig, args: &ExportArgs) -> ExportPolicy {
    let mut policy = ExportPolicy::from_defaults(&cfg.export);
    if let Some(min) = args.min_score {
        policy.min_score = min;
    }
    if let Some(max) = args.max_score {
        policy.max_score = max;
    }
    if let Some(norm) = args.norm() {
        policy.norm = norm;
    }
    policy.overwrite = args.overwrite;
    policy.dry_run = args.dry_run;
    policy.only_new = args.only_new;
    policy.alphabets = args.abcs.iter().cloned().collect();
    policy.symbols = args.symbols.iter().cloned().collect();
    policy.tags = args.tags.iter().cloned().collect();
    policy
}

/// Text printed for one export event, `None` when it's filtered out.
fn event_line(event: &ExportEvent<'_>, policy: &ExportPolicy) -> Option<String> {
    match event {
        ExportEvent::Alphabet { pretty, .. } => Some(pretty.clone()),
        ExportEvent::Symbol { pretty, .. } => Some(pretty.clone()),
        ExportEvent::Tag { tag } => Some(format!("  {} tag:", tag.to_uppercase())),
        ExportEvent::Drawing(d) => {
            if policy.only_new && d.disposition != Disposition::New {
                return None;
            }
            let mut line =
                format!("    {} {}: {}", d.disposition.label(), d.name, d.score.pretty(true));
            if policy.dry_run && d.disposition.exports() && !policy.only_new {
                line.push_str(&format!(
                    "\n      DRY RUN: EXPORT: {} -> {}",
                    d.name,
                    d.destination.display()
                ));
            }
            Some(line)
        }
    }
}

/// Summary lines: new, exists, overwrite and bad score, then exported.
fn summary(counters: &ExportCounters) -> String {
    let mut out = String::new();
    for counter in [Counter::New, Counter::Exists, Counter::Overwrite, Counter::BadScore] {
        if let Some(line) = counters.summary_line(counter) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push('\n');
    if let Some(line) = counters.summary_line(Counter::Present) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
