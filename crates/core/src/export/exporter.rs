//! Export reconciliation of vault drawings into destination alphabets.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::counters::ExportCounters;
use super::disposition::Disposition;
use super::policy::ExportPolicy;
use crate::abcs::{AlphabetRegistry, Score};
use crate::drawing::{Drawing, DrawingError};
use crate::vault::VaultIndex;

/// Destination lookup that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Alphabet id (`<tag>:<handle>`).
    Alphabet(String),
    /// Symbol handle.
    Symbol(String),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alphabet(id) => write!(f, "alphabet not found: {id}"),
            Self::Symbol(handle) => write!(f, "symbol not found: {handle}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("destination {0}")]
    DestinationNotFound(Destination),

    #[error(transparent)]
    Drawing(#[from] DrawingError),
}

/// Result of reconciling a single drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDrawing {
    pub name: String,
    pub tag: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub score: Score,
    pub disposition: Disposition,
    /// The drawing was written to `destination` during this run.
    pub written: bool,
}

/// Progress reported while an export runs.
#[derive(Debug)]
pub enum ExportEvent<'a> {
    Alphabet { id: &'a str, pretty: String },
    Symbol { handle: &'a str, pretty: String },
    Tag { tag: &'a str },
    Drawing(&'a ExportedDrawing),
}

/// Reconciles a [`VaultIndex`] against destination alphabets.
///
/// Counters survive a failed run and stay readable through [`Exporter::counters`].
pub struct Exporter<'a> {
    registry: &'a dyn AlphabetRegistry,
    policy: &'a ExportPolicy,
    alphabet_tag: String,
    counters: ExportCounters,
}

impl<'a> Exporter<'a> {
    pub fn new(
        registry: &'a dyn AlphabetRegistry,
        policy: &'a ExportPolicy,
        alphabet_tag: &str,
    ) -> Self {
        Self {
            registry,
            policy,
            alphabet_tag: alphabet_tag.to_string(),
            counters: ExportCounters::new(),
        }
    }

    pub fn counters(&self) -> &ExportCounters {
        &self.counters
    }

    pub fn into_counters(self) -> ExportCounters {
        self.counters
    }

    /// Export every selected drawing group of `index`.
    ///
    /// Stops at the first destination that can't be resolved.
    pub fn run(
        &mut self,
        index: &VaultIndex,
        on_event: &mut dyn FnMut(&ExportEvent<'_>),
    ) -> Result<(), ExportError> {
        let policy = self.policy;
        let registry = self.registry;

        for (abc_handle, symbols) in index.tree() {
            if !policy.selects_alphabet(abc_handle) {
                continue;
            }
            let abc_id = format!("{}:{}", self.alphabet_tag, abc_handle);
            let abc = registry.get_alphabet(&abc_id).ok_or_else(|| {
                ExportError::DestinationNotFound(Destination::Alphabet(abc_id.clone()))
            })?;
            on_event(&ExportEvent::Alphabet { id: &abc_id, pretty: abc.pretty() });

            for (symbol_handle, tags) in symbols {
                if !policy.selects_symbol(symbol_handle) {
                    continue;
                }
                let symbol = abc.get_symbol(symbol_handle).ok_or_else(|| {
                    ExportError::DestinationNotFound(Destination::Symbol(symbol_handle.clone()))
                })?;
                on_event(&ExportEvent::Symbol { handle: symbol_handle, pretty: symbol.pretty() });

                for (tag, drawings) in tags {
                    if !policy.selects_tag(tag) {
                        continue;
                    }
                    on_event(&ExportEvent::Tag { tag });
                    tracing::info!(
                        "exporting {} {} drawings of {}/{}",
                        drawings.len(),
                        tag,
                        abc_handle,
                        symbol_handle
                    );

                    let mut scored = Vec::with_capacity(drawings.len());
                    for vd in drawings {
                        let mut drawing = Drawing::load(&vd.path)?;
                        if policy.norm {
                            drawing.normalize();
                        }
                        let score = symbol.score(&drawing);
                        scored.push((drawing, score));
                    }
                    // stable: equal scores keep discovery order
                    scored.sort_by(|a, b| b.1.value().total_cmp(&a.1.value()));

                    for (mut drawing, score) in scored {
                        let name = drawing.name();
                        let destination = symbol.drawings_path().join(&name);
                        let disposition =
                            Disposition::decide(score.value(), policy, destination.exists());
                        self.counters.record(tag, disposition);

                        let written = disposition.exports() && !policy.dry_run;
                        let source = std::mem::replace(&mut drawing.path, destination.clone());
                        if written {
                            drawing.save()?;
                        }
                        tracing::debug!(
                            "{} {} -> {} ({})",
                            disposition,
                            source.display(),
                            destination.display(),
                            score
                        );

                        let item = ExportedDrawing {
                            name,
                            tag: tag.clone(),
                            source,
                            destination,
                            score,
                            disposition,
                            written,
                        };
                        on_event(&ExportEvent::Drawing(&item));
                    }
                }
            }
        }

        Ok(())
    }
}
