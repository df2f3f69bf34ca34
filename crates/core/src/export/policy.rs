use std::collections::BTreeSet;

use crate::config::ExportDefaults;

/// Options of one export run. Empty filter sets select everything.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPolicy {
    /// Lowest accepted score (inclusive).
    pub min_score: f64,
    /// Highest accepted score (inclusive).
    pub max_score: f64,
    pub overwrite: bool,
    pub dry_run: bool,
    /// Only report drawings that would be newly exported.
    pub only_new: bool,
    /// Normalize drawings before scoring and saving.
    pub norm: bool,
    pub alphabets: BTreeSet<String>,
    pub symbols: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

impl Default for ExportPolicy {
    fn default() -> Self {
        Self::from_defaults(&ExportDefaults::default())
    }
}

impl ExportPolicy {
    pub fn from_defaults(defaults: &ExportDefaults) -> Self {
        Self {
            min_score: defaults.min_score,
            max_score: defaults.max_score,
            overwrite: false,
            dry_run: false,
            only_new: false,
            norm: defaults.norm,
            alphabets: BTreeSet::new(),
            symbols: BTreeSet::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Whether `score` lies within `[min_score, max_score]`; NaN never does.
    pub fn accepts_score(&self, score: f64) -> bool {
        (self.min_score..=self.max_score).contains(&score)
    }

    pub fn selects_alphabet(&self, handle: &str) -> bool {
        self.alphabets.is_empty() || self.alphabets.contains(handle)
    }

    pub fn selects_symbol(&self, handle: &str) -> bool {
        self.symbols.is_empty() || self.symbols.contains(handle)
    }

    pub fn selects_tag(&self, tag: &str) -> bool {
        self.tags.is_empty() || self.tags.contains(tag)
    }
}
