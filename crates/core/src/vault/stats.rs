//! Vault statistics derived from a [`VaultIndex`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::index::VaultIndex;

pub const GOOD: &str = "good";
pub const BAD: &str = "bad";

const HOUR_SECS: i64 = 3600;

/// Counts and time buckets of a vault.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VaultStats {
    pub n_drawings: usize,
    pub n_tags: BTreeMap<String, usize>,
    pub n_symbols: BTreeMap<String, usize>,
    pub n_symbols_tags: BTreeMap<String, BTreeMap<String, usize>>,
    /// Tags seen at each distinct modification time, in processing order.
    #[serde(skip)]
    pub times: BTreeMap<DateTime<Utc>, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolTagsRow {
    pub symbol: String,
    pub good: usize,
    pub bad: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolBadnessRow {
    pub symbol: String,
    pub badness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    pub hour: DateTime<Utc>,
    pub good: usize,
    pub bad: usize,
}

/// Ratio of bad to good drawings.
///
/// Symbols with only bad drawings are maximally bad (`1.0`), symbols without
/// any drawings have zero badness.
pub fn badness(good: usize, bad: usize) -> f64 {
    if good == 0 {
        if bad > 0 { 1.0 } else { 0.0 }
    } else {
        bad as f64 / good as f64
    }
}

impl VaultStats {
    pub fn compute(index: &VaultIndex) -> Self {
        let mut stats = Self::default();

        for d in index.drawings() {
            *stats.n_tags.entry(d.tag.clone()).or_default() += 1;
            *stats.n_symbols.entry(d.symbol.clone()).or_default() += 1;
            *stats
                .n_symbols_tags
                .entry(d.symbol.clone())
                .or_default()
                .entry(d.tag.clone())
                .or_default() += 1;
            stats.times.entry(d.modified).or_default().push(d.tag.clone());
            stats.n_drawings += 1;
        }

        stats
    }

    pub fn tag_count(&self, tag: &str) -> usize {
        self.n_tags.get(tag).copied().unwrap_or(0)
    }

    pub fn symbol_tag_count(&self, symbol: &str, tag: &str) -> usize {
        self.n_symbols_tags.get(symbol).and_then(|t| t.get(tag)).copied().unwrap_or(0)
    }

    /// Tag of the last drawing processed at exactly `time`.
    pub fn latest_tag_at(&self, time: &DateTime<Utc>) -> Option<&str> {
        self.times.get(time).and_then(|tags| tags.last()).map(String::as_str)
    }

    /// Badness of every symbol, optionally as a rounded percentage.
    ///
    /// With `sort`, symbols are ordered by badness (ascending, or descending
    /// with `reverse`); ties keep symbol name order.
    pub fn symbols_badness(&self, percent: bool, sort: bool, reverse: bool) -> Vec<(String, f64)> {
        let mut out: Vec<(String, f64)> = self
            .n_symbols_tags
            .keys()
            .map(|symbol| {
                let r = badness(
                    self.symbol_tag_count(symbol, GOOD),
                    self.symbol_tag_count(symbol, BAD),
                );
                let r = if percent { (100.0 * r).round() } else { r };
                (symbol.clone(), r)
            })
            .collect();

        if sort {
            out.sort_by(|a, b| {
                let ord = a.1.total_cmp(&b.1);
                if reverse { ord.reverse() } else { ord }
            });
        }
        out
    }

    /// Good/bad counts per symbol, ordered by good count ascending.
    pub fn symbols_tags_rows(&self) -> Vec<SymbolTagsRow> {
        let mut rows: Vec<SymbolTagsRow> = self
            .n_symbols_tags
            .keys()
            .map(|symbol| SymbolTagsRow {
                symbol: symbol.clone(),
                good: self.symbol_tag_count(symbol, GOOD),
                bad: self.symbol_tag_count(symbol, BAD),
            })
            .collect();
        rows.sort_by_key(|r| r.good);
        rows
    }

    /// Badness percentage per symbol, least bad first.
    pub fn symbols_badness_rows(&self) -> Vec<SymbolBadnessRow> {
        self.symbols_badness(true, true, false)
            .into_iter()
            .map(|(symbol, badness)| SymbolBadnessRow { symbol, badness })
            .collect()
    }

    /// Submissions per hour; any tag other than `bad` counts as good.
    pub fn hourly_rows(&self) -> Vec<HourlyRow> {
        let mut buckets: BTreeMap<DateTime<Utc>, (usize, usize)> = BTreeMap::new();
        for (time, tags) in &self.times {
            let entry = buckets.entry(floor_hour(time)).or_default();
            for tag in tags {
                if tag == BAD {
                    entry.1 += 1;
                } else {
                    entry.0 += 1;
                }
            }
        }

        buckets
            .into_iter()
            .map(|(hour, (good, bad))| HourlyRow { hour, good, bad })
            .collect()
    }
}

fn floor_hour(time: &DateTime<Utc>) -> DateTime<Utc> {
    let secs = time.timestamp();
    DateTime::from_timestamp(secs - secs.rem_euclid(HOUR_SECS), 0).unwrap_or(*time)
}
