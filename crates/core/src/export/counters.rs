use std::collections::BTreeMap;

use super::disposition::Disposition;
use crate::vault::stats::{BAD, GOOD};

/// Counters accumulated per tag during an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Counter {
    New,
    Exists,
    Overwrite,
    BadScore,
    /// Everything with an acceptable score: new + exists + overwrite.
    Present,
    /// present + bad_score.
    Total,
}

impl Counter {
    /// Summary line caption.
    pub fn caption(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Exists => "EXISTING",
            Self::Overwrite => "OVERWRITTEN",
            Self::BadScore => "BAD SCORE",
            Self::Present => "EXPORTED",
            Self::Total => "TOTAL",
        }
    }
}

impl From<Disposition> for Counter {
    fn from(d: Disposition) -> Self {
        match d {
            Disposition::New => Self::New,
            Disposition::Exists => Self::Exists,
            Disposition::Overwrite => Self::Overwrite,
            Disposition::BadScore => Self::BadScore,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportCounters {
    counts: BTreeMap<Counter, BTreeMap<String, usize>>,
}

impl ExportCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one drawing of `tag` with the given disposition.
    pub fn record(&mut self, tag: &str, disposition: Disposition) {
        self.bump(disposition.into(), tag);
        if disposition != Disposition::BadScore {
            self.bump(Counter::Present, tag);
        }
        self.bump(Counter::Total, tag);
    }

    fn bump(&mut self, counter: Counter, tag: &str) {
        *self.counts.entry(counter).or_default().entry(tag.to_string()).or_default() += 1;
    }

    pub fn get(&self, counter: Counter, tag: &str) -> usize {
        self.counts.get(&counter).and_then(|t| t.get(tag)).copied().unwrap_or(0)
    }

    /// Sum of `counter` over all tags.
    pub fn sum(&self, counter: Counter) -> usize {
        self.counts.get(&counter).map(|t| t.values().sum()).unwrap_or(0)
    }

    /// Every tag seen so far.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.counts.get(&Counter::Total).into_iter().flat_map(|t| t.keys()).map(String::as_str)
    }

    /// `counter` as a rounded percentage of the tag's total.
    pub fn percent(&self, counter: Counter, tag: &str) -> u32 {
        let total = self.get(Counter::Total, tag);
        if total == 0 {
            return 0;
        }
        (100.0 * self.get(counter, tag) as f64 / total as f64).round() as u32
    }

    /// Summary line for `counter`, `None` when nothing was counted.
    ///
    /// Lists good and bad drawings with their share of the tag total.
    pub fn summary_line(&self, counter: Counter) -> Option<String> {
        let n = self.sum(counter);
        if n == 0 {
            return None;
        }
        let tags: Vec<String> = [GOOD, BAD]
            .iter()
            .map(|tag| {
                format!(
                    "{} | {} % {}",
                    self.get(counter, tag),
                    self.percent(counter, tag),
                    tag.to_uppercase()
                )
            })
            .collect();
        Some(format!("{n} {} ({})", counter.caption(), tags.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExportCounters {
        let mut c = ExportCounters::new();
        c.record("good", Disposition::New);
        c.record("good", Disposition::BadScore);
        c.record("good", Disposition::BadScore);
        c.record("bad", Disposition::Exists);
        c.record("bad", Disposition::Overwrite);
        c.record("maybe", Disposition::New);
        c
    }

    #[test]
    fn test_counter_consistency() {
        let c = sample();
        for tag in c.tags() {
            let present = c.get(Counter::New, tag)
                + c.get(Counter::Exists, tag)
                + c.get(Counter::Overwrite, tag);
            assert_eq!(c.get(Counter::Present, tag), present);
            assert_eq!(
                c.get(Counter::Total, tag),
                c.get(Counter::Present, tag) + c.get(Counter::BadScore, tag)
            );
        }
        assert_eq!(c.tags().collect::<Vec<_>>(), vec!["bad", "good", "maybe"]);
        assert_eq!(c.sum(Counter::Total), 6);
    }

    #[test]
    fn test_percent() {
        let c = sample();
        assert_eq!(c.percent(Counter::New, "good"), 33);
        assert_eq!(c.percent(Counter::BadScore, "good"), 67);
        assert_eq!(c.percent(Counter::Present, "bad"), 100);
        assert_eq!(c.percent(Counter::New, "unknown"), 0);
    }

    #[test]
    fn test_summary_lines() {
        let c = sample();
        insta::assert_snapshot!(
            c.summary_line(Counter::New).unwrap(),
            @"2 NEW (1 | 33 % GOOD, 0 | 0 % BAD)"
        );
        insta::assert_snapshot!(
            c.summary_line(Counter::Present).unwrap(),
            @"4 EXPORTED (1 | 33 % GOOD, 2 | 100 % BAD)"
        );
        assert_eq!(c.summary_line(Counter::Overwrite).unwrap(), "1 OVERWRITTEN (0 | 0 % GOOD, 1 | 50 % BAD)");
        assert!(ExportCounters::new().summary_line(Counter::New).is_none());
    }
}
