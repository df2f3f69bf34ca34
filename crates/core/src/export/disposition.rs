use std::fmt;

use super::policy::ExportPolicy;

/// Outcome of reconciling one drawing against its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Disposition {
    New,
    Exists,
    Overwrite,
    BadScore,
}

impl Disposition {
    /// Decide the disposition of a drawing.
    ///
    /// The score check takes precedence over destination existence.
    pub fn decide(score: f64, policy: &ExportPolicy, dest_exists: bool) -> Self {
        if !policy.accepts_score(score) {
            Self::BadScore
        } else if dest_exists {
            if policy.overwrite { Self::Overwrite } else { Self::Exists }
        } else {
            Self::New
        }
    }

    /// Whether the drawing gets written to its destination.
    pub fn exports(self) -> bool {
        matches!(self, Self::New | Self::Overwrite)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Exists => "exists",
            Self::Overwrite => "overwrite",
            Self::BadScore => "bad_score",
        }
    }

    /// Upper case label used in terminal output.
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Exists => "EXISTS",
            Self::Overwrite => "OVERWRITE",
            Self::BadScore => "BAD SCORE",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
