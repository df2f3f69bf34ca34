use std::fmt;

/// How well a drawing matches a symbol model, higher is better.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Score(pub f64);

impl Score {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Word describing the score, `None` for NaN.
    pub fn rating(&self) -> Option<&'static str> {
        let v = self.0;
        if v.is_nan() {
            None
        } else if v >= 0.9 {
            Some("excellent")
        } else if v >= 0.75 {
            Some("good")
        } else if v >= 0.5 {
            Some("fair")
        } else {
            Some("poor")
        }
    }

    pub fn pretty(&self, rating: bool) -> String {
        match self.rating() {
            Some(word) if rating => format!("{:.3} ({word})", self.0),
            _ => format!("{:.3}", self.0),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty(false))
    }
}

impl From<f64> for Score {
    fn from(v: f64) -> Self {
        Self(v)
    }
}
