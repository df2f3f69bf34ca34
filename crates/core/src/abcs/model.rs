//! Point cloud symbol model.
//!
//! The model keeps the normalized points of every reference drawing of a
//! symbol. A drawing scores `exp(-d / SCALE)` where `d` is the mean distance
//! from each of its points to the nearest reference point.

use crate::drawing::{Drawing, Point};

use super::score::Score;

/// Mean nearest-neighbour distance that maps to a score of `1/e`.
pub const SCALE: f64 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct PointCloudModel {
    points: Vec<Point>,
    n_drawings: usize,
}

impl PointCloudModel {
    /// Train from reference drawings; each is normalized before use.
    pub fn train<'a>(drawings: impl IntoIterator<Item = &'a Drawing>) -> Self {
        let mut model = Self::default();
        for d in drawings {
            let mut d = d.clone();
            d.normalize();
            model.points.extend(d.points().copied());
            model.n_drawings += 1;
        }
        model
    }

    pub fn is_trained(&self) -> bool {
        !self.points.is_empty()
    }

    /// Number of drawings the model was trained on.
    pub fn n_drawings(&self) -> usize {
        self.n_drawings
    }

    pub fn score(&self, drawing: &Drawing) -> Score {
        if !self.is_trained() || drawing.is_empty() {
            return Score(0.0);
        }

        let (sum, n) = drawing.points().fold((0.0, 0usize), |(sum, n), p| {
            (sum + self.nearest_distance(p), n + 1)
        });
        let mean = sum / n as f64;
        Score((-mean / SCALE).exp())
    }

    fn nearest_distance(&self, p: &Point) -> f64 {
        self.points.iter().map(|q| p.distance(q)).fold(f64::INFINITY, f64::min)
    }
}
