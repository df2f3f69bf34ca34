//! Drawings: strokes of 2D points stored as CSV.
//!
//! One `x,y` point per line, strokes separated by blank lines. Lines starting
//! with `#` are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrawingError {
    #[error("failed to read drawing {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write drawing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid point at {path}:{line}: {content:?}")]
    InvalidPoint { path: PathBuf, line: usize, content: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub path: PathBuf,
    pub curves: Vec<Vec<Point>>,
}

impl Drawing {
    pub fn new(path: impl Into<PathBuf>, curves: Vec<Vec<Point>>) -> Self {
        Self { path: path.into(), curves }
    }

    /// Load a drawing from a CSV file.
    pub fn load(path: &Path) -> Result<Self, DrawingError> {
        let content = fs::read_to_string(path)
            .map_err(|e| DrawingError::Read { path: path.to_path_buf(), source: e })?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self, DrawingError> {
        let mut curves = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for (i, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() {
                if !current.is_empty() {
                    curves.push(std::mem::take(&mut current));
                }
                continue;
            }

            let point = parse_point(line).ok_or_else(|| DrawingError::InvalidPoint {
                path: path.to_path_buf(),
                line: i + 1,
                content: raw.to_string(),
            })?;
            current.push(point);
        }
        if !current.is_empty() {
            curves.push(current);
        }

        Ok(Self { path: path.to_path_buf(), curves })
    }

    /// File name used when exporting the drawing.
    pub fn name(&self) -> String {
        self.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.curves.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.iter().all(Vec::is_empty)
    }

    /// Center the bounding box on the origin and scale its longest side to 1.
    pub fn normalize(&mut self) {
        let Some((min, max)) = self.bounds() else {
            return;
        };
        let cx = (min.x + max.x) / 2.0;
        let cy = (min.y + max.y) / 2.0;
        let size = (max.x - min.x).max(max.y - min.y);
        let scale = if size > 0.0 { 1.0 / size } else { 1.0 };

        for p in self.curves.iter_mut().flatten() {
            p.x = (p.x - cx) * scale;
            p.y = (p.y - cy) * scale;
        }
    }

    /// Bounding box as (min, max) corners, `None` for an empty drawing.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut points = self.points();
        let first = *points.next()?;
        Some(points.fold((first, first), |(min, max), p| {
            (Point::new(min.x.min(p.x), min.y.min(p.y)), Point::new(max.x.max(p.x), max.y.max(p.y)))
        }))
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for (i, curve) in self.curves.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for p in curve {
                out.push_str(&format!("{},{}\n", p.x, p.y));
            }
        }
        out
    }

    /// Write the drawing to `self.path`, creating parent directories.
    pub fn save(&self) -> Result<(), DrawingError> {
        let write_err = |e| DrawingError::Write { path: self.path.clone(), source: e };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, self.to_csv()).map_err(write_err)
    }
}

fn parse_point(line: &str) -> Option<Point> {
    let mut cols = line.split(',').map(str::trim);
    let x = cols.next()?.parse().ok()?;
    let y = cols.next()?.parse().ok()?;
    Some(Point::new(x, y))
}
