//! Alphabets stored on disk.
//!
//! Layout: `<root>/<alphabet>/symbols/<symbol>/drawings/*.csv`. The drawings
//! already present in a symbol directory train its [`PointCloudModel`].

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::drawing::Drawing;
use crate::vault::walker::DRAWING_EXT;

use super::model::PointCloudModel;
use super::score::Score;
use super::{Alphabet, AlphabetRegistry, Symbol};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("alphabets directory not found: {0} (alphabet features are unavailable)")]
    Unavailable(String),
}

#[derive(Debug)]
pub struct FsAlphabetRegistry {
    root: PathBuf,
    tag: String,
}

impl FsAlphabetRegistry {
    /// Open the registry, failing early when the alphabets directory is missing.
    pub fn open(root: &Path, tag: &str) -> Result<Self, RegistryError> {
        if !root.is_dir() {
            return Err(RegistryError::Unavailable(root.display().to_string()));
        }
        Ok(Self { root: root.to_path_buf(), tag: tag.to_string() })
    }
}

impl AlphabetRegistry for FsAlphabetRegistry {
    fn get_alphabet(&self, id: &str) -> Option<Box<dyn Alphabet + '_>> {
        let (tag, handle) = id.split_once(':')?;
        if tag != self.tag || handle.is_empty() {
            return None;
        }

        let path = self.root.join(handle);
        if !path.is_dir() {
            tracing::debug!("no alphabet directory at {}", path.display());
            return None;
        }

        Some(Box::new(FsAlphabet { id: id.to_string(), handle: handle.to_string(), path }))
    }
}

#[derive(Debug)]
pub struct FsAlphabet {
    id: String,
    handle: String,
    path: PathBuf,
}

impl Alphabet for FsAlphabet {
    fn name(&self) -> &str {
        &self.handle
    }

    fn pretty(&self) -> String {
        format!("{} alphabet: {}", self.id, self.path.display())
    }

    fn get_symbol(&self, handle: &str) -> Option<Box<dyn Symbol + '_>> {
        let path = self.path.join("symbols").join(handle);
        if !path.is_dir() {
            tracing::debug!("no symbol directory at {}", path.display());
            return None;
        }

        let drawings_path = path.join("drawings");
        let references = load_references(&drawings_path);
        let model = PointCloudModel::train(&references);
        if !model.is_trained() {
            tracing::warn!("symbol {handle} has no training drawings, every score will be 0");
        }

        Some(Box::new(FsSymbol { handle: handle.to_string(), drawings_path, model }))
    }
}

#[derive(Debug)]
pub struct FsSymbol {
    handle: String,
    drawings_path: PathBuf,
    model: PointCloudModel,
}

impl Symbol for FsSymbol {
    fn handle(&self) -> &str {
        &self.handle
    }

    fn pretty(&self) -> String {
        format!("{} symbol ({} model drawings)", self.handle, self.model.n_drawings())
    }

    fn drawings_path(&self) -> &Path {
        &self.drawings_path
    }

    fn score(&self, drawing: &Drawing) -> Score {
        self.model.score(drawing)
    }
}

/// Load the drawings a symbol model is trained on; unreadable files are skipped.
fn load_references(dir: &Path) -> Vec<Drawing> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(DRAWING_EXT))
        .collect();
    paths.sort();

    paths
        .iter()
        .filter_map(|p| match Drawing::load(p) {
            Ok(d) => Some(d),
            Err(e) => {
                tracing::warn!("skipping model drawing: {e}");
                None
            }
        })
        .collect()
}
