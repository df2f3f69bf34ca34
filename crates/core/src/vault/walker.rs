//! Recursive vault directory walker.
//!
//! Only files laid out as
//! `alphabets/<alphabet>/symbols/<symbol>/drawings*/<file>.csv`
//! are reported; everything else in the vault is ignored.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

/// Extension of drawing files stored in the vault.
pub const DRAWING_EXT: &str = "csv";

/// Tag assigned to drawings in a plain `drawings` directory.
pub const DEFAULT_TAG: &str = "good";

#[derive(Debug, Error)]
pub enum VaultWalkerError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to walk vault directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),

    #[error("failed to read file metadata {0}: {1}")]
    MetadataError(String, #[source] std::io::Error),
}

/// Information about a discovered drawing file.
#[derive(Debug, Clone)]
pub struct WalkedDrawing {
    /// Absolute path to the file.
    pub absolute_path: PathBuf,
    /// Path relative to vault root.
    pub relative_path: PathBuf,
    pub alphabet: String,
    pub symbol: String,
    /// Name of the `drawings*` directory holding the file.
    pub drawings_dir: String,
    /// Tag derived from `drawings_dir`, see [`tag_from_dir`].
    pub tag: String,
    /// File modification time.
    pub modified: SystemTime,
}

/// Derive the drawings tag from a `drawings*` directory name.
///
/// Everything after the first `_` is the tag; names without a suffix are `good`.
pub fn tag_from_dir(drawings_dir: &str) -> &str {
    match drawings_dir.split_once('_') {
        Some((_, tag)) if !tag.is_empty() => tag,
        _ => DEFAULT_TAG,
    }
}

/// Walker for discovering drawings in a vault.
#[derive(Debug)]
pub struct VaultWalker {
    root: PathBuf,
}

impl VaultWalker {
    /// Create a new walker for the given vault root.
    pub fn new(root: &Path) -> Result<Self, VaultWalkerError> {
        let root = root
            .canonicalize()
            .map_err(|_| VaultWalkerError::MissingRoot(root.display().to_string()))?;

        if !root.is_dir() {
            return Err(VaultWalkerError::MissingRoot(root.display().to_string()));
        }

        Ok(Self { root })
    }

    /// Walk the vault and return all drawings sorted by relative path.
    pub fn walk(&self) -> Result<Vec<WalkedDrawing>, VaultWalkerError> {
        let alphabets_root = self.root.join("alphabets");
        if !alphabets_root.is_dir() {
            tracing::debug!("no alphabets directory in {}", self.root.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();

        // alphabets/<a>/symbols/<s>/drawings*/<file> sits exactly 5 levels deep
        for entry in WalkDir::new(&alphabets_root)
            .follow_links(true)
            .max_depth(5)
        {
            let entry = entry.map_err(|e| {
                VaultWalkerError::WalkError(alphabets_root.display().to_string(), e)
            })?;

            if entry.depth() != 5 || !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !is_drawing_file(path) {
                continue;
            }

            let Some(parts) = layout_parts(&alphabets_root, path) else {
                continue;
            };

            let modified = path.metadata().and_then(|m| m.modified()).map_err(|e| {
                VaultWalkerError::MetadataError(path.display().to_string(), e)
            })?;

            let relative_path =
                path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();

            files.push(WalkedDrawing {
                absolute_path: path.to_path_buf(),
                relative_path,
                tag: tag_from_dir(&parts.drawings_dir).to_string(),
                alphabet: parts.alphabet,
                symbol: parts.symbol,
                drawings_dir: parts.drawings_dir,
                modified,
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    /// Get the vault root path.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

struct LayoutParts {
    alphabet: String,
    symbol: String,
    drawings_dir: String,
}

/// Split `<a>/symbols/<s>/<drawings*>/<file>` into its named parts.
fn layout_parts(alphabets_root: &Path, path: &Path) -> Option<LayoutParts> {
    let rel = path.strip_prefix(alphabets_root).ok()?;
    let parts: Vec<String> =
        rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();

    match parts.as_slice() {
        [alphabet, symbols, symbol, drawings_dir, _file]
            if symbols == "symbols" && drawings_dir.starts_with("drawings") =>
        {
            Some(LayoutParts {
                alphabet: alphabet.clone(),
                symbol: symbol.clone(),
                drawings_dir: drawings_dir.clone(),
            })
        }
        _ => None,
    }
}

fn is_drawing_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == DRAWING_EXT)
}
