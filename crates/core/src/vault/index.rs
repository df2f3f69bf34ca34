//! In-memory index of vault drawings: alphabet → symbol → tag → drawings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::walker::{VaultWalker, VaultWalkerError, WalkedDrawing};

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Vault walker error: {0}")]
    Walker(#[from] VaultWalkerError),
}

/// A drawing discovered in the vault.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultDrawing {
    pub path: PathBuf,
    pub name: String,
    pub alphabet: String,
    pub symbol: String,
    pub tag: String,
    pub modified: DateTime<Utc>,
}

impl From<WalkedDrawing> for VaultDrawing {
    fn from(w: WalkedDrawing) -> Self {
        let name = w
            .absolute_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path: w.absolute_path,
            name,
            alphabet: w.alphabet,
            symbol: w.symbol,
            tag: w.tag,
            modified: w.modified.into(),
        }
    }
}

pub type TagTree = BTreeMap<String, Vec<VaultDrawing>>;
pub type SymbolTree = BTreeMap<String, TagTree>;
pub type AlphabetTree = BTreeMap<String, SymbolTree>;

/// Immutable index of a vault, built once per invocation.
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    tree: AlphabetTree,
    len: usize,
}

impl VaultIndex {
    /// Scan `root` and index every drawing found.
    ///
    /// A missing root is not an error: it yields an empty index.
    pub fn build(root: &Path) -> Result<Self, VaultError> {
        if !root.exists() {
            tracing::warn!("vault path does not exist: {}", root.display());
            return Ok(Self::default());
        }

        let walker = VaultWalker::new(root)?;
        let files = walker.walk()?;
        tracing::debug!("found {} drawings in {}", files.len(), walker.root().display());

        Ok(Self::from_drawings(files.into_iter().map(VaultDrawing::from)))
    }

    /// Build an index from already discovered drawings.
    ///
    /// Drawings inside each tag are ordered by path.
    pub fn from_drawings(drawings: impl IntoIterator<Item = VaultDrawing>) -> Self {
        let mut tree = AlphabetTree::new();
        let mut len = 0;
        for d in drawings {
            tree.entry(d.alphabet.clone())
                .or_default()
                .entry(d.symbol.clone())
                .or_default()
                .entry(d.tag.clone())
                .or_default()
                .push(d);
            len += 1;
        }

        for drawings in tree.values_mut().flat_map(|s| s.values_mut()).flat_map(|t| t.values_mut())
        {
            drawings.sort_by(|a, b| a.path.cmp(&b.path));
        }

        Self { tree, len }
    }

    pub fn tree(&self) -> &AlphabetTree {
        &self.tree
    }

    /// Total number of drawings.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate every drawing in alphabet, symbol, tag, path order.
    pub fn drawings(&self) -> impl Iterator<Item = &VaultDrawing> {
        self.tree.values().flat_map(|s| s.values()).flat_map(|t| t.values()).flatten()
    }
}
