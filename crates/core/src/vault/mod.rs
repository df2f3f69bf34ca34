//! Words of Power Vault discovery, indexing and statistics.
//!
//! The vault stores user drawings under
//! `alphabets/<alphabet>/symbols/<symbol>/drawings[_<tag>]/<file>.csv`.

pub mod index;
pub mod stats;
pub mod walker;

pub use index::{VaultDrawing, VaultError, VaultIndex};
pub use stats::{HourlyRow, SymbolBadnessRow, SymbolTagsRow, VaultStats, badness};
pub use walker::{VaultWalker, VaultWalkerError, WalkedDrawing, tag_from_dir};
