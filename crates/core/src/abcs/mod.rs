//! Destination alphabets and their symbol models.
//!
//! The export reconciler only talks to the traits below, so it can run
//! against the on-disk [`FsAlphabetRegistry`] or an in-memory stand-in.

pub mod fs;
pub mod model;
pub mod score;

use std::path::Path;

use crate::drawing::Drawing;

pub use fs::{FsAlphabetRegistry, RegistryError};
pub use model::PointCloudModel;
pub use score::Score;

/// Lookup of destination alphabets by id (`<tag>:<handle>`).
pub trait AlphabetRegistry {
    fn get_alphabet(&self, id: &str) -> Option<Box<dyn Alphabet + '_>>;
}

pub trait Alphabet {
    fn name(&self) -> &str;

    /// One line description for terminal output.
    fn pretty(&self) -> String;

    fn get_symbol(&self, handle: &str) -> Option<Box<dyn Symbol + '_>>;
}

pub trait Symbol {
    fn handle(&self) -> &str;

    /// One line description for terminal output.
    fn pretty(&self) -> String;

    /// Directory exported drawings are written to.
    fn drawings_path(&self) -> &Path;

    /// Score a drawing against the symbol's trained model.
    fn score(&self, drawing: &Drawing) -> Score;
}
