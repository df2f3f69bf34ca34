//! Export of vault drawings into destination alphabets.
//!
//! Every drawing gets a [`Disposition`]: out of score bounds, already present,
//! overwritten or new. New and overwritten drawings are written unless the
//! policy asks for a dry run.

pub mod counters;
pub mod disposition;
pub mod exporter;
pub mod policy;

pub use counters::{Counter, ExportCounters};
pub use disposition::Disposition;
pub use exporter::{Destination, ExportError, ExportEvent, ExportedDrawing, Exporter};
pub use policy::ExportPolicy;
