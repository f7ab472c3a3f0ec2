//! In-memory manifest model: typed document wrappers over JSON-shaped bodies,
//! plus the fixed baseline templates every drill starts from.

pub mod baseline;
pub mod doc;

pub use baseline::baseline_set;
pub use doc::{DocKind, DocumentSet, ManifestDoc};
