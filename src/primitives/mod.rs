//! Low-level primitives
//!
//! Column mapping and structural scanners, the language table and the
//! per-row syntax annotator.

pub mod column;
pub mod highlighter;
pub mod language;
