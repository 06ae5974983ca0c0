//! Core data model: rows, the document, snapshots and history

pub mod document;
pub mod filesystem;
pub mod history;
pub mod row;
pub mod snapshot;
