//! scoom: a small terminal text editor
//!
//! The core (`model`, `primitives`, `app`, `config`) builds without the
//! terminal stack; the `runtime` feature adds key decoding, rendering and
//! the system clipboard.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod primitives;
pub mod services;

#[cfg(feature = "runtime")]
pub mod view;

pub use app::{ActionOutcome, Editor};
pub use error::{EditorError, EditorResult};
