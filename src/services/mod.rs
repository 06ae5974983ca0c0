//! Collaborators the editor talks to: clipboard, clock and logging

pub mod clipboard;
pub mod clock;

#[cfg(feature = "runtime")]
pub mod tracing_setup;
