//! Input: logical actions and key decoding

pub mod actions;

#[cfg(feature = "runtime")]
pub mod keybindings;
