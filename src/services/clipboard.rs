//! Clipboard collaborator
//!
//! The editor only moves flat byte buffers through the clipboard.
//! [`SystemClipboard`] talks to the desktop clipboard through `arboard` and
//! keeps an internal copy so copy/paste still works on headless terminals.

use crate::error::{EditorError, EditorResult};

pub trait Clipboard {
    fn copy(&mut self, bytes: &[u8]) -> EditorResult<()>;
    fn paste(&mut self) -> EditorResult<Vec<u8>>;
}

/// Process-local clipboard
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Vec<u8>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, bytes: &[u8]) -> EditorResult<()> {
        self.contents.clear();
        self.contents.try_reserve(bytes.len())?;
        self.contents.extend_from_slice(bytes);
        Ok(())
    }

    fn paste(&mut self) -> EditorResult<Vec<u8>> {
        Ok(self.contents.clone())
    }
}

#[cfg(feature = "runtime")]
pub struct SystemClipboard {
    system: Option<arboard::Clipboard>,
    fallback: MemoryClipboard,
}

#[cfg(feature = "runtime")]
impl SystemClipboard {
    pub fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::warn!("system clipboard unavailable, using internal buffer: {}", e);
                None
            }
        };
        Self {
            system,
            fallback: MemoryClipboard::new(),
        }
    }
}

#[cfg(feature = "runtime")]
impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "runtime")]
impl Clipboard for SystemClipboard {
    fn copy(&mut self, bytes: &[u8]) -> EditorResult<()> {
        self.fallback.copy(bytes)?;
        if let Some(system) = self.system.as_mut() {
            let text = String::from_utf8_lossy(bytes).into_owned();
            system
                .set_text(text)
                .map_err(|e| EditorError::Clipboard(e.to_string()))?;
        }
        Ok(())
    }

    fn paste(&mut self) -> EditorResult<Vec<u8>> {
        match self.system.as_mut().map(|system| system.get_text()) {
            Some(Ok(text)) => Ok(text.into_bytes()),
            Some(Err(e)) => {
                tracing::debug!("system clipboard read failed, using internal buffer: {}", e);
                self.fallback.paste()
            }
            None => self.fallback.paste(),
        }
    }
}

/// Clipboard that rejects every call
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

impl Clipboard for UnavailableClipboard {
    fn copy(&mut self, _bytes: &[u8]) -> EditorResult<()> {
        Err(EditorError::Clipboard("clipboard unavailable".to_string()))
    }

    fn paste(&mut self) -> EditorResult<Vec<u8>> {
        Err(EditorError::Clipboard("clipboard unavailable".to_string()))
    }
}
