//! File I/O collaborator used to load and persist documents

use crate::error::{EditorError, EditorResult};
use std::fs;
use std::path::Path;

/// Reads a file as lines and writes whole buffers back
pub trait FileSystem {
    /// Lines of `path` with `\n` and `\r\n` terminators stripped. A missing
    /// file is created empty.
    fn read_lines(&self, path: &Path) -> EditorResult<Vec<Vec<u8>>>;

    /// Replace the contents of `path` with `bytes`, returning bytes written
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> EditorResult<usize>;
}

/// Local disk via `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_lines(&self, path: &Path) -> EditorResult<Vec<Vec<u8>>> {
        if !path.exists() {
            tracing::info!("creating new file {}", path.display());
            fs::File::create(path).map_err(|e| EditorError::io(path, e))?;
            return Ok(Vec::new());
        }
        let content = fs::read(path).map_err(|e| EditorError::io(path, e))?;
        split_lines(&content)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> EditorResult<usize> {
        fs::write(path, bytes).map_err(|e| EditorError::io(path, e))?;
        tracing::debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(bytes.len())
    }
}

/// Split on `\n`, dropping one `\r` before each terminator. A final
/// terminator does not start another line.
pub fn split_lines(content: &[u8]) -> EditorResult<Vec<Vec<u8>>> {
    let mut lines = Vec::new();
    if content.is_empty() {
        return Ok(lines);
    }
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    for line in body.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        lines.try_reserve(1)?;
        lines.push(line.to_vec());
    }
    Ok(lines)
}
