//! Persisting the generated spec

use std::fs;
use std::path::Path;

use crate::emit::GeneratedDocument;
use crate::error::Result;

/// Write the document to `path`, creating parent directories
///
/// An existing file is overwritten.
pub fn write_document(path: &Path, document: &GeneratedDocument) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let text = document.text();
    log::debug!("writing {} bytes to {}", text.len(), path.display());
    fs::write(path, text)?;
    Ok(())
}
