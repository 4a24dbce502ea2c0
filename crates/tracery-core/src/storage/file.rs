//! File-based load/save for native platforms.

use super::{StorageError, StorageResult, text, xml};
use crate::canvas::Drawing;
use std::fs;
use std::path::Path;

/// Load a text drawing from `path`. Malformed lines are skipped and reported.
pub fn load_drawing(path: &Path) -> StorageResult<text::TextLoad> {
    if !path.exists() {
        return Err(StorageError::NotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => {
            StorageError::Serialization(format!("{} is not a text file", path.display()))
        }
        _ => StorageError::Io(format!("Failed to read {}: {}", path.display(), e)),
    })?;

    let load = text::parse(&content);
    log::info!(
        "Loaded {} shapes from {:?} ({} lines skipped)",
        load.drawing.len(),
        path,
        load.skipped.len()
    );
    Ok(load)
}

/// Save a drawing in the text format.
pub fn save_drawing(path: &Path, drawing: &Drawing) -> StorageResult<()> {
    fs::write(path, text::write(drawing))
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!("Saved {} shapes to {:?}", drawing.len(), path);
    Ok(())
}

/// Export a drawing as XML.
pub fn export_xml(path: &Path, drawing: &Drawing) -> StorageResult<()> {
    fs::write(path, xml::export(drawing))
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!("Exported {} shapes to {:?}", drawing.len(), path);
    Ok(())
}
