//! Native file dialogs.

use std::path::{Path, PathBuf};

const TEXT_FILTER: (&str, &[&str]) = ("Tracery Drawing", &["txt"]);
const XML_FILTER: (&str, &[&str]) = ("XML Document", &["xml"]);

fn file_name_or(path: Option<&Path>, fallback: &str) -> String {
    path.and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| fallback.to_string())
}

/// Ask for a drawing to open.
pub fn pick_open_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open Drawing")
        .add_filter(TEXT_FILTER.0, TEXT_FILTER.1)
        .pick_file()
}

/// Ask where to save the drawing, prefilled from the current file.
pub fn pick_save_path(current: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save Drawing")
        .set_file_name(file_name_or(current, "drawing.txt"))
        .add_filter(TEXT_FILTER.0, TEXT_FILTER.1);
    if let Some(dir) = current.and_then(|p| p.parent()) {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}

/// Ask where to write the XML export.
pub fn pick_export_path(current: Option<&Path>) -> Option<PathBuf> {
    let name = current
        .and_then(|p| p.file_stem())
        .map(|stem| format!("{}.xml", stem.to_string_lossy()))
        .unwrap_or_else(|| "drawing.xml".to_string());
    rfd::FileDialog::new()
        .set_title("Export to XML")
        .set_file_name(name)
        .add_filter(XML_FILTER.0, XML_FILTER.1)
        .save_file()
}
