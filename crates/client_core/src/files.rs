use std::{fs, io, path::Path};

use shared::domain::SelectedFile;

/// MIME type for a file name, falling back to `application/octet-stream`.
pub fn guess_mime_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Reads a file from disk into a [`SelectedFile`] named after its file name.
pub fn selected_file_from_path(path: &Path) -> io::Result<SelectedFile> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = guess_mime_type(&name);
    Ok(SelectedFile::new(name, bytes).with_mime_type(mime_type))
}
