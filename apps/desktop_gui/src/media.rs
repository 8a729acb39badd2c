//! Native file pickers and loading picked files into attachments.

use std::path::{Path, PathBuf};

use shared::domain::Attachment;
use thiserror::Error;

pub const PHOTO_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];
pub const DOCUMENT_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "pdf"];

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("'{0}' has no usable file name")]
    NoFileName(PathBuf),
}

pub fn load_attachment(path: &Path) -> Result<Attachment, AttachmentError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AttachmentError::NoFileName(path.to_path_buf()))?
        .to_string();
    let bytes = std::fs::read(path).map_err(|source| AttachmentError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let attachment = Attachment::new(file_name, bytes);
    Ok(match mime_guess::from_path(path).first_raw() {
        Some(mime_type) => attachment.with_mime_type(mime_type),
        None => attachment,
    })
}

fn default_upload_dir() -> Option<PathBuf> {
    dirs::document_dir()
        .or_else(dirs::download_dir)
        .or_else(dirs::desktop_dir)
        .or_else(dirs::home_dir)
}

fn pick_file(filter_name: &str, extensions: &[&str]) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().add_filter(filter_name, extensions);
    if let Some(dir) = default_upload_dir() {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

/// The filter is advisory; the picker may still return any file.
pub fn pick_profile_photo() -> Option<PathBuf> {
    pick_file("Images", &PHOTO_EXTENSIONS)
}

pub fn pick_document() -> Option<PathBuf> {
    pick_file("Images and PDF", &DOCUMENT_EXTENSIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_bytes_name_and_guessed_mime() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF-1.7").expect("write");

        let attachment = load_attachment(&path).expect("attachment");
        assert_eq!(attachment.file_name, "resume.pdf");
        assert_eq!(attachment.bytes, b"%PDF-1.7");
        assert_eq!(attachment.mime_type.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn unknown_extension_has_no_mime_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.zzunknown");
        std::fs::write(&path, b"x").expect("write");

        assert_eq!(load_attachment(&path).expect("attachment").mime_type, None);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_attachment(&dir.path().join("gone.png")).expect_err("missing");
        assert!(matches!(err, AttachmentError::Read { .. }));
        assert!(err.to_string().contains("could not read"));
    }
}
