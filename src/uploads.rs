//! On-disk storage for uploaded menu images.
//!
//! Stored names are never vendor-controlled: a random hex prefix plus the
//! sanitized original name, so identical uploads cannot collide and path
//! traversal cannot reach outside the uploads directory.

use std::path::{Path, PathBuf};

use rand::RngCore;
use tokio::fs;

use crate::error::{AppError, Result};

/// Extensions accepted for menu images
const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the uploads directory if missing.
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Validate and persist an uploaded image. Returns the stored filename.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<String> {
        if original_name.is_empty() {
            return Err(AppError::InvalidUpload("No file selected.".to_string()));
        }
        if !allowed_file(original_name) {
            return Err(AppError::InvalidUpload(
                "Invalid file type. Please upload an image.".to_string(),
            ));
        }

        let stored = format!("{}_{}", random_prefix(), sanitize_filename(original_name));
        fs::write(self.dir.join(&stored), data).await?;
        Ok(stored)
    }

    /// Read a stored file back. Names with path separators or traversal
    /// sequences were never produced by `store` and resolve to NotFound.
    pub async fn read(&self, stored_name: &str) -> Result<Vec<u8>> {
        if stored_name.is_empty()
            || stored_name.contains(['/', '\\'])
            || stored_name.contains("..")
        {
            return Err(AppError::NotFound);
        }
        fs::read(self.dir.join(stored_name)).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound
            } else {
                AppError::Io(e)
            }
        })
    }

    /// Remove a stored file.
    pub async fn remove(&self, stored_name: &str) -> Result<()> {
        fs::remove_file(self.dir.join(stored_name)).await?;
        Ok(())
    }
}

/// Case-insensitive extension allow-list check.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Reduce a client-supplied filename to a conservative character set. Only
/// the final path component survives; anything outside `[A-Za-z0-9._-]`
/// becomes an underscore and leading/trailing dots are stripped.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Content type for a stored filename, by extension.
pub fn content_type(filename: &str) -> &'static str {
    match filename
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

fn random_prefix() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(allowed_file("menu.PNG"));
        assert!(allowed_file("menu.png"));
        assert!(allowed_file("menu.Jpeg"));
        assert!(!allowed_file("menu.txt"));
        assert!(!allowed_file("menu"));
    }

    #[test]
    fn sanitization_strips_paths_and_odd_characters() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("my menu (v2).png"), "my_menu__v2_.png");
        assert_eq!(sanitize_filename("..."), "file");
    }

    #[tokio::test]
    async fn identical_original_names_get_distinct_stored_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().to_path_buf());
        store.ensure_dir().await.unwrap();

        let a = store.store("menu.png", b"one").await.unwrap();
        let b = store.store("menu.png", b"two").await.unwrap();

        assert_ne!(a, b);
        assert!(a.ends_with("_menu.png"));
        assert_eq!(store.read(&a).await.unwrap(), b"one");
        assert_eq!(store.read(&b).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn disallowed_uploads_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().to_path_buf());
        store.ensure_dir().await.unwrap();

        let err = store.store("menu.txt", b"nope").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidUpload(_)));

        let err = store.store("", b"nope").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidUpload(_)));
    }

    #[tokio::test]
    async fn reads_reject_traversal_and_miss_unknown_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().to_path_buf());
        store.ensure_dir().await.unwrap();

        assert!(matches!(
            store.read("../secret.png").await.unwrap_err(),
            AppError::NotFound
        ));
        assert!(matches!(
            store.read("missing.png").await.unwrap_err(),
            AppError::NotFound
        ));
    }
}
