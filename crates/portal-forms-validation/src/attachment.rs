//! Attachment (file input) validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 10 MiB
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Metadata of a file chosen in a file input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    /// Media type reported by the browser; some browsers leave it empty
    #[serde(default)]
    pub media_type: Option<String>,
    pub size: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, media_type: Option<&str>, size: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.map(str::to_string),
            size,
        }
    }

    /// Lower-cased extension after the last dot, if any
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// Which files are accepted as an attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPolicy {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_media_types")]
    pub allowed_media_types: Vec<String>,
    #[serde(default = "default_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_max_bytes() -> u64 {
    DEFAULT_MAX_ATTACHMENT_BYTES
}

fn default_media_types() -> Vec<String> {
    ["application/pdf", "image/jpeg", "image/jpg", "image/png"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_extensions() -> Vec<String> {
    ["pdf", "jpg", "jpeg", "png"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_media_types: default_media_types(),
            allowed_extensions: default_extensions(),
        }
    }
}

/// Why an attachment was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("Dołącz zaświadczenie (pdf/jpg/png)")]
    Missing,
    #[error("Plik nie może być większy niż {} MB", .0 / (1024 * 1024))]
    TooLarge(u64),
    #[error("Nieprawidłowy typ pliku (dozwolone: pdf, jpg, png)")]
    MediaType,
    #[error("Nieprawidłowy plik (rozszerzenie)")]
    Extension,
}

/// Validates the chosen file against the policy.
///
/// The media type decides when the browser reports one; otherwise the file
/// name extension is checked against the same allowed set.
pub fn check_attachment(file: Option<&FileInfo>, policy: &AttachmentPolicy) -> Result<(), AttachmentError> {
    let Some(file) = file else {
        return Err(AttachmentError::Missing);
    };

    if file.size > policy.max_bytes {
        return Err(AttachmentError::TooLarge(policy.max_bytes));
    }

    match file.media_type.as_deref().filter(|t| !t.is_empty()) {
        Some(media_type) => {
            if !policy.allowed_media_types.iter().any(|t| t == media_type) {
                return Err(AttachmentError::MediaType);
            }
        }
        None => {
            let allowed = file
                .extension()
                .is_some_and(|ext| policy.allowed_extensions.iter().any(|e| *e == ext));
            if !allowed {
                return Err(AttachmentError::Extension);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let policy = AttachmentPolicy::default();
        assert_eq!(check_attachment(None, &policy), Err(AttachmentError::Missing));
    }

    #[test]
    fn test_size_limit() {
        let policy = AttachmentPolicy::default();
        let at_limit = FileInfo::new("akt.pdf", Some("application/pdf"), DEFAULT_MAX_ATTACHMENT_BYTES);
        let over = FileInfo::new("akt.pdf", Some("application/pdf"), DEFAULT_MAX_ATTACHMENT_BYTES + 1);
        assert!(check_attachment(Some(&at_limit), &policy).is_ok());
        assert_eq!(
            check_attachment(Some(&over), &policy),
            Err(AttachmentError::TooLarge(DEFAULT_MAX_ATTACHMENT_BYTES))
        );
        assert_eq!(
            AttachmentError::TooLarge(DEFAULT_MAX_ATTACHMENT_BYTES).to_string(),
            "Plik nie może być większy niż 10 MB"
        );
    }

    #[test]
    fn test_media_type() {
        let policy = AttachmentPolicy::default();
        let png = FileInfo::new("skan.png", Some("image/png"), 1024);
        let doc = FileInfo::new("skan.docx", Some("application/msword"), 1024);
        assert!(check_attachment(Some(&png), &policy).is_ok());
        assert_eq!(check_attachment(Some(&doc), &policy), Err(AttachmentError::MediaType));
    }

    #[test]
    fn test_extension_fallback() {
        let policy = AttachmentPolicy::default();
        let jpeg = FileInfo::new("SKAN.JPEG", None, 1024);
        let untyped = FileInfo::new("skan.jpg", Some(""), 1024);
        let exe = FileInfo::new("skan.exe", None, 1024);
        let bare = FileInfo::new("skan", None, 1024);
        assert!(check_attachment(Some(&jpeg), &policy).is_ok());
        assert!(check_attachment(Some(&untyped), &policy).is_ok());
        assert_eq!(check_attachment(Some(&exe), &policy), Err(AttachmentError::Extension));
        assert_eq!(check_attachment(Some(&bare), &policy), Err(AttachmentError::Extension));
    }
}
