//! Core types for file storage

use std::fmt;
use thiserror::Error;

/// Errors that can occur during file storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// File not found in storage
    #[error("File not found: {0}")]
    NotFound(String),

    /// I/O error during storage operation
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested path does not stay inside the storage directory
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Client-supplied file name is unusable once sanitized
    #[error("Invalid file name: {0:?}")]
    InvalidName(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A file received from a client but not yet written to disk
///
/// # Examples
///
/// ```rust
/// use acton_filedrop::storage::UploadedFile;
///
/// let file = UploadedFile::new("report.pdf", "application/pdf", vec![0x25, 0x50, 0x44, 0x46]);
/// assert_eq!(file.size(), 4);
/// assert_eq!(file.extension().as_deref(), Some(".pdf"));
/// ```
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename exactly as the client sent it
    pub filename: String,

    /// Client-declared MIME type, informational only
    pub content_type: String,

    /// File data as bytes
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Creates a new uploaded file
    #[must_use]
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Returns the size of the file in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Lower-cased extension of the original filename, leading dot included
    ///
    /// The extension is taken from the base name only. A dot in first
    /// position marks a hidden file, not an extension, so `.pdf` has none.
    /// A trailing dot yields `Some(".")`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use acton_filedrop::storage::UploadedFile;
    ///
    /// let file = UploadedFile::new("Scan.JPG", "image/jpeg", vec![]);
    /// assert_eq!(file.extension().as_deref(), Some(".jpg"));
    ///
    /// let hidden = UploadedFile::new(".pdf", "application/pdf", vec![]);
    /// assert_eq!(hidden.extension(), None);
    /// ```
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let base = base_name(&self.filename);
        match base.rfind('.') {
            Some(idx) if idx > 0 => Some(base[idx..].to_lowercase()),
            _ => None,
        }
    }
}

/// Final component of a client path, splitting on both `/` and `\`
pub(crate) fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// On-disk name of a stored file: `<millis>-<original name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoredName(String);

impl StoredName {
    /// Builds a stored name from an upload timestamp and a sanitized name
    #[must_use]
    pub fn new(timestamp_millis: i64, sanitized: &str) -> Self {
        Self(format!("{timestamp_millis}-{sanitized}"))
    }

    /// Borrow the name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned string
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StoredName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StoredName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_counts_payload_bytes() {
        let scan = UploadedFile::new("scan.png", "image/png", b"\x89PNG\r\n".to_vec());
        assert_eq!(scan.size(), 6);
    }

    #[test]
    fn test_extension() {
        let cases = [
            ("report.pdf", Some(".pdf")),
            ("Budget.XLSX", Some(".xlsx")),
            ("backup.tar.GZ", Some(".gz")),
            ("Makefile", None),
            (".env", None),
            ("draft.", Some(".")),
        ];

        for (filename, expected) in cases {
            let file = UploadedFile::new(filename, "application/octet-stream", Vec::new());
            assert_eq!(file.extension().as_deref(), expected, "{filename}");
        }
    }

    #[test]
    fn test_extension_ignores_directories() {
        let file = UploadedFile::new("some.dir/README", "text/plain", vec![]);
        assert_eq!(file.extension(), None);

        let windows = UploadedFile::new("C:\\docs.v2\\notes", "text/plain", vec![]);
        assert_eq!(windows.extension(), None);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("report.pdf"), "report.pdf");
        assert_eq!(base_name("../../etc/passwd"), "passwd");
        assert_eq!(base_name("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(base_name("dir/"), "");
    }

    #[test]
    fn test_stored_name_display() {
        let name = StoredName::new(1_700_000_000_123, "report.pdf");
        assert_eq!(name.to_string(), "1700000000123-report.pdf");
        assert_eq!(name.as_str(), "1700000000123-report.pdf");
    }
}
