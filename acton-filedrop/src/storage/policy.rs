//! Upload policy: extension allow-list and stored-name assignment
//!
//! The allow-list is the only content check performed on uploads. It is built
//! once from configuration and shared read-only by every request.
//!
//! # Examples
//!
//! ```rust
//! use acton_filedrop::storage::{UploadPolicy, UploadedFile};
//!
//! let policy = UploadPolicy::default();
//!
//! let report = UploadedFile::new("report.PDF", "application/pdf", vec![]);
//! assert!(policy.allows(&report));
//!
//! let binary = UploadedFile::new("malware.exe", "application/octet-stream", vec![]);
//! assert!(!policy.allows(&binary));
//! ```

use super::types::{base_name, StorageError, StorageResult, StoredName, UploadedFile};
use chrono::Utc;
use std::collections::BTreeSet;

/// Extensions accepted when no configuration overrides them
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    ".pdf", ".xls", ".xlsx", ".doc", ".docx", ".xml", ".jpg", ".jpeg", ".png", ".webp",
];

/// Constraints applied to every upload before it reaches storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    allowed_extensions: BTreeSet<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EXTENSIONS.iter().copied())
    }
}

impl UploadPolicy {
    /// Creates a policy from a list of extensions
    ///
    /// Entries are lower-cased and given a leading dot if they lack one, so
    /// `"PDF"`, `"pdf"` and `".pdf"` are equivalent.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_extensions = extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        Self { allowed_extensions }
    }

    /// Whether the file's extension is on the allow-list
    #[must_use]
    pub fn allows(&self, file: &UploadedFile) -> bool {
        file.extension()
            .is_some_and(|ext| self.allowed_extensions.contains(&ext))
    }

    /// The normalized allow-list, in sorted order
    pub fn allowed_extensions(&self) -> impl Iterator<Item = &str> {
        self.allowed_extensions.iter().map(String::as_str)
    }

    /// Assigns the on-disk name for an accepted upload, stamped with the current time
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidName` if nothing usable remains of the
    /// client's filename after [`sanitize_filename`].
    pub fn stored_name(&self, file: &UploadedFile) -> StorageResult<StoredName> {
        stored_name_at(Utc::now().timestamp_millis(), &file.filename)
    }
}

/// Stored name for `filename` uploaded at `timestamp_millis`
pub(crate) fn stored_name_at(timestamp_millis: i64, filename: &str) -> StorageResult<StoredName> {
    let sanitized = sanitize_filename(filename);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        return Err(StorageError::InvalidName(filename.to_string()));
    }
    Ok(StoredName::new(timestamp_millis, &sanitized))
}

/// Reduces a client filename to a single safe path segment
///
/// Directory components (either separator style) are dropped and control
/// characters removed. Everything else is kept as sent.
///
/// # Examples
///
/// ```rust
/// use acton_filedrop::storage::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Q3 report.pdf"), "Q3 report.pdf");
/// assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
/// assert_eq!(sanitize_filename("a\u{0}b.png"), "ab.png");
/// ```
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    base_name(filename)
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}

fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().to_lowercase();
    match ext.as_str() {
        "" | "." => None,
        e if e.starts_with('.') => Some(ext),
        _ => Some(format!(".{ext}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn file(name: &str) -> UploadedFile {
        UploadedFile::new(name, "application/octet-stream", b"data".to_vec())
    }

    #[test]
    fn test_default_allow_list() {
        let policy = UploadPolicy::default();
        for name in [
            "a.pdf", "a.xls", "a.xlsx", "a.doc", "a.docx", "a.xml", "a.jpg", "a.jpeg", "a.png",
            "a.webp",
        ] {
            assert!(policy.allows(&file(name)), "{name} should be allowed");
        }
    }

    #[test]
    fn test_rejects_other_extensions() {
        let policy = UploadPolicy::default();
        for name in ["malware.exe", "script.sh", "README", ".pdf", "report.pdf.exe", "file."] {
            assert!(!policy.allows(&file(name)), "{name} should be rejected");
        }
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let policy = UploadPolicy::default();
        assert!(policy.allows(&file("PHOTO.JPEG")));
        assert!(policy.allows(&file("Budget.XlSx")));
    }

    #[test]
    fn test_custom_extensions_are_normalized() {
        let policy = UploadPolicy::new(["PDF", ".Txt", "", "."]);
        let allowed: Vec<&str> = policy.allowed_extensions().collect();
        assert_eq!(allowed, vec![".pdf", ".txt"]);
        assert!(policy.allows(&file("notes.TXT")));
    }

    #[test]
    fn test_stored_name_format() {
        let name = stored_name_at(1_712_345_678_901, "report.pdf").unwrap();
        assert_eq!(name.as_str(), "1712345678901-report.pdf");
    }

    #[test]
    fn test_stored_name_strips_directories() {
        let name = stored_name_at(42, "../../etc/cron.d/evil.pdf").unwrap();
        assert_eq!(name.as_str(), "42-evil.pdf");

        let name = stored_name_at(42, "C:\\Users\\me\\scan.png").unwrap();
        assert_eq!(name.as_str(), "42-scan.png");
    }

    #[test]
    fn test_stored_name_rejects_empty_segments() {
        for bad in ["", "dir/", "..", "x/..", "\u{7}"] {
            assert!(
                matches!(stored_name_at(1, bad), Err(StorageError::InvalidName(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_stored_name_uses_current_time() {
        let before = Utc::now().timestamp_millis();
        let name = UploadPolicy::default().stored_name(&file("a.png")).unwrap();
        let after = Utc::now().timestamp_millis();

        let (stamp, rest) = name.as_str().split_once('-').unwrap();
        let stamp: i64 = stamp.parse().unwrap();
        assert!((before..=after).contains(&stamp));
        assert_eq!(rest, "a.png");
    }

    proptest! {
        #[test]
        fn sanitized_names_are_single_segments(name in "\\PC{0,40}") {
            let sanitized = sanitize_filename(&name);
            prop_assert!(!sanitized.contains('/'));
            prop_assert!(!sanitized.contains('\\'));
            prop_assert!(!sanitized.chars().any(char::is_control));
        }

        #[test]
        fn allowed_names_keep_their_original_suffix(stem in "[a-zA-Z0-9 _-]{1,20}", idx in 0usize..10) {
            let original = format!("{stem}{}", DEFAULT_ALLOWED_EXTENSIONS[idx]);
            let policy = UploadPolicy::default();
            prop_assert!(policy.allows(&file(&original)));
            let stored = stored_name_at(7, &original).unwrap();
            prop_assert!(stored.as_str().ends_with(&original));
        }
    }
}
