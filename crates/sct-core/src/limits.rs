//! Size limits applied when reading score archives.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::error::{TranslateError, TranslateResult};

/// Resource limits for reading a score archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveLimits {
    /// Size of the zip file on disk.
    pub max_archive_bytes: u64,
    /// Uncompressed size of the score-code member.
    pub max_member_bytes: u64,
}

impl Default for ArchiveLimits {
    fn default() -> Self {
        Self {
            max_archive_bytes: 32 * 1024 * 1024, // 32 MB
            max_member_bytes: 8 * 1024 * 1024,   // 8 MB
        }
    }
}

/// Partial overrides for `ArchiveLimits`. Used for CLI JSON parsing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveLimitsOverrides {
    pub max_archive_bytes: Option<u64>,
    pub max_member_bytes: Option<u64>,
}

impl ArchiveLimits {
    /// Apply overrides onto these limits. Only `Some` values override.
    pub fn apply(self, overrides: ArchiveLimitsOverrides) -> Self {
        Self {
            max_archive_bytes: overrides
                .max_archive_bytes
                .unwrap_or(self.max_archive_bytes),
            max_member_bytes: overrides.max_member_bytes.unwrap_or(self.max_member_bytes),
        }
    }
}

/// Read at most `limit` bytes from `reader`, failing if more are available.
///
/// The declared size in a zip header is not trusted; the bound is enforced
/// on the decompressed stream.
pub(crate) fn read_bounded<R: Read>(
    reader: R,
    limit: u64,
    what: &str,
    path: &Path,
) -> TranslateResult<Vec<u8>> {
    let mut buf = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| TranslateError::io(path, e))?;
    check_len(buf.len() as u64, limit, what)?;
    Ok(buf)
}

/// Fail if a known length is above `limit`.
pub(crate) fn check_len(len: u64, limit: u64, what: &str) -> TranslateResult<()> {
    if len > limit {
        return Err(TranslateError::LimitExceeded {
            what: what.to_string(),
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn overrides_only_replace_some_values() {
        let overrides: ArchiveLimitsOverrides =
            serde_json::from_str(r#"{"max_member_bytes": 1024}"#).unwrap();
        let limits = ArchiveLimits::default().apply(overrides);
        assert_eq!(limits.max_member_bytes, 1024);
        assert_eq!(
            limits.max_archive_bytes,
            ArchiveLimits::default().max_archive_bytes
        );
    }

    #[test]
    fn overrides_reject_unknown_fields() {
        let parsed: Result<ArchiveLimitsOverrides, _> =
            serde_json::from_str(r#"{"max_lines": 10}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn read_bounded_accepts_exact_limit() {
        let data = vec![b'x'; 16];
        let out = read_bounded(Cursor::new(&data), 16, "member", Path::new("a.zip")).unwrap();
        assert_eq!(out.len(), 16);
    }

    #[test]
    fn read_bounded_rejects_overflow() {
        let data = vec![b'x'; 17];
        let err = read_bounded(Cursor::new(&data), 16, "member", Path::new("a.zip")).unwrap_err();
        assert!(matches!(err, TranslateError::LimitExceeded { limit: 16, .. }));
    }

    #[test]
    fn check_len_boundary() {
        assert!(check_len(10, 10, "archive").is_ok());
        assert!(check_len(11, 10, "archive").is_err());
    }
}
