//! Error types for score-code translation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Coarse classification of a [`TranslateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    MissingMember,
    MissingToken,
    Render,
    Io,
}

/// Errors that can occur while translating a score-code archive.
///
/// Every failure aborts the call. Nothing is retried and no output file is
/// written when one of these is returned.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// A required request field is absent or empty. Raised before any I/O.
    #[error("invalid request: {field} {reason}")]
    InvalidRequest { field: &'static str, reason: String },

    /// The archive does not contain the member the variant reads.
    #[error("archive {archive} has no member named {member}")]
    MissingMember { member: String, archive: PathBuf },

    /// A required token could not be found in the score code.
    #[error("token '{token}' not found in {member}")]
    MissingToken { token: String, member: String },

    /// A template placeholder had no binding at render time.
    #[error("unresolved placeholder ${{{placeholder}}} in template block '{block}'")]
    UnresolvedPlaceholder { placeholder: String, block: String },

    /// The archive member is not valid UTF-8 text.
    #[error("member {member} is not valid UTF-8")]
    InvalidUtf8 { member: String },

    /// The archive or one of its members exceeds a configured limit.
    #[error("{what} exceeds limit of {limit} bytes")]
    LimitExceeded { what: String, limit: u64 },

    /// The file is not a readable zip archive.
    #[error("cannot read archive {path}: {message}")]
    Archive { path: PathBuf, message: String },

    /// Filesystem error while reading the archive or writing the output.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TranslateError {
    pub fn invalid_request(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field,
            reason: reason.into(),
        }
    }

    pub fn missing_token(token: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MissingToken {
            token: token.into(),
            member: member.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Self::MissingMember { .. } => ErrorKind::MissingMember,
            Self::MissingToken { .. } => ErrorKind::MissingToken,
            Self::UnresolvedPlaceholder { .. } => ErrorKind::Render,
            Self::InvalidUtf8 { .. }
            | Self::LimitExceeded { .. }
            | Self::Archive { .. }
            | Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Returns true if the archive lacked the expected member.
    pub fn is_missing_member(&self) -> bool {
        matches!(self, Self::MissingMember { .. })
    }

    /// Returns true if a required token was absent from the score code.
    pub fn is_missing_token(&self) -> bool {
        matches!(self, Self::MissingToken { .. })
    }

    /// Suggested exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidRequest => 2,
            ErrorKind::MissingMember | ErrorKind::MissingToken => 3,
            ErrorKind::Io => 4,
            ErrorKind::Render => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = TranslateError::missing_token("language", "ScoreCode.sas");
        assert_eq!(err.to_string(), "token 'language' not found in ScoreCode.sas");

        let err = TranslateError::UnresolvedPlaceholder {
            placeholder: "hostname".into(),
            block: "connection".into(),
        };
        assert_eq!(
            err.to_string(),
            "unresolved placeholder ${hostname} in template block 'connection'"
        );
    }

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(
            TranslateError::invalid_request("out_castable", "must be defined").exit_code(),
            2
        );
        assert_eq!(TranslateError::missing_token("x", "y").exit_code(), 3);
        let io = TranslateError::io(
            "out.py",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(io.kind(), ErrorKind::Io);
        assert_eq!(io.exit_code(), 4);
    }
}
