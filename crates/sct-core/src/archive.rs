//! Score archive reader.
//!
//! A score archive is the zip file SAS Viya offers as "Download score code".
//! Each translation reads exactly one text member out of it; nothing is kept
//! once the call returns.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{TranslateError, TranslateResult};
use crate::limits::{check_len, read_bounded, ArchiveLimits};

/// An opened score archive.
///
/// # Example
///
/// ```no_run
/// use sct_core::archive::ScoreArchive;
/// use sct_core::limits::ArchiveLimits;
///
/// let mut archive = ScoreArchive::open("model.zip", ArchiveLimits::default()).unwrap();
/// let score = archive.read_text("dmcas_scorecode.sas").unwrap();
/// println!("{} bytes of score code", score.len());
/// ```
pub struct ScoreArchive<R> {
    path: PathBuf,
    zip: ZipArchive<R>,
    limits: ArchiveLimits,
}

impl ScoreArchive<BufReader<File>> {
    /// Open the zip file at `path`.
    pub fn open(path: impl AsRef<Path>, limits: ArchiveLimits) -> TranslateResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TranslateError::io(path, e))?;
        let len = file
            .metadata()
            .map_err(|e| TranslateError::io(path, e))?
            .len();
        check_len(len, limits.max_archive_bytes, "archive")?;
        Self::from_reader(BufReader::new(file), path, limits)
    }
}

impl<R: Read + Seek> ScoreArchive<R> {
    /// Wrap an in-memory or already opened zip stream. `label` names the
    /// archive in error messages.
    pub fn from_reader(
        reader: R,
        label: impl Into<PathBuf>,
        limits: ArchiveLimits,
    ) -> TranslateResult<Self> {
        let path = label.into();
        let zip = ZipArchive::new(reader).map_err(|e| archive_error(&path, e))?;
        tracing::debug!(archive = %path.display(), members = zip.len(), "opened score archive");
        Ok(Self { path, zip, limits })
    }

    /// Member names in central-directory order.
    pub fn member_names(&self) -> Vec<String> {
        self.zip.file_names().map(str::to_string).collect()
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.zip.index_for_name(name).is_some()
    }

    /// Read one member as UTF-8 text.
    pub fn read_text(&mut self, member: &str) -> TranslateResult<String> {
        let limit = self.limits.max_member_bytes;
        let entry = match self.zip.by_name(member) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(TranslateError::MissingMember {
                    member: member.to_string(),
                    archive: self.path.clone(),
                })
            }
            Err(e) => return Err(archive_error(&self.path, e)),
        };
        check_len(entry.size(), limit, member)?;
        let bytes = read_bounded(entry, limit, member, &self.path)?;

        String::from_utf8(bytes).map_err(|_| TranslateError::InvalidUtf8 {
            member: member.to_string(),
        })
    }
}

fn archive_error(path: &Path, err: ZipError) -> TranslateError {
    match err {
        ZipError::Io(source) => TranslateError::io(path, source),
        other => TranslateError::Archive {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}
