//! Copy selected clips into a destination directory.
//!
//! Clips are copied one at a time in the order given. A failure on one clip
//! is recorded and the batch carries on; only failing to create the
//! destination directory aborts the whole run.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::library::Clip;

/// Errors that abort a whole copy batch
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("Failed to create destination directory {path}: {source}")]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors that affect a single clip
#[derive(Debug, Error)]
pub enum FileCopyError {
    #[error("Clip has no file path")]
    EmptyPath,

    #[error("File path has no file name: {0}")]
    NoFileName(String),

    #[error("Source file does not exist")]
    SourceMissing,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A clip that was copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySuccess {
    pub source: String,
    pub destination: PathBuf,
}

/// A clip that could not be copied
#[derive(Debug)]
pub struct CopyFailure {
    pub source: String,
    pub error: FileCopyError,
}

/// Outcome of a copy batch
#[derive(Debug, Default)]
pub struct CopyResult {
    /// Copied clips, in input order
    pub successes: Vec<CopySuccess>,

    /// Failed clips, in input order
    pub failures: Vec<CopyFailure>,
}

impl CopyResult {
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    /// Total clips processed
    pub fn total(&self) -> usize {
        self.success_count() + self.error_count()
    }
}

/// Copy every clip's media file into `dest_dir`, creating it if needed.
///
/// Files keep their base name; an existing file with the same name is
/// overwritten. A clip already stored in `dest_dir` is left untouched and
/// counted as copied.
pub async fn copy_clips<'a, I>(clips: I, dest_dir: &Path) -> Result<CopyResult, CopyError>
where
    I: IntoIterator<Item = &'a Clip>,
{
    fs::create_dir_all(dest_dir)
        .await
        .map_err(|source| CopyError::DestinationUnwritable {
            path: dest_dir.to_path_buf(),
            source,
        })?;

    let mut result = CopyResult::default();

    for clip in clips {
        match copy_file(&clip.file_path, dest_dir).await {
            Ok(destination) => {
                info!(file = %destination.display(), "Copied");
                result.successes.push(CopySuccess {
                    source: clip.file_path.clone(),
                    destination,
                });
            }
            Err(error) => {
                warn!(source = %clip.file_path, %error, "Copy failed");
                result.failures.push(CopyFailure {
                    source: clip.file_path.clone(),
                    error,
                });
            }
        }
    }

    Ok(result)
}

/// Copy one file into `dest_dir`, returning the destination path
async fn copy_file(source: &str, dest_dir: &Path) -> Result<PathBuf, FileCopyError> {
    if source.is_empty() {
        return Err(FileCopyError::EmptyPath);
    }

    let source_path = Path::new(source);
    let file_name = source_path
        .file_name()
        .ok_or_else(|| FileCopyError::NoFileName(source.to_string()))?;

    match fs::metadata(source_path).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FileCopyError::SourceMissing)
        }
        Err(e) => return Err(e.into()),
    }

    let destination = dest_dir.join(file_name);

    // Copying a file onto itself would truncate it
    if is_same_file(source_path, &destination).await {
        debug!(file = %destination.display(), "Already in destination");
        return Ok(destination);
    }

    fs::copy(source_path, &destination).await?;

    Ok(destination)
}

/// Check whether two paths resolve to the same file on disk
async fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a).await, fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
