//! Plain-text log of a copy run, written next to the copied clips.

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::copy::CopyResult;

/// Errors that can occur while writing the report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// How many suffixed names to try before giving up on a report
pub const MAX_REPORT_ATTEMPTS: u32 = 100;

/// Report file name for a run started at `at`.
///
/// Attempt 0 is the bare timestamp; later attempts append `_<n>` so runs
/// within the same second keep separate logs.
pub fn report_file_name(at: &DateTime<Local>, attempt: u32) -> String {
    let stamp = at.format("%Y%m%d_%H%M%S");
    match attempt {
        0 => format!("copy_log_{}.txt", stamp),
        n => format!("copy_log_{}_{}.txt", stamp, n),
    }
}

/// Escape control characters so every entry stays on one line
fn escape_control(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_control) {
        Cow::Owned(
            s.chars()
                .map(|c| {
                    if c.is_control() {
                        c.escape_default().to_string()
                    } else {
                        c.to_string()
                    }
                })
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// Render the report text
pub fn render_report(result: &CopyResult, at: &DateTime<Local>) -> String {
    let mut out = String::new();

    out.push_str("Medal Clip Copy Log\n");
    out.push_str("===================\n");
    out.push_str(&format!("Date: {}\n", at.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("Total clips processed: {}\n", result.total()));
    out.push_str(&format!("Successfully copied: {}\n", result.success_count()));
    out.push_str(&format!("Errors: {}\n", result.error_count()));
    out.push('\n');

    if !result.successes.is_empty() {
        out.push_str("SUCCESSFUL COPIES:\n");
        out.push_str("==================\n");
        for success in &result.successes {
            out.push_str(&format!("Source: {}\n", escape_control(&success.source)));
            out.push_str(&format!(
                "Destination: {}\n",
                escape_control(&success.destination.to_string_lossy())
            ));
            out.push('\n');
        }
    }

    if !result.failures.is_empty() {
        out.push_str("ERRORS:\n");
        out.push_str("=======\n");
        for failure in &result.failures {
            out.push_str(&format!("File: {}\n", escape_control(&failure.source)));
            out.push_str(&format!(
                "Error: {}\n",
                escape_control(&failure.error.to_string())
            ));
            out.push('\n');
        }
    }

    out
}

/// Write the report into `dest_dir`, returning its path
pub async fn write_report(dest_dir: &Path, result: &CopyResult) -> Result<PathBuf, ReportError> {
    write_report_at(dest_dir, result, &Local::now()).await
}

/// Write the report for a run started at `at`.
///
/// Never replaces an existing file: a taken name moves on to the next
/// suffix, up to `MAX_REPORT_ATTEMPTS` names.
pub async fn write_report_at(
    dest_dir: &Path,
    result: &CopyResult,
    at: &DateTime<Local>,
) -> Result<PathBuf, ReportError> {
    let text = render_report(result, at);
    let mut attempt = 0;

    loop {
        let path = dest_dir.join(report_file_name(at, attempt));

        match create_and_write(&path, &text).await {
            Ok(()) => return Ok(path),
            Err(e)
                if e.kind() == io::ErrorKind::AlreadyExists
                    && attempt + 1 < MAX_REPORT_ATTEMPTS =>
            {
                debug!(path = %path.display(), "Report name taken, trying next");
                attempt += 1;
            }
            Err(source) => return Err(ReportError::Write { path, source }),
        }
    }
}

async fn create_and_write(path: &Path, text: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(text.as_bytes()).await?;
    file.flush().await
}
