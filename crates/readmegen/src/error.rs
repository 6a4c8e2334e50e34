use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::schema::ValidationError;

/// High-level error type shared across readmegen components.
#[derive(Debug, Error)]
pub enum ReadmeError {
    #[error("process execution error: `{command}` {}{}", describe_exit(.exit_code), describe_stderr(.stderr))]
    Process {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("lookup error: {0}")]
    Lookup(String),
    #[error(
        "mismatch error: manifest repository `{manifest}` does not match hosting repository `{hosting}`{}",
        mismatch_hint(.manifest, .hosting)
    )]
    Mismatch { manifest: String, hosting: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<serde_yaml::Error> for ReadmeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl ReadmeError {
    pub fn context<T: fmt::Display>(self, ctx: T) -> Self {
        match self {
            ReadmeError::Lookup(msg) => ReadmeError::Lookup(format!("{ctx}: {msg}")),
            ReadmeError::Config(msg) => ReadmeError::Config(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "did not run to completion".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

fn mismatch_hint(manifest: &str, hosting: &str) -> String {
    if manifest.trim_end_matches('/') == hosting.trim_end_matches('/') {
        " (the values differ only by a trailing slash)".to_string()
    } else if manifest.eq_ignore_ascii_case(hosting) {
        " (the values differ only by letter case)".to_string()
    } else {
        String::new()
    }
}
