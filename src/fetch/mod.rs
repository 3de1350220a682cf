//! Sample database download.
//!
//! The sample database is third-party content fetched once over the
//! network. Downloads go to a temporary sibling path first and are
//! renamed into place, so a failed transfer never leaves a half-written
//! database behind.

use reqwest::blocking::Client;
use std::fs;
use std::path::Path;

/// Errors from downloading remote files.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request error.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The server returned an empty body.
    #[error("Empty response body from {url}")]
    EmptyBody { url: String },

    /// Filesystem error while writing the download.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads a URL to a destination path.
///
/// The body is written to `<dest>.tmp` and renamed into place once
/// complete. The temp file is removed when any step fails.
pub fn download(url: &str, dest: &Path) -> Result<(), FetchError> {
    let client = Client::new();
    let response = client.get(url).send()?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.bytes()?;
    if body.is_empty() {
        return Err(FetchError::EmptyBody {
            url: url.to_string(),
        });
    }

    let temp_path = temp_path_for(dest);
    let written = fs::write(&temp_path, &body)
        .and_then(|()| fs::rename(&temp_path, dest));
    if written.is_err() {
        // Keep the failure, drop the partial file.
        let _ = fs::remove_file(&temp_path);
    }
    written?;

    tracing::debug!("Downloaded {} bytes from {url}", body.len());
    Ok(())
}

fn temp_path_for(dest: &Path) -> std::path::PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "download".to_string());
    name.push_str(".tmp");
    dest.with_file_name(name)
}
