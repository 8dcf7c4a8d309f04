//! One-time download of the headless browser binary.

use std::path::{Path, PathBuf};

use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use tracing::{debug, info};

use super::BrowserError;

/// Default directory holding the downloaded browser.
pub const BROWSER_DIR: &str = "webdriver";

/// Ensures a browser binary is present under `dir`, downloading it if needed.
///
/// A directory that already holds an install is reused without any network
/// fetch. Returns the path to the browser executable.
///
/// # Errors
///
/// Returns an error if the download fails or no build exists for the host
/// platform. Provisioning failures are not retried.
pub async fn ensure_browser(dir: impl AsRef<Path>) -> Result<PathBuf, BrowserError> {
    let dir = dir.as_ref();

    if let Some(existing) = find_installed_executable(dir) {
        debug!("Reusing existing browser at {}", existing.display());
        return Ok(existing);
    }

    info!("Downloading browser. It may take some time...");

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| BrowserError::Provision(e.to_string()))?;

    let options = BrowserFetcherOptions::builder()
        .with_path(dir)
        .build()
        .map_err(|e| BrowserError::Provision(e.to_string()))?;

    let fetched = BrowserFetcher::new(options)
        .fetch()
        .await
        .map_err(|e| BrowserError::Provision(e.to_string()))?;

    info!(
        "Browser downloaded successfully to {}",
        fetched.executable_path.display()
    );

    Ok(fetched.executable_path)
}

/// Locates the executable of a previously provisioned install.
///
/// Understands both the fetcher's nested revision layout and a flat
/// directory holding a single pre-placed binary.
fn find_installed_executable(dir: &Path) -> Option<PathBuf> {
    if let Some(path) = find_named_binary(dir, 6) {
        return Some(path);
    }

    // Flat layout: the directory holds exactly one binary.
    let mut files = std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file());
    let first = files.next()?;
    files.next().is_none().then_some(first)
}

/// Searches `dir` for a file with a known browser binary name, descending
/// at most `depth` levels of subdirectories.
fn find_named_binary(dir: &Path, depth: u8) -> Option<PathBuf> {
    let mut subdirs = Vec::new();

    for entry in std::fs::read_dir(dir).ok()?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if is_browser_binary(&path) {
            return Some(path);
        }
    }

    if depth == 0 {
        return None;
    }
    subdirs
        .into_iter()
        .find_map(|sub| find_named_binary(&sub, depth - 1))
}

/// Checks whether a file carries one of the fetcher's executable names.
fn is_browser_binary(path: &Path) -> bool {
    matches!(
        path.file_name().and_then(|name| name.to_str()),
        Some("chrome" | "chrome.exe" | "Chromium" | "chromium" | "headless_shell")
    )
}
