//! Content-addressed cache for extracted SQL profiles.
//!
//! Cache entries are keyed by the byte content of the originating SQL file,
//! not by its path: identical SQL text resolves to the same cache file no
//! matter where it lives, and a single changed byte produces a new key.
//! Entries are JSON files named `<stem>_<16 hex chars>.json` under the cache
//! root (default [`DEFAULT_CACHE_DIR`]).
//!
//! Only key computation can fail hard, since nothing works without reading
//! the source file. Every other operation reports through its return value
//! and a log entry, so a caching problem never aborts an extraction
//! pipeline.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock
};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::{
    error::{AppResult, file_read_error},
    profile::SqlProfile
};

/// Default cache root directory
pub const DEFAULT_CACHE_DIR: &str = ".sqldeps_cache";

/// Pattern of cache entry file names.
static CACHE_FILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*_[0-9a-f]{16}\.json$").expect("valid regex"));

/// Compute the cache file path for a SQL source file
///
/// Reads the file bytes and derives the key from a BLAKE3 digest, so the
/// path depends on content alone.
///
/// # Errors
///
/// Returns error if the source file cannot be read
pub fn cache_path(source: &Path, cache_dir: &Path) -> AppResult<PathBuf> {
    let content =
        fs::read(source).map_err(|e| file_read_error(&source.display().to_string(), e))?;
    let digest = blake3::hash(&content).to_hex();
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("query"));
    Ok(cache_dir.join(format!("{}_{}.json", stem, &digest.as_str()[..16])))
}

/// Persist a profile for a SQL source file
///
/// Returns `Ok(true)` when the entry was written. Directory creation,
/// serialization, and write failures are logged and yield `Ok(false)` so
/// the caller can proceed without caching.
///
/// # Errors
///
/// Returns error if the source file cannot be read for key computation
pub fn save_to_cache(profile: &SqlProfile, source: &Path, cache_dir: &Path) -> AppResult<bool> {
    let path = cache_path(source, cache_dir)?;

    if let Err(e) = fs::create_dir_all(cache_dir) {
        warn!(
            "Failed to create cache directory {}: {}",
            cache_dir.display(),
            e
        );
        return Ok(false);
    }

    let serialized = match serde_json::to_string_pretty(profile) {
        Ok(serialized) => serialized,
        Err(e) => {
            warn!("Failed to serialize profile for {}: {}", source.display(), e);
            return Ok(false);
        }
    };

    match fs::write(&path, serialized) {
        Ok(()) => {
            debug!("Cached profile at {}", path.display());
            Ok(true)
        }
        Err(e) => {
            warn!("Failed to write cache file {}: {}", path.display(), e);
            Ok(false)
        }
    }
}

/// Load a previously cached profile for a SQL source file
///
/// Returns `Ok(None)` on a cache miss. A cache file that cannot be read or
/// parsed is logged and treated as a miss rather than an error.
///
/// # Errors
///
/// Returns error if the source file cannot be read for key computation
pub fn load_from_cache(source: &Path, cache_dir: &Path) -> AppResult<Option<SqlProfile>> {
    let path = cache_path(source, cache_dir)?;

    if !path.exists() {
        return Ok(None);
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read cache file {}: {}", path.display(), e);
            return Ok(None);
        }
    };

    match serde_json::from_str(&content) {
        Ok(profile) => {
            debug!("Cache hit for {}", source.display());
            Ok(Some(profile))
        }
        Err(e) => {
            warn!("Invalid cache file {}: {}", path.display(), e);
            Ok(None)
        }
    }
}

/// Remove cached profiles and, when nothing else remains, the directory
///
/// Best-effort: a missing directory counts as already clean, only files
/// matching the cache entry pattern are deleted, and every failure is
/// logged and reported as `false` rather than propagated.
pub fn cleanup_cache(cache_dir: &Path) -> bool {
    if !cache_dir.exists() {
        return true;
    }

    if let Err(e) = remove_cache_files(cache_dir) {
        warn!("Cache cleanup failed for {}: {}", cache_dir.display(), e);
        return false;
    }

    match fs::read_dir(cache_dir) {
        Ok(mut entries) => {
            if entries.next().is_some() {
                info!("Cache directory cleaned but not removed (contains other files)");
                return true;
            }
            if let Err(e) = fs::remove_dir(cache_dir) {
                warn!(
                    "Failed to remove cache directory {}: {}",
                    cache_dir.display(),
                    e
                );
                return false;
            }
            info!("Cache directory removed");
            true
        }
        Err(e) => {
            warn!(
                "Failed to inspect cache directory {}: {}",
                cache_dir.display(),
                e
            );
            false
        }
    }
}

/// Check whether a file name matches the cache entry pattern
pub fn is_cache_file(name: &str) -> bool {
    CACHE_FILE_REGEX.is_match(name)
}

fn remove_cache_files(cache_dir: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(cache_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if is_cache_file(name) {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
