// ABOUTME: Atomic JSON file storage shared by credential, sync-state, and activity persistence
// ABOUTME: Provides temp-file-then-rename writes, typed reads, and directory listing helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Atomic JSON file storage
//!
//! Every durable file in the pipeline goes through [`write_json`], which
//! writes to a temporary sibling and renames it onto the target path. A
//! process killed mid-write therefore never leaves a half-written state
//! file; the target either holds the previous content or the new content.

use crate::errors::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

pub mod sync_state;

pub use sync_state::{SyncState, SyncStateStore};

/// Serialize `value` as pretty-printed JSON and atomically replace `path`.
///
/// Parent directories are created as needed. On any failure the temporary
/// sibling is removed (best effort) and `path` is left untouched.
///
/// # Errors
/// Returns [`Error::Storage`] when serialization or any filesystem step
/// fails.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)
        .map_err(|e| storage_err(path, std::io::Error::other(e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| storage_err(parent, e))?;
    }

    let tmp = temp_sibling(path);
    if let Err(e) = fs::write(&tmp, &json).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(storage_err(&tmp, e));
    }
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(storage_err(path, e));
    }
    Ok(())
}

/// Read `path` and parse it as `T`.
///
/// # Errors
/// Returns [`Error::NotFound`] when the file is absent, [`Error::Corrupt`]
/// when it exists but does not parse as `T`, and [`Error::Storage`] for
/// other I/O failures.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(storage_err(path, e)),
    };
    serde_json::from_slice(&bytes).map_err(|e| Error::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Non-throwing existence probe
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// List the `.json` entries of `dir`, sorted by path.
///
/// A missing directory yields an empty list rather than an error, since a
/// data directory that has never been synced into is not a failure.
///
/// # Errors
/// Returns [`Error::Storage`] when the directory exists but cannot be read.
pub async fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(storage_err(dir, e)),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| storage_err(dir, e))?
    {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Temporary sibling of `path`, suffixed with the process id so concurrent
/// processes writing different targets cannot collide on the temp name
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("out.json"), ToOwned::to_owned);
    name.push(format!(".tmp.{}", std::process::id()));
    path.with_file_name(name)
}

fn storage_err(path: &Path, source: std::io::Error) -> Error {
    Error::Storage {
        path: path.to_path_buf(),
        source,
    }
}
