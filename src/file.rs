use std::io::ErrorKind;
use std::path::{Component, Path};

use crate::error::Result;

/// `Ok(false)` when nothing is at `path`; other I/O failures are errors.
pub fn path_exists(path: impl AsRef<Path>) -> Result<bool> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Checks `path` beneath `root`. Absolute paths and paths climbing out with
/// `..` are never found, and any failure counts as absent.
pub fn path_exists_in(root: impl AsRef<Path>, path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let confined = path
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    confined && root.as_ref().join(path).exists()
}
