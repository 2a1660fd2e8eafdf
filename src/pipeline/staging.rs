//! Per-run staging directory for optimized icons.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{Result, SpriteError};

/// Prefix of every staging directory name.
pub const STAGING_PREFIX: &str = "vjs-sprite-tmp_";

/// A fresh staging directory path under `working_dir`: `vjs-sprite-tmp_<uuid>`.
pub fn staging_dir_path(working_dir: &Path) -> PathBuf {
    working_dir.join(format!("{}{}", STAGING_PREFIX, Uuid::new_v4()))
}

/// Create the staging directory and any missing parents. No-op if it exists.
pub fn create_temp_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| SpriteError::Staging {
        path: path.to_path_buf(),
        message: format!("failed to create: {}", e),
    })
}

/// Recursively delete the staging directory. Fails if it does not exist.
pub fn delete_temp_dir(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| SpriteError::Staging {
        path: path.to_path_buf(),
        message: format!("failed to delete: {}", e),
    })
}

/// Write an optimized icon into the staging directory.
pub fn store_icon_in_temp_dir(path: &Path, svg: &str) -> Result<()> {
    fs::write(path, svg).map_err(|e| SpriteError::Staging {
        path: path.to_path_buf(),
        message: format!("failed to stage icon: {}", e),
    })
}
