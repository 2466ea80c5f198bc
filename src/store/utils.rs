use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolves a store file relative to the user's home directory.
pub fn home_path(to_join: &str) -> Result<PathBuf> {
    let path = dirs::home_dir()
        .context("Could not find `home` directory")?
        .join(to_join);

    log::debug!("Store path: {path:?}");

    Ok(path)
}
