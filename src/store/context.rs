use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::utils::home_path;
use super::Storable;
use crate::config::CONTEXT_STORE_PATH;
use crate::impl_store;

/// Persistent defaults shared between invocations.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Context {
    /// Owner login used when `--owner` is omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_owner: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Storable for Context {
    fn path() -> Result<PathBuf> {
        home_path(CONTEXT_STORE_PATH)
    }
}

impl_store!(Context);
