//! Store credentials
//!
//! A JSON document with `username` and `password` keys, read once at
//! startup. A missing or unreadable file is fatal before any file
//! processing begins.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Basic-auth credentials for the destination store
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Store username
    pub username: String,
    /// Store password
    pub password: String,
}

impl Credentials {
    /// Load credentials from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::credentials(format!(
                "credentials file is missing: {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::credentials(format!("failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::credentials(format!("failed to parse {}: {e}", path.display())))
    }
}
