//! Request DTOs for the proxy API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

use crate::error::{ProxyError, Result};

/// Query parameters of the lookup route (GET /get?key=...)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetParams {
    /// The key to look up
    #[serde(default)]
    pub key: Option<String>,
}

impl GetParams {
    /// Returns the requested key. Any string is a valid key, including the
    /// empty one; only a missing parameter is rejected.
    pub fn into_key(self) -> Result<String> {
        self.key.ok_or_else(|| {
            ProxyError::InvalidRequest("missing 'key' query parameter".to_string())
        })
    }
}
