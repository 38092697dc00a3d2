// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur while talking to the remote data store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The HTTP request itself failed (connect, timeout, transport).
    #[error("Store request failed: {0}")]
    RequestFailed(String),
    /// The store answered with a non-success status.
    #[error("Store returned HTTP {status}: {body}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The response body, as returned.
        body: String,
    },
    /// A response body could not be decoded into the expected rows.
    #[error("Failed to decode store response: {0}")]
    Decode(String),
    /// A row that must exist was not found.
    #[error("Not found in store: {0}")]
    NotFound(String),
    /// The client configuration was unusable.
    #[error("Store configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
