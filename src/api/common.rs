//
//  jenkins-cli
//  api/common.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Error type shared by all Jenkins API operations.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `Transport` | Connection failed, DNS failed, or the call timed out |
//! | `UnexpectedStatus` | The server answered outside the accepted status set |
//! | `MalformedPayload` | An accepted response body was not the expected JSON |
//! | `Encoding` | Trigger parameters could not be serialized (no request sent) |
//! | `InvalidConfig` | The client could not be built from its configuration |

use thiserror::Error;

/// Result alias for Jenkins API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified error type for Jenkins API operations.
///
/// None of these are retried by the client; callers decide whether to retry
/// or exit.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response.
    ///
    /// Refused connections, DNS failures and timeouts are deliberately not
    /// distinguished.
    #[error("connection error")]
    Transport(#[source] reqwest::Error),

    /// The server responded with a status outside the accepted set.
    #[error("{}", describe_status(.status, .body))]
    UnexpectedStatus {
        /// HTTP status code returned by the server
        status: u16,
        /// Raw response body, possibly empty
        body: String,
    },

    /// The status was accepted but the body could not be decoded.
    #[error("failed to decode response: {0}")]
    MalformedPayload(String),

    /// Trigger parameters could not be serialized to JSON.
    #[error("failed to marshal parameters: {0}")]
    Encoding(String),

    /// The client configuration is unusable.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

fn describe_status(status: &u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("jenkins API returned status {status}")
    } else {
        format!("jenkins API returned status {status}: {}", body.trim())
    }
}

impl ApiError {
    /// Returns the HTTP status for [`ApiError::UnexpectedStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for connection-level failures, including timeouts.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
