//
//  jenkins-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Jenkins accepts HTTP Basic authentication with a username and an API
//! token. The token is kept obfuscated in configuration (see
//! [`crate::codec`]) and decoded once when a credential is built.
//!
//! ## Example
//!
//! ```rust
//! use jenkins_cli::auth::AuthCredential;
//! use jenkins_cli::codec::Obfuscator;
//!
//! let codec = Obfuscator::default();
//! let stored = codec.encode("11a2b3c4d5");
//!
//! let credential = AuthCredential::from_obfuscated("ci-bot", &stored, &codec);
//! assert_eq!(credential.username(), "ci-bot");
//! assert_eq!(credential.token(), "11a2b3c4d5");
//! ```

use std::fmt;

use reqwest::RequestBuilder;
use tracing::warn;

use crate::codec::Obfuscator;

/// Username and decoded API token sent with every Jenkins request.
///
/// The `Debug` implementation never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthCredential {
    username: String,
    token: String,
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCredential")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl AuthCredential {
    /// Creates a credential from a username and a plain-text token.
    pub fn basic(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    /// Creates a credential from an obfuscated token.
    ///
    /// The token is decoded exactly once. A token that is not valid hex is
    /// logged as a warning and decoded to an empty string, matching the
    /// silent behaviour of [`Obfuscator::decode`], so the request still goes
    /// out and the server reports the authentication failure.
    pub fn from_obfuscated(username: impl Into<String>, obfuscated: &str, codec: &Obfuscator) -> Self {
        let token = match codec.try_decode(obfuscated) {
            Ok(token) => token,
            Err(err) => {
                warn!("stored API token could not be decoded: {err}");
                String::new()
            }
        };

        Self::basic(username, token)
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the decoded token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns `true` if no token is available.
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    /// Adds the `Authorization: Basic ...` header to a request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.token))
    }
}

/// Reads a single line from standard input, trimmed of surrounding whitespace.
///
/// Used to accept a plain-text token without leaving it in shell history:
/// `echo "$TOKEN" | jenkins-cli token encode`.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn read_token_from_stdin() -> anyhow::Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}
