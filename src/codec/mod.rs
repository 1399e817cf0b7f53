//
//  jenkins-cli
//  codec/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Token Obfuscation
//!
//! This module keeps the Jenkins API token out of configuration files as plain
//! text. The token is XOR-combined with a 16-byte key derived from a salt and
//! stored as a hexadecimal string.
//!
//! ## Key Derivation
//!
//! The key is the first 16 characters of the lowercase hex MD5 digest of the
//! derivation input, taken as ASCII bytes. Two derivation modes exist:
//!
//! | Mode | Encode key input | Decode key input | Round-trips |
//! |------|------------------|------------------|-------------|
//! | [`KeyDerivation::Consistent`] | `salt` | `salt` | Yes |
//! | [`KeyDerivation::Legacy`] | `plaintext + salt` | `hex + salt` | No |
//!
//! `Legacy` reproduces tokens written by the first release of the tool
//! bit-for-bit. Because encode and decode derive their keys from different
//! inputs, a legacy-encoded token does not decode back to its plaintext.
//!
//! ## Example
//!
//! ```rust
//! use jenkins_cli::codec::Obfuscator;
//!
//! let codec = Obfuscator::default();
//! let stored = codec.encode("my-api-token");
//! assert_eq!(codec.decode(&stored), "my-api-token");
//! ```
//!
//! ## Notes
//!
//! This is obfuscation, not encryption. Anyone holding the salt can recover
//! the token.

use std::fmt;
use std::str::FromStr;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Salt compiled into the binary and used when no other salt is configured.
pub const DEFAULT_SALT: &str = "jenkins-secret-key";

/// Length of the derived key in bytes.
pub const KEY_LEN: usize = 16;

/// Errors surfaced by [`Obfuscator::try_decode`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The stored token is not valid hexadecimal.
    #[error("invalid hex token: {0}")]
    InvalidHex(String),
}

/// Selects how the obfuscation key is derived for encode and decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDerivation {
    /// Key derived from the salt alone; `decode(encode(s)) == s`.
    #[default]
    Consistent,

    /// Key derived from the content being transformed plus the salt.
    ///
    /// Encode hashes the plaintext, decode hashes the hex string, so the two
    /// keys differ for any non-empty input.
    Legacy,
}

impl fmt::Display for KeyDerivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consistent => write!(f, "consistent"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for KeyDerivation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "consistent" => Ok(Self::Consistent),
            "legacy" => Ok(Self::Legacy),
            other => Err(format!(
                "unknown key derivation '{other}' (expected 'consistent' or 'legacy')"
            )),
        }
    }
}

/// Derives a key from an arbitrary input string.
///
/// Hashes `input` with MD5, hex-encodes the digest and keeps the first
/// [`KEY_LEN`] hex characters as raw bytes. The same input always produces
/// the same key.
///
/// # Example
///
/// ```rust
/// use jenkins_cli::codec::derive_key;
///
/// assert_eq!(&derive_key("jenkins-secret-key"), b"e59be54c6b8702ad");
/// ```
pub fn derive_key(input: &str) -> [u8; KEY_LEN] {
    let digest = hex::encode(Md5::digest(input.as_bytes()));
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&digest.as_bytes()[..KEY_LEN]);
    key
}

fn xor_with_key(data: &[u8], key: &[u8; KEY_LEN]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(byte, key_byte)| byte ^ key_byte)
        .collect()
}

/// Reversible token transform keyed by a salt.
///
/// An `Obfuscator` is cheap to clone and holds no state beyond its salt and
/// derivation mode, so encode and decode are pure functions of their input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obfuscator {
    salt: String,
    derivation: KeyDerivation,
}

impl Default for Obfuscator {
    fn default() -> Self {
        Self::new(DEFAULT_SALT, KeyDerivation::Consistent)
    }
}

impl Obfuscator {
    /// Creates an obfuscator for the given salt and derivation mode.
    pub fn new(salt: impl Into<String>, derivation: KeyDerivation) -> Self {
        Self {
            salt: salt.into(),
            derivation,
        }
    }

    /// Creates an obfuscator compatible with tokens from the first release.
    pub fn legacy() -> Self {
        Self::new(DEFAULT_SALT, KeyDerivation::Legacy)
    }

    /// Returns the derivation mode in use.
    pub fn derivation(&self) -> KeyDerivation {
        self.derivation
    }

    /// Returns the salt-only key used by [`KeyDerivation::Consistent`].
    pub fn key(&self) -> [u8; KEY_LEN] {
        derive_key(&self.salt)
    }

    fn encode_key(&self, plaintext: &str) -> [u8; KEY_LEN] {
        match self.derivation {
            KeyDerivation::Consistent => self.key(),
            KeyDerivation::Legacy => derive_key(&format!("{plaintext}{}", self.salt)),
        }
    }

    fn decode_key(&self, encoded: &str) -> [u8; KEY_LEN] {
        match self.derivation {
            KeyDerivation::Consistent => self.key(),
            KeyDerivation::Legacy => derive_key(&format!("{encoded}{}", self.salt)),
        }
    }

    /// Obfuscates `plaintext` into a lowercase hex string.
    ///
    /// Byte `i` of the plaintext is XOR-ed with key byte `i % 16`. The empty
    /// string encodes to the empty string.
    pub fn encode(&self, plaintext: &str) -> String {
        let key = self.encode_key(plaintext);
        hex::encode(xor_with_key(plaintext.as_bytes(), &key))
    }

    /// Reverses [`encode`](Self::encode), reporting malformed hex.
    ///
    /// Bytes that do not form valid UTF-8 after the XOR are replaced with
    /// `U+FFFD` rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidHex`] if `encoded` is not an even-length
    /// hexadecimal string.
    pub fn try_decode(&self, encoded: &str) -> Result<String, CodecError> {
        let data = hex::decode(encoded).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
        let key = self.decode_key(encoded);
        Ok(String::from_utf8_lossy(&xor_with_key(&data, &key)).into_owned())
    }

    /// Reverses [`encode`](Self::encode) without signalling errors.
    ///
    /// Malformed hex decodes to an empty byte sequence, so the result is an
    /// empty string. Use [`try_decode`](Self::try_decode) to tell a corrupt
    /// token apart from an empty one.
    pub fn decode(&self, encoded: &str) -> String {
        self.try_decode(encoded).unwrap_or_default()
    }
}
