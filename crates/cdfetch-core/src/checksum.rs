//! Content checksums for binary payloads.
//!
//! Binary fetches are compared by digest rather than by decoded text.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Digest used to summarize binary content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    #[default]
    Md5,
    Sha256,
}

impl ChecksumAlgorithm {
    /// Digest of `data` as lowercase hex.
    pub fn hex_digest(self, data: &[u8]) -> String {
        match self {
            ChecksumAlgorithm::Md5 => md5_hex(data),
            ChecksumAlgorithm::Sha256 => sha256_hex(data),
        }
    }
}

pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
