//! # Content Digest — SHA-256 File Evidence
//!
//! Defines `ContentDigest`, the 32-byte SHA-256 value recorded for every
//! artifact in a release pack, and the functions that compute it.
//!
//! ## Integrity Invariant
//!
//! The digest written to `Evidence/sha256.txt` must equal the SHA-256 of
//! the bytes actually present on disk. [`hash_file()`] therefore always
//! reads the file back from the filesystem rather than hashing an in-memory
//! copy of what was meant to be written.
//!
//! Files are streamed in fixed-size chunks, so arbitrarily large masters
//! hash in constant memory.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::DigestParseError;

/// Read buffer size for streaming file digests.
const CHUNK_SIZE: usize = 64 * 1024;

/// A SHA-256 content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Wrap raw digest bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a 64-character hex digest. Uppercase hex is accepted.
    pub fn from_hex(hex: &str) -> Result<Self, DigestParseError> {
        if hex.len() != 64 {
            return Err(DigestParseError::InvalidLength(hex.len()));
        }
        let mut bytes = [0u8; 32];
        let raw = hex.as_bytes();
        for (i, byte) in bytes.iter_mut().enumerate() {
            let hi = nibble(raw[2 * i])?;
            let lo = nibble(raw[2 * i + 1])?;
            *byte = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }

    /// The raw 32-byte digest value.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn nibble(c: u8) -> Result<u8, DigestParseError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(DigestParseError::InvalidCharacter(char::from(c))),
    }
}

/// Compute the SHA-256 digest of in-memory bytes.
pub fn sha256_bytes(data: &[u8]) -> ContentDigest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    finish(hasher)
}

fn finish(hasher: Sha256) -> ContentDigest {
    let hash = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(bytes)
}

/// Compute the SHA-256 digest of a file's content.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or read.
pub fn hash_file(path: &Path) -> io::Result<ContentDigest> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(finish(hasher))
}
