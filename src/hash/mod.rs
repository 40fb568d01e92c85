// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical Content Hashing
//!
//! **SHA-256 over the UTF-8 bytes of the content** is the content hash standard.
//! There is no normalization step: no trimming, no line-ending rewrite, no
//! Unicode normalization. The empty string is valid content.
//!
//! Two interchangeable digest paths exist:
//! - [`HashBackend::Native`]: the `sha2` crate (runtime CPU feature dispatch)
//! - [`HashBackend::Software`]: the portable implementation in [`soft`]
//!
//! # Guarantee
//! Same content → same `ContentHash` on both paths, on every architecture.

pub mod keccak;
pub mod native;
pub mod soft;

use crate::types::hash::ContentHash;

pub use keccak::keccak256;

/// Selects the digest implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HashBackend {
    #[default]
    Native,
    Software,
}

impl HashBackend {
    pub const ALL: [HashBackend; 2] = [HashBackend::Native, HashBackend::Software];

    pub fn digest(&self, data: &[u8]) -> [u8; 32] {
        match self {
            HashBackend::Native => native::sha256(data),
            HashBackend::Software => soft::sha256(data),
        }
    }
}

/// Hashes decision content with the native backend.
pub fn hash_content(content: &str) -> ContentHash {
    hash_content_with(HashBackend::Native, content)
}

pub fn hash_content_with(backend: HashBackend, content: &str) -> ContentHash {
    ContentHash::from_bytes(backend.digest(content.as_bytes()))
}
