// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![no_std]

//! attest-kernel: deterministic content hashing, append-only version hash-chains
//! and a minimal contract ABI codec for anchoring decision history on chain.

extern crate alloc;

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

pub mod config;
pub mod error;
pub mod types;
pub mod hash;
pub mod chain;
pub mod abi;
pub mod proof;
pub mod verify;

pub use chain::{Decision, Version, ValidationResult, ChainViolation};
pub use error::{KernelError, KernelResult};
pub use hash::hash_content;
pub use types::hash::{ContentHash, TxHash};
pub use types::id::{DecisionId, VersionNumber};

#[cfg(test)]
pub mod tests;
