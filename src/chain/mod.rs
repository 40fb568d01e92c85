// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Version chains.
//!
//! Every state change of a decision is a new `Version` whose `previous_hash`
//! is the `content_hash` of the version before it. History is additive only.

pub mod decision;
pub mod validate;
pub mod version;

pub use decision::Decision;
pub use validate::{ChainViolation, ValidationResult};
pub use version::{AnchorState, Version};
