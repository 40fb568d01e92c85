// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Protocol constants.

/// Length in bytes of a content digest (SHA-256) and of a transaction hash.
pub const HASH_LEN: usize = 32;

/// Length in bytes of an ABI word.
pub const WORD_LEN: usize = 32;

/// Length in bytes of a function selector.
pub const SELECTOR_LEN: usize = 4;

/// Length in bytes of an account or contract address.
pub const ADDRESS_LEN: usize = 20;

/// Version numbers start here. The contract indexes the same versions from 0.
pub const FIRST_VERSION: u64 = 1;

/// Previous-hash sentinel for the first version of a decision.
pub const NULL_HASH: [u8; HASH_LEN] = [0u8; HASH_LEN];
