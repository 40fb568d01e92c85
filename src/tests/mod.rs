// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
#![cfg(test)]
pub mod hash_tests;
