// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::hash::{hash_content, hash_content_with, HashBackend};
use crate::types::encode_hex;
use std::string::String;

// Published SHA-256 vectors
const VECTORS: &[(&str, &str)] = &[
    ("", "0xe3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
    ("abc", "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"),
    ("Hello", "0x185f8db32271fe25f561a6fc938b2e264306ec304eda518007d1764826381969"),
    (
        "héllo wörld ✓",
        "0xc2a59c71097b678dc5af2eb1f98ddc575b63948b0fa6740071a945673aaada4d",
    ),
];

#[test]
fn test_known_vectors_on_both_backends() {
    for (input, expected) in VECTORS {
        for backend in HashBackend::ALL {
            let hash = hash_content_with(backend, input);
            assert_eq!(hash.to_hex(), *expected, "{:?} on {:?}", input, backend);
        }
    }
}

#[test]
fn test_hello_hashed_twice() {
    let first = hash_content("Hello").to_hex();
    let second = hash_content("Hello").to_hex();

    assert_eq!(first, second);
    assert_eq!(first.len(), 66);
    assert!(first.starts_with("0x"));
    assert!(first[2..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn test_long_input_backends_agree() {
    let long: String = core::iter::repeat('a').take(1000).collect();
    let native = hash_content_with(HashBackend::Native, &long);
    let soft = hash_content_with(HashBackend::Software, &long);

    assert_eq!(native, soft);
    assert_eq!(
        native.to_hex(),
        "0x41edece42d63e8d9bf515a9ba6932e1c20cbc9f5a5d134645adb5db1b9737ea3"
    );
}

#[test]
fn test_no_normalization() {
    // Whitespace and line endings are content
    assert_ne!(hash_content("a\n"), hash_content("a\r\n"));
    assert_ne!(hash_content("a"), hash_content(" a"));
}

#[test]
fn test_raw_digest_helpers() {
    assert_eq!(
        encode_hex(&HashBackend::Software.digest(b"abc")),
        encode_hex(&HashBackend::Native.digest(b"abc"))
    );
}
