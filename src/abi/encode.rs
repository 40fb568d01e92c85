// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Call data encoding.

use alloc::string::String;
use alloc::vec::Vec;

use byteorder::{BigEndian, ByteOrder};

use crate::abi::selector::{parse_params, Function, Selector};
use crate::abi::{AbiType, AbiValue, Word};
use crate::config::{SELECTOR_LEN, WORD_LEN};
use crate::error::{KernelError, Result};

/// Encodes `uint256` into one big-endian word.
pub fn uint_word(n: u128) -> Word {
    let mut word = [0u8; WORD_LEN];
    BigEndian::write_u128(&mut word[16..], n);
    word
}

/// Head words followed by dynamic tails. Shape checks are the caller's job.
pub fn encode_args(args: &[AbiValue]) -> Vec<u8> {
    let head_len = args.len() * WORD_LEN;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for arg in args {
        match arg {
            AbiValue::Bytes32(word) => head.extend_from_slice(word),
            AbiValue::Uint256(n) => head.extend_from_slice(&uint_word(*n)),
            AbiValue::String(s) => {
                // Offset counts from the start of the argument block
                let offset = head_len + tail.len();
                head.extend_from_slice(&uint_word(offset as u128));
                encode_string_tail(s, &mut tail);
            }
        }
    }

    head.extend_from_slice(&tail);
    head
}

fn encode_string_tail(s: &str, out: &mut Vec<u8>) {
    let bytes = s.as_bytes();
    out.extend_from_slice(&uint_word(bytes.len() as u128));
    out.extend_from_slice(bytes);

    let pad = (WORD_LEN - bytes.len() % WORD_LEN) % WORD_LEN;
    out.resize(out.len() + pad, 0);
}

/// `selector ++ encode_args(args)`.
pub fn encode_call_data(selector: Selector, args: &[AbiValue]) -> Vec<u8> {
    let body = encode_args(args);
    let mut out = Vec::with_capacity(SELECTOR_LEN + body.len());
    out.extend_from_slice(&selector);
    out.extend_from_slice(&body);
    out
}

/// Encodes a call by canonical signature with textual type tags.
///
/// Checks, in order: the signature is part of the fixed interface, the
/// argument count matches its declaration, every tag is supported, and each
/// tag and value agree with the declared parameter.
pub fn encode_call(signature: &str, args: &[(&str, AbiValue)]) -> Result<Vec<u8>> {
    let function = Function::from_signature(signature)
        .ok_or_else(|| KernelError::UnknownFunction(String::from(signature)))?;

    let declared = parse_params(function.signature())?;
    if args.len() != declared.len() {
        return Err(KernelError::ArityMismatch {
            expected: declared.len(),
            found: args.len(),
        });
    }

    let mut values = Vec::with_capacity(args.len());
    for (index, ((tag, value), want)) in args.iter().zip(declared.iter()).enumerate() {
        let tag = AbiType::parse(tag)?;
        if tag != *want || value.kind() != tag {
            return Err(KernelError::TypeMismatch { index, expected: want.name() });
        }
        values.push(value.clone());
    }

    Ok(encode_call_data(function.selector(), &values))
}

impl Function {
    /// Typed encoding with arity and type checks.
    pub fn encode(&self, args: &[AbiValue]) -> Result<Vec<u8>> {
        let declared = self.params();
        if args.len() != declared.len() {
            return Err(KernelError::ArityMismatch {
                expected: declared.len(),
                found: args.len(),
            });
        }
        for (index, (value, want)) in args.iter().zip(declared.iter()).enumerate() {
            if value.kind() != *want {
                return Err(KernelError::TypeMismatch { index, expected: want.name() });
            }
        }
        Ok(encode_call_data(self.selector(), args))
    }
}
