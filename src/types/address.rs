// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Account and contract addresses.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::config::ADDRESS_LEN;
use crate::error::{KernelError, Result};
use crate::types::{decode_hex_fixed, encode_hex};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub fn is_zero(&self) -> bool {
        *self == Address::ZERO
    }

    pub fn from_hex(text: &str) -> Result<Self> {
        decode_hex_fixed::<ADDRESS_LEN>(text).map(Address)
    }

    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }

    /// Short display form, `0x1234...abcd`.
    pub fn truncated(&self) -> String {
        let full = self.to_hex();
        let mut out = String::with_capacity(13);
        out.push_str(&full[..6]);
        out.push_str("...");
        out.push_str(&full[full.len() - 4..]);
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for b in self.0.iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        Address::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        struct AddressVisitor;

        impl<'de> Visitor<'de> for AddressVisitor {
            type Value = Address;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 0x-prefixed 20-byte address")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<Address, E> {
                Address::from_hex(v).map_err(|e| E::custom(e))
            }
        }

        deserializer.deserialize_str(AddressVisitor)
    }
}
