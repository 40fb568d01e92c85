// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-width 32-byte hashes.
//!
//! Both types print as `0x` followed by 64 lowercase hex digits (66 characters)
//! and serialize as that text.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::config::{HASH_LEN, NULL_HASH};
use crate::error::{KernelError, Result};
use crate::types::{decode_hex_fixed, encode_hex};

macro_rules! hash32 {
    ($name:ident, $what:literal) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[repr(transparent)]
        pub struct $name(pub [u8; HASH_LEN]);

        impl $name {
            pub const fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
                $name(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
                &self.0
            }

            pub fn from_slice(bytes: &[u8]) -> Result<Self> {
                let arr: [u8; HASH_LEN] = bytes.try_into().map_err(|_| KernelError::InvalidLength {
                    expected: HASH_LEN,
                    found: bytes.len(),
                })?;
                Ok($name(arr))
            }

            /// Parses hex text, `0x` prefix optional, any case.
            pub fn from_hex(text: &str) -> Result<Self> {
                decode_hex_fixed::<HASH_LEN>(text).map($name)
            }

            pub fn to_hex(&self) -> String {
                encode_hex(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("0x")?;
                for b in self.0.iter() {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = KernelError;

            fn from_str(s: &str) -> Result<Self> {
                $name::from_hex(s)
            }
        }

        impl From<[u8; HASH_LEN]> for $name {
            fn from(bytes: [u8; HASH_LEN]) -> Self {
                $name(bytes)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
                struct HexVisitor;

                impl<'de> Visitor<'de> for HexVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str($what)
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<$name, E> {
                        $name::from_hex(v).map_err(|e| E::custom(e))
                    }
                }

                deserializer.deserialize_str(HexVisitor)
            }
        }
    };
}

hash32!(ContentHash, "a 0x-prefixed 32-byte content hash");
hash32!(TxHash, "a 0x-prefixed 32-byte transaction hash");

impl ContentHash {
    /// Previous-hash sentinel carried by version 1.
    pub const NULL: ContentHash = ContentHash(NULL_HASH);

    pub fn is_null(&self) -> bool {
        self.0 == NULL_HASH
    }

    /// Stored rows may hold no previous hash for the first version.
    pub fn or_null(hash: Option<ContentHash>) -> ContentHash {
        hash.unwrap_or(ContentHash::NULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_text_form() {
        let h = ContentHash::from_bytes([0xab; 32]);
        let text = h.to_hex();
        assert_eq!(text.len(), 66);
        assert!(text.starts_with("0xabab"));
        assert_eq!(format!("{}", h), text);
        assert_eq!(ContentHash::from_hex(&text).unwrap(), h);
        assert_eq!(ContentHash::from_hex(&text.to_uppercase()[2..]).unwrap(), h);
    }

    #[test]
    fn test_hash_rejects_wrong_length() {
        assert!(matches!(
            TxHash::from_hex("0x1234"),
            Err(KernelError::InvalidLength { expected: 32, .. })
        ));
        assert_eq!(ContentHash::from_hex(&"zz".repeat(32)), Err(KernelError::InvalidHex));
    }

    #[test]
    fn test_null_sentinel() {
        assert!(ContentHash::NULL.is_null());
        assert_eq!(ContentHash::or_null(None), ContentHash::NULL);
        assert_eq!(ContentHash::NULL.to_hex(), format!("0x{}", "0".repeat(64)));
    }
}
