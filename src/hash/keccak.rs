//! Keccak-256 (the pre-NIST padding variant used by contract ABIs).

use sha3::{Digest, Keccak256};

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}
