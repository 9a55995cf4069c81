// infohash.rs
use sha1::{Digest, Sha1};

use crate::bencode::{encode_bvalue, BValue};

/// SHA-1 of the canonical encoding of an `info` dictionary.
///
/// The value is re-encoded rather than hashed from the source bytes, so two
/// inputs that only differ in key order produce the same hash.
pub fn calculate_info_hash(info: &BValue) -> [u8; 20] {
    let encoded = encode_bvalue(info);

    let mut hasher = Sha1::new();
    hasher.update(&encoded);
    let result = hasher.finalize();

    let mut hash_bytes = [0u8; 20];
    hash_bytes.copy_from_slice(&result);
    hash_bytes
}
