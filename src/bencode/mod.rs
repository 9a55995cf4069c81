pub mod bvalue;
pub mod decode;
pub mod encode;
pub mod error;

pub use bvalue::BValue;   // re-export
pub use decode::{decode_bencode, decode_bencode_with_depth, DEFAULT_MAX_DEPTH};   // re-export
pub use encode::{bvalue_to_json, encode_bvalue, encode_into};   // re-export
pub use error::BencodeError;
