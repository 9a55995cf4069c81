// lib.rs - Library interface for the bencode/torrent info CLI

pub mod bencode;
pub mod config;
pub mod engine;
pub mod torrent;

// Re-export commonly used types for easier testing
pub use bencode::{decode_bencode, encode_bvalue, BValue, BencodeError};
pub use config::Config;
pub use torrent::{InfoReport, Torrent, TorrentError};
