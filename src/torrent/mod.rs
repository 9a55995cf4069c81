pub mod error;
pub mod infohash;
pub mod metadata;
pub mod report;

pub use error::TorrentError;
pub use infohash::calculate_info_hash;
pub use metadata::{split_piece_hashes, FileEntry, Torrent, TorrentInfo, PIECE_HASH_LEN};
pub use report::InfoReport;
