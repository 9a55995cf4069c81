use thiserror::Error;

use crate::bencode::BencodeError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TorrentError {
    #[error("Bencode error: {0}")]
    Bencode(#[from] BencodeError),

    #[error("Missing field '{0}'")]
    MissingField(String),

    #[error("Corrupt piece data: {0} bytes is not a multiple of 20")]
    CorruptPieceData(usize),
}
