use log::{debug, warn};

use crate::bencode::{decode_bencode_with_depth, BValue, BencodeError, DEFAULT_MAX_DEPTH};
use crate::torrent::{calculate_info_hash, TorrentError};

/// Size of one SHA-1 piece hash inside `info.pieces`.
pub const PIECE_HASH_LEN: usize = 20;

/// Metadata extracted from a decoded .torrent dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Torrent {
    pub announce: Option<Vec<u8>>, // The tracker URL, raw bytes
    pub info: TorrentInfo,         // Torrent metadata
    pub info_hash: [u8; 20],       // SHA-1 of the canonical `info` encoding
}

/// Contains detailed metadata about the torrent's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentInfo {
    pub name: Option<String>,   // Name of the file or folder
    pub length: i64,            // Reported size, see `resolve_length`
    pub files: Vec<FileEntry>,  // Empty for single-file torrents
    pub piece_length: i64,      // Size of each piece
    pub pieces: Vec<[u8; 20]>,  // SHA-1 hashes are 20 bytes each
}

/// One entry of a multi-file `info.files` list.
///
/// Entries are collected as-is: a missing `length` is `None` and a missing
/// `path` is empty, so a sloppy entry never fails extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub length: Option<i64>,
    pub path: Vec<String>,
}

impl Torrent {
    /// Decodes a whole .torrent buffer and extracts its metadata.
    pub fn from_bytes(input: &[u8]) -> Result<Self, TorrentError> {
        Self::from_bytes_with_depth(input, DEFAULT_MAX_DEPTH)
    }

    /// Same as [`Torrent::from_bytes`] with a caller supplied nesting limit.
    pub fn from_bytes_with_depth(input: &[u8], max_depth: usize) -> Result<Self, TorrentError> {
        let (value, rest) = decode_bencode_with_depth(input, max_depth)?;
        if !rest.is_empty() {
            warn!("Ignoring {} trailing bytes after torrent dictionary", rest.len());
        }
        Self::from_bvalue(&value)
    }

    /// Creates a `Torrent` from a `BValue` (the result of a bencode parse).
    pub fn from_bvalue(value: &BValue) -> Result<Self, TorrentError> {
        // Root of a .torrent must be a dictionary
        value.as_dict()?;

        let announce = optional_field(value, "announce")?
            .map(|v| v.as_bytes().map(<[u8]>::to_vec))
            .transpose()?;
        if announce.is_none() {
            debug!("Torrent has no 'announce' key");
        }

        let info_value = field(value, "info")?;
        let info = TorrentInfo::from_bvalue(info_value)?;
        let info_hash = calculate_info_hash(info_value);
        debug!(
            "Extracted torrent: {} pieces, info hash {}",
            info.pieces.len(),
            hex::encode(info_hash)
        );

        Ok(Torrent {
            announce,
            info,
            info_hash,
        })
    }

    /// Announce URL as text, or `placeholder` when the torrent has none.
    pub fn announce_or(&self, placeholder: &str) -> String {
        match &self.announce {
            Some(url) => String::from_utf8_lossy(url).into_owned(),
            None => placeholder.to_string(),
        }
    }

    /// Info hash as 40 lowercase hex characters.
    pub fn info_hash_hex(&self) -> String {
        hex::encode(self.info_hash)
    }

    pub fn piece_hashes_hex(&self) -> Vec<String> {
        self.info.pieces.iter().map(hex::encode).collect()
    }
}

impl TorrentInfo {
    pub fn from_bvalue(info: &BValue) -> Result<Self, TorrentError> {
        info.as_dict()?;

        let name = optional_field(info, "name")?
            .map(|v| v.as_bytes().map(|b| String::from_utf8_lossy(b).into_owned()))
            .transpose()?;
        let files = optional_field(info, "files")?
            .map(collect_files)
            .unwrap_or_default();
        let length = resolve_length(info)?;
        let piece_length = get_integer(info, "piece length")?;
        let pieces = split_piece_hashes(lookup_bytestring(info, "pieces")?)?;

        Ok(TorrentInfo {
            name,
            length,
            files,
            piece_length,
            pieces,
        })
    }

    /// Sum of every file length for multi-file torrents, `length` otherwise.
    ///
    /// Unlike `length` this accounts for all entries of `files`.
    pub fn total_file_length(&self) -> i64 {
        if self.files.is_empty() {
            self.length
        } else {
            self.files.iter().filter_map(|f| f.length).sum()
        }
    }
}

/// Multi-file torrents report the length of the first entry in `files`.
/// When that does not resolve (no `files`, an empty list, or a first entry
/// without `length`) the single-file `info.length` is used instead.
fn resolve_length(info: &BValue) -> Result<i64, TorrentError> {
    let first_file_length = optional_field(info, "files")?
        .and_then(|files| files.as_list().ok())
        .and_then(|files| files.first())
        .and_then(|first| first.get(b"length").ok())
        .and_then(|length| length.as_integer().ok());

    match first_file_length {
        Some(length) => Ok(length),
        None => get_integer(info, "length"),
    }
}

fn collect_files(list: &BValue) -> Vec<FileEntry> {
    let entries = match list.as_list() {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Ignoring 'files': {}", e);
            return Vec::new();
        }
    };

    entries
        .iter()
        .map(|entry| FileEntry {
            length: entry.get(b"length").and_then(BValue::as_integer).ok(),
            path: entry
                .get(b"path")
                .and_then(BValue::as_list)
                .map(|parts| {
                    parts
                        .iter()
                        .filter_map(|part| part.as_bytes().ok())
                        .map(|b| String::from_utf8_lossy(b).into_owned())
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

/// Splits the concatenated `pieces` blob into 20-byte hashes, in order.
pub fn split_piece_hashes(blob: &[u8]) -> Result<Vec<[u8; 20]>, TorrentError> {
    if blob.len() % PIECE_HASH_LEN != 0 {
        return Err(TorrentError::CorruptPieceData(blob.len()));
    }

    Ok(blob
        .chunks_exact(PIECE_HASH_LEN)
        .map(|chunk| {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(chunk);
            hash
        })
        .collect())
}

/// Looks up `key`, turning a missing key into `MissingField`.
fn field<'a>(dict: &'a BValue, key: &str) -> Result<&'a BValue, TorrentError> {
    dict.get(key.as_bytes()).map_err(|e| match e {
        BencodeError::KeyNotFound(_) => TorrentError::MissingField(key.to_string()),
        other => other.into(),
    })
}

fn optional_field<'a>(dict: &'a BValue, key: &str) -> Result<Option<&'a BValue>, TorrentError> {
    match field(dict, key) {
        Ok(v) => Ok(Some(v)),
        Err(TorrentError::MissingField(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Looks up a key in the dictionary and returns a byte slice if the value is a ByteString.
pub fn lookup_bytestring<'a>(dict: &'a BValue, key: &str) -> Result<&'a [u8], TorrentError> {
    Ok(field(dict, key)?.as_bytes()?)
}

/// Retrieves an integer value from the dictionary.
pub fn get_integer(dict: &BValue, key: &str) -> Result<i64, TorrentError> {
    Ok(field(dict, key)?.as_integer()?)
}
