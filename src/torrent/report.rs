use serde::Serialize;

use crate::torrent::Torrent;

/// The fields handed to the printing layer by the `info` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoReport {
    pub announce: String,
    pub length: i64,
    pub info_hash: String,
    pub piece_length: i64,
    pub pieces: Vec<String>,
}

impl InfoReport {
    /// `missing_announce` is reported in place of an absent announce URL.
    pub fn new(torrent: &Torrent, missing_announce: &str) -> Self {
        InfoReport {
            announce: torrent.announce_or(missing_announce),
            length: torrent.info.length,
            info_hash: torrent.info_hash_hex(),
            piece_length: torrent.info.piece_length,
            pieces: torrent.piece_hashes_hex(),
        }
    }

    /// Plain text rendering, one field per line followed by the piece hashes.
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "Tracker URL: {}\nLength: {}\nInfo Hash: {}\nPiece Length: {}\nPiece Hashes:\n",
            self.announce, self.length, self.info_hash, self.piece_length
        );
        for piece in &self.pieces {
            out.push_str(piece);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::torrent::TorrentInfo;

    fn torrent(announce: Option<&str>) -> Torrent {
        Torrent {
            announce: announce.map(|a| a.as_bytes().to_vec()),
            info: TorrentInfo {
                name: Some("a".to_string()),
                length: 5,
                files: Vec::new(),
                piece_length: 4,
                pieces: vec![[0xab; 20], [0x01; 20]],
            },
            info_hash: [0x10; 20],
        }
    }

    #[test]
    fn test_report_fields() {
        let report = InfoReport::new(&torrent(Some("udp://t.example:80")), "No found URL");
        assert_eq!(report.announce, "udp://t.example:80");
        assert_eq!(report.info_hash, "10".repeat(20));
        assert_eq!(report.info_hash.len(), 40);
        assert_eq!(report.pieces, vec!["ab".repeat(20), "01".repeat(20)]);
    }

    #[test]
    fn test_report_placeholder() {
        let report = InfoReport::new(&torrent(None), "none");
        assert_eq!(report.announce, "none");
    }

    #[test]
    fn test_report_text() {
        let report = InfoReport::new(&torrent(None), "No found URL");
        let text = report.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Tracker URL: No found URL");
        assert_eq!(lines[1], "Length: 5");
        assert_eq!(lines[3], "Piece Length: 4");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_report_json() {
        let report = InfoReport::new(&torrent(None), "-");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["length"], 5);
        assert_eq!(json["pieces"].as_array().unwrap().len(), 2);
    }
}
