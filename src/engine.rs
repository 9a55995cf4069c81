// src/engine.rs
use std::fs;
use std::path::Path;

use anyhow::Context;
use log::{debug, info};

use crate::bencode::{bvalue_to_json, decode_bencode_with_depth};
use crate::config::Config;
use crate::torrent::{InfoReport, Torrent};

/// `decode <bencoded_string>`: decodes the first value and renders it as JSON.
pub fn decode_command(input: &[u8], config: &Config) -> anyhow::Result<String> {
    let (value, rest) = decode_bencode_with_depth(input, config.max_depth)?;
    if !rest.is_empty() {
        debug!("{} bytes left after decoded value", rest.len());
    }
    let json_val = bvalue_to_json(&value);
    Ok(serde_json::to_string(&json_val)?)
}

/// `info <file.torrent>`: reads the file and renders its metadata report.
pub fn info_command<P: AsRef<Path>>(path: P, config: &Config, json: bool) -> anyhow::Result<String> {
    let path = path.as_ref();
    let buf = read_file(path)?;

    let torrent = Torrent::from_bytes_with_depth(&buf, config.max_depth)
        .with_context(|| format!("Error reading torrent {}", path.display()))?;

    let report = InfoReport::new(&torrent, &config.missing_announce);
    if json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(report.to_text())
    }
}

/// `contents <file>`: decodes a whole bencoded file and dumps the value tree as JSON.
pub fn contents_command<P: AsRef<Path>>(path: P, config: &Config) -> anyhow::Result<String> {
    let path = path.as_ref();
    let buf = read_file(path)?;

    let (value, rest) = decode_bencode_with_depth(&buf, config.max_depth)
        .with_context(|| format!("Bencode error in {}", path.display()))?;
    if !rest.is_empty() {
        debug!("{} bytes left after decoded value", rest.len());
    }
    Ok(serde_json::to_string_pretty(&bvalue_to_json(&value))?)
}

fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    let buf = fs::read(path).with_context(|| format!("I/O error while reading {}", path.display()))?;
    info!("Read {} bytes from {}", buf.len(), path.display());
    Ok(buf)
}
