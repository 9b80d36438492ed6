// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Per-album caption sidecar loading
//!
//! A sidecar is a plain text file inside an album directory:
//!
//! ```text
//! # comments and blank lines are ignored
//! sunset.jpg : Golden Hour
//! ```

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error};

/// Separator between filename and caption on a sidecar line
pub const CAPTION_DELIMITER: &str = " : ";

/// Filename to caption mapping for a single album
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptionMap {
    captions: HashMap<String, String>,
    malformed: usize,
}

impl CaptionMap {
    /// Caption for an exact (case-sensitive) filename
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.captions.get(file_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// Number of non-comment lines that did not yield an entry
    pub fn malformed_lines(&self) -> usize {
        self.malformed
    }

    /// Entries sorted by filename
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .captions
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort();
        entries
    }
}

/// Parse sidecar text into a caption map
pub fn parse_captions(content: &str) -> CaptionMap {
    let mut map = CaptionMap::default();

    for line in content.split('\n') {
        let trimmed = trim(line);
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Some((file_name, caption)) => {
                map.captions.insert(file_name.to_string(), caption.to_string());
            }
            None => {
                debug!("Skipping malformed caption line: {:?}", line);
                map.malformed += 1;
            }
        }
    }

    map
}

/// Whitespace trim that also drops a byte-order mark
fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Exactly one delimiter, with both sides non-empty after trimming
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(CAPTION_DELIMITER);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(caption), None) => {
            let (name, caption) = (trim(name), trim(caption));
            if name.is_empty() || caption.is_empty() {
                None
            } else {
                Some((name, caption))
            }
        }
        _ => None,
    }
}

/// Load the caption sidecar for an album
///
/// A missing sidecar yields an empty map. An unreadable one is logged and
/// also yields an empty map, so one bad album never stops the build.
/// Invalid UTF-8 is decoded lossily; only the affected line changes.
pub fn load_captions(album_dir: &Path, captions_file: &str) -> CaptionMap {
    let path = album_dir.join(captions_file);
    if !path.exists() {
        return CaptionMap::default();
    }

    match std::fs::read(&path) {
        Ok(bytes) => parse_captions(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            error!("Error reading {} in {:?}: {}", captions_file, album_dir, e);
            CaptionMap::default()
        }
    }
}
