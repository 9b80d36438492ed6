// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Portfolio scanning and serialization
//!
//! Walks `<photos_dir>/<album>/<image>`, resolves a caption for each image and
//! writes the whole portfolio as one JSON object keyed by album name.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::captions::load_captions;
use crate::config::BuildConfig;
use crate::{FolioError, Result};

/// A single image in an album
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PhotoRecord {
    /// File name inside the album directory
    pub name: String,
    /// Path relative to the site root
    pub src: String,
    pub caption: String,
}

/// An album and its photos, in output order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub name: String,
    pub photos: Vec<PhotoRecord>,
}

/// The full portfolio document
///
/// Serializes as a JSON object whose keys keep the order albums were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portfolio {
    albums: Vec<Album>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, album: Album) {
        self.albums.push(album);
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// Look up an album by name
    pub fn album(&self, name: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.name == name)
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// Total photos across all albums
    pub fn photo_count(&self) -> usize {
        self.albums.iter().map(|a| a.photos.len()).sum()
    }
}

impl Serialize for Portfolio {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.albums.len()))?;
        for album in &self.albums {
            map.serialize_entry(&album.name, &album.photos)?;
        }
        map.end()
    }
}

/// Counts gathered during a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub albums: usize,
    pub photos: usize,
    /// Photos whose caption came from a sidecar
    pub explicit_captions: usize,
    /// Photos whose caption was derived from the file name
    pub default_captions: usize,
    /// Non-image files ignored (sidecars included)
    pub skipped_files: usize,
    /// Sidecar lines that were neither comments nor valid entries
    pub malformed_lines: usize,
}

/// Check whether a file name carries one of the image extensions
pub fn is_image(file_name: &str, extensions: &[String]) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Caption used when a sidecar has no entry: the name without its extension,
/// underscores turned into spaces
pub fn default_caption(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };
    stem.replace('_', " ")
}

fn photo_src(prefix: &str, album: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        format!("{}/{}", album, file_name)
    } else {
        format!("{}/{}/{}", prefix, album, file_name)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
}

/// Names of the directories or regular files directly inside `dir`
fn list_names(dir: &Path, kind: EntryKind, sort: bool) -> io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let matches = match kind {
            EntryKind::Dir => path.is_dir(),
            EntryKind::File => path.is_file(),
        };
        if !matches {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => warn!("Skipping non UTF-8 name in {:?}: {:?}", dir, raw),
        }
    }

    if sort {
        names.sort();
    }
    Ok(names)
}

/// Scan the photos directory into a portfolio without writing anything
pub fn scan(config: &BuildConfig) -> Result<(Portfolio, BuildSummary)> {
    let root = &config.photos_dir;
    info!("Scanning for albums in: {:?}", root);

    let album_names = list_names(root, EntryKind::Dir, config.sort_entries).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            FolioError::DirectoryNotFound(root.clone())
        } else {
            FolioError::FileSystem(e)
        }
    })?;

    if album_names.is_empty() {
        warn!("No album folders found in {:?}", root);
    } else {
        info!("Found {} albums: {}", album_names.len(), album_names.join(", "));
    }

    let mut portfolio = Portfolio::new();
    let mut summary = BuildSummary {
        albums: album_names.len(),
        ..BuildSummary::default()
    };

    for album_name in album_names {
        let album_path = root.join(&album_name);

        let captions = load_captions(&album_path, &config.captions_file);
        if !captions.is_empty() {
            info!("- Found {} captions in '{}' album.", captions.len(), album_name);
        }
        summary.malformed_lines += captions.malformed_lines();

        let mut photos = Vec::new();
        for file_name in list_names(&album_path, EntryKind::File, config.sort_entries)? {
            if !is_image(&file_name, &config.image_extensions) {
                debug!("Ignoring non-image file: {}/{}", album_name, file_name);
                summary.skipped_files += 1;
                continue;
            }

            let caption = match captions.get(&file_name) {
                Some(caption) => {
                    summary.explicit_captions += 1;
                    caption.to_string()
                }
                None => {
                    summary.default_captions += 1;
                    default_caption(&file_name)
                }
            };

            photos.push(PhotoRecord {
                src: photo_src(&config.src_prefix, &album_name, &file_name),
                name: file_name,
                caption,
            });
        }

        summary.photos += photos.len();
        portfolio.push(Album {
            name: album_name,
            photos,
        });
    }

    Ok((portfolio, summary))
}

/// Render the portfolio as JSON indented with four spaces
pub fn render(portfolio: &Portfolio) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    portfolio.serialize(&mut serializer)?;
    Ok(buf)
}

/// Write the portfolio to `path`, replacing any previous document
///
/// The document goes to a temporary file beside `path` and is renamed over
/// it, so a failed write leaves the previous document intact.
pub fn write_portfolio(portfolio: &Portfolio, path: &Path) -> Result<()> {
    let json = render(portfolio)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;

    // Temp files are created 0600; keep the old mode or fall back to 0644
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(path)
            .map(|m| m.permissions().mode() & 0o7777)
            .unwrap_or(0o644);
        tmp.as_file().set_permissions(fs::Permissions::from_mode(mode))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Scan and write in one pass
///
/// The scan finishes before the output is touched, so a failed scan leaves
/// the previous document in place.
pub fn build(config: &BuildConfig) -> Result<BuildSummary> {
    let (portfolio, summary) = scan(config)?;
    write_portfolio(&portfolio, &config.output_path)?;

    info!(
        "Wrote {} photos in {} albums ({} captioned, {} default, {} files skipped, {} malformed caption lines)",
        summary.photos,
        summary.albums,
        summary.explicit_captions,
        summary.default_captions,
        summary.skipped_files,
        summary.malformed_lines,
    );

    Ok(summary)
}
