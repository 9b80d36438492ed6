// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for Folio

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Build configuration
///
/// Every path the builder touches comes from here, so a build can be pointed
/// at any directory tree.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    /// Root directory holding one subdirectory per album
    #[serde(default = "default_photos_dir")]
    pub photos_dir: PathBuf,

    /// Where the portfolio document is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Prefix for each photo's `src` (`<prefix>/<album>/<file>`)
    #[serde(default = "default_src_prefix")]
    pub src_prefix: String,

    /// Name of the per-album caption sidecar
    #[serde(default = "default_captions_file")]
    pub captions_file: String,

    /// Extensions treated as images (matched case-insensitively)
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Sort albums and files by name instead of using directory listing order
    #[serde(default = "default_true")]
    pub sort_entries: bool,
}

// Default value functions
fn default_photos_dir() -> PathBuf { PathBuf::from("photos") }
fn default_output_path() -> PathBuf { PathBuf::from("portfolio-data.json") }
fn default_src_prefix() -> String { "photos".to_string() }
fn default_captions_file() -> String { "captions.txt".to_string() }
fn default_true() -> bool { true }

fn default_image_extensions() -> Vec<String> {
    vec!["jpg", "jpeg", "png", "gif", "webp"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            photos_dir: default_photos_dir(),
            output_path: default_output_path(),
            src_prefix: default_src_prefix(),
            captions_file: default_captions_file(),
            image_extensions: default_image_extensions(),
            sort_entries: true,
        }
    }
}

impl BuildConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = serde_json::from_str(&content)
                .map_err(|e| crate::FolioError::Config(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::info!("Config file not found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject an unusable sidecar name and empty or blank image extensions.
    /// A blank extension would match names ending in a bare dot.
    pub fn validate(&self) -> crate::Result<()> {
        if self.captions_file.trim().is_empty() {
            return Err(crate::FolioError::Config(
                "captions_file must not be empty".to_string(),
            ));
        }
        if self.image_extensions.is_empty() {
            return Err(crate::FolioError::Config(
                "image_extensions must name at least one extension".to_string(),
            ));
        }
        if self
            .image_extensions
            .iter()
            .any(|e| e.trim_start_matches('.').trim().is_empty())
        {
            return Err(crate::FolioError::Config(
                "image_extensions must not contain blank entries".to_string(),
            ));
        }
        Ok(())
    }
}
