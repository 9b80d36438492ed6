// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Folio: Photo Portfolio Data Generator
//!
//! Scans a directory of photo albums, resolves a caption for every image from
//! a per-album sidecar file (or the file name), and writes a single JSON
//! document for a static site to consume.

pub mod captions;
pub mod config;
pub mod error;
pub mod portfolio;

pub use captions::{load_captions, parse_captions, CaptionMap};
pub use config::BuildConfig;
pub use error::{FolioError, Result};
pub use portfolio::{build, scan, Album, BuildSummary, PhotoRecord, Portfolio};
