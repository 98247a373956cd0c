//! # Lander Bundle
//!
//! Packages a page as a self-contained static site archive:
//!
//! ```text
//! index.html      export HTML linking the files below
//! style.css
//! script.js
//! README.txt      usage note listing the files
//! images/...      every embedded asset, deterministically named
//! ```
//!
//! The archive is built entirely in memory and handed to the output stream
//! in one write, so a failure never leaves a truncated archive behind.

pub mod archive;
pub mod error;
pub mod package;

pub use archive::{archive_bytes, write_archive, write_archive_file};
pub use error::BundleError;
pub use package::{ArchiveEntry, ExportPackage, PackageOptions, README_FILE};
