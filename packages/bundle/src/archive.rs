//! Zip archive writer.
//!
//! Entries are compressed into an in-memory buffer first; the target only
//! sees the finished archive, in a single write.

use crate::error::{BundleError, Result};
use crate::package::ArchiveEntry;
use std::collections::HashSet;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Compress entries into zip bytes, preserving their order
pub fn archive_bytes(entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
    let mut seen = HashSet::new();
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for entry in entries {
        if !seen.insert(entry.name.as_str()) {
            return Err(BundleError::DuplicateEntry(entry.name.clone()));
        }
        zip.start_file(entry.name.as_str(), options)?;
        zip.write_all(&entry.bytes)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Build the archive and write it to `writer`. Returns the archive size.
pub fn write_archive<W: Write>(entries: &[ArchiveEntry], mut writer: W) -> Result<u64> {
    let bytes = archive_bytes(entries)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    tracing::debug!("wrote archive: {} entries, {} bytes", entries.len(), bytes.len());
    Ok(bytes.len() as u64)
}

/// Write the archive to a file. The file appears only once complete.
pub fn write_archive_file(entries: &[ArchiveEntry], path: &Path) -> Result<u64> {
    let bytes = archive_bytes(entries)?;

    let mut partial = path.as_os_str().to_owned();
    partial.push(".partial");
    let partial = Path::new(&partial).to_path_buf();

    if let Err(e) = fs::write(&partial, &bytes) {
        let _ = fs::remove_file(&partial);
        tracing::error!("failed to write {}: {}", partial.display(), e);
        return Err(e.into());
    }
    fs::rename(&partial, path)?;

    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Read};
    use zip::ZipArchive;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn entries() -> Vec<ArchiveEntry> {
        vec![
            ArchiveEntry::new("index.html", "<html></html>"),
            ArchiveEntry::new("images/part-0.jpg", vec![0xffu8, 0xd8, 0xff]),
        ]
    }

    #[test]
    fn test_entries_keep_order_and_bytes() {
        let bytes = archive_bytes(&entries()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0).unwrap().name(), "index.html");

        let mut image = Vec::new();
        archive
            .by_name("images/part-0.jpg")
            .unwrap()
            .read_to_end(&mut image)
            .unwrap();
        assert_eq!(image, [0xff, 0xd8, 0xff]);
    }

    #[test]
    fn test_archive_is_deterministic() {
        assert_eq!(archive_bytes(&entries()).unwrap(), archive_bytes(&entries()).unwrap());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut duplicated = entries();
        duplicated.push(ArchiveEntry::new("index.html", "again"));
        assert!(matches!(
            archive_bytes(&duplicated),
            Err(BundleError::DuplicateEntry(name)) if name == "index.html"
        ));
    }

    #[test]
    fn test_stream_failure_is_reported() {
        assert!(matches!(
            write_archive(&entries(), FailingWriter),
            Err(BundleError::Io(_))
        ));
    }
}
