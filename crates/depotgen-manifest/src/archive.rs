//! Zip packaging of named byte buffers.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ManifestError;

/// One named file inside a package archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Writes `entries` into an in-memory deflated zip, in the given order.
///
/// # Errors
///
/// Returns [`ManifestError::DuplicateEntry`] if two entries share a name, or
/// [`ManifestError::Archive`] / [`ManifestError::Io`] if writing fails.
pub fn package_archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ManifestError> {
    let mut seen = HashSet::new();
    if let Some(dup) = entries.iter().find(|e| !seen.insert(e.name.as_str())) {
        return Err(ManifestError::DuplicateEntry(dup.name.clone()));
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for entry in entries {
        writer.start_file(entry.name.as_str(), options)?;
        writer.write_all(&entry.bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}
