//! Placeholder manifest packages.
//!
//! A package is a zip holding a Lua depot script (`{app}.lua`) and a
//! placeholder manifest (`{app}_{depot}.manifest`). Neither contains real
//! Steam manifest data.

pub mod archive;
pub mod error;
pub mod render;

use chrono::{DateTime, Utc};
use depotgen_core::ManifestRequest;

pub use archive::{package_archive, ArchiveEntry};
pub use error::ManifestError;
pub use render::{render_lua_script, render_placeholder_manifest, DEPOT_KEY_PLACEHOLDER};

/// A finished package ready to be served or written to disk.
#[derive(Debug, Clone)]
pub struct ManifestPackage {
    /// Suggested download name, e.g. `manifest_730_731.zip`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Renders both package files for `request` and zips them.
///
/// # Errors
///
/// Returns [`ManifestError`] if the archive cannot be written.
pub fn build_manifest_package(
    request: &ManifestRequest,
    generated_at: DateTime<Utc>,
) -> Result<ManifestPackage, ManifestError> {
    let entries = [
        ArchiveEntry::new(
            format!("{}.lua", request.app_id),
            render_lua_script(request).into_bytes(),
        ),
        ArchiveEntry::new(
            format!("{}_{}.manifest", request.app_id, request.depot_id),
            render_placeholder_manifest(request, generated_at).into_bytes(),
        ),
    ];

    let bytes = package_archive(&entries)?;
    tracing::debug!(
        app_id = %request.app_id,
        depot_id = %request.depot_id,
        bytes = bytes.len(),
        "manifest package built"
    );

    Ok(ManifestPackage {
        file_name: format!("manifest_{}_{}.zip", request.app_id, request.depot_id),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use chrono::TimeZone;

    use super::*;

    fn request() -> ManifestRequest {
        ManifestRequest::validate(Some("730"), Some("731"), None).expect("valid request")
    }

    #[test]
    fn package_is_named_after_app_and_depot() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let package = build_manifest_package(&request(), now).unwrap();
        assert_eq!(package.file_name, "manifest_730_731.zip");
    }

    #[test]
    fn package_contains_script_and_manifest() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let package = build_manifest_package(&request(), now).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(package.bytes)).expect("valid zip");
        assert_eq!(archive.len(), 2);

        let mut script = String::new();
        archive
            .by_name("730.lua")
            .expect("lua entry")
            .read_to_string(&mut script)
            .unwrap();
        assert!(script.contains("appid = 730"));
        assert!(script.contains("[731] = {"));

        let mut manifest = String::new();
        archive
            .by_name("730_731.manifest")
            .expect("manifest entry")
            .read_to_string(&mut manifest)
            .unwrap();
        assert!(manifest.contains("Generated at: 2024-05-01T12:00:00"));
    }
}
