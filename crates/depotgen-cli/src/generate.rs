//! `generate` subcommand: write a manifest package to disk.

use std::path::{Path, PathBuf};

use chrono::Utc;
use depotgen_core::ManifestRequest;

pub(crate) async fn run_generate(
    app_id: &str,
    depot_id: &str,
    manifest_id: Option<&str>,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let request = ManifestRequest::validate(Some(app_id), Some(depot_id), manifest_id)?;
    let package = depotgen_manifest::build_manifest_package(&request, Utc::now())?;

    let target = output_path(out, &package.file_name).await;
    tokio::fs::write(&target, &package.bytes).await?;

    tracing::info!(path = %target.display(), bytes = package.bytes.len(), "package written");
    println!("{}", target.display());
    Ok(())
}

/// `out` when it names a file, `out/<file_name>` when it is an existing
/// directory, `./<file_name>` when absent.
async fn output_path(out: Option<&Path>, file_name: &str) -> PathBuf {
    match out {
        None => PathBuf::from(file_name),
        Some(path) => {
            let is_dir = tokio::fs::metadata(path)
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false);
            if is_dir {
                path.join(file_name)
            } else {
                path.to_path_buf()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "depotgen-cli-{name}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[tokio::test]
    async fn output_path_defaults_to_file_name() {
        assert_eq!(
            output_path(None, "manifest_1_2.zip").await,
            PathBuf::from("manifest_1_2.zip")
        );
    }

    #[tokio::test]
    async fn output_path_joins_existing_directory() {
        let dir = scratch_dir("join");
        assert_eq!(
            output_path(Some(&dir), "manifest_1_2.zip").await,
            dir.join("manifest_1_2.zip")
        );
        let file = dir.join("custom.zip");
        assert_eq!(output_path(Some(&file), "manifest_1_2.zip").await, file);
    }

    #[tokio::test]
    async fn run_generate_writes_zip() {
        let dir = scratch_dir("write");
        run_generate("730", "731", None, Some(&dir))
            .await
            .expect("generate");

        let bytes = std::fs::read(dir.join("manifest_730_731.zip")).expect("zip written");
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn run_generate_rejects_non_numeric_ids() {
        let err = run_generate("abc", "731", None, None)
            .await
            .expect_err("invalid id");
        assert!(err.to_string().contains("valid numbers"));
    }
}
