use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("zip archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error while writing archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("duplicate archive entry: {0}")]
    DuplicateEntry(String),
}
