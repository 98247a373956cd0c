use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate archive entry: {0}")]
    DuplicateEntry(String),
}

pub type Result<T> = std::result::Result<T, BundleError>;
