use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Custom(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Walk(#[from] walkdir::Error),

    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    TimeFormat(#[from] time::error::Format),

    #[error("manifest not found: {0}")]
    ManifestNotFound(String),

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("root is not a directory: {0}")]
    RootNotFound(String),

    #[error("command failed: {0}")]
    CommandFailed(String),
}

impl Error {
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        Error::Custom(msg.into())
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Custom(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Custom(err)
    }
}
