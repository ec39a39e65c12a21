use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Registry error: {0}")]
    Registry(#[from] palette_registry::RegistryError),

    #[error("Provider task aborted: {0}")]
    Join(String),

    #[error("Invalid palette config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
