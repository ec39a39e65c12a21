use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command already registered: {0}")]
    DuplicateCommand(String),

    #[error("Provider already registered: {0}")]
    DuplicateProvider(String),
}
