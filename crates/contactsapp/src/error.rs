use crate::model::{ContactId, UniqueField};
use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Contact not found: {0}")]
    NotFound(ContactId),

    #[error("A contact with this {0} already exists")]
    DuplicateField(UniqueField),

    #[error("Invalid contact: {0}")]
    Validation(ValidationErrors),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for ContactsError {
    fn from(err: reqwest::Error) -> Self {
        ContactsError::Network(err.to_string())
    }
}

impl From<ValidationErrors> for ContactsError {
    fn from(errors: ValidationErrors) -> Self {
        ContactsError::Validation(errors)
    }
}

impl From<csv::Error> for ContactsError {
    fn from(err: csv::Error) -> Self {
        ContactsError::Api(format!("CSV encoding failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ContactsError>;
