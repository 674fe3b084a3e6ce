use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Anything the HTTP client raises, passed through as-is.
    #[error(transparent)]
    Send(#[from] postrs_http::error::Error),

    #[error(transparent)]
    Models(#[from] postrs_models::error::Error),

    #[error("Failed to render request templates: {0}")]
    Render(#[from] postrs_templates::error::Error),

    #[error("{name} folder does not exist in Postman collection.\n{hint}")]
    FolderNotFound { name: String, hint: String },

    #[error("{name} request does not exist in {folder} folder.\n{hint}")]
    RequestNotFound { name: String, folder: String, hint: String },

    #[error("More than one auth per type is not supported")]
    MultipleAuthValues,

    #[error("Auth type not supported: {0}")]
    UnsupportedAuth(String),
}

pub type Result<T> = std::result::Result<T, Error>;
