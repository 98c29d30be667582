use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Collection not found: {0}")]
    NoSuchCollection(String),

    #[error("Malformed document: {0}")]
    Decode(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Map this error to the HTTP status code it is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::BadRequest(_) | Self::Json(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::NoSuchCollection(_) | Self::Decode(_) | Self::Store(_) => 500,
        }
    }
}
