use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("session storage failed: {0}")]
    Session(#[from] rusqlite::Error),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidArgument(String),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn catalog_error_message_passes_through() {
        let err: AppError = CatalogError::Empty(PathBuf::from("subjects.csv")).into();
        assert_eq!(err.to_string(), "catalog subjects.csv has no topic rows");
    }

    #[test]
    fn invalid_argument_is_shown_verbatim() {
        let err = AppError::InvalidArgument("Invalid status 'meh'".to_string());
        assert_eq!(err.to_string(), "Invalid status 'meh'");
    }
}
