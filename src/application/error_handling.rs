// src/application/error_handling.rs
//
// Error Handling at the Boundary
//
// ARCHITECTURE:
// - Maps internal errors → caller-facing responses
// - Validation failures are distinguishable from upstream and persistence ones
// - Never exposes persistence details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::integrations::tmdb::CatalogError;

/// Standard error response for the request layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
    /// The same request may succeed later
    pub retryable: bool,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Invalid input (400)
    Validation,

    /// Resource not found (404)
    NotFound,

    /// Catalog unreachable or misbehaving (502)
    ExternalService,

    /// Database/persistence error (500)
    Database,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorType {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorType::Validation => 400,
            ErrorType::NotFound => 404,
            ErrorType::ExternalService => 502,
            ErrorType::Database | ErrorType::Internal => 500,
        }
    }
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
            retryable: false,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        let retryable = error.is_retryable();

        let mut response = match error {
            AppError::NotFound => Self::not_found("Resource"),

            AppError::Domain(domain_error) => {
                Self::validation(domain_error.to_string())
            }

            AppError::Catalog(CatalogError::InvalidRequest(message)) => Self::validation(message),

            AppError::Catalog(CatalogError::Status { status: 404, .. }) => {
                Self::not_found("Movie")
            }

            AppError::Catalog(catalog_error) => {
                log::warn!("Catalog sync failed: {}", catalog_error);
                Self::new(
                    ErrorType::ExternalService,
                    "Movie catalog sync failed",
                    Some(catalog_error.to_string()),
                )
            }

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(ErrorType::Internal, "File system operation failed", None)
            }

            AppError::Config(message) => {
                log::error!("Configuration error: {}", message);
                Self::new(ErrorType::Internal, "Service misconfigured", None)
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        };

        response.retryable = retryable && response.error_type == ErrorType::ExternalService;
        response
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }

    pub fn status_code(&self) -> u16 {
        self.error_type.status_code()
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Resource not found");
        assert_eq!(error.status_code(), 404);
    }

    #[test]
    fn test_invalid_rating_is_validation() {
        let error = ErrorResponse::from_app_error(AppError::Domain(DomainError::InvalidRating(4.7)));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.status_code(), 400);
        assert!(error.message.contains("4.7"));
        assert!(!error.retryable);
    }

    #[test]
    fn test_catalog_timeout_is_retryable_external_error() {
        let error = ErrorResponse::from_app_error(AppError::Catalog(CatalogError::Timeout));
        assert_eq!(error.error_type, ErrorType::ExternalService);
        assert_eq!(error.status_code(), 502);
        assert!(error.retryable);
    }

    #[test]
    fn test_unknown_catalog_movie_is_not_found() {
        let error = ErrorResponse::from_app_error(AppError::Catalog(CatalogError::Status {
            status: 404,
            body: String::new(),
        }));
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert!(!error.retryable);
    }

    #[test]
    fn test_database_details_are_hidden() {
        let error = ErrorResponse::from_app_error(AppError::Database(
            rusqlite::Error::QueryReturnedNoRows,
        ));
        assert_eq!(error.error_type, ErrorType::Database);
        assert_eq!(error.details.as_deref(), Some("Check logs for details"));
        assert!(!error.retryable);
    }

    #[test]
    fn test_result_conversion() {
        let result: Result<(), AppError> = Err(AppError::Pool("exhausted".to_string()));
        let error = result.to_error_response().unwrap_err();
        assert_eq!(error.error_type, ErrorType::Database);
        assert_eq!(error.status_code(), 500);
    }
}
