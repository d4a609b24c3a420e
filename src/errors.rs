use crate::repositories::quiz_repository::StoreError;
use crate::services::auth_service::AuthError;
use crate::services::gemini_service::UpstreamError;
use crate::services::quiz_parser::ParseError;
use crate::structs::api_response::error_response;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;
use tracing::error;

pub const GENERATION_FAILED: &str = "Failed to generate quiz. Please try again later.";
pub const STORE_FAILED: &str = "Failed to retrieve quiz.";
pub const INTERNAL_FAILED: &str = "An internal error occurred.";

/// Every failure a request can end in. 4xx variants carry the message shown
/// to the client; 5xx variants carry the detail that is only logged.
#[derive(Debug, PartialEq)]
pub enum AppError {
    Validation(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Upstream(String),
    Store(String),
    Internal(String),
}

impl AppError {
    pub fn client_message(&self) -> &str {
        match self {
            AppError::Validation(message)
            | AppError::Unauthorized(message)
            | AppError::Forbidden(message)
            | AppError::NotFound(message) => message,
            AppError::Upstream(_) => GENERATION_FAILED,
            AppError::Store(_) => STORE_FAILED,
            AppError::Internal(_) => INTERNAL_FAILED,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(message) => write!(f, "validation error: {}", message),
            AppError::Unauthorized(message) => write!(f, "unauthorized: {}", message),
            AppError::Forbidden(message) => write!(f, "forbidden: {}", message),
            AppError::NotFound(message) => write!(f, "not found: {}", message),
            AppError::Upstream(message) => write!(f, "generation failed: {}", message),
            AppError::Store(message) => write!(f, "store failed: {}", message),
            AppError::Internal(message) => write!(f, "internal error: {}", message),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) | AppError::Store(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(error_response(self.client_message()))
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        AppError::Upstream(format!("could not parse generated quiz: {}", err))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => {
                AppError::Unauthorized("Unauthorized: No token provided".to_string())
            }
            AuthError::Rejected(_) => {
                AppError::Forbidden("Unauthorized: Invalid token".to_string())
            }
            AuthError::Unavailable(detail) => {
                AppError::Internal(format!("identity verification unavailable: {}", detail))
            }
        }
    }
}
