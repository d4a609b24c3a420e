use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

/// Envelope for responses that carry only a message.
#[derive(Debug, Serialize)]
pub struct ApiResponse<'a> {
    pub status: ApiStatus,
    pub message: &'a str,
}

pub fn success_response(message: &str) -> ApiResponse<'_> {
    ApiResponse {
        status: ApiStatus::Success,
        message,
    }
}

pub fn error_response(message: &str) -> ApiResponse<'_> {
    ApiResponse {
        status: ApiStatus::Error,
        message,
    }
}
