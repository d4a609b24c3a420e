pub mod api_response;
pub mod gemini;
pub mod identity_toolkit;
pub mod quiz_response;
