pub mod auth_service;
pub mod gemini_service;
pub mod quiz_parser;
pub mod quiz_service;
pub mod scoring_service;
