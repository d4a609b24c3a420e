pub mod attempt;
pub mod quiz;
pub mod quiz_request;
