pub const DEFAULT_DB_NAME: &str = "gemini_quizzes";
pub const COLL_NAME: &str = "quizzes";

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: &str = "8080";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-8b";
