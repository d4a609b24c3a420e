use crate::models::quiz::PublicQuestion;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GenerateQuizResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub quiz: Vec<PublicQuestion>,
}

#[derive(Debug, Serialize)]
pub struct QuizListResponse<T> {
    pub quizzes: Vec<T>,
}
