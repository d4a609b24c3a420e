use serde::{Deserialize, Serialize};

/// Body of `POST /quizzes/{id}/answers`: one selected option key per
/// question, in question order. `null` means unanswered.
#[derive(Debug, Deserialize, Serialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<Option<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: String,
    pub selected: Option<String>,
    pub answer: String,
    pub is_correct: bool,
    pub answer_explanation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredAttempt {
    pub quiz_id: String,
    pub score: u32,
    pub total: u32,
    pub results: Vec<QuestionResult>,
}
