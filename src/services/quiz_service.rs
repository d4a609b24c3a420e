use crate::errors::AppError;
use crate::models::quiz::{NewQuiz, Quiz, QuizSummary};
use crate::models::quiz_request::{QuizRequest, QuizRequestBody};
use crate::repositories::quiz_repository::QuizStore;
use crate::services::gemini_service::QuizGenerator;
use crate::services::quiz_parser::{parse_questions, strip_answers, OPTIONS_PER_QUESTION};
use crate::structs::quiz_response::GenerateQuizResponse;
use chrono::Utc;
use tracing::{error, info};

pub fn build_prompt(request: &QuizRequest) -> String {
    format!(
        "Topic: {topics}\n\
         Generate exactly {count} multiple-choice questions based on the topics above at a difficulty level of {level} ({ordinal} on a scale of 1 to 5).\n\
         Each question MUST have exactly {options} options with the keys \"0\", \"1\", \"2\" and \"3\".\n\
         Each question MUST have exactly one answer, given as the key of the correct option.\n\
         Each question MUST include a short explanation of why the answer is correct.\n\
         Return the questions as a JSON array where every item has the fields questionId, question, options (a list of {{key, value}}), answer and answerExplanation.\n",
        topics = request.topic_string(),
        count = request.num_questions,
        level = request.difficulty.label(),
        ordinal = u8::from(request.difficulty),
        options = OPTIONS_PER_QUESTION,
    )
}

/// Validates the body, then serves a cached quiz or generates, parses and
/// stores a new one. Nothing is stored unless every step succeeds.
pub async fn generate_quiz(
    store: &dyn QuizStore,
    generator: &dyn QuizGenerator,
    owner_id: &str,
    body: QuizRequestBody,
) -> Result<GenerateQuizResponse, AppError> {
    let request = QuizRequest::parse(body).map_err(AppError::Validation)?;

    match store.find_matching(owner_id, &request).await {
        Ok(Some(existing)) => {
            info!("Serving existing quiz {} for owner {}", existing.id, owner_id);
            return Ok(GenerateQuizResponse {
                id: existing.id.clone(),
                quiz: existing.public_questions(),
            });
        }
        Ok(None) => {}
        // The lookup is an optimisation only.
        Err(err) => error!("Cached quiz lookup failed: {}", err),
    }

    let prompt = build_prompt(&request);
    let raw = generator.generate(&prompt).await?;
    let questions = parse_questions(&raw, request.num_questions as usize)?;

    let quiz = store
        .insert(NewQuiz {
            quiz: questions,
            topics: request.topics,
            difficulty: request.difficulty,
            num_questions: request.num_questions,
            owner_id: owner_id.to_string(),
            created_at: Utc::now(),
        })
        .await?;

    info!(
        "Generated quiz {} with {} questions for owner {}",
        quiz.id,
        quiz.quiz.len(),
        owner_id
    );

    Ok(GenerateQuizResponse {
        id: quiz.id,
        quiz: strip_answers(&quiz.quiz),
    })
}

/// Quizzes owned by someone else are reported as not found.
pub async fn fetch_owned_quiz(store: &dyn QuizStore, owner_id: &str, id: &str) -> Result<Quiz, AppError> {
    match store.find_by_id(id).await? {
        Some(quiz) if quiz.owner_id == owner_id => Ok(quiz),
        _ => Err(AppError::NotFound("Quiz not found".to_string())),
    }
}

pub async fn list_quizzes(store: &dyn QuizStore, owner_id: &str) -> Result<Vec<Quiz>, AppError> {
    Ok(store.find_by_owner(owner_id).await?)
}

pub async fn list_quiz_summaries(store: &dyn QuizStore, owner_id: &str) -> Result<Vec<QuizSummary>, AppError> {
    let quizzes = list_quizzes(store, owner_id).await?;
    Ok(quizzes.iter().map(QuizSummary::from).collect())
}
