use crate::errors::AppError;
use crate::models::attempt::{QuestionResult, ScoredAttempt};
use crate::models::quiz::{Question, Quiz};
use crate::repositories::quiz_repository::QuizStore;
use tracing::info;

/// Positional, key-based exact-match scoring. Missing trailing selections
/// count as unanswered.
pub fn score_quiz(quiz_id: &str, questions: &[Question], selections: &[Option<String>]) -> ScoredAttempt {
    let results: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = selections.get(index).cloned().flatten();
            let is_correct = selected.as_deref() == Some(question.answer.as_str());
            QuestionResult {
                question_id: question.question_id.clone(),
                selected,
                answer: question.answer.clone(),
                is_correct,
                answer_explanation: question.answer_explanation.clone(),
            }
        })
        .collect();

    let score = results.iter().filter(|result| result.is_correct).count() as u32;

    ScoredAttempt {
        quiz_id: quiz_id.to_string(),
        score,
        total: questions.len() as u32,
        results,
    }
}

/// Scores a submission against the stored quiz and records it as the
/// quiz-taker's answers.
pub async fn submit_answers(
    store: &dyn QuizStore,
    quiz: &Quiz,
    selections: Vec<Option<String>>,
) -> Result<ScoredAttempt, AppError> {
    if selections.len() > quiz.quiz.len() {
        return Err(AppError::Validation(format!(
            "Received {} answers for a quiz with {} questions.",
            selections.len(),
            quiz.quiz.len()
        )));
    }

    let mut padded = selections;
    padded.resize(quiz.quiz.len(), None);

    let attempt = score_quiz(&quiz.id, &quiz.quiz, &padded);
    store.record_answers(&quiz.id, &padded).await?;

    info!(
        "Quiz {} scored {}/{} for owner {}",
        quiz.id, attempt.score, attempt.total, quiz.owner_id
    );

    Ok(attempt)
}
