use crate::models::quiz::{PublicQuestion, Question};
use std::collections::HashSet;
use std::fmt;

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, PartialEq)]
pub enum ParseError {
    Empty,
    Malformed(String),
    WrongCount { expected: usize, actual: usize },
    InvalidQuestion { index: usize, reason: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "generated text was empty"),
            ParseError::Malformed(detail) => write!(f, "generated text is not a question list: {}", detail),
            ParseError::WrongCount { expected, actual } => {
                write!(f, "expected {} questions, got {}", expected, actual)
            }
            ParseError::InvalidQuestion { index, reason } => {
                write!(f, "question {} is invalid: {}", index + 1, reason)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Turns the generation collaborator's output into validated questions.
pub fn parse_questions(raw: &str, expected: usize) -> Result<Vec<Question>, ParseError> {
    let text = strip_code_fence(raw);
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut questions: Vec<Question> =
        serde_json::from_str(text).map_err(|err| ParseError::Malformed(err.to_string()))?;

    if questions.len() != expected {
        return Err(ParseError::WrongCount {
            expected,
            actual: questions.len(),
        });
    }

    for (index, question) in questions.iter_mut().enumerate() {
        if question.question_id.trim().is_empty() {
            question.question_id = format!("q{}", index + 1);
        }
        // Whatever the model put here is not a submission.
        question.user_answer = None;
        validate_question(question).map_err(|reason| ParseError::InvalidQuestion { index, reason })?;
    }

    Ok(questions)
}

fn validate_question(question: &Question) -> Result<(), String> {
    if question.question.trim().is_empty() {
        return Err("question text is empty".to_string());
    }
    if question.options.len() != OPTIONS_PER_QUESTION {
        return Err(format!(
            "expected {} options, got {}",
            OPTIONS_PER_QUESTION,
            question.options.len()
        ));
    }

    let mut keys = HashSet::new();
    for option in &question.options {
        if option.key.is_empty() {
            return Err("option key is empty".to_string());
        }
        if !keys.insert(option.key.as_str()) {
            return Err(format!("duplicate option key '{}'", option.key));
        }
    }

    if !question.has_option(&question.answer) {
        return Err(format!("answer '{}' is not an option key", question.answer));
    }

    Ok(())
}

/// Removes ```json fences some models wrap around structured output.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

pub fn strip_answers(questions: &[Question]) -> Vec<PublicQuestion> {
    questions.iter().map(PublicQuestion::from).collect()
}
