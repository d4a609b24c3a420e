use crate::models::quiz::Difficulty;
use serde::{Deserialize, Serialize};

pub const MAX_TOPICS: usize = 3;
pub const MAX_TOPIC_LENGTH: usize = 100;
pub const MIN_QUESTIONS: u8 = 5;
pub const MAX_QUESTIONS: u8 = 20;

/// Body of `POST /generate-quiz` before validation.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequestBody {
    pub topics: Option<Vec<String>>,
    pub difficulty: Option<u8>,
    pub num_questions: Option<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizRequest {
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    pub num_questions: u8,
}

impl QuizRequest {
    pub fn parse(body: QuizRequestBody) -> Result<QuizRequest, String> {
        let topics = validate_topics(body.topics.unwrap_or_default())?;

        let difficulty = body
            .difficulty
            .ok_or_else(|| "Difficulty is required.".to_string())
            .and_then(|level| {
                Difficulty::try_from(level).map_err(|_| "Difficulty must be between 1 and 5.".to_string())
            })?;

        let num_questions = body
            .num_questions
            .ok_or_else(|| "Number of questions is required.".to_string())?;
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&num_questions) {
            return Err(format!(
                "Number of questions must be between {} and {}.",
                MIN_QUESTIONS, MAX_QUESTIONS
            ));
        }

        Ok(QuizRequest {
            topics,
            difficulty,
            num_questions,
        })
    }

    pub fn topic_string(&self) -> String {
        self.topics.join(", ")
    }
}

fn validate_topics(raw: Vec<String>) -> Result<Vec<String>, String> {
    if raw.is_empty() {
        return Err("At least one topic is required.".to_string());
    }
    if raw.len() > MAX_TOPICS {
        return Err(format!("You can add up to {} topics only.", MAX_TOPICS));
    }

    let mut topics: Vec<String> = Vec::with_capacity(raw.len());
    for topic in raw {
        let topic = topic.trim();

        if topic.is_empty() {
            return Err("Topic cannot be empty.".to_string());
        }
        if topic.chars().count() > MAX_TOPIC_LENGTH {
            return Err(format!(
                "Topic cannot exceed {} characters.",
                MAX_TOPIC_LENGTH
            ));
        }
        if !topic.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
            return Err("Topic can only contain letters, numbers, and spaces.".to_string());
        }
        if topics.iter().any(|existing| existing == topic) {
            return Err(format!("Topic '{}' was given more than once.", topic));
        }

        topics.push(topic.to_string());
    }

    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(topics: &[&str], difficulty: Option<u8>, num_questions: Option<u8>) -> QuizRequestBody {
        QuizRequestBody {
            topics: Some(topics.iter().map(|t| t.to_string()).collect()),
            difficulty,
            num_questions,
        }
    }

    #[test]
    fn accepts_valid_request() {
        let request = QuizRequest::parse(body(&[" Rust ", "Ownership"], Some(3), Some(10))).unwrap();
        assert_eq!(request.topics, vec!["Rust", "Ownership"]);
        assert_eq!(request.difficulty, Difficulty::Intermediate);
        assert_eq!(request.num_questions, 10);
        assert_eq!(request.topic_string(), "Rust, Ownership");
    }

    #[test]
    fn rejects_empty_or_missing_topics() {
        assert!(QuizRequest::parse(body(&[], Some(3), Some(10))).is_err());
        let missing = QuizRequestBody {
            topics: None,
            difficulty: Some(3),
            num_questions: Some(10),
        };
        assert!(QuizRequest::parse(missing).is_err());
    }

    #[test]
    fn rejects_malformed_topics() {
        assert!(QuizRequest::parse(body(&["a", "b", "c", "d"], Some(1), Some(5))).is_err());
        assert!(QuizRequest::parse(body(&["   "], Some(1), Some(5))).is_err());
        assert!(QuizRequest::parse(body(&["C++"], Some(1), Some(5))).is_err());
        assert!(QuizRequest::parse(body(&["Rust", "Rust "], Some(1), Some(5))).is_err());
        let long = "x".repeat(MAX_TOPIC_LENGTH + 1);
        assert!(QuizRequest::parse(body(&[long.as_str()], Some(1), Some(5))).is_err());
        let exact = "x".repeat(MAX_TOPIC_LENGTH);
        assert!(QuizRequest::parse(body(&[exact.as_str()], Some(1), Some(5))).is_ok());
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        assert!(QuizRequest::parse(body(&["Rust"], None, Some(10))).is_err());
        assert!(QuizRequest::parse(body(&["Rust"], Some(0), Some(10))).is_err());
        assert!(QuizRequest::parse(body(&["Rust"], Some(6), Some(10))).is_err());
        assert!(QuizRequest::parse(body(&["Rust"], Some(3), None)).is_err());
        assert!(QuizRequest::parse(body(&["Rust"], Some(3), Some(4))).is_err());
        assert!(QuizRequest::parse(body(&["Rust"], Some(3), Some(21))).is_err());
        assert!(QuizRequest::parse(body(&["Rust"], Some(5), Some(20))).is_ok());
    }
}
