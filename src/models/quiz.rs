use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Ordinal difficulty level, stored and sent as its number (1..=5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Elementary = 1,
    Basic = 2,
    Intermediate = 3,
    Proficient = 4,
    Advanced = 5,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Elementary => "Elementary",
            Difficulty::Basic => "Basic",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Proficient => "Proficient",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Difficulty::Elementary),
            2 => Ok(Difficulty::Basic),
            3 => Ok(Difficulty::Intermediate),
            4 => Ok(Difficulty::Proficient),
            5 => Ok(Difficulty::Advanced),
            other => Err(format!("difficulty must be between 1 and 5, got {}", other)),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty as u8
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizOption {
    #[serde(deserialize_with = "deserialize_option_key")]
    pub key: String,
    pub value: String,
}

// Generated output types the key as a number; stored documents carry strings.
fn deserialize_option_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawKey {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawKey::deserialize(deserializer)? {
        RawKey::Text(key) => key.trim().to_string(),
        RawKey::Integer(key) => key.to_string(),
        RawKey::Float(key) if key.fract() == 0.0 => (key as i64).to_string(),
        RawKey::Float(key) => key.to_string(),
    })
}

/// A question as generated and persisted, answers included.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub question_id: String,
    pub question: String,
    pub options: Vec<QuizOption>,
    #[serde(deserialize_with = "deserialize_option_key")]
    pub answer: String,
    #[serde(default)]
    pub answer_explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
}

impl Question {
    pub fn has_option(&self, key: &str) -> bool {
        self.options.iter().any(|option| option.key == key)
    }
}

/// The quiz-taker's copy of a question. It has no answer fields.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub question_id: String,
    pub question: String,
    pub options: Vec<QuizOption>,
}

impl From<&Question> for PublicQuestion {
    fn from(question: &Question) -> Self {
        PublicQuestion {
            question_id: question.question_id.clone(),
            question: question.question.clone(),
            options: question.options.clone(),
        }
    }
}

/// A quiz that has not been stored yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewQuiz {
    pub quiz: Vec<Question>,
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    pub num_questions: u8,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl NewQuiz {
    pub fn with_id(self, id: String) -> Quiz {
        Quiz {
            id,
            quiz: self.quiz,
            topics: self.topics,
            difficulty: self.difficulty,
            num_questions: self.num_questions,
            owner_id: self.owner_id,
            created_at: self.created_at,
        }
    }
}

/// A stored quiz. `id` is whatever the store assigned.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: String,
    pub quiz: Vec<Question>,
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    pub num_questions: u8,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn public_questions(&self) -> Vec<PublicQuestion> {
        self.quiz.iter().map(PublicQuestion::from).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    pub num_questions: u8,
    pub created_at: DateTime<Utc>,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        QuizSummary {
            id: quiz.id.clone(),
            topics: quiz.topics.clone(),
            difficulty: quiz.difficulty,
            num_questions: quiz.num_questions,
            created_at: quiz.created_at,
        }
    }
}
