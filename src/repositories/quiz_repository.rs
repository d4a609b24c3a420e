use crate::models::quiz::{Difficulty, NewQuiz, Question, Quiz};
use crate::models::quiz_request::QuizRequest;
use chrono::{DateTime, Utc};
use futures_util::future::{BoxFuture, FutureExt};
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Collection;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, PartialEq)]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::new(err.to_string())
    }
}

/// Persistence for quizzes, keyed by opaque store-assigned ids.
pub trait QuizStore: Send + Sync {
    fn insert(&self, quiz: NewQuiz) -> BoxFuture<'_, Result<Quiz, StoreError>>;

    fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Quiz>, StoreError>>;

    /// Newest first.
    fn find_by_owner<'a>(&'a self, owner_id: &'a str) -> BoxFuture<'a, Result<Vec<Quiz>, StoreError>>;

    /// A quiz the owner already generated with identical parameters.
    fn find_matching<'a>(
        &'a self,
        owner_id: &'a str,
        request: &'a QuizRequest,
    ) -> BoxFuture<'a, Result<Option<Quiz>, StoreError>>;

    /// Sets `userAnswer` on each question, positionally.
    fn record_answers<'a>(
        &'a self,
        id: &'a str,
        answers: &'a [Option<String>],
    ) -> BoxFuture<'a, Result<(), StoreError>>;
}

/// Stored shape of a quiz in the `quizzes` collection.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub quiz: Vec<Question>,
    pub topics: Vec<String>,
    pub difficulty: Difficulty,
    pub num_questions: u8,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<NewQuiz> for QuizDocument {
    fn from(quiz: NewQuiz) -> Self {
        QuizDocument {
            id: None,
            quiz: quiz.quiz,
            topics: quiz.topics,
            difficulty: quiz.difficulty,
            num_questions: quiz.num_questions,
            owner_id: quiz.owner_id,
            created_at: quiz.created_at,
        }
    }
}

impl QuizDocument {
    fn into_quiz(self) -> Option<Quiz> {
        let id = self.id?;
        Some(Quiz {
            id: id.to_hex(),
            quiz: self.quiz,
            topics: self.topics,
            difficulty: self.difficulty,
            num_questions: self.num_questions,
            owner_id: self.owner_id,
            created_at: self.created_at,
        })
    }
}

#[derive(Clone)]
pub struct MongoQuizStore {
    collection: Collection<QuizDocument>,
}

impl MongoQuizStore {
    pub fn new(collection: Collection<QuizDocument>) -> Self {
        Self { collection }
    }

    async fn insert_quiz(&self, quiz: NewQuiz) -> Result<Quiz, StoreError> {
        let result = self.collection.insert_one(QuizDocument::from(quiz.clone())).await?;
        let id = match result.inserted_id {
            Bson::ObjectId(id) => id.to_hex(),
            other => return Err(StoreError::new(format!("unexpected inserted id {}", other))),
        };
        debug!("Inserted quiz {}", id);
        Ok(quiz.with_id(id))
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Quiz>, StoreError> {
        // Anything that is not an ObjectId cannot name a stored quiz.
        let Ok(object_id) = ObjectId::parse_str(id) else {
            warn!("Invalid quiz id format: {}", id);
            return Ok(None);
        };

        let document = self.collection.find_one(doc! { "_id": object_id }).await?;
        Ok(document.and_then(QuizDocument::into_quiz))
    }

    async fn fetch_many(&self, filter: Document) -> Result<Vec<Quiz>, StoreError> {
        let mut cursor = self.collection.find(filter).sort(doc! { "_id": -1 }).await?;
        let mut quizzes = Vec::new();

        while let Some(document) = cursor.try_next().await? {
            if let Some(quiz) = document.into_quiz() {
                quizzes.push(quiz);
            }
        }

        Ok(quizzes)
    }

    async fn fetch_matching(&self, owner_id: &str, request: &QuizRequest) -> Result<Option<Quiz>, StoreError> {
        let document = self
            .collection
            .find_one(matching_filter(owner_id, request))
            .sort(doc! { "_id": -1 })
            .await?;
        Ok(document.and_then(QuizDocument::into_quiz))
    }

    async fn update_answers(&self, id: &str, answers: &[Option<String>]) -> Result<(), StoreError> {
        let object_id =
            ObjectId::parse_str(id).map_err(|err| StoreError::new(format!("invalid id {}: {}", id, err)))?;

        let result = self
            .collection
            .update_one(doc! { "_id": object_id }, doc! { "$set": answers_update(answers) })
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::new(format!("quiz {} disappeared before answers were saved", id)));
        }
        Ok(())
    }
}

pub fn matching_filter(owner_id: &str, request: &QuizRequest) -> Document {
    doc! {
        "ownerId": owner_id,
        "topics": request.topics.clone(),
        "difficulty": u8::from(request.difficulty) as i32,
        "numQuestions": request.num_questions as i32,
    }
}

pub fn answers_update(answers: &[Option<String>]) -> Document {
    let mut set = Document::new();
    for (index, answer) in answers.iter().enumerate() {
        let value = match answer {
            Some(key) => Bson::String(key.clone()),
            None => Bson::Null,
        };
        set.insert(format!("quiz.{}.userAnswer", index), value);
    }
    set
}

impl QuizStore for MongoQuizStore {
    fn insert(&self, quiz: NewQuiz) -> BoxFuture<'_, Result<Quiz, StoreError>> {
        self.insert_quiz(quiz).boxed()
    }

    fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Quiz>, StoreError>> {
        self.fetch_by_id(id).boxed()
    }

    fn find_by_owner<'a>(&'a self, owner_id: &'a str) -> BoxFuture<'a, Result<Vec<Quiz>, StoreError>> {
        self.fetch_many(doc! { "ownerId": owner_id }).boxed()
    }

    fn find_matching<'a>(
        &'a self,
        owner_id: &'a str,
        request: &'a QuizRequest,
    ) -> BoxFuture<'a, Result<Option<Quiz>, StoreError>> {
        self.fetch_matching(owner_id, request).boxed()
    }

    fn record_answers<'a>(
        &'a self,
        id: &'a str,
        answers: &'a [Option<String>],
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        self.update_answers(id, answers).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::QuizOption;

    #[test]
    fn answers_update_targets_each_position() {
        let update = answers_update(&[Some("2".to_string()), None]);
        assert_eq!(update.get_str("quiz.0.userAnswer").unwrap(), "2");
        assert_eq!(update.get("quiz.1.userAnswer"), Some(&Bson::Null));
    }

    #[test]
    fn matching_filter_uses_stored_field_names() {
        let request = QuizRequest {
            topics: vec!["Rust".to_string(), "Tokio".to_string()],
            difficulty: Difficulty::Advanced,
            num_questions: 10,
        };
        let filter = matching_filter("user-1", &request);
        assert_eq!(filter.get_str("ownerId").unwrap(), "user-1");
        assert_eq!(filter.get_i32("difficulty").unwrap(), 5);
        assert_eq!(filter.get_i32("numQuestions").unwrap(), 10);
        assert_eq!(filter.get_array("topics").unwrap().len(), 2);
    }

    #[test]
    fn document_without_id_is_not_a_quiz() {
        let document = QuizDocument::from(NewQuiz {
            quiz: vec![Question {
                question_id: "q1".to_string(),
                question: "?".to_string(),
                options: vec![QuizOption {
                    key: "0".to_string(),
                    value: "a".to_string(),
                }],
                answer: "0".to_string(),
                answer_explanation: String::new(),
                user_answer: None,
            }],
            topics: vec!["Rust".to_string()],
            difficulty: Difficulty::Basic,
            num_questions: 5,
            owner_id: "user-1".to_string(),
            created_at: Utc::now(),
        });
        assert!(document.clone().into_quiz().is_none());

        let id = ObjectId::new();
        let stored = QuizDocument {
            id: Some(id),
            ..document
        };
        assert_eq!(stored.into_quiz().unwrap().id, id.to_hex());
    }
}
