#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use futures_util::future::{ready, BoxFuture, FutureExt};
use quizgen_backend::config::routes::configure_routes;
use quizgen_backend::models::quiz::{NewQuiz, Quiz};
use quizgen_backend::models::quiz_request::QuizRequest;
use quizgen_backend::repositories::quiz_repository::{QuizStore, StoreError};
use quizgen_backend::services::auth_service::{AuthError, IdentityVerifier};
use quizgen_backend::services::gemini_service::{QuizGenerator, UpstreamError};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ALICE_TOKEN: &str = "token-alice";
pub const BOB_TOKEN: &str = "token-bob";

#[derive(Default)]
pub struct MemoryStore {
    quizzes: Mutex<Vec<Quiz>>,
    next_id: AtomicUsize,
    pub fail: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.quizzes.lock().unwrap().len()
    }

    pub fn get(&self, id: &str) -> Option<Quiz> {
        self.quizzes.lock().unwrap().iter().find(|q| q.id == id).cloned()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            Err(StoreError::new("store offline"))
        } else {
            Ok(())
        }
    }
}

impl QuizStore for MemoryStore {
    fn insert(&self, quiz: NewQuiz) -> BoxFuture<'_, Result<Quiz, StoreError>> {
        let result = self.check().map(|_| {
            let id = format!("quiz-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            let quiz = quiz.with_id(id);
            self.quizzes.lock().unwrap().push(quiz.clone());
            quiz
        });
        ready(result).boxed()
    }

    fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Quiz>, StoreError>> {
        ready(self.check().map(|_| self.get(id))).boxed()
    }

    fn find_by_owner<'a>(&'a self, owner_id: &'a str) -> BoxFuture<'a, Result<Vec<Quiz>, StoreError>> {
        let result: Result<Vec<Quiz>, StoreError> = self.check().map(|_| {
            self.quizzes
                .lock()
                .unwrap()
                .iter()
                .rev()
                .filter(|q| q.owner_id == owner_id)
                .cloned()
                .collect()
        });
        ready(result).boxed()
    }

    fn find_matching<'a>(
        &'a self,
        owner_id: &'a str,
        request: &'a QuizRequest,
    ) -> BoxFuture<'a, Result<Option<Quiz>, StoreError>> {
        let result = self.check().map(|_| {
            self.quizzes
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|q| {
                    q.owner_id == owner_id
                        && q.topics == request.topics
                        && q.difficulty == request.difficulty
                        && q.num_questions == request.num_questions
                })
                .cloned()
        });
        ready(result).boxed()
    }

    fn record_answers<'a>(
        &'a self,
        id: &'a str,
        answers: &'a [Option<String>],
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        let result = self.check().and_then(|_| {
            let mut quizzes = self.quizzes.lock().unwrap();
            let quiz = quizzes
                .iter_mut()
                .find(|q| q.id == id)
                .ok_or_else(|| StoreError::new("no such quiz"))?;
            for (question, answer) in quiz.quiz.iter_mut().zip(answers) {
                question.user_answer = answer.clone();
            }
            Ok(())
        });
        ready(result).boxed()
    }
}

pub struct FakeGenerator {
    response: Result<String, String>,
    calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: Err("quota exceeded".to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QuizGenerator for FakeGenerator {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, UpstreamError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        let result = self
            .response
            .clone()
            .map_err(|body| UpstreamError::Status { status: 429, body });
        ready(result).boxed()
    }
}

pub struct FakeVerifier;

impl IdentityVerifier for FakeVerifier {
    fn verify<'a>(&'a self, token: &'a str) -> BoxFuture<'a, Result<String, AuthError>> {
        let result = match token {
            ALICE_TOKEN => Ok("alice".to_string()),
            BOB_TOKEN => Ok("bob".to_string()),
            other => Err(AuthError::Rejected(format!("unknown token {}", other))),
        };
        ready(result).boxed()
    }
}

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub generator: Arc<FakeGenerator>,
}

impl TestContext {
    pub fn new(store: MemoryStore, generator: FakeGenerator) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<BoxBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let store: Arc<dyn QuizStore> = self.store.clone();
        let generator: Arc<dyn QuizGenerator> = self.generator.clone();
        let verifier: Arc<dyn IdentityVerifier> = Arc::new(FakeVerifier);

        App::new()
            .app_data(web::Data::from(store))
            .app_data(web::Data::from(generator))
            .app_data(web::Data::from(verifier))
            .configure(configure_routes)
    }
}

/// Generated text for `count` questions; question n's answer is key `n % 4`.
pub fn generated_quiz(count: usize) -> String {
    let questions: Vec<Value> = (0..count)
        .map(|n| {
            json!({
                "questionId": format!("q{}", n + 1),
                "question": format!("Question {}?", n + 1),
                "options": [
                    {"key": 0, "value": "first"},
                    {"key": 1, "value": "second"},
                    {"key": 2, "value": "third"},
                    {"key": 3, "value": "fourth"}
                ],
                "answer": (n % 4).to_string(),
                "answerExplanation": format!("Because of fact {}.", n + 1)
            })
        })
        .collect();
    Value::Array(questions).to_string()
}

pub fn correct_answers(count: usize) -> Vec<Option<String>> {
    (0..count).map(|n| Some((n % 4).to_string())).collect()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
