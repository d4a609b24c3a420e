use crate::structs::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use futures_util::future::{BoxFuture, FutureExt};
use reqwest::Client;
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, warn};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const GENERATION_TEMPERATURE: f32 = 0.1;

#[derive(Debug, PartialEq)]
pub enum UpstreamError {
    Request(String),
    Status { status: u16, body: String },
    EmptyResponse,
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Request(detail) => write!(f, "request to generation API failed: {}", detail),
            UpstreamError::Status { status, body } => {
                write!(f, "generation API answered {}: {}", status, body)
            }
            UpstreamError::EmptyResponse => write!(f, "generation API returned no text"),
        }
    }
}

impl std::error::Error for UpstreamError {}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Request(err.to_string())
    }
}

/// Produces raw text for a prompt.
pub trait QuizGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, UpstreamError>>;
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, UpstreamError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: quiz_response_schema(),
                temperature: GENERATION_TEMPERATURE,
            },
        };

        debug!("Sending generateContent request to model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generation API returned {}", status);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response.json::<GenerateContentResponse>().await?;
        if let Some(reason) = payload
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
        {
            debug!("Generation finished with reason {}", reason);
        }

        payload.first_text().ok_or(UpstreamError::EmptyResponse)
    }
}

impl QuizGenerator for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, UpstreamError>> {
        self.generate_content(prompt).boxed()
    }
}

/// Structured-output schema for a list of quiz questions.
pub fn quiz_response_schema() -> Value {
    json!({
        "description": "List of quiz questions with explanations",
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "questionId": {
                    "type": "STRING",
                    "description": "Unique identifier for the question",
                    "nullable": false
                },
                "question": {
                    "type": "STRING",
                    "description": "Question text for the quiz",
                    "nullable": false
                },
                "options": {
                    "type": "ARRAY",
                    "description": "Options for the question",
                    "minItems": 4,
                    "maxItems": 4,
                    "items": {
                        "type": "OBJECT",
                        "description": "Option for the question",
                        "properties": {
                            "key": {
                                "type": "STRING",
                                "description": "Unique identifier for the option, one of \"0\", \"1\", \"2\", \"3\"",
                                "nullable": false
                            },
                            "value": {
                                "type": "STRING",
                                "description": "Option text for the question",
                                "nullable": false
                            }
                        },
                        "required": ["key", "value"]
                    }
                },
                "answer": {
                    "type": "STRING",
                    "description": "Key of the correct option",
                    "nullable": false
                },
                "answerExplanation": {
                    "type": "STRING",
                    "description": "Explanation for the correct answer",
                    "nullable": false
                }
            },
            "required": ["questionId", "question", "options", "answer", "answerExplanation"]
        }
    })
}
