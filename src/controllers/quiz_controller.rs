use crate::errors::AppError;
use crate::models::attempt::SubmitAnswersRequest;
use crate::models::quiz_request::QuizRequestBody;
use crate::repositories::quiz_repository::QuizStore;
use crate::services::auth_service::AuthenticatedUser;
use crate::services::gemini_service::QuizGenerator;
use crate::services::quiz_service::{
    fetch_owned_quiz, generate_quiz, list_quiz_summaries, list_quizzes,
};
use crate::services::scoring_service::submit_answers;
use crate::structs::api_response::success_response;
use crate::structs::quiz_response::QuizListResponse;

use actix_web::{web, HttpResponse};
use tracing::info;

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(success_response("quiz generation service is running"))
}

pub async fn create_quiz(
    store: web::Data<dyn QuizStore>,
    generator: web::Data<dyn QuizGenerator>,
    user: AuthenticatedUser,
    form: web::Json<QuizRequestBody>,
) -> Result<HttpResponse, AppError> {
    info!("Received generate-quiz request from {}", user.subject);

    let response = generate_quiz(
        store.get_ref(),
        generator.get_ref(),
        &user.subject,
        form.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(response))
}

pub async fn get_quiz(
    store: web::Data<dyn QuizStore>,
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    info!("Fetching quiz with ID: {}", id);

    let quiz = fetch_owned_quiz(store.get_ref(), &user.subject, &id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

pub async fn score_quiz_answers(
    store: web::Data<dyn QuizStore>,
    user: AuthenticatedUser,
    id: web::Path<String>,
    form: web::Json<SubmitAnswersRequest>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();
    info!("Scoring answers for quiz {}", id);

    let quiz = fetch_owned_quiz(store.get_ref(), &user.subject, &id).await?;
    let attempt = submit_answers(store.get_ref(), &quiz, form.into_inner().answers).await?;

    Ok(HttpResponse::Ok().json(attempt))
}

pub async fn get_user_quizzes(
    store: web::Data<dyn QuizStore>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = list_quiz_summaries(store.get_ref(), &user.subject).await?;
    Ok(HttpResponse::Ok().json(QuizListResponse { quizzes }))
}

pub async fn get_user_quizzes_full(
    store: web::Data<dyn QuizStore>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = list_quizzes(store.get_ref(), &user.subject).await?;
    Ok(HttpResponse::Ok().json(QuizListResponse { quizzes }))
}
