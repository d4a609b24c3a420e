use crate::controllers::quiz_controller::{
    create_quiz, get_quiz, get_user_quizzes, get_user_quizzes_full, index, score_quiz_answers,
};
use actix_web::web;

pub fn configure_quiz_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/generate-quiz", web::post().to(create_quiz))
        .route("/quizzes/{id}", web::get().to(get_quiz))
        .route("/quizzes/{id}/answers", web::post().to(score_quiz_answers))
        .route("/user-quizzes", web::get().to(get_user_quizzes))
        .route("/user-quizzes-full", web::get().to(get_user_quizzes_full));
}
