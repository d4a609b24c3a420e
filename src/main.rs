use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use quizgen_backend::config::cors::configure_cors;
use quizgen_backend::config::database::{connect_to_mongodb, get_collection};
use quizgen_backend::config::routes::configure_routes;
use quizgen_backend::config::settings::AppConfig;
use quizgen_backend::repositories::quiz_repository::{MongoQuizStore, QuizStore};
use quizgen_backend::services::auth_service::{FirebaseVerifier, IdentityVerifier};
use quizgen_backend::services::gemini_service::{GeminiClient, QuizGenerator};
use quizgen_backend::utils::logging::init_tracing;
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    if let Err(err) = init_tracing() {
        eprintln!("Failed to initialise logging: {}", err);
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    let mongodb_client = match connect_to_mongodb(&config.mongodb_uri, &config.mongodb_db).await {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to connect to MongoDB: {}", err);
            std::process::exit(1);
        }
    };

    let http_client = reqwest::Client::new();
    let store: Arc<dyn QuizStore> = Arc::new(MongoQuizStore::new(get_collection(
        &mongodb_client,
        &config.mongodb_db,
    )));
    let generator: Arc<dyn QuizGenerator> = Arc::new(GeminiClient::new(
        http_client.clone(),
        config.api_key.clone(),
        config.gemini_model.clone(),
    ));
    let verifier: Arc<dyn IdentityVerifier> = Arc::new(FirebaseVerifier::new(
        http_client,
        config.firebase_api_key.clone(),
    ));

    let address = config.server_address();
    let cors_origin = config.cors_origin.clone();

    info!("Server is running on {}", address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(configure_cors(&cors_origin))
            .app_data(web::Data::from(store.clone()))
            .app_data(web::Data::from(generator.clone()))
            .app_data(web::Data::from(verifier.clone()))
            .configure(configure_routes)
    })
    .bind(address)?
    .run()
    .await
}
