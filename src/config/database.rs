use crate::constants::COLL_NAME;
use crate::repositories::quiz_repository::QuizDocument;
use mongodb::bson::doc;
use mongodb::{Client, Collection};
use tracing::info;

pub async fn connect_to_mongodb(uri: &str, database: &str) -> Result<Client, mongodb::error::Error> {
    let client = Client::with_uri_str(uri).await?;

    client.database(database).run_command(doc! { "ping": 1 }).await?;
    info!("Pinged deployment, connected to MongoDB database '{}'", database);

    Ok(client)
}

pub fn get_collection(client: &Client, database: &str) -> Collection<QuizDocument> {
    client.database(database).collection(COLL_NAME)
}
