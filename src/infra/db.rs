use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, IndexOptions},
    Client, Collection, Database, IndexModel,
};

use crate::infra::config::Config;
use crate::schemas::{achievement::Achievement, post::BlogPost};

pub const POSTS: &str = "blogposts";
pub const ACHIEVEMENTS: &str = "achievements";

/// Connects once per process; the driver maintains a bounded pool that is
/// reused across requests.
pub async fn connect(config: &Config) -> Result<Database, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&config.mongodb_uri).await?;
    options.max_pool_size = Some(10);
    options.min_pool_size = Some(5);
    options.server_selection_timeout = Some(Duration::from_secs(60));
    options.connect_timeout = Some(Duration::from_secs(30));

    let client = Client::with_options(options)?;
    Ok(client.database(&config.database))
}

pub fn posts(database: &Database) -> Collection<BlogPost> {
    database.collection(POSTS)
}

pub fn achievements(database: &Database) -> Collection<Achievement> {
    database.collection(ACHIEVEMENTS)
}

/// The unique title index backs the 409 conflict path on post creation.
pub async fn ensure_indexes(database: &Database) -> Result<(), mongodb::error::Error> {
    let title_index = IndexModel::builder()
        .keys(doc! { "title": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    posts(database).create_index(title_index).await?;

    Ok(())
}
