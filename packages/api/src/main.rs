use std::env::set_var;
use std::sync::Arc;

use blog_api::{app, state::AppState};
use blog_core::config::AppConfig;
use blog_core::repositories::blog_repository::{BlogRepository, DynamoDbBlogRepository};
use blog_core::repositories::in_memory_blog_repository::InMemoryBlogRepository;
use blog_core::repositories::in_memory_user_repository::InMemoryUserRepository;
use blog_core::repositories::user_repository::{DynamoDbUserRepository, UserRepository};
use lambda_http::{run, tracing, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    set_var("AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH", "true");

    // required to enable CloudWatch error logging by the runtime
    tracing::init_default_subscriber();

    let config = AppConfig::from_env()?;

    let (users, blogs): (
        Arc<dyn UserRepository + Send + Sync>,
        Arc<dyn BlogRepository + Send + Sync>,
    ) = match (&config.users_table, &config.blogs_table) {
        (Some(users_table), Some(blogs_table)) => {
            let aws_config = aws_config::load_from_env().await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);
            (
                Arc::new(DynamoDbUserRepository::new(client.clone(), users_table.as_str())),
                Arc::new(DynamoDbBlogRepository::new(client, blogs_table.as_str())),
            )
        }
        _ => {
            tracing::warn!("USERS_TABLE or BLOGS_TABLE not set, data is kept in memory");
            (
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryBlogRepository::new()),
            )
        }
    };

    let state = AppState::new(config.auth, config.api_key, users, blogs);

    run(app(state)).await
}
