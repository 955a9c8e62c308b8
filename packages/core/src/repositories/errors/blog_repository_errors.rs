use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogRepositoryError {
    #[error("Blog not found")]
    NotFound,
    #[error("Blog already exists")]
    AlreadyExists,
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("DynamoDB error: {0}")]
    DynamoDb(String),
}
