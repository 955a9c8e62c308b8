use thiserror::Error;

use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::services::errors::token_errors::TokenError;
use crate::services::password::PasswordError;

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("Repository error: {0}")]
    Repository(UserRepositoryError),
}

impl From<UserRepositoryError> for UserServiceError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::NotFound => UserServiceError::UserNotFound,
            UserRepositoryError::AlreadyExists => UserServiceError::UserAlreadyExists,
            other => UserServiceError::Repository(other),
        }
    }
}
