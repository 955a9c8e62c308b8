use thiserror::Error;

use crate::repositories::errors::blog_repository_errors::BlogRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;

#[derive(Debug, Error)]
pub enum BlogServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Blog not found")]
    BlogNotFound,
    #[error("Author not found")]
    AuthorNotFound,
    #[error("Repository error: {0}")]
    Repository(BlogRepositoryError),
    #[error("User repository error: {0}")]
    UserRepository(UserRepositoryError),
}

impl From<BlogRepositoryError> for BlogServiceError {
    fn from(error: BlogRepositoryError) -> Self {
        match error {
            BlogRepositoryError::NotFound => BlogServiceError::BlogNotFound,
            other => BlogServiceError::Repository(other),
        }
    }
}

impl From<UserRepositoryError> for BlogServiceError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::NotFound => BlogServiceError::AuthorNotFound,
            other => BlogServiceError::UserRepository(other),
        }
    }
}
