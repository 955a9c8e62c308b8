pub mod blog_repository_errors;
pub mod user_repository_errors;
