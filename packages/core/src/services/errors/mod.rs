pub mod blog_service_errors;
pub mod guard_errors;
pub mod token_errors;
pub mod user_service_errors;
