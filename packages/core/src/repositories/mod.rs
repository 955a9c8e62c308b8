pub mod blog_repository;
pub mod errors;
pub mod in_memory_blog_repository;
pub mod in_memory_user_repository;
pub mod user_repository;
