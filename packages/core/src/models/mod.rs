pub mod auth;
pub mod blog;
pub mod pagination;
pub mod user;
