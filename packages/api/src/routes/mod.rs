pub mod blog;
pub mod health;
pub mod user;
