pub mod auth;
pub mod photo;
pub mod user;
