pub mod auth;
pub mod main;
pub mod user;
