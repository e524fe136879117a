mod auth;
mod main_page;
mod user;
