pub mod access;
pub mod app;
pub mod common;
pub mod controllers;
pub mod initializers;
pub mod mailers;
pub mod models;
pub mod tasks;
pub mod views;
