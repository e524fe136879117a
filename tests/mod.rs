
mod requests;
mod tasks;
