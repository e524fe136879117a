pub mod _entities;

pub mod comments;
pub mod photos;
pub mod roles;
pub mod tags;
pub mod users;
