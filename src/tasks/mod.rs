pub mod forge;
pub mod initdb;
