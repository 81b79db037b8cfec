pub mod recipe;
pub mod server;
pub mod token;
