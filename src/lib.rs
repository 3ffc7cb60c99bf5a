pub mod client;
pub mod error;
pub mod models;
pub mod page;
pub mod services;
pub mod terminal;
pub mod validation;
