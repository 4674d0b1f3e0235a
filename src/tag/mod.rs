pub mod codec;
pub mod command;
pub mod config;
pub mod error;
pub mod schema;
pub mod staging;
pub mod store;
pub mod sync;
pub mod types;
