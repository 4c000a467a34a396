pub mod config;
pub mod core;
pub mod error;
pub mod llm;
pub mod market;
pub mod models;
pub mod server;
pub mod service;
pub mod sources;
#[cfg(test)]
pub mod test_helpers;
