pub mod types;
pub mod config;
pub mod error;
pub mod catalog;
pub mod engine;
pub mod stats;
