pub mod catalog;
pub mod config;
pub mod errors;
pub mod export;
pub mod pipeline;
pub mod source;
