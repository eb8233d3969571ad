pub mod cache;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod kdocs;
pub mod listing;
pub mod navigation;
pub mod output;
pub mod secret;
