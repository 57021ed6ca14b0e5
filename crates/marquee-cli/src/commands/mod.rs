pub mod browse;
pub mod catalog;
pub mod config;
pub mod prompts;
pub mod session;
pub mod watchlist;
