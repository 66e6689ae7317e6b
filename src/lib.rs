// src/lib.rs
// Library interface for cn-harvest
pub mod cert_parser;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod output;
pub mod source;
pub mod stats;
pub mod types;
