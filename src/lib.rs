//! ESG Radar
//!
//! ESG intelligence dashboard: scores corporate reports and news items
//! via a hosted LLM and serves the results over a JSON API.

pub mod config;
pub mod error;
pub mod ingest;
pub mod scoring;
pub mod server;
pub mod types;
pub mod universe;
