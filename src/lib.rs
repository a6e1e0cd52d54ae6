pub mod cache;
pub mod classify;
pub mod cli;
pub mod config;
pub mod enrich;
pub mod errors;
pub mod exploit;
pub mod llm;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod reporting;
pub mod scanners;
pub mod score;
