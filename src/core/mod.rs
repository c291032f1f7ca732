//! Core business logic modules.

pub mod episode;
pub mod exporter;
pub mod library;
pub mod season;
pub mod show;
pub mod tokenizer;
