//! Library Manager
//!
//! Turns a directory tree of media files into a catalog of libraries, shows,
//! seasons and episodes using the directory layout and filename metadata.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod utils;

pub use error::{Error, Result};
