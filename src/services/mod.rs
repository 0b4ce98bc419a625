//! External data services
//!
//! - Dataset loading (bundled, JSON, YAML, CSV)
//! - Import of scraped glossary records

pub mod dataset;
pub mod import;

pub use dataset::{load_bundled, load_file, DatasetError};
pub use import::import_file;
