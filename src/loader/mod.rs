//! Document loading
//!
//! Initialization fetches three documents in a fixed order:
//!
//! 1. status (best-effort, supplies the cache-busting data version)
//! 2. dimensions (fatal on failure)
//! 3. facts (fatal on failure)
//!
//! Sources implement [`DocumentSource`]: [`HttpSource`] talks to the
//! dashboard server, [`FsSource`] reads a static folder directly.

mod fs;
mod http;
mod source;

pub use fs::{FsSource, DIMENSIONS_FILE, FACTS_FILE, STATUS_FILE};
pub use http::HttpSource;
pub use source::{load_data_set, DocumentSource, LoadError};
