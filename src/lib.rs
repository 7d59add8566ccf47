//! Find and remove zero-length files and empty directories.
//!
//! A [`Dispatcher`](core::dispatcher::Dispatcher) launches one traversal per
//! object-type filter. Each traversal walks the tree depth-first, classifies
//! every entry and, depending on [`ScanConfig`](config::settings::ScanConfig),
//! deletes zero-length files and prunes empty directories.

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
