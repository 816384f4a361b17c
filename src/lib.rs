//! Content search and aggregation for static school sites.
//!
//! The site publishes its content as plain JSON files (a prebuilt page
//! search index, an article stream, a memo stream, an event stream).
//! This crate fetches those collections, aggregates keyword search over
//! them, and renders escaped HTML fragments for display.

pub mod cli;
pub mod config;
pub mod content;
pub mod logging;
pub mod model;
pub mod render;
pub mod search;
pub mod sources;
