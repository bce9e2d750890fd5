pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod utils;

pub use core::{Category, JsonLinkFetcher, LinkRecord, LinkStore, MetadataFetcher};
