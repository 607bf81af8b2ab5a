//! Spots
//!
//! Declarative UI composition core: JSON component descriptions become
//! ordered, indexed spots whose item views are resolved through
//! per-spot registries with recycling instance caches.
//!
//! The pipeline is pure and single-threaded. Reading input, loading
//! configuration and installing the log subscriber happen in the binary.

pub mod composite;
pub mod composition;
pub mod config;
pub mod factory;
pub mod logging;
pub mod model;
pub mod parser;
pub mod registry;
pub mod report;
pub mod spots;
