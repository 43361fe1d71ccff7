//! Inscribe Core
//!
//! This crate contains the ambient functionality shared by the Inscribe
//! overlay crates: logging bootstrap, profiling scopes, engine configuration
//! and the hash collections used across the workspace.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod profiling;

pub use config::{BenchmarkMode, ConfigError, EngineConfig, TimestampZone};
