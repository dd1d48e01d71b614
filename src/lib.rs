//! ttlinker - An in-memory URL shortener with expiring aliases
//!
//! Short aliases map to target URLs for a bounded lifetime. Each alias keeps
//! an access counter plus its most recent access times, and a background
//! sweeper reclaims aliases once their TTL elapses.
//!
//! # Architecture
//! - `storage`: Alias registry, expiration index and sweeper (the core)
//! - `analytics`: Per-alias access tracking
//! - `utils`: Alias generation and validation
//! - `services`: Request-level link service
//! - `api`: HTTP handlers and routes
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging

pub mod analytics;
pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
