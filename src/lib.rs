//! sessionize library crate.
//!
//! This library provides the core functionality for sessionize, including:
//! - Prompt extraction and similarity clustering
//! - Time-gap batching and session folder naming
//! - Concurrent file placement with per-file error isolation
//! - Configuration resolution from CLI flags and environment variables

pub mod cli;
pub mod cluster;
pub mod config;
pub mod mover;
pub mod pipeline;
pub mod scan;
