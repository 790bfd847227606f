//! wilma-schedules library
//!
//! This crate provides the core functionality for the `wilma-schedules`
//! binary. Keep the crate root minimal — implementation and tests live in
//! their modules.
//!
//! ## Overview
//!
//! The library is organized into modules that handle the stages of one
//! download run:
//!
//! - [`wilma`] - Session authentication, date-range expansion, and the
//!   schedule download loop against a Wilma instance
//! - [`cli`] - Command-line interface and workflow orchestration
//! - [`config`] - Timing and retry policy for the download loop
//! - [`models`] - The resource-type enumeration
//! - [`errors`] - Error types used throughout the application
//! - [`ui`] - Progress bar helper
//!
//! ## Example Usage
//!
//! A run authenticates once, expands the requested date range, and writes
//! one JSON file per date:
//!
//! ```no_run
//! use wilma_schedules::{cli, errors::AppResult};
//!
//! # async fn example() -> AppResult<()> {
//! // Parse the command line and execute one full download run
//! cli::run().await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod ui;
pub mod wilma;
