//! AHSETTLE — Asian Handicap settlement engine.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod dashboard;
pub mod settle;
pub mod types;
