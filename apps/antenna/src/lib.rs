//! # Antenna Application
//!
//! Command-line front end for `antenna-core`: configuration loading, file
//! validation, and the command implementations.

pub mod cli;
pub mod config;
