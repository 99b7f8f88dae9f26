// (c) Copyright 2026 Helsing GmbH. All rights reserved.

#![doc = include_str!("../README.md")]

/// CLI command implementations
pub mod command;
/// Conan binary discovery and install execution
pub mod conan;
/// Configuration file handling
pub mod config;
/// Profile names and profile path resolution
pub mod profile;

mod errors;
