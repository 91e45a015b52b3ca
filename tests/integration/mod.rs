//! Integration test suite for pomgrade
//!
//! End-to-end tests that lay out Maven project trees in temporary directories
//! and run the engine or the `pomgrade` binary against them.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **loader**: descriptor loading, caching, parse errors
//! - **parent_chain**: parent lookup, local repository fallback, cycles
//! - **module_graph**: module registration and inter-module dependencies
//! - **resolution**: properties, versions, scopes, Java version
//! - **conversion**: generated Gradle files
//! - **cli**: the `pomgrade` binary

#[path = "../common/mod.rs"]
mod common;

mod cli;
mod conversion;
mod module_graph;
mod parent_chain;
mod resolution;
