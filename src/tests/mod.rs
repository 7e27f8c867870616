//! Test modules for Mauka Phrase.
//!
//! This module contains cross-cutting tests that do not belong to a single
//! component:
//! - Configuration loading from files and the environment
//! - Error conversion and reporting
//! - Shared fixtures


// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::TestFixture;
