//! Integration test utilities
//!
//! Provides helpers for building service contexts over the memory and file
//! backends, plus fixture data shared by the end-to-end tests.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
