//! Test module for tauri-plugin-router
//!
//! Property-based tests for the error and configuration types, and
//! request body handling through a full dispatch.


#[cfg(test)]
pub mod error_tests;
