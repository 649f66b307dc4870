//! Shared utilities and common types for the Chorely backend.
//!
//! This crate provides functionality used across all other crates:
//! - JWT bearer-token creation and validation

pub mod jwt;
