//! Shared types used across all pagebot crates.

pub mod types;
