//! Shared utilities and common types for the ReachOut backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Phone number (MSISDN) normalization for the SMS gateway
//! - Common validation logic

pub mod phone;
pub mod validation;
