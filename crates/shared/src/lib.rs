//! Shared utilities and common types for the parking backend.
//!
//! This crate provides credential primitives used across all other crates:
//! - Password hashing with Argon2id
//! - Signed, expiring identity tokens (HS256 JWT)
//! - Common validation logic

pub mod jwt;
pub mod password;
pub mod validation;
