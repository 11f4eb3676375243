//! Persistence layer for the parking backend.
//!
//! This crate contains:
//! - Database connection management and embedded migrations
//! - Entity definitions (database row mappings)
//! - A typed builder for filters and partial updates
//! - Repository implementations, one per table

pub mod db;
pub mod entities;
pub mod metrics;
pub mod query;
pub mod repositories;
