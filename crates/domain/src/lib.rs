//! Domain layer for the parking backend.
//!
//! This crate contains:
//! - Domain models for lots, spots, cameras, history and users
//! - Request payloads with validation and merge-patch semantics
//! - The access policy deciding who may read or change which lot
//!
//! Nothing in here touches the database.

pub mod models;
pub mod services;
