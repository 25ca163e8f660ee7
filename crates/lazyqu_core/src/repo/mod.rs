//! Record store over the durable blob.
//!
//! # Responsibility
//! - Hold the authoritative in-memory collection of video plans.
//! - Re-serialize the whole collection after every mutation.
//!
//! # Invariants
//! - Ids are unique across the collection.
//! - Storage failures degrade to memory-only operation; they never fail a
//!   mutation.

pub mod video_store;
