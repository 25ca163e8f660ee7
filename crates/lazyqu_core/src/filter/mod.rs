//! Pure projections over the video collection.
//!
//! # Invariants
//! - Functions here never mutate their inputs and never fail.

pub mod week;
