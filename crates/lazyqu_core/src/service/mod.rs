//! Use-case layer for the planner.
//!
//! # Responsibility
//! - Validate drafts before they reach the store.
//! - Orchestrate create/update/delete/edit flows for the UI collaborator.

pub mod planner_service;
pub mod validator;
