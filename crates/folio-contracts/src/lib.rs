//! # folio-contracts
//!
//! Shared types, the JSON response schema, and the error type for the folio
//! contact intake.
//!
//! Every crate in the workspace imports from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod error;
pub mod field;
pub mod response;
pub mod submission;
