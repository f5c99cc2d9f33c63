//! # REST API Module
//!
//! HTTP handlers for the address book.
//!
//! ## Modules
//!
//! - **person_apis**: routes and handlers for `/api/v1.0/persons`
//! - **validation**: request body checks that produce field errors
//! - **error**: mapping of failures to status codes and JSON bodies
//! - **mappers**: conversion between domain models and wire DTOs

pub mod error;
pub mod mappers;
pub mod person_apis;
pub mod validation;

pub use person_apis::*;
