//! # Domain Module
//!
//! Business logic for the address book. It works against the
//! [`PersonStorage`](crate::storage::PersonStorage) abstraction and knows
//! nothing about HTTP.
//!
//! ## Module Organization
//!
//! - **models**: `Person`, the validated `PersonDraft`, and page types
//! - **person_service**: CRUD, paging and name search over persons
//!
//! ## Business Rules
//!
//! - Ids are assigned by the store on creation and never change
//! - Updates replace every field; there is no partial merge
//! - A missing id is reported as an absent result, never as an error

pub mod models;
pub mod person_service;

pub use person_service::*;
