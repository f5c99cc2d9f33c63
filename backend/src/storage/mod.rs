//! # Storage Module
//!
//! Handles all data persistence for the address book.
//!
//! The domain layer only sees the [`PersonStorage`] trait; the SQLite
//! implementation lives in `repositories` and is wired up at startup.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite database through SQLx
//! - **Schema**: a single `persons` table, created idempotently on connect
//! - **Ordering**: every listing is in primary-key (insertion) order

pub mod connection;
pub mod repositories;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::PersonRepository;
pub use traits::PersonStorage;
