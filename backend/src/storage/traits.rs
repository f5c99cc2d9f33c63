//! # Storage Traits
//!
//! The record-store abstraction the domain layer talks to. Implementations
//! decide how rows are kept; the domain only relies on the ordering and
//! presence rules documented here.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Person, PersonId};

/// Trait defining the interface for person storage operations
///
/// All listing methods return persons in primary-key (insertion) order.
#[async_trait]
pub trait PersonStorage: Send + Sync {
    /// List persons, skipping `offset` rows and returning at most `limit`
    async fn find_all(&self, offset: u64, limit: u32) -> Result<Vec<Person>>;

    /// Total number of stored persons
    async fn count(&self) -> Result<u64>;

    /// Retrieve a specific person by ID
    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>>;

    /// List persons whose full name contains `name`, ignoring case
    async fn find_by_name_containing(&self, name: &str, offset: u64, limit: u32)
        -> Result<Vec<Person>>;

    /// Number of persons whose full name contains `name`, ignoring case
    async fn count_by_name_containing(&self, name: &str) -> Result<u64>;

    /// Insert a person without an id, or overwrite the stored row with the same id.
    /// Returns the stored person, which always carries an id.
    async fn save(&self, person: &Person) -> Result<Person>;

    /// Delete a person by ID
    /// Returns true if the person was found and deleted, false otherwise
    async fn delete_by_id(&self, id: PersonId) -> Result<bool>;

    /// Delete every person, returning how many rows were removed
    async fn delete_all(&self) -> Result<u64>;
}
