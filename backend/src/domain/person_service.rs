use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::models::{Page, PageRequest, Person, PersonDraft, PersonId};
use crate::storage::PersonStorage;

/// Service for managing address-book entries
#[derive(Clone)]
pub struct PersonService {
    storage: Arc<dyn PersonStorage>,
}

impl PersonService {
    pub fn new(storage: Arc<dyn PersonStorage>) -> Self {
        Self { storage }
    }

    /// List one page of all persons in insertion order
    pub async fn list_all(&self, request: PageRequest) -> Result<Page<Person>> {
        info!("Listing persons: page={}, size={}", request.page(), request.size());

        let total = self.storage.count().await?;
        let content = self
            .storage
            .find_all(request.offset(), request.size())
            .await?;

        info!("Returning {} of {} persons", content.len(), total);
        Ok(Page::new(content, request, total))
    }

    /// Get a person by ID. A missing person is `Ok(None)`, not an error.
    pub async fn get_by_id(&self, id: PersonId) -> Result<Option<Person>> {
        info!("Getting person: {}", id);

        let person = self.storage.find_by_id(id).await?;
        if person.is_none() {
            warn!("Person not found: {}", id);
        }

        Ok(person)
    }

    /// Create a new person from a validated draft
    pub async fn create(&self, draft: PersonDraft) -> Result<Person> {
        info!("Creating person: {}", draft.full_name);

        let person = self.storage.save(&Person::from_draft(draft)).await?;

        info!("Created person with ID: {:?}", person.id);
        Ok(person)
    }

    /// Replace every field of an existing person.
    ///
    /// Returns `Ok(None)` without touching the store when the id is unknown.
    pub async fn update(&self, id: PersonId, draft: PersonDraft) -> Result<Option<Person>> {
        info!("Updating person: {}", id);

        let Some(mut person) = self.storage.find_by_id(id).await? else {
            warn!("Person not found for update: {}", id);
            return Ok(None);
        };

        person.replace_with(draft);
        let updated = self.storage.save(&person).await?;

        info!("Updated person: {}", id);
        Ok(Some(updated))
    }

    /// Delete a person. Deleting an unknown id is not an error here.
    pub async fn delete(&self, id: PersonId) -> Result<()> {
        info!("Deleting person: {}", id);

        if !self.storage.delete_by_id(id).await? {
            warn!("No person deleted for id: {}", id);
        }

        Ok(())
    }

    /// Search persons whose full name contains `name`, ignoring case
    pub async fn search(&self, name: &str, request: PageRequest) -> Result<Page<Person>> {
        info!(
            "Searching persons: name={:?}, page={}, size={}",
            name,
            request.page(),
            request.size()
        );

        let total = self.storage.count_by_name_containing(name).await?;
        let content = self
            .storage
            .find_by_name_containing(name, request.offset(), request.size())
            .await?;

        info!("Found {} matching persons", total);
        Ok(Page::new(content, request, total))
    }
}
