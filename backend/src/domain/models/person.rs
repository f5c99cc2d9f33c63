pub type PersonId = i64;

/// An address-book entry. `id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: Option<PersonId>,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub blog_url: Option<String>,
    pub notes: Option<String>,
}

/// Person content that has already passed request validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub blog_url: Option<String>,
    pub notes: Option<String>,
}

impl Person {
    /// Build an unsaved person carrying every field of the draft
    pub fn from_draft(draft: PersonDraft) -> Self {
        let PersonDraft {
            full_name,
            phone,
            email,
            blog_url,
            notes,
        } = draft;

        Self {
            id: None,
            full_name,
            phone,
            email,
            blog_url,
            notes,
        }
    }

    /// Overwrite every field except the id. Fields missing from the draft are cleared.
    pub fn replace_with(&mut self, draft: PersonDraft) {
        *self = Self {
            id: self.id,
            ..Self::from_draft(draft)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(full_name: &str) -> PersonDraft {
        PersonDraft {
            full_name: full_name.to_string(),
            phone: "1234567890".to_string(),
            email: Some("john.doe@example.com".to_string()),
            blog_url: Some("https://johndoe.com".to_string()),
            notes: Some("Some notes about John".to_string()),
        }
    }

    #[test]
    fn test_from_draft_copies_every_field() {
        let person = Person::from_draft(draft("John Doe"));

        assert_eq!(person.id, None);
        assert_eq!(person.full_name, "John Doe");
        assert_eq!(person.phone, "1234567890");
        assert_eq!(person.email.as_deref(), Some("john.doe@example.com"));
        assert_eq!(person.blog_url.as_deref(), Some("https://johndoe.com"));
        assert_eq!(person.notes.as_deref(), Some("Some notes about John"));
    }

    #[test]
    fn test_replace_with_keeps_id_and_clears_missing_optionals() {
        let mut person = Person::from_draft(draft("John Doe"));
        person.id = Some(42);

        person.replace_with(PersonDraft {
            full_name: "John Doe Updated".to_string(),
            phone: "9876543210".to_string(),
            email: None,
            blog_url: None,
            notes: None,
        });

        assert_eq!(person.id, Some(42));
        assert_eq!(person.full_name, "John Doe Updated");
        assert_eq!(person.phone, "9876543210");
        assert_eq!(person.email, None);
        assert_eq!(person.blog_url, None);
        assert_eq!(person.notes, None);
    }
}
