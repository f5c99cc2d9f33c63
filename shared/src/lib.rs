use serde::{Deserialize, Serialize};

/// A stored address-book entry as exposed over the REST API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Store-generated identifier, present on every persisted person
    pub id: Option<i64>,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub blog_url: Option<String>,
    pub notes: Option<String>,
}

/// Request body for both creating and replacing a person.
///
/// Every field is optional on the wire so that a missing field is reported
/// as a validation message instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInsertDto {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub blog_url: Option<String>,
    pub notes: Option<String>,
}

/// Page envelope returned by list and search endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Zero-based index of this page
    pub number: u32,
    /// Requested page size
    pub size: u32,
    pub number_of_elements: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

/// A single rejected field in a request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// JSON body for every non-404 error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}
