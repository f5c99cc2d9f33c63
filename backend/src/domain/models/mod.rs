pub mod page;
pub mod person;

pub use page::{Page, PageRequest, PageRequestError, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use person::{Person, PersonDraft, PersonId};
