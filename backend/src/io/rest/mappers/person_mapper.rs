use crate::domain::models::{Page as DomainPage, Person as DomainPerson};
use shared::{Page as SharedPage, Person as SharedPerson};

/// Mapper to convert domain persons and pages to their wire shapes.
pub struct PersonMapper;

impl PersonMapper {
    /// Converts a domain Person to a shared Person DTO.
    pub fn to_dto(domain: DomainPerson) -> SharedPerson {
        let DomainPerson {
            id,
            full_name,
            phone,
            email,
            blog_url,
            notes,
        } = domain;

        SharedPerson {
            id,
            full_name,
            phone,
            email,
            blog_url,
            notes,
        }
    }

    /// Converts a domain page of persons to the JSON page envelope.
    pub fn to_page_dto(page: DomainPage<DomainPerson>) -> SharedPage<SharedPerson> {
        let page = page.map(Self::to_dto);
        let number_of_elements = u32::try_from(page.content.len()).unwrap_or(u32::MAX);

        SharedPage {
            total_elements: page.total_elements,
            total_pages: page.total_pages(),
            number: page.request.page(),
            size: page.request.size(),
            number_of_elements,
            first: page.is_first(),
            last: page.is_last(),
            empty: page.content.is_empty(),
            content: page.content,
        }
    }
}
