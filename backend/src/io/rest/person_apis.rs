//! # REST API for Person Management
//!
//! Endpoints for listing, searching, creating, retrieving, replacing and
//! deleting address-book entries under `/api/v1.0/persons`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::{Page, Person, PersonInsertDto};
use tracing::info;

use crate::domain::models::{PageRequest, PersonId, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::io::rest::error::{ApiError, ApiResult};
use crate::io::rest::mappers::PersonMapper;
use crate::io::rest::validation::validate_person;
use crate::AppState;

pub const PERSONS_PATH: &str = "/api/v1.0/persons";

/// Create the person API router, to be nested under [`PERSONS_PATH`]
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_persons).post(create_person))
        .route("/search", get(search_persons))
        .route(
            "/:id",
            get(get_person).put(update_person).delete(delete_person),
        )
}

/// Query parameters for the list endpoint.
///
/// `page` is zero-based and defaults to 0. `size` defaults to 10 and must be
/// positive. A `size` above the configured `pagination.max_page_size`
/// (100 by default) is capped to that maximum, and the response envelope
/// reports the capped value in its `size` field.
#[derive(Deserialize, Debug)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Query parameters for the search endpoint. Paging follows [`PageQuery`],
/// including the page size cap.
#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

fn page_request(state: &AppState, page: Option<u32>, size: Option<u32>) -> ApiResult<PageRequest> {
    let request = PageRequest::of(
        page.unwrap_or(DEFAULT_PAGE),
        size.unwrap_or(DEFAULT_PAGE_SIZE),
    )?;
    Ok(request.with_max_size(state.max_page_size))
}

/// GET /api/v1.0/persons
pub async fn list_persons(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Page<Person>>> {
    let Query(query) = query?;
    info!("GET {} - query: {:?}", PERSONS_PATH, query);

    let request = page_request(&state, query.page, query.size)?;
    let page = state.person_service.list_all(request).await?;

    Ok(Json(PersonMapper::to_page_dto(page)))
}

/// GET /api/v1.0/persons/search
pub async fn search_persons(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<Page<Person>>> {
    let Query(query) = query?;
    info!("GET {}/search - query: {:?}", PERSONS_PATH, query);

    let full_name = query
        .full_name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Query parameter 'fullName' is required".to_string()))?;

    let request = page_request(&state, query.page, query.size)?;
    let page = state.person_service.search(&full_name, request).await?;

    Ok(Json(PersonMapper::to_page_dto(page)))
}

/// GET /api/v1.0/persons/:id
pub async fn get_person(
    State(state): State<AppState>,
    id: Result<Path<PersonId>, PathRejection>,
) -> ApiResult<Json<Person>> {
    let Path(id) = id?;
    info!("GET {}/{}", PERSONS_PATH, id);

    state
        .person_service
        .get_by_id(id)
        .await?
        .map(|person| Json(PersonMapper::to_dto(person)))
        .ok_or(ApiError::NotFound)
}

/// POST /api/v1.0/persons
pub async fn create_person(
    State(state): State<AppState>,
    body: Result<Json<PersonInsertDto>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Person>)> {
    let Json(request) = body?;
    info!("POST {} - request: {:?}", PERSONS_PATH, request);

    let draft = validate_person(request).map_err(ApiError::Validation)?;
    let person = state.person_service.create(draft).await?;

    Ok((StatusCode::CREATED, Json(PersonMapper::to_dto(person))))
}

/// PUT /api/v1.0/persons/:id
pub async fn update_person(
    State(state): State<AppState>,
    id: Result<Path<PersonId>, PathRejection>,
    body: Result<Json<PersonInsertDto>, JsonRejection>,
) -> ApiResult<Json<Person>> {
    let Path(id) = id?;
    let Json(request) = body?;
    info!("PUT {}/{} - request: {:?}", PERSONS_PATH, id, request);

    let draft = validate_person(request).map_err(ApiError::Validation)?;

    state
        .person_service
        .update(id, draft)
        .await?
        .map(|person| Json(PersonMapper::to_dto(person)))
        .ok_or(ApiError::NotFound)
}

/// DELETE /api/v1.0/persons/:id
pub async fn delete_person(
    State(state): State<AppState>,
    id: Result<Path<PersonId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    info!("DELETE {}/{}", PERSONS_PATH, id);

    // Existence is checked first; a concurrent delete in between still yields 204
    if state.person_service.get_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    state.person_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
