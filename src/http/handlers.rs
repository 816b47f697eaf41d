use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::{ApiError, AppState};
use crate::constants::DEFAULT_LIST_LIMIT;
use crate::models::{Contact, ContactBody, SearchFilter};
use crate::services::ContactService;
use crate::store::ContactStore;

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default)]
    skip: u32,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

#[derive(Deserialize)]
pub struct UpcomingParams {
    /// Overrides the current date in the configured timezone
    today: Option<NaiveDate>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn create_contact<S: ContactStore>(
    State(state): State<AppState<S>>,
    ApiJson(body): ApiJson<ContactBody>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let contact = ContactService::new(state.store())
        .create_contact(body, state.today())
        .await?;

    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn list_contacts<S: ContactStore>(
    State(state): State<AppState<S>>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = ContactService::new(state.store())
        .list_contacts(params.skip, params.limit)
        .await?;

    Ok(Json(contacts))
}

pub async fn search_contacts<S: ContactStore>(
    State(state): State<AppState<S>>,
    ApiQuery(filter): ApiQuery<SearchFilter>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = ContactService::new(state.store())
        .search_contacts(&filter)
        .await?;

    Ok(Json(contacts))
}

pub async fn upcoming_birthdays<S: ContactStore>(
    State(state): State<AppState<S>>,
    ApiQuery(params): ApiQuery<UpcomingParams>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let today = params.today.unwrap_or_else(|| state.today());
    let contacts = ContactService::new(state.store())
        .upcoming_birthdays(today)
        .await?;

    Ok(Json(contacts))
}

pub async fn read_contact<S: ContactStore>(
    State(state): State<AppState<S>>,
    ApiPath(contact_id): ApiPath<i32>,
) -> Result<Json<Contact>, ApiError> {
    ContactService::new(state.store())
        .get_contact(contact_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn update_contact<S: ContactStore>(
    State(state): State<AppState<S>>,
    ApiPath(contact_id): ApiPath<i32>,
    ApiJson(body): ApiJson<ContactBody>,
) -> Result<Json<Contact>, ApiError> {
    ContactService::new(state.store())
        .update_contact(contact_id, body, state.today())
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn delete_contact<S: ContactStore>(
    State(state): State<AppState<S>>,
    ApiPath(contact_id): ApiPath<i32>,
) -> Result<Json<Contact>, ApiError> {
    ContactService::new(state.store())
        .remove_contact(contact_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}
