/// HTTP surface of the contact book
mod error;
mod extract;
mod handlers;

pub use error::ApiError;

use std::sync::Arc;

use axum::{Router, routing::get};
use chrono::NaiveDate;
use chrono_tz::Tz;
use tower_http::trace::TraceLayer;

use crate::store::ContactStore;
use crate::utils::timezone::today_in;

/// State shared by all handlers
pub struct AppState<S> {
    store: Arc<S>,
    timezone: Tz,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            timezone: self.timezone,
        }
    }
}

impl<S: ContactStore> AppState<S> {
    pub fn new(store: S, timezone: Tz) -> Self {
        Self {
            store: Arc::new(store),
            timezone,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current date in the configured timezone
    pub fn today(&self) -> NaiveDate {
        today_in(&self.timezone)
    }
}

/// Build the application router
///
/// The collection is served both as `/contacts` and `/contacts/`.
pub fn router<S: ContactStore>(state: AppState<S>) -> Router {
    let collection = get(handlers::list_contacts::<S>).post(handlers::create_contact::<S>);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/contacts", collection.clone())
        .route("/contacts/", collection)
        .route("/contacts/search", get(handlers::search_contacts::<S>))
        .route(
            "/contacts/upcoming_birthdays",
            get(handlers::upcoming_birthdays::<S>),
        )
        .route(
            "/contacts/:contact_id",
            get(handlers::read_contact::<S>)
                .put(handlers::update_contact::<S>)
                .delete(handlers::delete_contact::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
