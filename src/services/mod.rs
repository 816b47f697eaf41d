/// Business logic independent of the transport layer
pub mod birthday_finder;
pub mod contact_service;

pub use contact_service::{ContactService, ServiceError};
