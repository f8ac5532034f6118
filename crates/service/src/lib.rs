//! Service layer for the blog records (authors, posts, tags).
//! - Converts between wire DTOs and persisted records through pure mappers.
//! - Enforces required-field validation, existence checks and merge updates.
//! - Talks to persistence only through the `Store` trait.

pub mod errors;
pub mod dto;
pub mod record;
pub mod mapper;
pub mod store;
pub mod entity_service;
pub mod author_service;
pub mod post_service;
pub mod tag_service;
pub mod services;
#[cfg(test)]
pub mod test_support;

pub use entity_service::EntityService;
pub use errors::ServiceError;
pub use services::Services;
