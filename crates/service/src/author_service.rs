//! Author kind: `name` and `email` are required on create.

use crate::dto::AuthorDto;
use crate::entity_service::EntityService;
use crate::errors::ServiceError;
use crate::mapper::AuthorMapper;
use crate::record::{missing_fields, AuthorRecord, Merge, Record, RecordId};
use crate::store::Store;

pub type AuthorService<S = dyn Store<AuthorRecord>> = EntityService<S, AuthorMapper>;

impl Record for AuthorRecord {
    const KIND: &'static str = "author";

    fn id(&self) -> Option<RecordId> { self.id }

    fn set_id(&mut self, id: Option<RecordId>) { self.id = id; }

    fn validate(&self) -> Result<(), ServiceError> {
        let missing = missing_fields(&[("name", &self.name), ("email", &self.email)]);
        if missing.is_empty() {
            return Ok(());
        }
        Err(ServiceError::Validation(format!("Author fields cannot be empty: {}", missing.join(", "))))
    }
}

impl Merge<AuthorDto> for AuthorRecord {
    fn merge(&mut self, patch: AuthorDto) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
    }
}
