//! Tag kind: no required fields, same not-found rules as the other kinds.

use crate::dto::TagDto;
use crate::entity_service::EntityService;
use crate::errors::ServiceError;
use crate::mapper::TagMapper;
use crate::record::{Merge, Record, RecordId, TagRecord};
use crate::store::Store;

pub type TagService<S = dyn Store<TagRecord>> = EntityService<S, TagMapper>;

impl Record for TagRecord {
    const KIND: &'static str = "tag";

    fn id(&self) -> Option<RecordId> { self.id }

    fn set_id(&mut self, id: Option<RecordId>) { self.id = id; }

    fn validate(&self) -> Result<(), ServiceError> { Ok(()) }
}

impl Merge<TagDto> for TagRecord {
    fn merge(&mut self, patch: TagDto) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
    }
}
