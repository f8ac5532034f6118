use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::mapper::Mapper;
use crate::record::{Merge, Record, RecordId};
use crate::store::Store;

/// CRUD contract shared by every entity kind.
///
/// Owns a store handle and a mapper, both supplied by the caller. Existence
/// checks and the merge step happen here; the store only persists.
///
/// `update` reads, merges and saves in separate store calls. Two concurrent
/// updates of the same id can both read the old record and the later save
/// wins; no per-id locking is done.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use service::{dto::AuthorDto, mapper::AuthorMapper, store::MemoryStore, EntityService};
///
/// let svc = EntityService::new(Arc::new(MemoryStore::new()), AuthorMapper);
/// let dto = AuthorDto { name: Some("Ada".into()), email: Some("ada@example.com".into()), ..Default::default() };
/// tokio_test::block_on(svc.create(dto)).unwrap();
/// let all = tokio_test::block_on(svc.get_all()).unwrap();
/// assert_eq!(all[0].name.as_deref(), Some("Ada"));
/// ```
pub struct EntityService<S: ?Sized, M> {
    store: Arc<S>,
    mapper: M,
}

impl<S: ?Sized, M: Clone> Clone for EntityService<S, M> {
    fn clone(&self) -> Self { Self { store: Arc::clone(&self.store), mapper: self.mapper.clone() } }
}

impl<S, M> EntityService<S, M>
where
    M: Mapper,
    M::Record: Merge<M::Dto>,
    S: Store<M::Record> + ?Sized,
{
    pub fn new(store: Arc<S>, mapper: M) -> Self { Self { store, mapper } }

    pub fn kind(&self) -> &'static str { <M::Record as Record>::KIND }

    #[instrument(skip(self), fields(kind = <M::Record as Record>::KIND))]
    pub async fn get_by_id(&self, id: RecordId) -> Result<M::Dto, ServiceError> {
        let record = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(self.kind(), id))?;
        Ok(self.mapper.to_dto(&record))
    }

    /// All records; an empty store is reported as `NotFound`.
    #[instrument(skip(self), fields(kind = <M::Record as Record>::KIND))]
    pub async fn get_all(&self) -> Result<Vec<M::Dto>, ServiceError> {
        let records = self.store.get_all().await?;
        if records.is_empty() {
            return Err(ServiceError::empty_list());
        }
        Ok(records.iter().map(|r| self.mapper.to_dto(r)).collect())
    }

    #[instrument(skip(self, dto), fields(kind = <M::Record as Record>::KIND))]
    pub async fn create(&self, dto: M::Dto) -> Result<(), ServiceError> {
        let mut record = self.mapper.to_entity(dto);
        if let Err(e) = record.validate() {
            warn!(error = %e, "create rejected");
            return Err(e);
        }
        // the store hands out the id
        record.set_id(None);
        let saved = self.store.save(record).await?;
        info!(id = ?saved.id(), "created");
        Ok(())
    }

    #[instrument(skip(self, dto), fields(kind = <M::Record as Record>::KIND))]
    pub async fn update(&self, id: RecordId, dto: M::Dto) -> Result<(), ServiceError> {
        let mut record = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(self.kind(), id))?;
        record.merge(dto);
        record.set_id(Some(id));
        self.store.save(record).await?;
        info!("updated");
        Ok(())
    }

    #[instrument(skip(self), fields(kind = <M::Record as Record>::KIND))]
    pub async fn delete(&self, id: RecordId) -> Result<(), ServiceError> {
        if !self.store.exists(id).await? {
            return Err(ServiceError::not_found(self.kind(), id));
        }
        if !self.store.delete(id).await? {
            // removed by someone else between the check and the delete
            return Err(ServiceError::not_found(self.kind(), id));
        }
        info!("deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use super::*;
    use crate::dto::AuthorDto;
    use crate::mapper::AuthorMapper;
    use crate::record::AuthorRecord;
    use crate::store::MemoryStore;

    /// Holds every `get` until two readers have arrived.
    struct GatedStore {
        inner: MemoryStore,
        gate: Barrier,
    }

    #[async_trait]
    impl Store<AuthorRecord> for GatedStore {
        async fn get(&self, id: RecordId) -> Result<Option<AuthorRecord>, ServiceError> {
            let found = Store::<AuthorRecord>::get(&self.inner, id).await?;
            self.gate.wait().await;
            Ok(found)
        }

        async fn get_all(&self) -> Result<Vec<AuthorRecord>, ServiceError> {
            Store::<AuthorRecord>::get_all(&self.inner).await
        }

        async fn save(&self, record: AuthorRecord) -> Result<AuthorRecord, ServiceError> {
            Store::<AuthorRecord>::save(&self.inner, record).await
        }

        async fn delete(&self, id: RecordId) -> Result<bool, ServiceError> {
            Store::<AuthorRecord>::delete(&self.inner, id).await
        }

        async fn exists(&self, id: RecordId) -> Result<bool, ServiceError> {
            Store::<AuthorRecord>::exists(&self.inner, id).await
        }
    }

    #[tokio::test]
    async fn interleaved_updates_lose_one_merge() -> Result<(), anyhow::Error> {
        let store = Arc::new(GatedStore { inner: MemoryStore::new(), gate: Barrier::new(2) });
        let seeded = Store::<AuthorRecord>::save(
            &store.inner,
            AuthorRecord { name: Some("Old Name".into()), email: Some("old@x.com".into()), ..Default::default() },
        )
        .await?;
        let id = seeded.id.expect("id assigned");

        let svc = EntityService::new(store.clone(), AuthorMapper);
        let rename = AuthorDto { name: Some("New Name".into()), ..Default::default() };
        let re_email = AuthorDto { email: Some("new@x.com".into()), ..Default::default() };
        let (a, b) = tokio::join!(svc.update(id, rename), svc.update(id, re_email));
        a?;
        b?;

        let last = Store::<AuthorRecord>::get(&store.inner, id).await?.expect("still stored");
        let both_applied = last.name.as_deref() == Some("New Name") && last.email.as_deref() == Some("new@x.com");
        assert!(!both_applied, "both merges survived: {last:?}");
        Ok(())
    }

    #[tokio::test]
    async fn trait_object_store_serves_requests() -> Result<(), anyhow::Error> {
        let store: Arc<dyn Store<AuthorRecord>> = Arc::new(MemoryStore::new());
        let svc = EntityService::new(store, AuthorMapper);
        assert_eq!(svc.kind(), "author");
        svc.create(AuthorDto { name: Some("Ada".into()), email: Some("a@x.com".into()), ..Default::default() })
            .await?;
        assert_eq!(svc.get_all().await?.len(), 1);
        Ok(())
    }
}
