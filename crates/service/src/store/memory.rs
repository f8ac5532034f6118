use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::record::{AuthorRecord, AuthorRef, PostRecord, RecordId, TagRecord, TagRef};

use super::Store;

#[derive(Clone, Debug)]
struct AuthorRow {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Clone, Debug)]
struct PostRow {
    title: Option<String>,
    content: Option<String>,
    author_id: Option<RecordId>,
    tag_ids: BTreeSet<RecordId>,
}

#[derive(Clone, Debug)]
struct TagRow {
    name: Option<String>,
}

#[derive(Default)]
struct Tables {
    authors: BTreeMap<RecordId, AuthorRow>,
    posts: BTreeMap<RecordId, PostRow>,
    tags: BTreeMap<RecordId, TagRow>,
    author_seq: RecordId,
    post_seq: RecordId,
    tag_seq: RecordId,
}

/// Process-local store holding all three tables behind one lock.
///
/// Mirrors the relational schema: ids start at 1 per table, deleting an
/// author detaches its posts, deleting a post or tag drops the association,
/// and saving a post that points at a missing author or tag is rejected the
/// way a foreign key would reject it.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

fn next_id(seq: &mut RecordId, requested: Option<RecordId>) -> RecordId {
    match requested {
        Some(id) => {
            *seq = (*seq).max(id);
            id
        }
        None => {
            *seq += 1;
            *seq
        }
    }
}

impl Tables {
    fn author_record(&self, id: RecordId, row: &AuthorRow) -> AuthorRecord {
        let posts = self
            .posts
            .iter()
            .filter(|(_, p)| p.author_id == Some(id))
            .map(|(pid, _)| *pid)
            .collect();
        AuthorRecord { id: Some(id), name: row.name.clone(), email: row.email.clone(), posts }
    }

    fn post_record(&self, id: RecordId, row: &PostRow) -> PostRecord {
        PostRecord {
            id: Some(id),
            title: row.title.clone(),
            content: row.content.clone(),
            author: row.author_id.map(|id| AuthorRef { id }),
            tags: row.tag_ids.iter().map(|id| TagRef { id: *id }).collect(),
        }
    }

    fn tag_record(&self, id: RecordId, row: &TagRow) -> TagRecord {
        let posts = self
            .posts
            .iter()
            .filter(|(_, p)| p.tag_ids.contains(&id))
            .map(|(pid, _)| *pid)
            .collect();
        TagRecord { id: Some(id), name: row.name.clone(), posts }
    }

    fn check_post_refs(&self, record: &PostRecord) -> Result<(), ServiceError> {
        if let Some(author) = record.author {
            if !self.authors.contains_key(&author.id) {
                return Err(ServiceError::Store(format!("foreign key violation: author {} does not exist", author.id)));
            }
        }
        if let Some(tag) = record.tags.iter().find(|t| !self.tags.contains_key(&t.id)) {
            return Err(ServiceError::Store(format!("foreign key violation: tag {} does not exist", tag.id)));
        }
        Ok(())
    }
}

fn missing_row(kind: &str, id: RecordId) -> ServiceError {
    ServiceError::Store(format!("{kind} row {id} does not exist"))
}

#[async_trait]
impl Store<AuthorRecord> for MemoryStore {
    async fn get(&self, id: RecordId) -> Result<Option<AuthorRecord>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.authors.get(&id).map(|row| t.author_record(id, row)))
    }

    async fn get_all(&self) -> Result<Vec<AuthorRecord>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.authors.iter().map(|(id, row)| t.author_record(*id, row)).collect())
    }

    async fn save(&self, record: AuthorRecord) -> Result<AuthorRecord, ServiceError> {
        let mut t = self.inner.write().await;
        if let Some(id) = record.id {
            if !t.authors.contains_key(&id) {
                return Err(missing_row("author", id));
            }
        }
        let id = next_id(&mut t.author_seq, record.id);
        let row = AuthorRow { name: record.name, email: record.email };
        t.authors.insert(id, row.clone());
        Ok(t.author_record(id, &row))
    }

    async fn delete(&self, id: RecordId) -> Result<bool, ServiceError> {
        let mut t = self.inner.write().await;
        if t.authors.remove(&id).is_none() {
            return Ok(false);
        }
        for post in t.posts.values_mut().filter(|p| p.author_id == Some(id)) {
            post.author_id = None;
        }
        Ok(true)
    }

    async fn exists(&self, id: RecordId) -> Result<bool, ServiceError> {
        Ok(self.inner.read().await.authors.contains_key(&id))
    }
}

#[async_trait]
impl Store<PostRecord> for MemoryStore {
    async fn get(&self, id: RecordId) -> Result<Option<PostRecord>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.posts.get(&id).map(|row| t.post_record(id, row)))
    }

    async fn get_all(&self) -> Result<Vec<PostRecord>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.posts.iter().map(|(id, row)| t.post_record(*id, row)).collect())
    }

    async fn save(&self, record: PostRecord) -> Result<PostRecord, ServiceError> {
        let mut t = self.inner.write().await;
        if let Some(id) = record.id {
            if !t.posts.contains_key(&id) {
                return Err(missing_row("post", id));
            }
        }
        t.check_post_refs(&record)?;
        let id = next_id(&mut t.post_seq, record.id);
        let row = PostRow {
            title: record.title,
            content: record.content,
            author_id: record.author.map(|a| a.id),
            tag_ids: record.tags.iter().map(|t| t.id).collect(),
        };
        t.posts.insert(id, row.clone());
        Ok(t.post_record(id, &row))
    }

    async fn delete(&self, id: RecordId) -> Result<bool, ServiceError> {
        Ok(self.inner.write().await.posts.remove(&id).is_some())
    }

    async fn exists(&self, id: RecordId) -> Result<bool, ServiceError> {
        Ok(self.inner.read().await.posts.contains_key(&id))
    }
}

#[async_trait]
impl Store<TagRecord> for MemoryStore {
    async fn get(&self, id: RecordId) -> Result<Option<TagRecord>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.tags.get(&id).map(|row| t.tag_record(id, row)))
    }

    async fn get_all(&self) -> Result<Vec<TagRecord>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.tags.iter().map(|(id, row)| t.tag_record(*id, row)).collect())
    }

    async fn save(&self, record: TagRecord) -> Result<TagRecord, ServiceError> {
        let mut t = self.inner.write().await;
        if let Some(id) = record.id {
            if !t.tags.contains_key(&id) {
                return Err(missing_row("tag", id));
            }
        }
        let id = next_id(&mut t.tag_seq, record.id);
        let row = TagRow { name: record.name };
        t.tags.insert(id, row.clone());
        Ok(t.tag_record(id, &row))
    }

    async fn delete(&self, id: RecordId) -> Result<bool, ServiceError> {
        let mut t = self.inner.write().await;
        if t.tags.remove(&id).is_none() {
            return Ok(false);
        }
        for post in t.posts.values_mut() {
            post.tag_ids.remove(&id);
        }
        Ok(true)
    }

    async fn exists(&self, id: RecordId) -> Result<bool, ServiceError> {
        Ok(self.inner.read().await.tags.contains_key(&id))
    }
}
