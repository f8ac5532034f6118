//! Post kind: `title` and `content` are required on create.
//!
//! `author_id` and `tag_ids` are stored as given; whether they point at
//! existing rows is left to the store.

use crate::dto::PostDto;
use crate::entity_service::EntityService;
use crate::errors::ServiceError;
use crate::mapper::PostMapper;
use crate::record::{missing_fields, normalize_tags, AuthorRef, Merge, PostRecord, Record, RecordId};
use crate::store::Store;

pub type PostService<S = dyn Store<PostRecord>> = EntityService<S, PostMapper>;

impl Record for PostRecord {
    const KIND: &'static str = "post";

    fn id(&self) -> Option<RecordId> { self.id }

    fn set_id(&mut self, id: Option<RecordId>) { self.id = id; }

    fn validate(&self) -> Result<(), ServiceError> {
        let missing = missing_fields(&[("title", &self.title), ("content", &self.content)]);
        if missing.is_empty() {
            return Ok(());
        }
        Err(ServiceError::Validation(format!("Post fields cannot be empty: {}", missing.join(", "))))
    }
}

impl Merge<PostDto> for PostRecord {
    fn merge(&mut self, patch: PostDto) {
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(content) = patch.content {
            self.content = Some(content);
        }
        if let Some(id) = patch.author_id {
            self.author = Some(AuthorRef { id });
        }
        if let Some(tag_ids) = patch.tag_ids {
            self.tags = normalize_tags(tag_ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::author_service::AuthorService;
    use crate::dto::{AuthorDto, TagDto};
    use crate::mapper::{AuthorMapper, TagMapper};
    use crate::store::MemoryStore;
    use crate::tag_service::TagService;

    struct Fixture {
        posts: PostService<MemoryStore>,
        authors: AuthorService<MemoryStore>,
        tags: TagService<MemoryStore>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        Fixture {
            posts: EntityService::new(store.clone(), PostMapper),
            authors: EntityService::new(store.clone(), AuthorMapper),
            tags: EntityService::new(store, TagMapper),
        }
    }

    fn post(title: Option<&str>, content: Option<&str>) -> PostDto {
        PostDto { title: title.map(Into::into), content: content.map(Into::into), ..Default::default() }
    }

    #[tokio::test]
    async fn create_requires_title_and_content() {
        let f = fixture();
        for bad in [post(None, Some("c")), post(Some("t"), None), post(None, None)] {
            assert!(matches!(f.posts.create(bad).await, Err(ServiceError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn author_id_round_trips_through_service() -> Result<(), anyhow::Error> {
        let f = fixture();
        f.authors
            .create(AuthorDto { name: Some("Ada".into()), email: Some("ada@example.com".into()), ..Default::default() })
            .await?;
        f.posts.create(PostDto { author_id: Some(1), ..post(Some("Hello"), Some("World")) }).await?;

        let found = f.posts.get_by_id(1).await?;
        assert_eq!(found.author_id, Some(1));
        assert_eq!(found.title.as_deref(), Some("Hello"));
        assert_eq!(f.authors.get_by_id(1).await?.posts, Some(vec![1]));
        Ok(())
    }

    #[tokio::test]
    async fn post_without_author_is_allowed() -> Result<(), anyhow::Error> {
        let f = fixture();
        f.posts.create(post(Some("t"), Some("c"))).await?;
        assert_eq!(f.posts.get_by_id(1).await?.author_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_author_surfaces_as_store_error() {
        let f = fixture();
        let res = f.posts.create(PostDto { author_id: Some(42), ..post(Some("t"), Some("c")) }).await;
        assert!(matches!(res, Err(ServiceError::Store(_))));
    }

    #[tokio::test]
    async fn update_merges_relations_when_present() -> Result<(), anyhow::Error> {
        let f = fixture();
        for name in ["a", "b"] {
            f.authors
                .create(AuthorDto { name: Some(name.into()), email: Some(format!("{name}@x.com")), ..Default::default() })
                .await?;
            f.tags.create(TagDto { name: Some(name.into()), ..Default::default() }).await?;
        }
        f.posts
            .create(PostDto { author_id: Some(1), tag_ids: Some(vec![1]), ..post(Some("t"), Some("c")) })
            .await?;

        // only content changes
        f.posts.update(1, post(None, Some("c2"))).await?;
        let after = f.posts.get_by_id(1).await?;
        assert_eq!(after.title.as_deref(), Some("t"));
        assert_eq!(after.content.as_deref(), Some("c2"));
        assert_eq!(after.author_id, Some(1));
        assert_eq!(after.tag_ids, Some(vec![1]));

        f.posts
            .update(1, PostDto { author_id: Some(2), tag_ids: Some(vec![2, 1, 2]), ..Default::default() })
            .await?;
        let after = f.posts.get_by_id(1).await?;
        assert_eq!(after.author_id, Some(2));
        assert_eq!(after.tag_ids, Some(vec![1, 2]));
        assert_eq!(f.tags.get_by_id(2).await?.posts, Some(vec![1]));
        Ok(())
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let f = fixture();
        assert!(matches!(f.posts.get_by_id(3).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.posts.update(3, post(Some("t"), None)).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.posts.delete(3).await, Err(ServiceError::NotFound(_))));
        assert_eq!(f.posts.get_all().await, Err(ServiceError::empty_list()));
    }

    #[test]
    fn merge_law_overwrites_exactly_the_present_fields() {
        let mut record = PostRecord {
            id: Some(1),
            title: Some("t".into()),
            content: Some("c".into()),
            author: Some(AuthorRef { id: 3 }),
            tags: normalize_tags([4]),
        };
        let before = record.clone();
        record.merge(PostDto { title: Some("t2".into()), ..Default::default() });
        assert_eq!(record, PostRecord { title: Some("t2".into()), ..before });
    }
}
