use std::sync::Arc;

use crate::author_service::AuthorService;
use crate::entity_service::EntityService;
use crate::mapper::{AuthorMapper, PostMapper, TagMapper};
use crate::post_service::PostService;
use crate::record::{AuthorRecord, PostRecord, TagRecord};
use crate::store::Store;
use crate::tag_service::TagService;

/// The three entity services over one shared store.
#[derive(Clone)]
pub struct Services {
    pub authors: AuthorService,
    pub posts: PostService,
    pub tags: TagService,
}

impl Services {
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: Store<AuthorRecord> + Store<PostRecord> + Store<TagRecord> + 'static,
    {
        let authors: Arc<dyn Store<AuthorRecord>> = store.clone();
        let posts: Arc<dyn Store<PostRecord>> = store.clone();
        let tags: Arc<dyn Store<TagRecord>> = store;
        Self {
            authors: EntityService::new(authors, AuthorMapper),
            posts: EntityService::new(posts, PostMapper),
            tags: EntityService::new(tags, TagMapper),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{AuthorDto, PostDto};
    use crate::test_support::memory_services;

    #[tokio::test]
    async fn services_share_one_store() -> Result<(), anyhow::Error> {
        let services = memory_services();
        services
            .authors
            .create(AuthorDto { name: Some("Ada".into()), email: Some("ada@example.com".into()), ..Default::default() })
            .await?;
        services
            .posts
            .create(PostDto {
                title: Some("t".into()),
                content: Some("c".into()),
                author_id: Some(1),
                ..Default::default()
            })
            .await?;

        assert_eq!(services.authors.get_by_id(1).await?.posts, Some(vec![1]));
        services.authors.delete(1).await?;
        assert_eq!(services.posts.get_by_id(1).await?.author_id, None);
        Ok(())
    }
}
