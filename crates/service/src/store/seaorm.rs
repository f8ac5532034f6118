use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::{NotSet, Set, Unchanged}, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::debug;

use models::{author, post, post_tag, tag};

use crate::errors::ServiceError;
use crate::record::{AuthorRecord, AuthorRef, PostRecord, RecordId, TagRecord, TagRef};

use super::Store;

/// SeaORM-backed store over the `author`, `post`, `tag` and `post_tag` tables.
///
/// Writes touching more than one table run inside a single transaction.
#[derive(Clone)]
pub struct SeaOrmStore {
    pub db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn id_value(id: Option<RecordId>) -> sea_orm::ActiveValue<RecordId> {
    match id {
        Some(id) => Unchanged(id),
        None => NotSet,
    }
}

async fn post_ids_by_author<C: ConnectionTrait>(conn: &C) -> Result<HashMap<RecordId, Vec<RecordId>>, ServiceError> {
    let rows = post::Entity::find()
        .filter(post::Column::AuthorId.is_not_null())
        .order_by_asc(post::Column::Id)
        .all(conn)
        .await?;
    let mut map: HashMap<RecordId, Vec<RecordId>> = HashMap::new();
    for p in rows {
        if let Some(author_id) = p.author_id {
            map.entry(author_id).or_default().push(p.id);
        }
    }
    Ok(map)
}

async fn links<C: ConnectionTrait>(conn: &C) -> Result<Vec<post_tag::Model>, ServiceError> {
    Ok(post_tag::Entity::find()
        .order_by_asc(post_tag::Column::PostId)
        .order_by_asc(post_tag::Column::TagId)
        .all(conn)
        .await?)
}

fn author_record(m: author::Model, posts: Vec<RecordId>) -> AuthorRecord {
    AuthorRecord { id: Some(m.id), name: m.name, email: m.email, posts }
}

fn post_record(m: post::Model, tag_ids: Vec<RecordId>) -> PostRecord {
    PostRecord {
        id: Some(m.id),
        title: m.title,
        content: m.content,
        author: m.author_id.map(|id| AuthorRef { id }),
        tags: tag_ids.into_iter().map(|id| TagRef { id }).collect(),
    }
}

fn tag_record(m: tag::Model, posts: Vec<RecordId>) -> TagRecord {
    TagRecord { id: Some(m.id), name: m.name, posts }
}

#[async_trait]
impl Store<AuthorRecord> for SeaOrmStore {
    async fn get(&self, id: RecordId) -> Result<Option<AuthorRecord>, ServiceError> {
        let Some(found) = author::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None) };
        let posts = post::Entity::find()
            .filter(post::Column::AuthorId.eq(id))
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        Ok(Some(author_record(found, posts)))
    }

    async fn get_all(&self) -> Result<Vec<AuthorRecord>, ServiceError> {
        let rows = author::Entity::find().order_by_asc(author::Column::Id).all(&self.db).await?;
        let mut by_author = post_ids_by_author(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|m| {
                let posts = by_author.remove(&m.id).unwrap_or_default();
                author_record(m, posts)
            })
            .collect())
    }

    async fn save(&self, record: AuthorRecord) -> Result<AuthorRecord, ServiceError> {
        let am = author::ActiveModel { id: id_value(record.id), name: Set(record.name), email: Set(record.email) };
        let saved = if record.id.is_some() { am.update(&self.db).await? } else { am.insert(&self.db).await? };
        debug!(id = saved.id, "author row saved");
        Ok(author_record(saved, record.posts))
    }

    async fn delete(&self, id: RecordId) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        post::Entity::update_many()
            .col_expr(post::Column::AuthorId, Expr::value(Option::<RecordId>::None))
            .filter(post::Column::AuthorId.eq(id))
            .exec(&txn)
            .await?;
        let res = author::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }

    async fn exists(&self, id: RecordId) -> Result<bool, ServiceError> {
        Ok(author::Entity::find_by_id(id).count(&self.db).await? > 0)
    }
}

#[async_trait]
impl Store<PostRecord> for SeaOrmStore {
    async fn get(&self, id: RecordId) -> Result<Option<PostRecord>, ServiceError> {
        let Some(found) = post::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None) };
        let tag_ids = post_tag::Entity::find()
            .filter(post_tag::Column::PostId.eq(id))
            .order_by_asc(post_tag::Column::TagId)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|l| l.tag_id)
            .collect();
        Ok(Some(post_record(found, tag_ids)))
    }

    async fn get_all(&self) -> Result<Vec<PostRecord>, ServiceError> {
        let rows = post::Entity::find().order_by_asc(post::Column::Id).all(&self.db).await?;
        let mut by_post: HashMap<RecordId, Vec<RecordId>> = HashMap::new();
        for l in links(&self.db).await? {
            by_post.entry(l.post_id).or_default().push(l.tag_id);
        }
        Ok(rows
            .into_iter()
            .map(|m| {
                let tag_ids = by_post.remove(&m.id).unwrap_or_default();
                post_record(m, tag_ids)
            })
            .collect())
    }

    async fn save(&self, record: PostRecord) -> Result<PostRecord, ServiceError> {
        let txn = self.db.begin().await?;
        let am = post::ActiveModel {
            id: id_value(record.id),
            title: Set(record.title),
            content: Set(record.content),
            author_id: Set(record.author.map(|a| a.id)),
        };
        let saved = if record.id.is_some() { am.update(&txn).await? } else { am.insert(&txn).await? };

        // Tag associations are replaced wholesale.
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(saved.id))
            .exec(&txn)
            .await?;
        if !record.tags.is_empty() {
            let rows = record
                .tags
                .iter()
                .map(|t| post_tag::ActiveModel { post_id: Set(saved.id), tag_id: Set(t.id) });
            post_tag::Entity::insert_many(rows).exec_without_returning(&txn).await?;
        }
        txn.commit().await?;
        debug!(id = saved.id, tags = record.tags.len(), "post row saved");

        let tag_ids = record.tags.iter().map(|t| t.id).collect();
        Ok(post_record(saved, tag_ids))
    }

    async fn delete(&self, id: RecordId) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await?;
        let res = post::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }

    async fn exists(&self, id: RecordId) -> Result<bool, ServiceError> {
        Ok(post::Entity::find_by_id(id).count(&self.db).await? > 0)
    }
}

#[async_trait]
impl Store<TagRecord> for SeaOrmStore {
    async fn get(&self, id: RecordId) -> Result<Option<TagRecord>, ServiceError> {
        let Some(found) = tag::Entity::find_by_id(id).one(&self.db).await? else { return Ok(None) };
        let posts = post_tag::Entity::find()
            .filter(post_tag::Column::TagId.eq(id))
            .order_by_asc(post_tag::Column::PostId)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|l| l.post_id)
            .collect();
        Ok(Some(tag_record(found, posts)))
    }

    async fn get_all(&self) -> Result<Vec<TagRecord>, ServiceError> {
        let rows = tag::Entity::find().order_by_asc(tag::Column::Id).all(&self.db).await?;
        let mut by_tag: HashMap<RecordId, Vec<RecordId>> = HashMap::new();
        for l in links(&self.db).await? {
            by_tag.entry(l.tag_id).or_default().push(l.post_id);
        }
        Ok(rows
            .into_iter()
            .map(|m| {
                let posts = by_tag.remove(&m.id).unwrap_or_default();
                tag_record(m, posts)
            })
            .collect())
    }

    async fn save(&self, record: TagRecord) -> Result<TagRecord, ServiceError> {
        let am = tag::ActiveModel { id: id_value(record.id), name: Set(record.name) };
        let saved = if record.id.is_some() { am.update(&self.db).await? } else { am.insert(&self.db).await? };
        debug!(id = saved.id, "tag row saved");
        Ok(tag_record(saved, record.posts))
    }

    async fn delete(&self, id: RecordId) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::TagId.eq(id))
            .exec(&txn)
            .await?;
        let res = tag::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }

    async fn exists(&self, id: RecordId) -> Result<bool, ServiceError> {
        Ok(tag::Entity::find_by_id(id).count(&self.db).await? > 0)
    }
}
