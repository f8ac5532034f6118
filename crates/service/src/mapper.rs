//! Pure conversions between DTOs and records.
//!
//! Mappers never touch a store and never invent values: an absent field on
//! one side is an absent field on the other.

use crate::dto::{AuthorDto, PostDto, TagDto};
use crate::record::{normalize_tags, AuthorRecord, AuthorRef, PostRecord, Record, TagRecord};

pub trait Mapper: Send + Sync + 'static {
    type Record: Record;
    type Dto: Send + 'static;

    fn to_dto(&self, record: &Self::Record) -> Self::Dto;

    fn to_entity(&self, dto: Self::Dto) -> Self::Record;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AuthorMapper;

impl Mapper for AuthorMapper {
    type Record = AuthorRecord;
    type Dto = AuthorDto;

    fn to_dto(&self, record: &AuthorRecord) -> AuthorDto {
        AuthorDto {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
            posts: Some(record.posts.clone()),
        }
    }

    fn to_entity(&self, dto: AuthorDto) -> AuthorRecord {
        AuthorRecord { id: dto.id, name: dto.name, email: dto.email, posts: Vec::new() }
    }
}

/// Flattens the author relation to `author_id` and tags to `tag_ids`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PostMapper;

impl Mapper for PostMapper {
    type Record = PostRecord;
    type Dto = PostDto;

    fn to_dto(&self, record: &PostRecord) -> PostDto {
        PostDto {
            id: record.id,
            title: record.title.clone(),
            content: record.content.clone(),
            author_id: record.author.map(|a| a.id),
            tag_ids: Some(record.tags.iter().map(|t| t.id).collect()),
        }
    }

    fn to_entity(&self, dto: PostDto) -> PostRecord {
        PostRecord {
            id: dto.id,
            title: dto.title,
            content: dto.content,
            author: dto.author_id.map(|id| AuthorRef { id }),
            tags: normalize_tags(dto.tag_ids.unwrap_or_default()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TagMapper;

impl Mapper for TagMapper {
    type Record = TagRecord;
    type Dto = TagDto;

    fn to_dto(&self, record: &TagRecord) -> TagDto {
        TagDto { id: record.id, name: record.name.clone(), posts: Some(record.posts.clone()) }
    }

    fn to_entity(&self, dto: TagDto) -> TagRecord {
        TagRecord { id: dto.id, name: dto.name, posts: Vec::new() }
    }
}
