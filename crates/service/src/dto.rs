//! Wire-level representations exchanged with HTTP clients.
//!
//! Every data field is optional: on create a missing field fails validation,
//! on update a missing field leaves the stored value untouched. Derived
//! back-references (`posts`) are filled when reading and ignored when writing.

use serde::{Deserialize, Serialize};

use crate::record::RecordId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDto {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Ids of posts written by this author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<RecordId>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<RecordId>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDto {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    /// Ids of posts carrying this tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<RecordId>>,
}
