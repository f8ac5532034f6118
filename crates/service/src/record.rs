//! Persisted representations as exchanged with a `Store`.

use crate::errors::ServiceError;

/// Surrogate key assigned by the store.
pub type RecordId = i32;

/// Behaviour shared by every record kind handled by `EntityService`.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable kind, used in error messages and log fields.
    const KIND: &'static str;

    fn id(&self) -> Option<RecordId>;

    fn set_id(&mut self, id: Option<RecordId>);

    /// Creation-time required-field check.
    fn validate(&self) -> Result<(), ServiceError>;
}

/// Overwrite fields that are present in `patch`, keep the rest.
pub trait Merge<P> {
    fn merge(&mut self, patch: P);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AuthorRef {
    pub id: RecordId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagRef {
    pub id: RecordId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorRecord {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Derived by the store; never written back.
    pub posts: Vec<RecordId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostRecord {
    pub id: Option<RecordId>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorRef>,
    /// Sorted, without duplicates.
    pub tags: Vec<TagRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagRecord {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    /// Derived by the store; never written back.
    pub posts: Vec<RecordId>,
}

/// Collapse tag ids into the canonical sorted, duplicate-free form.
pub fn normalize_tags<I: IntoIterator<Item = RecordId>>(ids: I) -> Vec<TagRef> {
    let mut ids: Vec<RecordId> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids.into_iter().map(|id| TagRef { id }).collect()
}

/// Collect the names of required fields that are absent or empty.
///
/// Whitespace-only values count as present.
pub(crate) fn missing_fields<'a>(fields: &[(&'a str, &Option<String>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| *name)
        .collect()
}
