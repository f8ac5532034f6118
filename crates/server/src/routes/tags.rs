use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::dto::TagDto;
use service::record::RecordId;
use service::ServiceError;

use crate::errors::JsonApiError;
use crate::observability::observe;
use crate::openapi::{ErrorBody, TagDoc};
use crate::state::AppState;

const KIND: &str = "tag";

#[utoipa::path(
    get, path = "/tags/{id}", tag = "tags",
    params(("id" = i32, Path, description = "Tag id")),
    responses(
        (status = 200, description = "Tag found", body = TagDoc),
        (status = 404, description = "No such tag", body = ErrorBody)
    )
)]
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<TagDto>, JsonApiError> {
    let res = state.services.tags.get_by_id(id).await;
    observe(KIND, "get", &res);
    Ok(Json(res?))
}

/// Unlike authors and posts, an empty tag list is a normal `200 []`.
#[utoipa::path(
    get, path = "/tags/all", tag = "tags",
    responses((status = 200, description = "All tags, possibly none", body = [TagDoc]))
)]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagDto>>, JsonApiError> {
    let res = match state.services.tags.get_all().await {
        Err(ServiceError::NotFound(_)) => Ok(Vec::new()),
        other => other,
    };
    observe(KIND, "list", &res);
    Ok(Json(res?))
}

#[utoipa::path(
    post, path = "/tags", tag = "tags",
    request_body = TagDoc,
    responses((status = 201, description = "Tag created"))
)]
pub async fn create_tag(
    State(state): State<AppState>,
    Json(input): Json<TagDto>,
) -> Result<StatusCode, JsonApiError> {
    let res = state.services.tags.create(input).await;
    observe(KIND, "create", &res);
    res?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    put, path = "/tags/update/{id}", tag = "tags",
    params(("id" = i32, Path, description = "Tag id")),
    request_body = TagDoc,
    responses(
        (status = 201, description = "Tag updated"),
        (status = 404, description = "No such tag", body = ErrorBody)
    )
)]
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(input): Json<TagDto>,
) -> Result<StatusCode, JsonApiError> {
    let res = state.services.tags.update(id, input).await;
    observe(KIND, "update", &res);
    res?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    delete, path = "/tags/delete/{id}", tag = "tags",
    params(("id" = i32, Path, description = "Tag id")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 404, description = "No such tag", body = ErrorBody)
    )
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, JsonApiError> {
    let res = state.services.tags.delete(id).await;
    observe(KIND, "delete", &res);
    res?;
    Ok(StatusCode::NO_CONTENT)
}
