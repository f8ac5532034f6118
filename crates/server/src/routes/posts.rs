use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::dto::PostDto;
use service::record::RecordId;

use crate::errors::JsonApiError;
use crate::observability::observe;
use crate::openapi::{ErrorBody, PostDoc};
use crate::state::AppState;

const KIND: &str = "post";

#[utoipa::path(
    get, path = "/posts/{id}", tag = "posts",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found", body = PostDoc),
        (status = 404, description = "No such post", body = ErrorBody)
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<PostDto>, JsonApiError> {
    let res = state.services.posts.get_by_id(id).await;
    observe(KIND, "get", &res);
    Ok(Json(res?))
}

#[utoipa::path(
    get, path = "/posts/all", tag = "posts",
    responses(
        (status = 200, description = "All posts", body = [PostDoc]),
        (status = 404, description = "No posts stored", body = ErrorBody)
    )
)]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostDto>>, JsonApiError> {
    let res = state.services.posts.get_all().await;
    observe(KIND, "list", &res);
    Ok(Json(res?))
}

/// `authorId` and `tagIds` must reference stored rows; dangling ids fail in the store.
#[utoipa::path(
    post, path = "/posts", tag = "posts",
    request_body = PostDoc,
    responses(
        (status = 201, description = "Post created"),
        (status = 400, description = "Missing title or content", body = ErrorBody),
        (status = 500, description = "Store rejected the write", body = ErrorBody)
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<PostDto>,
) -> Result<StatusCode, JsonApiError> {
    let res = state.services.posts.create(input).await;
    observe(KIND, "create", &res);
    res?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    put, path = "/posts/update/{id}", tag = "posts",
    params(("id" = i32, Path, description = "Post id")),
    request_body = PostDoc,
    responses(
        (status = 200, description = "Post updated"),
        (status = 404, description = "No such post", body = ErrorBody)
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(input): Json<PostDto>,
) -> Result<StatusCode, JsonApiError> {
    let res = state.services.posts.update(id, input).await;
    observe(KIND, "update", &res);
    res?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete, path = "/posts/delete/{id}", tag = "posts",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "No such post", body = ErrorBody)
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, JsonApiError> {
    let res = state.services.posts.delete(id).await;
    observe(KIND, "delete", &res);
    res?;
    Ok(StatusCode::NO_CONTENT)
}
