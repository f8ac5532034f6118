use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service::dto::AuthorDto;
use service::record::RecordId;
use tracing::info;

use crate::errors::JsonApiError;
use crate::observability::observe;
use crate::openapi::{AuthorDoc, ErrorBody};
use crate::state::AppState;

const KIND: &str = "author";

#[utoipa::path(
    get, path = "/users/{id}", tag = "authors",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 200, description = "Author found", body = AuthorDoc),
        (status = 404, description = "No such author", body = ErrorBody)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<Json<AuthorDto>, JsonApiError> {
    let res = state.services.authors.get_by_id(id).await;
    observe(KIND, "get", &res);
    Ok(Json(res?))
}

#[utoipa::path(
    get, path = "/users/all", tag = "authors",
    responses(
        (status = 200, description = "All authors", body = [AuthorDoc]),
        (status = 404, description = "No authors stored", body = ErrorBody)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> Result<Json<Vec<AuthorDto>>, JsonApiError> {
    let res = state.services.authors.get_all().await;
    observe(KIND, "list", &res);
    let list = res?;
    info!(count = list.len(), "list authors");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/users", tag = "authors",
    request_body = AuthorDoc,
    responses(
        (status = 201, description = "Author created"),
        (status = 400, description = "Missing name or email", body = ErrorBody)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(input): Json<AuthorDto>,
) -> Result<StatusCode, JsonApiError> {
    let res = state.services.authors.create(input).await;
    observe(KIND, "create", &res);
    res?;
    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    put, path = "/users/update/{id}", tag = "authors",
    params(("id" = i32, Path, description = "Author id")),
    request_body = AuthorDoc,
    responses(
        (status = 200, description = "Author updated"),
        (status = 404, description = "No such author", body = ErrorBody)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(input): Json<AuthorDto>,
) -> Result<StatusCode, JsonApiError> {
    let res = state.services.authors.update(id, input).await;
    observe(KIND, "update", &res);
    res?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete, path = "/users/delete/{id}", tag = "authors",
    params(("id" = i32, Path, description = "Author id")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "No such author", body = ErrorBody)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> Result<StatusCode, JsonApiError> {
    let res = state.services.authors.delete(id).await;
    observe(KIND, "delete", &res);
    res?;
    Ok(StatusCode::NO_CONTENT)
}
