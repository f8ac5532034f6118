use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub detail: Option<String>,
}

/// Author as read and written over HTTP; `posts` is read-only.
#[derive(Serialize, ToSchema)]
pub struct AuthorDoc {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub posts: Option<Vec<i32>>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDoc {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<i32>,
    pub tag_ids: Option<Vec<i32>>,
}

#[derive(Serialize, ToSchema)]
pub struct TagDoc {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub posts: Option<Vec<i32>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::authors::get_author,
        crate::routes::authors::list_authors,
        crate::routes::authors::create_author,
        crate::routes::authors::update_author,
        crate::routes::authors::delete_author,
        crate::routes::posts::get_post,
        crate::routes::posts::list_posts,
        crate::routes::posts::create_post,
        crate::routes::posts::update_post,
        crate::routes::posts::delete_post,
        crate::routes::tags::get_tag,
        crate::routes::tags::list_tags,
        crate::routes::tags::create_tag,
        crate::routes::tags::update_tag,
        crate::routes::tags::delete_tag,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            AuthorDoc,
            PostDoc,
            TagDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "authors"),
        (name = "posts"),
        (name = "tags")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_resource() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = json["paths"].as_object().unwrap();
        for p in ["/health", "/users/{id}", "/users/all", "/posts/update/{id}", "/tags/delete/{id}"] {
            assert!(paths.contains_key(p), "missing {p}");
        }
        assert!(json["components"]["schemas"]["PostDoc"]["properties"].get("tagIds").is_some());
    }
}
