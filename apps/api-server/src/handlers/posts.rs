//! Blog post handlers.
//!
//! Every route resolves an optional identity and hands the principal to the
//! post service, which decides between not-found and unauthorized.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{AuthoredPost, Post, PostChanges, PostDraft};
use quill_shared::dto::{PatchPostRequest, PostListQuery, PostRequest, PostResponse};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(authored: AuthoredPost) -> PostResponse {
    let AuthoredPost { post, author_name } = authored;
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        created_at: post.created_at,
        author: post.author_id,
        author_name,
    }
}

async fn present(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostResponse>> {
    Ok(state
        .posts
        .with_authors(posts)
        .await?
        .into_iter()
        .map(post_response)
        .collect())
}

async fn present_one(state: &AppState, post: Post) -> AppResult<PostResponse> {
    present(state, vec![post])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("post vanished while presenting".to_string()))
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(query.search.as_deref()).await?;
    Ok(HttpResponse::Ok().json(present(&state, posts).await?))
}

/// GET /api/posts/mine
pub async fn list_mine(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_mine(&identity.principal()).await?;
    Ok(HttpResponse::Ok().json(present(&state, posts).await?))
}

/// POST /api/posts
pub async fn create(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let PostRequest { title, content } = body.into_inner();

    let post = state
        .posts
        .create(&identity.principal(), PostDraft { title, content })
        .await?;

    Ok(HttpResponse::Created().json(present_one(&state, post).await?))
}

/// GET /api/posts/{id}
pub async fn retrieve(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(present_one(&state, post).await?))
}

/// PUT /api/posts/{id} - both fields are required.
pub async fn replace(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let PostRequest { title, content } = body.into_inner();
    let changes = PostChanges {
        title: Some(title),
        content: Some(content),
    };

    update(identity, state, path.into_inner(), changes).await
}

/// PATCH /api/posts/{id} - only the supplied fields change.
pub async fn partial_update(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PatchPostRequest>,
) -> AppResult<HttpResponse> {
    let PatchPostRequest { title, content } = body.into_inner();

    update(
        identity,
        state,
        path.into_inner(),
        PostChanges { title, content },
    )
    .await
}

async fn update(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    id: Uuid,
    changes: PostChanges,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(&identity.principal(), id, changes)
        .await?;
    Ok(HttpResponse::Ok().json(present_one(&state, post).await?))
}

/// DELETE /api/posts/{id}
pub async fn destroy(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(&identity.principal(), path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
