//! Post handlers - public reads, admin-only mutations.

use actix_web::{HttpResponse, http::header, web};

use inkpost_core::domain::{EXCERPT_CHARS, Post, PostDraft};
use inkpost_shared::ApiResponse;
use inkpost_shared::dto::{PostForm, PostMutationResponse, PostResponse, PostSummary};

use crate::middleware::auth::CurrentViewer;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        created_at: post.created_at,
    }
}

fn to_summary(post: Post) -> PostSummary {
    PostSummary {
        excerpt: post.excerpt(EXCERPT_CHARS),
        id: post.id,
        title: post.title,
        created_at: post.created_at,
    }
}

fn to_draft(form: PostForm) -> PostDraft {
    PostDraft::new(form.title, form.content)
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let summaries: Vec<PostSummary> = posts.into_iter().map(to_summary).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(summaries)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(&path).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// POST /api/posts - admin only
pub async fn create_post(
    state: web::Data<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(&viewer, to_draft(body.into_inner())).await?;
    let response = PostMutationResponse::saved(to_response(post));

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, response.redirect_to.clone()))
        .json(ApiResponse::ok_with_message(response, "Post created successfully.")))
}

/// PUT /api/posts/{id} - admin only
pub async fn update_post(
    state: web::Data<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    path: web::Path<String>,
    body: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(&viewer, &path, to_draft(body.into_inner()))
        .await?;
    let response = PostMutationResponse::saved(to_response(post));

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        response,
        "Post updated successfully.",
    )))
}

/// DELETE /api/posts/{id} - admin only
pub async fn delete_post(
    state: web::Data<AppState>,
    CurrentViewer(viewer): CurrentViewer,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.posts.delete(&viewer, &path).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        PostMutationResponse::deleted(),
        "Post deleted successfully.",
    )))
}
