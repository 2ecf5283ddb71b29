//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{NewPost, Post, PostChanges, SortOptions};
use blog_shared::dto::{CreatePostRequest, ListPostsQuery, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        author: post.author,
        contents: post.contents,
        tags: post.tags,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn post_responses(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(post_response).collect()
}

/// GET /api/v1/posts?author=&tag=&sortBy=&sortOrder=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let sort = SortOptions::parse(query.sort_by.as_deref(), query.sort_order.as_deref())?;

    let posts = match (query.author.as_deref(), query.tag.as_deref()) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "query by either author or tag, not both".to_string(),
            ));
        }
        (Some(author), None) => state.posts.list_posts_by_author(author, sort).await?,
        (None, Some(tag)) => state.posts.list_posts_by_tag(tag, sort).await?,
        (None, None) => state.posts.list_all_posts(sort).await?,
    };

    tracing::debug!(count = posts.len(), "Posts listed");
    Ok(HttpResponse::Ok().json(post_responses(posts)))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/v1/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let new = NewPost {
        title: req.title,
        author: req.author,
        contents: req.contents,
        tags: req.tags,
    };

    let post = state.posts.create_post(new).await?;
    tracing::info!(post_id = %post.id, "Post created");

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// PATCH /api/v1/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        author: req.author,
        contents: req.contents,
        tags: req.tags,
    };

    let post = state.posts.update_post(path.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete_post(id).await?;
    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
