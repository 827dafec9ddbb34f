//! Blog post handlers.

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Author, NewPost, Post, PostPatch};
use blog_shared::dto::{
    AuthorInput, CreatePostRequest, PostListResponse, PostView, UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Public shape of a post; the structured author collapses into one display string.
fn post_view(post: Post) -> PostView {
    PostView {
        id: post.id,
        author: post.author.full_name(),
        title: post.title,
        content: post.content,
        created: post.created,
    }
}

/// Name parts are stored trimmed so the flattened view always contains them verbatim.
fn author_from(first_name: &str, last_name: &str) -> Author {
    Author::new(first_name.trim(), last_name.trim())
}

fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid post id: {}", raw)))
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

fn new_post_from(req: CreatePostRequest) -> AppResult<NewPost> {
    let errors = req.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let CreatePostRequest {
        author:
            Some(AuthorInput {
                first_name: Some(first_name),
                last_name: Some(last_name),
            }),
        title: Some(title),
        content: Some(content),
        created,
    } = req
    else {
        return Err(AppError::Validation(vec!["incomplete post".to_string()]));
    };

    Ok(NewPost {
        author: author_from(&first_name, &last_name),
        title,
        content,
        created,
    })
}

fn patch_from(req: UpdatePostRequest) -> AppResult<PostPatch> {
    let errors = req.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let author = match req.author {
        Some(AuthorInput {
            first_name: Some(first_name),
            last_name: Some(last_name),
        }) => Some(author_from(&first_name, &last_name)),
        Some(_) => {
            return Err(AppError::Validation(vec![
                "`author` needs firstName and lastName".to_string(),
            ]));
        }
        None => None,
    };

    Ok(PostPatch {
        author,
        title: req.title,
        content: req.content,
    })
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;
    let blogposts: Vec<PostView> = posts.into_iter().map(post_view).collect();

    Ok(HttpResponse::Ok().json(PostListResponse { blogposts }))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(post_view(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = new_post_from(body.into_inner())?;

    let post = state.posts.insert_one(new_post).await?;
    tracing::info!(post_id = %post.id, "Post created");

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/posts/{}", post.id)))
        .json(post_view(post)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let req = body.into_inner();

    if let Some(body_id) = &req.id {
        if Uuid::parse_str(body_id).ok() != Some(id) {
            return Err(DomainError::Validation(format!(
                "Request path id ({}) and request body id ({}) must match",
                id, body_id
            ))
            .into());
        }
    }

    let patch = patch_from(req)?;
    state
        .posts
        .update_by_id(id, patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(post_id = %id, "Post updated");

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
///
/// Deleting an id that does not exist still succeeds.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let removed = state.posts.delete_by_id(id).await?;
    tracing::info!(post_id = %id, removed, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
