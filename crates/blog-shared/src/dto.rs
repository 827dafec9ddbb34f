//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author name as sent by clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request to create a post.
///
/// Every field is optional on the wire so that missing fields are reported
/// together by [`CreatePostRequest::validate`] instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author: Option<AuthorInput>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

/// Request to partially update a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    /// Must match the path id when present.
    pub id: Option<String>,
    pub author: Option<AuthorInput>,
    pub title: Option<String>,
    pub content: Option<String>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_required(field: &str, value: Option<&String>, errors: &mut Vec<String>) {
    match value {
        None => errors.push(format!("`{}` is required", field)),
        Some(v) if is_blank(v) => errors.push(format!("`{}` must not be empty", field)),
        Some(_) => {}
    }
}

fn check_present(field: &str, value: Option<&String>, errors: &mut Vec<String>) {
    if value.is_some_and(|v| is_blank(v)) {
        errors.push(format!("`{}` must not be empty", field));
    }
}

impl AuthorInput {
    fn check(&self, errors: &mut Vec<String>) {
        check_required("author.firstName", self.first_name.as_ref(), errors);
        check_required("author.lastName", self.last_name.as_ref(), errors);
    }
}

impl CreatePostRequest {
    /// Collect every field problem. An empty list means the request is complete.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        match &self.author {
            Some(author) => author.check(&mut errors),
            None => errors.push("`author` is required".to_string()),
        }
        check_required("title", self.title.as_ref(), &mut errors);
        check_required("content", self.content.as_ref(), &mut errors);

        errors
    }
}

impl UpdatePostRequest {
    /// Collect problems in the supplied fields. Omitted fields are never an error.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Some(author) = &self.author {
            author.check(&mut errors);
        }
        check_present("title", self.title.as_ref(), &mut errors);
        check_present("content", self.content.as_ref(), &mut errors);

        errors
    }
}

/// Public representation of a post. `author` is the flattened display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

/// Response body of the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub blogposts: Vec<PostView>,
}
