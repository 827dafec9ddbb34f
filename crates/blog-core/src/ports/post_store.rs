use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostFilter, PostPatch};
use crate::error::RepoError;

/// Document store for posts.
///
/// Every method is a single round trip to the backing collection. Implementations
/// assign ids and default timestamps but perform no validation.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert one post and return it with its assigned id.
    async fn insert_one(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Insert several posts at once. Empty input yields an empty result.
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError>;

    /// All posts, newest first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// First post matching `filter`, in `find_all` order.
    async fn find_one(&self, filter: &PostFilter) -> Result<Option<Post>, RepoError>;

    /// Apply a partial update. Returns `None` when no post has this id.
    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError>;

    /// Remove a post. Returns whether anything was removed; a missing id is not an error.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}
