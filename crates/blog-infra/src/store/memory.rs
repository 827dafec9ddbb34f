//! In-memory post store - used when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{NewPost, Post, PostFilter, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::PostStore;

/// In-memory document collection guarded by an async RwLock.
///
/// Every operation takes the lock once, so each call is atomic with respect to
/// the others. Data is lost on process restart.
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    fn newest_first(posts: &[Post]) -> Vec<Post> {
        let mut sorted = posts.to_vec();
        sorted.sort_by(|a, b| b.created.cmp(&a.created));
        sorted
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert_one(&self, post: NewPost) -> Result<Post, RepoError> {
        let post = post.into_post(Uuid::new_v4());
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        let inserted: Vec<Post> = posts
            .into_iter()
            .map(|p| p.into_post(Uuid::new_v4()))
            .collect();

        if !inserted.is_empty() {
            self.posts.write().await.extend(inserted.iter().cloned());
        }

        Ok(inserted)
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(Self::newest_first(&posts))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_one(&self, filter: &PostFilter) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(Self::newest_first(&posts)
            .into_iter()
            .find(|p| filter.matches(p)))
    }

    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        patch.apply(post);
        Ok(Some(post.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.posts.read().await.len() as u64)
    }
}
