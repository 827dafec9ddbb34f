//! PostgreSQL post store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use blog_core::domain::{NewPost, Post, PostFilter, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::PostStore;

use super::entity::post::{self, Entity as PostEntity};

/// Post store backed by the `posts` table.
pub struct PostgresPostStore {
    pub(crate) db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Entity already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn insert_one(&self, post: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = post.into_post(Uuid::new_v4()).into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        tracing::debug!(post_id = %model.id, "Inserted post");
        Ok(model.into())
    }

    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepoError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let posts: Vec<Post> = posts
            .into_iter()
            .map(|p| p.into_post(Uuid::new_v4()))
            .collect();
        let active_models = posts.iter().cloned().map(post::ActiveModel::from);

        // Ids are generated here, so nothing needs to come back from the INSERT.
        PostEntity::insert_many(active_models)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = posts.len(), "Inserted posts");
        Ok(posts)
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::Created)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_one(&self, filter: &PostFilter) -> Result<Option<Post>, RepoError> {
        let mut query = PostEntity::find();
        if let Some(title) = &filter.title {
            query = query.filter(post::Column::Title.eq(title.as_str()));
        }
        if let Some(first_name) = &filter.author_first_name {
            query = query.filter(post::Column::AuthorFirstName.eq(first_name.as_str()));
        }
        if let Some(last_name) = &filter.author_last_name {
            query = query.filter(post::Column::AuthorLastName.eq(last_name.as_str()));
        }

        let result = query
            .order_by_desc(post::Column::Created)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(model.into()));
        }

        // Only patched columns are marked as set, so the UPDATE touches nothing else.
        let mut active_model: post::ActiveModel = model.into();
        if let Some(author) = patch.author {
            active_model.author_first_name = Set(author.first_name);
            active_model.author_last_name = Set(author.last_name);
        }
        if let Some(title) = patch.title {
            active_model.title = Set(title);
        }
        if let Some(content) = patch.content {
            active_model.content = Set(content);
        }

        match active_model.update(&self.db).await {
            Ok(model) => {
                tracing::debug!(post_id = %id, "Updated post");
                Ok(Some(model.into()))
            }
            // Deleted between the read and the write.
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find().count(&self.db).await.map_err(map_db_err)
    }
}
