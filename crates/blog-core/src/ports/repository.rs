use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostChanges, PostFilter, SortOptions};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository - the store behind the post service.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Every post matching `filter`, ordered by `sort`. No limit.
    async fn find(&self, filter: &PostFilter, sort: &SortOptions) -> Result<Vec<Post>, RepoError>;

    /// Merge `changes` into the stored post and refresh `updated_at`.
    ///
    /// Returns `Ok(None)` when no post has this id.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, RepoError>;
}
