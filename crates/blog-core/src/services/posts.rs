//! Post service: creation, lookup, updates and the listing queries.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewPost, Post, PostChanges, PostFilter, SortOptions};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Stateless facade over a [`PostRepository`].
///
/// Cloning is cheap; every clone shares the same store.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_post(&self, new: NewPost) -> Result<Post, DomainError> {
        new.validate()?;
        Ok(self.repo.insert(Post::create(new)).await?)
    }

    pub async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }

    pub async fn update_post(&self, id: Uuid, changes: PostChanges) -> Result<Post, DomainError> {
        changes.validate()?;
        if changes.is_empty() {
            return self.get_post(id).await;
        }
        self.repo
            .update(id, changes)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "Post",
                id,
            })
    }

    pub async fn delete_post(&self, id: Uuid) -> Result<(), DomainError> {
        match self.repo.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::NotFound {
                entity_type: "Post",
                id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_all_posts(&self, sort: SortOptions) -> Result<Vec<Post>, RepoError> {
        self.list_posts(PostFilter::default(), sort).await
    }

    pub async fn list_posts_by_author(
        &self,
        author: &str,
        sort: SortOptions,
    ) -> Result<Vec<Post>, RepoError> {
        self.list_posts(PostFilter::by_author(author), sort).await
    }

    pub async fn list_posts_by_tag(
        &self,
        tag: &str,
        sort: SortOptions,
    ) -> Result<Vec<Post>, RepoError> {
        self.list_posts(PostFilter::by_tag(tag), sort).await
    }

    async fn list_posts(
        &self,
        filter: PostFilter,
        sort: SortOptions,
    ) -> Result<Vec<Post>, RepoError> {
        self.repo.find(&filter, &sort).await
    }
}
