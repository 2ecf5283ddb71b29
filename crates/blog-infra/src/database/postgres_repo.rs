//! PostgreSQL post repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, NullOrdering, Order};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder, Select,
    Set, Unchanged,
};
use uuid::Uuid;

use blog_core::domain::{Post, PostChanges, PostFilter, SortField, SortOptions, SortOrder};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn sort_column(field: SortField) -> post::Column {
    match field {
        SortField::CreatedAt => post::Column::CreatedAt,
        SortField::UpdatedAt => post::Column::UpdatedAt,
        SortField::Title => post::Column::Title,
        SortField::Author => post::Column::Author,
        SortField::Contents => post::Column::Contents,
    }
}

/// Compile a listing into a single `SELECT`.
///
/// NULLs sort lowest, matching the in-memory store; `id` breaks ties so
/// repeated reads come back in the same order.
pub fn list_query(filter: &PostFilter, sort: &SortOptions) -> Select<PostEntity> {
    let mut query = PostEntity::find();

    if let Some(author) = &filter.author {
        query = query.filter(post::Column::Author.eq(author.as_str()));
    }
    if let Some(tag) = &filter.tag {
        query = query.filter(Expr::cust_with_values(
            r#"$1 = ANY("posts"."tags")"#,
            [tag.clone()],
        ));
    }

    let (order, nulls) = match sort.sort_order {
        SortOrder::Ascending => (Order::Asc, NullOrdering::First),
        SortOrder::Descending => (Order::Desc, NullOrdering::Last),
    };

    query
        .order_by_with_nulls(sort_column(sort.sort_by), order, nulls)
        .order_by_asc(post::Column::Id)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find(&self, filter: &PostFilter, sort: &SortOptions) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(
            author = filter.author.as_deref(),
            tag = filter.tag.as_deref(),
            sort_by = %sort.sort_by,
            sort_order = %sort.sort_order,
            "Listing posts"
        );

        let result = list_query(filter, sort)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        // SET lists only the supplied columns plus updated_at.
        let active_model = post::ActiveModel {
            id: Unchanged(id),
            title: changes.title.map_or(NotSet, Set),
            author: changes.author.map_or(NotSet, |author| Set(Some(author))),
            contents: changes.contents.map_or(NotSet, |contents| Set(Some(contents))),
            tags: changes.tags.map_or(NotSet, Set),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };

        match active_model.update(&self.db).await {
            Ok(model) => {
                tracing::debug!(post_id = %id, "Post updated");
                Ok(Some(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(repo_error(e)),
        }
    }
}
