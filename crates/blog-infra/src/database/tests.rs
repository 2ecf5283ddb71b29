use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, QueryTrait};
use uuid::Uuid;

use blog_core::domain::{Post, PostChanges, PostFilter, SortField, SortOptions, SortOrder};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

use crate::database::entity::post;
use crate::database::postgres_repo::{PostgresPostRepository, list_query};

fn model(title: &str, author: Option<&str>, tags: &[&str]) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        author: author.map(str::to_owned),
        contents: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let row = model("Test Post", Some("Daniel Bugl"), &["react"]);
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.tags, vec!["react".to_string()]);
}

#[tokio::test]
async fn test_find_maps_rows_in_store_order() {
    let rows = vec![
        model("newer", Some("Daniel Bugl"), &[]),
        model("older", Some("Daniel Bugl"), &[]),
    ];

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![rows])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo
        .find(&PostFilter::by_author("Daniel Bugl"), &SortOptions::default())
        .await
        .unwrap();

    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["newer", "older"]);
}

#[tokio::test]
async fn test_update_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo
        .update(Uuid::new_v4(), PostChanges::default())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_update_sets_only_supplied_columns() {
    let mut row = model("Draft", Some("Daniel Bugl"), &["react"]);
    row.contents = Some("final text".to_owned());
    let post_id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let changes = PostChanges {
        contents: Some("final text".to_string()),
        ..PostChanges::default()
    };
    let post = repo.update(post_id, changes).await.unwrap().unwrap();
    assert_eq!(post.contents.as_deref(), Some("final text"));
    assert_eq!(post.title, "Draft");

    let log = format!("{:?}", repo.db.into_transaction_log());
    assert!(log.contains(r#"UPDATE \"posts\" SET \"contents\" = $1, \"updated_at\" = $2 WHERE"#));
    for untouched in ["title", "author", "tags", "created_at"] {
        assert!(!log.contains(&format!(r#"\"{}\" ="#, untouched)));
    }
}

#[tokio::test]
async fn test_delete_without_affected_rows_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let err = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::NotFound));
}

#[test]
fn test_default_listing_sql() {
    let sql = list_query(&PostFilter::default(), &SortOptions::default())
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(!sql.contains("WHERE"));
    assert!(sql.contains(r#"ORDER BY "posts"."created_at" DESC NULLS LAST"#));
}

#[test]
fn test_author_listing_sql() {
    let sort = SortOptions::new(SortField::UpdatedAt, SortOrder::Ascending);
    let sql = list_query(&PostFilter::by_author("Daniel Bugl"), &sort)
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""posts"."author" = 'Daniel Bugl'"#));
    assert!(sql.contains(r#"ORDER BY "posts"."updated_at" ASC NULLS FIRST"#));
}

#[test]
fn test_tag_listing_uses_array_containment() {
    let sql = list_query(&PostFilter::by_tag("react"), &SortOptions::default())
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#"'react' = ANY("posts"."tags")"#));
}

#[test]
fn test_author_and_tag_listing_combines_with_and() {
    let filter = PostFilter {
        author: Some("Daniel Bugl".to_string()),
        tag: Some("react".to_string()),
    };
    let sql = list_query(&filter, &SortOptions::default())
        .build(DatabaseBackend::Postgres)
        .to_string();

    assert!(sql.contains(r#""posts"."author" = 'Daniel Bugl' AND"#));
    assert!(sql.contains(r#"'react' = ANY("posts"."tags")"#));
}
