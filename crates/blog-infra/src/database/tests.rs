use std::collections::BTreeMap;

use blog_core::domain::{Author, NewPost, PostFilter, PostPatch};
use blog_core::ports::PostStore;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Statement, Value};

use crate::database::entity::post;
use crate::database::postgres_store::PostgresPostStore;

fn model(id: uuid::Uuid, title: &str) -> post::Model {
    post::Model {
        id,
        author_first_name: "Grace".to_owned(),
        author_last_name: "Hopper".to_owned(),
        title: title.to_owned(),
        content: "Content".to_owned(),
        created: chrono::Utc::now().into(),
    }
}

/// Every statement the store sent to the mock connection, in order.
fn statements(store: PostgresPostStore) -> Vec<Statement> {
    store
        .db
        .into_transaction_log()
        .iter()
        .flat_map(|txn| txn.statements().to_vec())
        .collect()
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = uuid::Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model(post_id, "Test Post")]])
        .into_connection();

    let store = PostgresPostStore::new(db);

    let post = store.find_by_id(post_id).await.unwrap().unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.author, Author::new("Grace", "Hopper"));
}

#[tokio::test]
async fn test_find_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresPostStore::new(db);

    assert!(store.find_by_id(uuid::Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_one_returns_stored_row() {
    let post_id = uuid::Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model(post_id, "Fresh")]])
        .into_connection();

    let store = PostgresPostStore::new(db);

    let post = store
        .insert_one(NewPost::new(Author::new("Grace", "Hopper"), "Fresh", "Content"))
        .await
        .unwrap();
    assert_eq!(post.title, "Fresh");
}

#[tokio::test]
async fn test_update_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresPostStore::new(db);

    let patch = PostPatch {
        title: Some("New Post".to_owned()),
        ..PostPatch::default()
    };
    assert!(
        store
            .update_by_id(uuid::Uuid::new_v4(), patch)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_update_existing_post() {
    let post_id = uuid::Uuid::new_v4();
    let mut updated = model(post_id, "New Post");
    updated.content = "Blah blah".to_owned();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model(post_id, "Old")]])
        .append_query_results(vec![vec![updated]])
        .into_connection();

    let store = PostgresPostStore::new(db);

    let patch = PostPatch {
        title: Some("New Post".to_owned()),
        content: Some("Blah blah".to_owned()),
        ..PostPatch::default()
    };
    let post = store.update_by_id(post_id, patch).await.unwrap().unwrap();
    assert_eq!(post.title, "New Post");
    assert_eq!(post.content, "Blah blah");
    assert_eq!(post.author.first_name, "Grace");
}

#[tokio::test]
async fn test_delete_missing_post_is_not_an_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let store = PostgresPostStore::new(db);

    assert!(!store.delete_by_id(uuid::Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_find_all_orders_newest_first() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            model(uuid::Uuid::new_v4(), "newer"),
            model(uuid::Uuid::new_v4(), "older"),
        ]])
        .into_connection();

    let store = PostgresPostStore::new(db);

    let titles: Vec<String> = store
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["newer", "older"]);

    let log = statements(store);
    assert_eq!(log.len(), 1);
    assert!(log[0].sql.contains(r#"FROM "posts""#));
    assert!(log[0].sql.contains(r#"ORDER BY "posts"."created" DESC"#));
}

#[tokio::test]
async fn test_find_one_filters_on_supplied_columns() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model(uuid::Uuid::new_v4(), "a")]])
        .into_connection();

    let store = PostgresPostStore::new(db);

    let filter = PostFilter {
        title: Some("a".to_owned()),
        author_last_name: Some("Hopper".to_owned()),
        ..PostFilter::default()
    };
    let found = store.find_one(&filter).await.unwrap();
    assert_eq!(found.map(|p| p.title), Some("a".to_owned()));

    let log = statements(store);
    assert_eq!(log.len(), 1);
    let sql = &log[0].sql;
    assert!(sql.contains(r#""posts"."title" = "#));
    assert!(sql.contains(r#""posts"."author_last_name" = "#));
    assert!(!sql.contains(r#""posts"."author_first_name" = "#));
    assert!(sql.contains(r#"ORDER BY "posts"."created" DESC"#));

    let values = &log[0].values.as_ref().unwrap().0;
    assert!(values.contains(&Value::from("a")));
    assert!(values.contains(&Value::from("Hopper")));
}

#[tokio::test]
async fn test_find_one_without_filter_has_no_where_clause() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresPostStore::new(db);

    assert!(store.find_one(&PostFilter::default()).await.unwrap().is_none());

    let log = statements(store);
    assert!(!log[0].sql.contains("WHERE"));
    assert!(log[0].sql.contains(r#"ORDER BY "posts"."created" DESC"#));
}

#[tokio::test]
async fn test_insert_many_assigns_ids() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 2,
        }])
        .into_connection();

    let store = PostgresPostStore::new(db);

    let posts = store
        .insert_many(vec![
            NewPost::new(Author::new("Grace", "Hopper"), "one", "Content"),
            NewPost::new(Author::new("Alan", "Turing"), "two", "Content"),
        ])
        .await
        .unwrap();
    assert_eq!(posts.len(), 2);
    assert_ne!(posts[0].id, posts[1].id);
    assert_eq!(posts[1].author, Author::new("Alan", "Turing"));

    let log = statements(store);
    assert_eq!(log.len(), 1);
    assert!(log[0].sql.starts_with(r#"INSERT INTO "posts""#));
}

#[tokio::test]
async fn test_insert_many_empty_skips_database() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let store = PostgresPostStore::new(db);

    assert!(store.insert_many(Vec::new()).await.unwrap().is_empty());
    assert!(statements(store).is_empty());
}

#[tokio::test]
async fn test_count_posts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![BTreeMap::from([(
            "num_items",
            Value::BigInt(Some(2)),
        )])]])
        .into_connection();

    let store = PostgresPostStore::new(db);

    assert_eq!(store.count().await.unwrap(), 2);

    let log = statements(store);
    assert_eq!(log.len(), 1);
    assert!(log[0].sql.contains("COUNT(*)"));
}
