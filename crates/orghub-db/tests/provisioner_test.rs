//! Integration tests for the dynamic collection provisioner using
//! in-memory SurrealDB.

use orghub_core::error::OrgError;
use orghub_core::repository::CollectionProvisioner;
use orghub_db::SurrealCollectionProvisioner;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use surrealdb_types::SurrealValue;

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

async fn setup() -> (SurrealCollectionProvisioner<Db>, Surreal<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    orghub_db::run_migrations(&db).await.unwrap();
    (SurrealCollectionProvisioner::new(db.clone()), db)
}

async fn count(db: &Surreal<Db>, table: &str) -> u64 {
    let mut result = db
        .query(format!("SELECT count() AS total FROM {table} GROUP ALL"))
        .await
        .unwrap();
    let rows: Vec<CountRow> = result.take(0).unwrap();
    rows.first().map(|r| r.total).unwrap_or(0)
}

#[tokio::test]
async fn create_then_exists_then_drop() {
    let (provisioner, _db) = setup().await;

    assert!(!provisioner.exists("org_acme").await.unwrap());
    assert!(provisioner.create("org_acme", None).await.unwrap());
    assert!(provisioner.exists("org_acme").await.unwrap());

    // Creating again is a no-op failure, never an error.
    assert!(!provisioner.create("org_acme", None).await.unwrap());

    assert!(provisioner.drop("org_acme").await.unwrap());
    assert!(!provisioner.exists("org_acme").await.unwrap());

    // Dropping a missing collection reports false.
    assert!(!provisioner.drop("org_acme").await.unwrap());
}

#[tokio::test]
async fn create_accepts_extra_field_ddl() {
    let (provisioner, db) = setup().await;

    let created = provisioner
        .create(
            "org_acme",
            Some("DEFINE FIELD label ON TABLE org_acme TYPE option<string>;"),
        )
        .await
        .unwrap();
    assert!(created);

    db.query("CREATE org_acme SET label = 'widget', created_at = time::now()")
        .await
        .unwrap()
        .check()
        .unwrap();
    assert_eq!(count(&db, "org_acme").await, 1);
}

#[tokio::test]
async fn copy_contents_is_a_value_copy() {
    let (provisioner, db) = setup().await;

    provisioner.create("org_old", None).await.unwrap();
    for i in 0..3 {
        db.query("CREATE org_old SET seq = $seq, created_at = time::now()")
            .bind(("seq", i))
            .await
            .unwrap()
            .check()
            .unwrap();
    }

    provisioner.create("org_new", None).await.unwrap();
    assert!(provisioner.copy_contents("org_old", "org_new").await.unwrap());

    // Every document is present in the target; the source is intact.
    assert_eq!(count(&db, "org_new").await, 3);
    assert_eq!(count(&db, "org_old").await, 3);
}

#[tokio::test]
async fn copy_from_missing_source_reports_false() {
    let (provisioner, _db) = setup().await;

    provisioner.create("org_new", None).await.unwrap();
    assert!(
        !provisioner
            .copy_contents("org_missing", "org_new")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn unsafe_names_are_rejected() {
    let (provisioner, _db) = setup().await;

    let result = provisioner.create("org_acme; REMOVE TABLE admin", None).await;
    assert!(matches!(result, Err(OrgError::Validation { .. })));

    let result = provisioner.exists("no-dashes").await;
    assert!(matches!(result, Err(OrgError::Validation { .. })));
}
