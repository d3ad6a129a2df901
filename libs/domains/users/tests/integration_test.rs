//! PostgreSQL integration tests for `PgUserRepository`.
//!
//! These need Docker and are ignored by default:
//! `cargo test -p domain_users --test integration_test -- --ignored`

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase};

fn fast_service(db: &TestDatabase) -> UserService<PgUserRepository> {
    let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
    UserService::with_hasher(PgUserRepository::new(db.connection()), hasher)
}

fn input(email: String) -> CreateUser {
    CreateUser {
        name: "Alice".to_string(),
        email,
        password: "secret".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_crud_lifecycle() {
    let db = TestDatabase::new().await;
    let service = fast_service(&db);
    let builder = TestDataBuilder::from_test_name("pg_crud_lifecycle");

    let name = builder.name("user", "main");
    let created = service
        .create_user(CreateUser {
            name: name.clone(),
            ..input(builder.email("main"))
        })
        .await
        .unwrap();
    assert!(service.verify_password(&created, "secret").unwrap());

    let fetched = service.get_user(created.id).await.unwrap();
    assert_eq!(fetched.name, name);
    assert_eq!(fetched.email, created.email);
    assert_eq!(fetched.password_hash, created.password_hash);

    let updated = service
        .update_user(
            created.id,
            UpdateUser {
                name: Some("Bob".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Bob");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    service.delete_user(created.id).await.unwrap();
    assert!(matches!(
        service.get_user(created.id).await,
        Err(UserError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_duplicate_email_is_conflict() {
    let db = TestDatabase::new().await;
    let service = fast_service(&db);
    let builder = TestDataBuilder::from_test_name("pg_duplicate_email");
    let email = builder.email("main");

    service.create_user(input(email.clone())).await.unwrap();

    let result = service.create_user(input(email.to_uppercase())).await;
    assert!(matches!(result, Err(UserError::Conflict(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_find_all_oldest_first() {
    let db = TestDatabase::new().await;
    let service = fast_service(&db);
    let builder = TestDataBuilder::from_test_name("pg_find_all");

    let first = service.create_user(input(builder.email("first"))).await.unwrap();
    let second = service.create_user(input(builder.email("second"))).await.unwrap();

    let ids: Vec<_> = service
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_postgres_update_and_delete_missing_user() {
    let db = TestDatabase::new().await;
    let service = fast_service(&db);
    let id = uuid::Uuid::now_v7();

    let result = service
        .update_user(
            id,
            UpdateUser {
                name: Some("Bob".to_string()),
                email: None,
            },
        )
        .await;
    assert!(matches!(result, Err(UserError::NotFound(_))));

    let result = service.delete_user(id).await;
    assert!(matches!(result, Err(UserError::NotFound(_))));
}
