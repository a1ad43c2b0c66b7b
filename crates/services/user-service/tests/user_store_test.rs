//! In-memory user store tests.

use std::collections::HashSet;
use std::sync::Arc;

use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use common::AppError;
use domain::{CreateUser, UpdateUser};
use user_service_lib::{InMemoryUserStore, UserManager, UserRepository, UserService};

fn new_user(name: &str, email: &str) -> CreateUser {
    CreateUser {
        name: name.to_string(),
        email: email.to_string(),
    }
}

// =============================================================================
// create
// =============================================================================

#[tokio::test]
async fn test_create_user_returns_record() {
    let store = InMemoryUserStore::new();

    let user = assert_ok!(store.create(new_user("John Doe", "john@example.com")).await);

    assert_eq!(user.name, "John Doe");
    assert_eq!(user.email, "john@example.com");
    assert!(!user.id.is_nil());
    assert_eq!(user.created_at, user.updated_at);
}

#[tokio::test]
async fn test_create_duplicate_email_conflicts() {
    let store = InMemoryUserStore::new();
    assert_ok!(store.create(new_user("John Doe", "john@example.com")).await);

    let err = assert_err!(store.create(new_user("John Doe", "john@example.com")).await);

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.to_string(), "User with this email already exists");
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_email_comparison_is_case_sensitive() {
    let store = InMemoryUserStore::new();
    assert_ok!(store.create(new_user("John", "john@example.com")).await);

    assert_ok!(store.create(new_user("John", "John@Example.com")).await);
}

#[tokio::test]
async fn test_created_ids_are_distinct() {
    let store = InMemoryUserStore::new();

    for i in 0..50 {
        assert_ok!(store.create(new_user("User", &format!("user{}@example.com", i))).await);
    }

    let ids: HashSet<Uuid> = store.list().await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids.len(), 50);
}

// =============================================================================
// list / get
// =============================================================================

#[tokio::test]
async fn test_list_empty_store() {
    let store = InMemoryUserStore::new();
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_preserves_insertion_order_and_is_stable() {
    let store = InMemoryUserStore::new();
    let first = store.create(new_user("User 1", "user1@example.com")).await.unwrap();
    let second = store.create(new_user("User 2", "user2@example.com")).await.unwrap();
    let third = store.create(new_user("User 3", "user3@example.com")).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed, vec![first, second, third]);
    assert_eq!(store.list().await.unwrap(), listed);
}

#[tokio::test]
async fn test_get_by_id_returns_record() {
    let store = InMemoryUserStore::new();
    let created = store.create(new_user("John Doe", "john@example.com")).await.unwrap();

    let found = store.get_by_id(created.id).await.unwrap();

    assert_eq!(found, created);
}

#[tokio::test]
async fn test_get_by_id_missing_on_empty_store() {
    let store = InMemoryUserStore::new();
    let id = Uuid::new_v4();

    let err = assert_err!(store.get_by_id(id).await);

    assert_eq!(err, AppError::NotFound(format!("User with id {} not found", id)));
}

// =============================================================================
// update
// =============================================================================

#[tokio::test]
async fn test_partial_update_changes_only_name() {
    let store = InMemoryUserStore::new();
    let created = store.create(new_user("John Doe", "john@example.com")).await.unwrap();

    let updated = store
        .update(created.id, UpdateUser::name("Jane Doe"))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Jane Doe");
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_email() {
    let store = InMemoryUserStore::new();
    let created = store.create(new_user("John Doe", "john@example.com")).await.unwrap();

    let updated = store
        .update(created.id, UpdateUser::email("johnny@example.com"))
        .await
        .unwrap();

    assert_eq!(updated.name, "John Doe");
    assert_eq!(updated.email, "johnny@example.com");

    // The new address is claimed and the old one released.
    let err = assert_err!(store.create(new_user("Other", "johnny@example.com")).await);
    assert!(matches!(err, AppError::Conflict(_)));
    assert_ok!(store.create(new_user("Other", "john@example.com")).await);
}

#[tokio::test]
async fn test_update_to_taken_email_conflicts_and_leaves_user_unchanged() {
    let store = InMemoryUserStore::new();
    let user1 = store.create(new_user("User 1", "user1@example.com")).await.unwrap();
    let user2 = store.create(new_user("User 2", "user2@example.com")).await.unwrap();

    let err = assert_err!(
        store
            .update(user1.id, UpdateUser::email(user2.email.clone()))
            .await
    );

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(store.get_by_id(user1.id).await.unwrap(), user1);
}

#[tokio::test]
async fn test_update_missing_user() {
    let store = InMemoryUserStore::new();

    let err = assert_err!(store.update(Uuid::new_v4(), UpdateUser::name("Test")).await);

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_update_keeps_position() {
    let store = InMemoryUserStore::new();
    let first = store.create(new_user("User 1", "user1@example.com")).await.unwrap();
    store.create(new_user("User 2", "user2@example.com")).await.unwrap();

    store.update(first.id, UpdateUser::name("Renamed")).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed[0].id, first.id);
    assert_eq!(listed[0].name, "Renamed");
}

#[tokio::test]
async fn test_repeated_updates_never_move_updated_at_backwards() {
    let store = InMemoryUserStore::new();
    let mut previous = store.create(new_user("John", "john@example.com")).await.unwrap();

    for i in 0..20 {
        let next = store
            .update(previous.id, UpdateUser::name(format!("John {}", i)))
            .await
            .unwrap();
        assert!(next.updated_at >= previous.updated_at);
        assert!(next.created_at <= next.updated_at);
        previous = next;
    }
}

// =============================================================================
// delete / clear
// =============================================================================

#[tokio::test]
async fn test_delete_then_get_fails() {
    let store = InMemoryUserStore::new();
    let created = store.create(new_user("John Doe", "john@example.com")).await.unwrap();

    assert_ok!(store.delete(created.id).await);

    let err = assert_err!(store.get_by_id(created.id).await);
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_preserves_remaining_order() {
    let store = InMemoryUserStore::new();
    let first = store.create(new_user("User 1", "user1@example.com")).await.unwrap();
    let second = store.create(new_user("User 2", "user2@example.com")).await.unwrap();
    let third = store.create(new_user("User 3", "user3@example.com")).await.unwrap();

    store.delete(second.id).await.unwrap();

    assert_eq!(store.list().await.unwrap(), vec![first, third]);
}

#[tokio::test]
async fn test_delete_missing_user() {
    let store = InMemoryUserStore::new();

    let err = assert_err!(store.delete(Uuid::new_v4()).await);

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_clear_empties_store() {
    let store = InMemoryUserStore::new();
    store.create(new_user("User 1", "user1@example.com")).await.unwrap();
    store.create(new_user("User 2", "user2@example.com")).await.unwrap();

    assert_ok!(store.clear().await);

    assert!(store.list().await.unwrap().is_empty());
    assert_ok!(store.create(new_user("User 1", "user1@example.com")).await);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_with_same_email_admit_one() {
    let service = Arc::new(UserManager::in_memory());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_user(new_user(&format!("User {}", i), "same@example.com"))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 31);
    assert_eq!(service.list_users().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_email_swaps_keep_emails_unique() {
    let service = Arc::new(UserManager::in_memory());
    let a = service.create_user(new_user("A", "a@example.com")).await.unwrap();
    let b = service.create_user(new_user("B", "b@example.com")).await.unwrap();

    let handles: Vec<_> = (0..40)
        .map(|i| {
            let service = service.clone();
            let (id, email) = if i % 2 == 0 {
                (a.id, "b@example.com")
            } else {
                (b.id, "a@example.com")
            };
            tokio::spawn(async move { service.update_user(id, UpdateUser::email(email)).await })
        })
        .collect();

    for handle in handles {
        let _ = handle.await.unwrap();
    }

    let users = service.list_users().await.unwrap();
    let emails: HashSet<&str> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails.len(), users.len());
}
