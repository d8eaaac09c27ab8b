//! PostgreSQL link repository tests.
//!
//! Run with `DATABASE_URL` pointing at a scratch server:
//! `cargo test --test repository_link -- --ignored`

use sqlx::PgPool;
use std::sync::Arc;
use snaplink::domain::entities::{NewLink, NewUser};
use snaplink::domain::errors::{RepositoryError, UniqueKey};
use snaplink::domain::repositories::{LinkRepository, UserRepository};
use snaplink::infrastructure::persistence::{PgLinkRepository, PgUserRepository};

fn new_link(code: &str, url: &str, owner_id: Option<i64>) -> NewLink {
    NewLink {
        original_url: url.to_string(),
        short_code: code.to_string(),
        owner_id,
        deduplicated: owner_id.is_none(),
    }
}

async fn create_owner(pool: &PgPool, username: &str) -> i64 {
    PgUserRepository::new(Arc::new(pool.clone()))
        .create(NewUser {
            username: username.to_string(),
            password_hash: "$argon2id$test".to_string(),
        })
        .await
        .unwrap()
        .id
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .insert(new_link("test12", "https://example.com", None))
        .await
        .unwrap();

    assert_eq!(link.short_code, "test12");
    assert_eq!(link.original_url, "https://example.com");
    assert_eq!(link.click_count, 0);
    assert!(link.owner_id.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_code_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("dup123", "https://a.com", None))
        .await
        .unwrap();
    let err = repo
        .insert(new_link("dup123", "https://b.com", None))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Conflict(UniqueKey::ShortCode)));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_public_url_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("aaa111", "https://same.com", None))
        .await
        .unwrap();
    let err = repo
        .insert(new_link("bbb222", "https://same.com", None))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Conflict(UniqueKey::OriginalUrl)));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_undeduplicated_public_links_may_share_url(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    for code in ["plain1", "plain2"] {
        repo.insert(NewLink {
            deduplicated: false,
            ..new_link(code, "https://same.com", None)
        })
        .await
        .unwrap();
    }

    assert!(
        repo.find_public_by_url("https://same.com")
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(repo.count(None).await.unwrap(), 2);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_owned_links_may_share_url(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("own001", "https://same.com", Some(owner)))
        .await
        .unwrap();
    repo.insert(new_link("own002", "https://same.com", Some(owner)))
        .await
        .unwrap();
    repo.insert(new_link("pub001", "https://same.com", None))
        .await
        .unwrap();

    assert_eq!(repo.count(Some(owner)).await.unwrap(), 2);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_public_by_url_ignores_owned(pool: PgPool) {
    let owner = create_owner(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("own001", "https://example.com", Some(owner)))
        .await
        .unwrap();

    assert!(
        repo.find_public_by_url("https://example.com")
            .await
            .unwrap()
            .is_none()
    );

    repo.insert(new_link("pub001", "https://example.com", None))
        .await
        .unwrap();

    let found = repo
        .find_public_by_url("https://example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.short_code, "pub001");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("find01", "https://example.com", None))
        .await
        .unwrap();

    let link = repo.find_by_code("find01").await.unwrap().unwrap();
    assert_eq!(link.original_url, "https://example.com");

    assert!(repo.find_by_code("FIND01").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_click_is_atomic(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));

    repo.insert(new_link("click1", "https://example.com", None))
        .await
        .unwrap();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.record_click("click1").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.await.unwrap().unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    let link = repo.find_by_code("click1").await.unwrap().unwrap();
    assert_eq!(link.click_count, 50);

    assert!(repo.record_click("nope00").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_filters_by_owner_in_insertion_order(pool: PgPool) {
    let alice = create_owner(&pool, "alice").await;
    let bob = create_owner(&pool, "bob").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("a00001", "https://a.com/1", Some(alice)))
        .await
        .unwrap();
    repo.insert(new_link("b00001", "https://b.com/1", Some(bob)))
        .await
        .unwrap();
    repo.insert(new_link("a00002", "https://a.com/2", Some(alice)))
        .await
        .unwrap();

    let alice_links = repo.list(Some(alice), 0, 10).await.unwrap();
    let codes: Vec<_> = alice_links.iter().map(|l| l.short_code.as_str()).collect();
    assert_eq!(codes, ["a00001", "a00002"]);

    let all = repo.list(None, 1, 10).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].short_code, "b00001");

    assert_eq!(repo.count(None).await.unwrap(), 3);
    assert_eq!(repo.count(Some(bob)).await.unwrap(), 1);
}
