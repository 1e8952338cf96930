//! Login, sessions, profiles and notifications.

mod common;

use common::{fresh_backend, reconnect, shared_backend};
use hh_backend::ProfileUpdate;
use hh_core::error::AppError;
use hh_core::models::NotificationKind;

#[tokio::test]
async fn login_auto_registers_with_defaults() {
    let backend = fresh_backend().await;

    let user = backend.login("Blitzo").await.unwrap();
    assert_eq!(user.username, "Blitzo");
    assert_eq!(user.bio, "New soul in Hell.");
    assert_eq!(user.joined_communities, vec!["all"]);
    assert!(user.watched_episodes.is_empty());
    assert!(user.saved_post_ids.is_empty());

    // One unread welcome notification is seeded.
    assert_eq!(user.notifications.len(), 1);
    assert_eq!(user.notifications[0].kind, NotificationKind::System);
    assert!(!user.notifications[0].read);
}

#[tokio::test]
async fn login_lookup_is_case_insensitive() {
    let backend = fresh_backend().await;

    backend.login("Moxxie").await.unwrap();
    let again = backend.login("mOXXIE").await.unwrap();

    // Same record, original casing preserved.
    assert_eq!(again.username, "Moxxie");
    let current = backend.current_user().await.unwrap().unwrap();
    assert_eq!(current.username, "Moxxie");
}

#[tokio::test]
async fn login_rejects_empty_username() {
    let backend = fresh_backend().await;
    let err = backend.login("   ").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn logout_clears_session_but_keeps_the_record() {
    let backend = fresh_backend().await;

    backend.login("Loona").await.unwrap();
    backend.logout().await.unwrap();
    assert!(backend.current_user().await.unwrap().is_none());

    // The record survives and a later login finds it (no second welcome).
    let user = backend.login("Loona").await.unwrap();
    assert_eq!(user.notifications.len(), 1);
}

#[tokio::test]
async fn profile_update_shallow_merges() {
    let backend = fresh_backend().await;
    backend.login("Stolas").await.unwrap();

    let updated = backend
        .update_user_profile(
            "Stolas",
            ProfileUpdate {
                bio: Some("Prince of the Goetia.".to_string()),
                avatar: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.bio, "Prince of the Goetia.");
    // Untouched fields keep their values.
    assert!(updated.avatar.contains("ui-avatars.com"));
}

#[tokio::test]
async fn profile_update_fails_for_unknown_user() {
    let backend = fresh_backend().await;
    let err = backend
        .update_user_profile("Nobody", ProfileUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("user", _)));
}

#[tokio::test]
async fn seed_authors_get_synthesized_profiles() {
    let backend = fresh_backend().await;

    let profile = backend.user_profile("RadioDemon").await.unwrap().unwrap();
    assert_eq!(profile.joined_date, "Since the beginning");
    // Avatar is lifted from their seed post.
    assert!(profile.avatar.contains("Alastor"));

    assert!(backend.user_profile("TotallyUnknown").await.unwrap().is_none());
}

#[tokio::test]
async fn mark_all_read_flips_every_notification() {
    let backend = fresh_backend().await;
    backend.login("Husk").await.unwrap();

    let user = backend.mark_notifications_read("Husk").await.unwrap();
    assert!(user.notifications.iter().all(|n| n.read));
}

#[tokio::test]
async fn session_and_users_survive_a_reload() {
    let (store, backend) = shared_backend().await;
    backend.login("Niffty").await.unwrap();

    let backend2 = reconnect(&store).await;
    let current = backend2.current_user().await.unwrap().unwrap();
    assert_eq!(current.username, "Niffty");
}
