//! Forum posts: creation, voting, awards, comments, polls, moderation.

mod common;

use common::{fresh_backend, reconnect, shared_backend};
use hh_backend::{BackendService, NewComment, NewCommunity, NewPost};
use hh_core::error::AppError;
use hh_core::models::{NotificationKind, PostKind, PostView};
use hh_core::votes::VoteDirection;

fn text_post(community_id: &str, title: &str) -> NewPost {
    NewPost {
        community_id: community_id.to_string(),
        title: title.to_string(),
        content: "body".to_string(),
        kind: PostKind::Text,
        image: None,
        link_url: None,
        poll_options: vec![],
        is_nsfw: false,
        is_spoiler: false,
        tags: vec!["New".to_string()],
    }
}

async fn view(backend: &BackendService, post_id: &str) -> PostView {
    backend
        .posts()
        .await
        .unwrap()
        .into_iter()
        .find(|v| v.post.id == post_id)
        .expect("post should be listed")
}

#[tokio::test]
async fn create_post_round_trips_through_get_posts() {
    let backend = fresh_backend().await;
    backend.login("Blitzo").await.unwrap();

    let mut draft = text_post("imp", "Company van for sale");
    draft.is_spoiler = true;
    let created = backend.create_post(draft).await.unwrap();

    let fetched = view(&backend, &created.post.id).await;
    assert_eq!(fetched.post.title, "Company van for sale");
    assert_eq!(fetched.post.content, "body");
    assert_eq!(fetched.post.author, "Blitzo");
    assert!(fetched.post.is_spoiler);
    assert_eq!(fetched.post.awards, 0);
    assert!(fetched.post.awarded_by.is_empty());
    // Derived fields: fresh post, neutral vote, not saved.
    assert_eq!(fetched.timestamp_display, "Just now");
    assert_eq!(fetched.user_vote, 0);
    assert!(!fetched.is_saved);
    // New posts are prepended.
    let listed = backend.posts().await.unwrap();
    assert_eq!(listed[0].post.id, created.post.id);
}

#[tokio::test]
async fn create_post_requires_a_session() {
    let backend = fresh_backend().await;
    let err = backend.create_post(text_post("imp", "nope")).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn vote_cycle_applies_reddit_deltas() {
    let backend = fresh_backend().await;
    backend.login("Vaggie").await.unwrap();

    let start = view(&backend, "p3").await.post.likes;

    // up: +1
    let v = backend.vote_post("p3", VoteDirection::Up).await.unwrap();
    assert_eq!(v.post.likes, start + 1);
    assert_eq!(v.user_vote, 1);

    // up -> down: -2
    let v = backend.vote_post("p3", VoteDirection::Down).await.unwrap();
    assert_eq!(v.post.likes, start - 1);
    assert_eq!(v.user_vote, -1);

    // down -> up: +2; final score is start + 1
    let v = backend.vote_post("p3", VoteDirection::Up).await.unwrap();
    assert_eq!(v.post.likes, start + 1);
    assert_eq!(v.user_vote, 1);
}

#[tokio::test]
async fn retracting_a_vote_returns_to_neutral() {
    let backend = fresh_backend().await;
    backend.login("Vaggie").await.unwrap();

    let start = view(&backend, "p4").await.post.likes;
    backend.vote_post("p4", VoteDirection::Down).await.unwrap();
    let v = backend.vote_post("p4", VoteDirection::Down).await.unwrap();
    assert_eq!(v.post.likes, start);
    assert_eq!(v.user_vote, 0);
}

#[tokio::test]
async fn vote_state_survives_a_reload() {
    let (store, backend) = shared_backend().await;
    backend.login("Charlie").await.unwrap();
    backend.vote_post("p1", VoteDirection::Up).await.unwrap();

    // A fresh service over the same blob still knows the direction.
    let backend2 = reconnect(&store).await;
    let v = view(&backend2, "p1").await;
    assert_eq!(v.user_vote, 1);
}

#[tokio::test]
async fn comment_votes_use_the_same_cycle() {
    let backend = fresh_backend().await;
    backend.login("Husk").await.unwrap();

    // Seed comment c1 on p1 has 69 likes.
    let c = backend
        .vote_comment("p1", "c1", VoteDirection::Down)
        .await
        .unwrap();
    assert_eq!(c.likes, 68);
    let c = backend
        .vote_comment("p1", "c1", VoteDirection::Up)
        .await
        .unwrap();
    assert_eq!(c.likes, 70);
}

#[tokio::test]
async fn award_count_always_matches_awarded_by() {
    let backend = fresh_backend().await;
    backend.login("AngelDust").await.unwrap();

    let v = backend.give_award("p1").await.unwrap();
    assert_eq!(v.post.awards, 1);
    assert_eq!(v.post.awarded_by, vec!["AngelDust"]);

    // Second award from the same user is a silent no-op.
    let v = backend.give_award("p1").await.unwrap();
    assert_eq!(v.post.awards, 1);
    assert_eq!(v.post.awarded_by.len(), 1);
}

#[tokio::test]
async fn awarding_notifies_the_author_but_not_yourself() {
    let backend = fresh_backend().await;

    // The author must have a record to receive notifications.
    backend.login("Blitzo").await.unwrap();
    let own = backend.create_post(text_post("imp", "My own post")).await.unwrap();

    // Self-award: no notification beyond the welcome one.
    backend.give_award(&own.post.id).await.unwrap();
    let blitzo = backend.current_user().await.unwrap().unwrap();
    assert_eq!(blitzo.notifications.len(), 1);

    backend.login("Moxxie").await.unwrap();
    backend.give_award(&own.post.id).await.unwrap();

    let blitzo = backend.user_profile("Blitzo").await.unwrap().unwrap();
    assert_eq!(blitzo.notifications.len(), 2);
    assert_eq!(blitzo.notifications[0].kind, NotificationKind::Award);
    assert_eq!(blitzo.notifications[0].link_id.as_deref(), Some(own.post.id.as_str()));
}

#[tokio::test]
async fn comments_update_reply_count_and_fan_out() {
    let backend = fresh_backend().await;
    backend.login("Blitzo").await.unwrap();
    let post = backend.create_post(text_post("imp", "Client thread")).await.unwrap();

    // Author replies to their own post: is_op set, no notification.
    let v = backend
        .add_comment(
            &post.post.id,
            NewComment { parent_id: None, content: "Bump.".to_string() },
        )
        .await
        .unwrap();
    assert_eq!(v.post.replies, 1);
    assert!(v.post.comments[0].is_op);
    let blitzo = backend.current_user().await.unwrap().unwrap();
    assert_eq!(blitzo.notifications.len(), 1); // welcome only

    // Someone else replies, nested under the first comment.
    backend.login("Millie").await.unwrap();
    let parent_id = v.post.comments[0].id.clone();
    let v = backend
        .add_comment(
            &post.post.id,
            NewComment {
                parent_id: Some(parent_id.clone()),
                content: "On it, sir.".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(v.post.replies, 2);
    assert!(!v.post.comments[1].is_op);
    assert_eq!(v.post.comments[1].parent_id.as_deref(), Some(parent_id.as_str()));

    let blitzo = backend.user_profile("Blitzo").await.unwrap().unwrap();
    assert_eq!(blitzo.notifications.len(), 2);
    assert_eq!(blitzo.notifications[0].kind, NotificationKind::Reply);
}

#[tokio::test]
async fn poll_scenario_blitzo_and_moxxie() {
    let backend = fresh_backend().await;

    backend.login("Blitzo").await.unwrap();
    backend.toggle_join_community("imp").await.unwrap();
    let mut draft = text_post("imp", "Next target?");
    draft.kind = PostKind::Poll;
    draft.poll_options = vec!["A".to_string(), "B".to_string()];
    let poll = backend.create_post(draft).await.unwrap();

    backend.login("Moxxie").await.unwrap();
    let options = poll.post.poll_options.as_ref().unwrap();
    let option_a = options.iter().find(|o| o.text == "A").unwrap().id.clone();
    let v = backend.vote_poll(&poll.post.id, &option_a).await.unwrap();

    assert_eq!(v.post.poll_total_votes, 1);
    let options = v.post.poll_options.as_ref().unwrap();
    assert_eq!(options.iter().find(|o| o.text == "A").unwrap().votes, 1);
    assert_eq!(options.iter().find(|o| o.text == "B").unwrap().votes, 0);
    assert_eq!(v.user_poll_selection.as_deref(), Some(option_a.as_str()));

    // One vote per poll.
    let err = backend.vote_poll(&poll.post.id, &option_a).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn saving_a_post_reflects_in_views() {
    let backend = fresh_backend().await;
    backend.login("Octavia").await.unwrap();

    assert!(backend.toggle_save_post("p2").await.unwrap());
    assert!(view(&backend, "p2").await.is_saved);

    assert!(!backend.toggle_save_post("p2").await.unwrap());
    assert!(!view(&backend, "p2").await.is_saved);
}

#[tokio::test]
async fn delete_and_pin_are_author_or_moderator_only() {
    let backend = fresh_backend().await;

    backend.login("Blitzo").await.unwrap();
    let post = backend.create_post(text_post("imp", "Mine")).await.unwrap();

    // A bystander may neither pin nor delete.
    backend.login("Striker").await.unwrap();
    let err = backend.toggle_pin_post(&post.post.id).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    let err = backend.delete_post(&post.post.id).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    // The author may.
    backend.login("Blitzo").await.unwrap();
    assert!(backend.toggle_pin_post(&post.post.id).await.unwrap());
    backend.delete_post(&post.post.id).await.unwrap();
    assert!(backend
        .posts()
        .await
        .unwrap()
        .iter()
        .all(|v| v.post.id != post.post.id));
}

#[tokio::test]
async fn community_moderators_can_delete_other_peoples_posts() {
    let backend = fresh_backend().await;

    // Asmodeus founds a community, which makes him a moderator.
    backend.login("Asmodeus").await.unwrap();
    let community = backend
        .create_community(NewCommunity {
            name: "r/Lust".to_string(),
            description: "Ring business only.".to_string(),
            icon: "💋".to_string(),
            color: "text-neon-pink".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(community.id, "lust");
    assert_eq!(community.member_count, 1);

    backend.login("Fizzarolli").await.unwrap();
    let post = backend
        .create_post(text_post(&community.id, "Merch drop"))
        .await
        .unwrap();

    backend.login("Asmodeus").await.unwrap();
    backend.delete_post(&post.post.id).await.unwrap();
}

#[tokio::test]
async fn community_names_must_be_unique() {
    let backend = fresh_backend().await;
    backend.login("Vox").await.unwrap();

    let err = backend
        .create_community(NewCommunity {
            name: "r/VoxTek".to_string(), // collides with the seed community
            description: "dup".to_string(),
            icon: "📺".to_string(),
            color: "text-neon-blue".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn joining_and_leaving_moves_the_member_count() {
    let backend = fresh_backend().await;
    backend.login("Millie").await.unwrap();

    assert!(backend.toggle_join_community("imp").await.unwrap());
    let communities = backend.communities().await.unwrap();
    let imp = communities.iter().find(|c| c.id == "imp").unwrap();
    assert_eq!(imp.member_count, 1);

    assert!(!backend.toggle_join_community("imp").await.unwrap());
    let communities = backend.communities().await.unwrap();
    let imp = communities.iter().find(|c| c.id == "imp").unwrap();
    assert_eq!(imp.member_count, 0);

    // The aggregate pseudo-community cannot be left.
    let err = backend.toggle_join_community("all").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn votes_without_a_session_are_rejected() {
    let backend = fresh_backend().await;
    let err = backend.vote_post("p1", VoteDirection::Up).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn operations_on_missing_posts_fail_with_not_found() {
    let backend = fresh_backend().await;
    backend.login("Loona").await.unwrap();

    let err = backend.vote_post("ghost", VoteDirection::Up).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("post", _)));
    let err = backend.toggle_save_post("ghost").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("post", _)));
    let err = backend
        .add_comment("ghost", NewComment { parent_id: None, content: "hi".to_string() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound("post", _)));
}

#[tokio::test]
async fn returned_snapshots_do_not_alias_stored_state() {
    let backend = fresh_backend().await;
    backend.login("Verosika").await.unwrap();

    let mut snapshot = view(&backend, "p1").await;
    snapshot.post.likes = -9999;
    // Mutating the snapshot leaves the store untouched.
    assert_eq!(view(&backend, "p1").await.post.likes, 666);

    // Profile snapshots behave the same way.
    let mut profile = backend.current_user().await.unwrap().unwrap();
    profile.bio = "scribbled over".to_string();
    let stored = backend.current_user().await.unwrap().unwrap();
    assert_eq!(stored.bio, "New soul in Hell.");
}
