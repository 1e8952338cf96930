//! hells-hub/crates/hh-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Hell's Hub.

pub mod comments;
pub mod error;
pub mod models;
pub mod timefmt;
pub mod traits;
pub mod votes;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use chrono::Utc;

    #[test]
    fn state_blob_round_trips_through_json() {
        let state = HubState {
            users: vec![],
            posts: vec![ForumPost {
                id: "p1".to_string(),
                community_id: "imp".to_string(),
                author: "Blitzo".to_string(),
                avatar: String::new(),
                title: "WEAPONS SALE".to_string(),
                content: "Call I.M.P!".to_string(),
                kind: PostKind::Text,
                image: None,
                link_url: None,
                poll_options: None,
                poll_total_votes: 0,
                is_nsfw: false,
                is_spoiler: false,
                is_pinned: false,
                likes: 42,
                replies: 0,
                tags: vec!["Business".to_string()],
                timestamp: Utc::now(),
                comments: vec![],
                awards: 0,
                awarded_by: vec![],
            }],
            episodes: vec![],
            communities: vec![],
            current_user: Some("Blitzo".to_string()),
        };

        let json = serde_json::to_string(&state).unwrap();
        // The blob keeps the original camelCase layout.
        assert!(json.contains("\"communityId\":\"imp\""));
        assert!(json.contains("\"currentUser\":\"Blitzo\""));
        assert!(json.contains("\"type\":\"text\""));

        let back: HubState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.posts[0].id, "p1");
        assert_eq!(back.posts[0].likes, 42);
    }

    #[test]
    fn legacy_user_record_is_backfilled_on_load() {
        // A record persisted before communities/saves/notifications existed.
        let json = r#"{
            "username": "RadioDemon",
            "avatar": "a.png",
            "bio": "Quite the entertainment.",
            "joinedDate": "Since the beginning",
            "watchedEpisodes": ["h1"],
            "ratings": {"h1": 10},
            "reviews": []
        }"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.joined_communities, vec!["all"]);
        assert!(user.saved_post_ids.is_empty());
        assert!(user.notifications.is_empty());
        assert!(user.votes.is_empty());
        assert!(user.poll_votes.is_empty());
    }
}
