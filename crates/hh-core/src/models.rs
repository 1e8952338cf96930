//! # Domain Models
//!
//! These structs represent the core entities of Hell's Hub.
//! Everything here serializes with camelCase field names so the persisted
//! blob stays layout-compatible with the `hells_hub_db_v3` store format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage key for the persisted state blob. The version suffix is bumped
/// whenever the layout changes incompatibly.
pub const STATE_KEY: &str = "hells_hub_db_v3";

/// A registered account. Accounts are auto-created on first login and
/// never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique handle; lookups are case-insensitive, storage keeps the
    /// casing from first login.
    pub username: String,
    pub avatar: String,
    pub bio: String,
    /// Human-readable join label (e.g., "May 2024"), not a sortable date.
    pub joined_date: String,
    /// Episode ids the user has marked as watched.
    #[serde(default)]
    pub watched_episodes: Vec<String>,
    /// Episode id -> rating (1-10).
    #[serde(default)]
    pub ratings: HashMap<String, u8>,
    /// Legacy review records kept on the profile itself.
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Community ids the user belongs to. Every user belongs to "all".
    #[serde(default = "default_joined_communities")]
    pub joined_communities: Vec<String>,
    #[serde(default)]
    pub saved_post_ids: Vec<String>,
    /// Newest first.
    #[serde(default)]
    pub notifications: Vec<Notification>,
    /// Durable vote ledger: post or comment id -> direction (+1 / -1).
    /// Neutral entries are removed rather than stored as 0.
    #[serde(default)]
    pub votes: HashMap<String, i8>,
    /// Poll ledger: post id -> chosen option id. One vote per poll.
    #[serde(default)]
    pub poll_votes: HashMap<String, String>,
}

fn default_joined_communities() -> Vec<String> {
    vec!["all".to_string()]
}

/// A forum community (subreddit-style). The id "all" is a synthetic
/// aggregate, not a real community.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    /// Display name (e.g., "r/Overlords"). Unique, case-insensitive.
    pub name: String,
    pub description: String,
    /// Emoji glyph or image URL.
    pub icon: String,
    /// UI color tag, opaque to the backend.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(default)]
    pub moderators: Vec<String>,
    #[serde(default)]
    pub member_count: u32,
}

impl Community {
    /// Whether a username has moderator powers here (creator counts).
    pub fn is_moderator(&self, username: &str) -> bool {
        self.creator_id.as_deref() == Some(username)
            || self.moderators.iter().any(|m| m == username)
    }
}

/// Discriminates the type-specific payload of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    #[default]
    Text,
    Image,
    Link,
    Poll,
}

/// One answer in a poll post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOption {
    pub id: String,
    pub text: String,
    pub votes: u32,
}

/// A forum post. Comments are stored flat inside the post; the tree view
/// is derived on read (see [`crate::comments`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: String,
    pub community_id: String,
    pub author: String,
    pub avatar: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: PostKind,

    // Type-specific payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_options: Option<Vec<PollOption>>,
    #[serde(default)]
    pub poll_total_votes: u32,

    // Flags
    #[serde(default)]
    pub is_nsfw: bool,
    #[serde(default)]
    pub is_spoiler: bool,
    #[serde(default)]
    pub is_pinned: bool,

    /// Aggregate score. Can go negative.
    pub likes: i64,
    /// Denormalized: always equals `comments.len()` after a mutation.
    pub replies: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Canonical creation time; formatted for display on read.
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Invariant: equals `awarded_by.len()`.
    #[serde(default)]
    pub awards: u32,
    /// Usernames who awarded this post, each at most once.
    #[serde(default)]
    pub awarded_by: Vec<String>,
}

/// A forum comment, stored flat per post. `parent_id` refers to another
/// comment in the same post; absent means top-level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub author: String,
    pub avatar: String,
    pub content: String,
    pub likes: i64,
    pub timestamp: DateTime<Utc>,
    /// True iff the author was the post's author at creation time.
    #[serde(default)]
    pub is_op: bool,
}

/// Which franchise an episode belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Universe {
    #[serde(rename = "Hazbin Hotel")]
    Hazbin,
    #[serde(rename = "Helluva Boss")]
    Helluva,
}

/// An episode rating review. One per user per episode: re-rating updates
/// in place (matched by username).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    /// 1-10.
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub timestamp: String,
}

/// Free-form episode discussion entry, separate from the rating stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeComment {
    pub id: String,
    pub user: String,
    pub user_avatar: String,
    pub content: String,
    pub timestamp: String,
    pub likes: i64,
}

/// A catalog episode. Static seed data; end users only review and comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub universe: Universe,
    pub season: u32,
    pub number: u32,
    pub title: String,
    pub thumbnail: String,
    pub video_url: String,
    pub synopsis: String,
    /// Ratings, one per user.
    pub reviews: Vec<Review>,
    /// Unbounded append-only discussion.
    #[serde(default)]
    pub comments: Vec<EpisodeComment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reply,
    Award,
    System,
}

/// Delivered to a user when someone else comments on or awards their post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    /// Post id to jump to, when the event relates to a post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_id: Option<String>,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

/// The whole persisted state, saved wholesale under [`STATE_KEY`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubState {
    #[serde(default)]
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub posts: Vec<ForumPost>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
    #[serde(default)]
    pub communities: Vec<Community>,
    /// Session marker: username of the logged-in user, if any.
    #[serde(default)]
    pub current_user: Option<String>,
}

/// Read DTO for a post: the stored record plus the fields derived for the
/// viewing session (display timestamp, vote state, saved flag, poll pick).
/// Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub post: ForumPost,
    /// Relative/absolute display string, e.g. "5m ago".
    pub timestamp_display: String,
    /// -1, 0 or 1 for the session user; 0 when logged out.
    pub user_vote: i8,
    pub is_saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_poll_selection: Option<String>,
}
