//! # BackendService
//!
//! The single source of truth for all persisted state. Every operation is
//! async (simulating network latency), mutates the in-memory state under a
//! mutex, persists the whole blob through the [`StateStore`] port, and
//! returns a plain snapshot — no references cross the boundary.
//!
//! Authorization for delete/pin lives here, not in the caller, and the
//! three-state vote cycle is applied authoritatively against the per-user
//! vote ledger.

use chrono::Utc;
use hh_core::error::{AppError, Result};
use hh_core::models::{
    Comment, Community, Episode, EpisodeComment, ForumPost, HubState, Notification,
    NotificationKind, PollOption, PostKind, PostView, Review, UserProfile,
};
use hh_core::timefmt;
use hh_core::traits::StateStore;
use hh_core::votes::{self, VoteDirection};
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::seed;

/// Artificial per-operation delay, emulating a network round trip.
const DEFAULT_LATENCY: Duration = Duration::from_millis(200);

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

/// Input for community creation. The id is derived from the name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommunity {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
}

/// Input for post creation. Id, author, timestamp and award state are
/// assigned by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub community_id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub kind: PostKind,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    /// Option texts for `kind == Poll`; ignored otherwise.
    #[serde(default)]
    pub poll_options: Vec<String>,
    #[serde(default)]
    pub is_nsfw: bool,
    #[serde(default)]
    pub is_spoiler: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for a forum comment. Author and `is_op` are derived server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    #[serde(default)]
    pub parent_id: Option<String>,
    pub content: String,
}

/// The backend facade. Construct once with [`BackendService::connect`] and
/// pass by reference to all consumers.
pub struct BackendService {
    store: Box<dyn StateStore>,
    state: Mutex<HubState>,
    latency: Duration,
}

impl BackendService {
    /// Loads persisted state from the store, applies forward migration
    /// (reseeding any missing collection), and persists the result if
    /// anything changed.
    pub async fn connect(store: Box<dyn StateStore>) -> Result<Self> {
        let (mut state, fresh) = match store.load().await? {
            Some(state) => (state, false),
            None => (HubState::default(), true),
        };

        let reseeded = migrate(&mut state);
        if fresh || reseeded {
            store.save(&state).await?;
        }
        log::info!(
            "backend ready: {} users, {} posts, {} communities",
            state.users.len(),
            state.posts.len(),
            state.communities.len()
        );

        Ok(Self {
            store,
            state: Mutex::new(state),
            latency: DEFAULT_LATENCY,
        })
    }

    /// Overrides the artificial latency (tests run with `Duration::ZERO`).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn lag(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    async fn persist(&self, state: &HubState) -> Result<()> {
        self.store.save(state).await?;
        Ok(())
    }

    // ── Auth & users ────────────────────────────────────────────────────

    /// Case-insensitive lookup; auto-registers unknown usernames. Never
    /// fails for a non-empty username.
    pub async fn login(&self, username: &str) -> Result<UserProfile> {
        self.lag().await;
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("username must not be empty".into()));
        }

        let mut state = self.state.lock().await;
        if find_user(&state.users, username).is_none() {
            let now = Utc::now();
            let mut user = UserProfile {
                username: username.to_string(),
                avatar: format!(
                    "https://ui-avatars.com/api/?name={username}&background=random&color=fff"
                ),
                bio: "New soul in Hell.".to_string(),
                joined_date: timefmt::join_label(now),
                watched_episodes: vec![],
                ratings: Default::default(),
                reviews: vec![],
                joined_communities: vec!["all".to_string()],
                saved_post_ids: vec![],
                notifications: vec![],
                votes: Default::default(),
                poll_votes: Default::default(),
            };
            user.notifications.push(Notification {
                id: fresh_id(),
                kind: NotificationKind::System,
                message: "Welcome to Hell's Hub! Your soul is now on record.".to_string(),
                link_id: None,
                read: false,
                timestamp: now,
            });
            log::info!("registered new user {username}");
            state.users.push(user);
        }

        // Session marker keeps the stored casing, not the typed one.
        let stored = find_user(&state.users, username)
            .expect("user exists after registration")
            .clone();
        state.current_user = Some(stored.username.clone());
        self.persist(&state).await?;
        Ok(stored)
    }

    /// Clears the session marker only; the user record is retained.
    pub async fn logout(&self) -> Result<()> {
        self.lag().await;
        let mut state = self.state.lock().await;
        state.current_user = None;
        self.persist(&state).await
    }

    pub async fn current_user(&self) -> Result<Option<UserProfile>> {
        self.lag().await;
        let state = self.state.lock().await;
        Ok(state
            .current_user
            .as_deref()
            .and_then(|name| find_user(&state.users, name))
            .cloned())
    }

    /// Stored profile, or a synthesized placeholder for seed authors who
    /// have never logged in.
    pub async fn user_profile(&self, username: &str) -> Result<Option<UserProfile>> {
        self.lag().await;
        let state = self.state.lock().await;
        if let Some(user) = find_user(&state.users, username) {
            return Ok(Some(user.clone()));
        }
        if seed::SEED_AUTHORS.iter().any(|a| a.eq_ignore_ascii_case(username)) {
            let avatar = state
                .posts
                .iter()
                .find(|p| p.author.eq_ignore_ascii_case(username))
                .map(|p| p.avatar.clone())
                .unwrap_or_else(|| format!("https://ui-avatars.com/api/?name={username}"));
            return Ok(Some(UserProfile {
                username: username.to_string(),
                avatar,
                bio: "Prominent figure in Hell. Too busy for a bio.".to_string(),
                joined_date: "Since the beginning".to_string(),
                watched_episodes: vec![],
                ratings: Default::default(),
                reviews: vec![],
                joined_communities: vec!["all".to_string()],
                saved_post_ids: vec![],
                notifications: vec![],
                votes: Default::default(),
                poll_votes: Default::default(),
            }));
        }
        Ok(None)
    }

    /// Shallow-merges the provided fields into the stored profile.
    pub async fn update_user_profile(
        &self,
        username: &str,
        updates: ProfileUpdate,
    ) -> Result<UserProfile> {
        self.lag().await;
        let mut state = self.state.lock().await;
        let user = find_user_mut(&mut state.users, username)
            .ok_or_else(|| AppError::NotFound("user", username.to_string()))?;
        if let Some(avatar) = updates.avatar {
            user.avatar = avatar;
        }
        if let Some(bio) = updates.bio {
            user.bio = bio;
        }
        let snapshot = user.clone();
        self.persist(&state).await?;
        Ok(snapshot)
    }

    /// Bulk-flips every notification to read.
    pub async fn mark_notifications_read(&self, username: &str) -> Result<UserProfile> {
        self.lag().await;
        let mut state = self.state.lock().await;
        let user = find_user_mut(&mut state.users, username)
            .ok_or_else(|| AppError::NotFound("user", username.to_string()))?;
        for n in &mut user.notifications {
            n.read = true;
        }
        let snapshot = user.clone();
        self.persist(&state).await?;
        Ok(snapshot)
    }

    // ── Episodes ────────────────────────────────────────────────────────

    pub async fn episodes(&self) -> Result<Vec<Episode>> {
        self.lag().await;
        let state = self.state.lock().await;
        Ok(state.episodes.clone())
    }

    /// Idempotent: a second call with the same episode id is a no-op.
    pub async fn mark_episode_watched(&self, username: &str, episode_id: &str) -> Result<()> {
        self.lag().await;
        let mut state = self.state.lock().await;
        if !state.episodes.iter().any(|e| e.id == episode_id) {
            return Err(AppError::NotFound("episode", episode_id.to_string()));
        }
        let user = find_user_mut(&mut state.users, username)
            .ok_or_else(|| AppError::NotFound("user", username.to_string()))?;
        if !user.watched_episodes.iter().any(|id| id == episode_id) {
            user.watched_episodes.push(episode_id.to_string());
            self.persist(&state).await?;
        }
        Ok(())
    }

    /// One rating per user per episode: re-rating updates the existing
    /// review in place, otherwise a new review is prepended.
    pub async fn rate_episode(
        &self,
        username: &str,
        user_avatar: &str,
        episode_id: &str,
        rating: u8,
        comment: Option<String>,
    ) -> Result<Review> {
        self.lag().await;
        if !(1..=10).contains(&rating) {
            return Err(AppError::Validation(format!(
                "rating must be between 1 and 10, got {rating}"
            )));
        }

        let mut state = self.state.lock().await;
        if !state.episodes.iter().any(|e| e.id == episode_id) {
            return Err(AppError::NotFound("episode", episode_id.to_string()));
        }
        if let Some(user) = find_user_mut(&mut state.users, username) {
            user.ratings.insert(episode_id.to_string(), rating);
        }

        let episode = state
            .episodes
            .iter_mut()
            .find(|e| e.id == episode_id)
            .ok_or_else(|| AppError::NotFound("episode", episode_id.to_string()))?;

        let review = if let Some(existing) =
            episode.reviews.iter_mut().find(|r| r.user == username)
        {
            existing.rating = rating;
            existing.comment = comment;
            existing.timestamp = "Just now".to_string();
            existing.clone()
        } else {
            let review = Review {
                id: fresh_id(),
                user: username.to_string(),
                user_avatar: Some(user_avatar.to_string()),
                rating,
                comment,
                timestamp: "Just now".to_string(),
            };
            episode.reviews.insert(0, review.clone());
            review
        };

        self.persist(&state).await?;
        Ok(review)
    }

    /// Always prepends; the episode comment stream is append-only and
    /// carries no rating.
    pub async fn add_episode_comment(
        &self,
        username: &str,
        user_avatar: &str,
        episode_id: &str,
        content: &str,
    ) -> Result<EpisodeComment> {
        self.lag().await;
        let mut state = self.state.lock().await;
        let episode = state
            .episodes
            .iter_mut()
            .find(|e| e.id == episode_id)
            .ok_or_else(|| AppError::NotFound("episode", episode_id.to_string()))?;

        let comment = EpisodeComment {
            id: fresh_id(),
            user: username.to_string(),
            user_avatar: user_avatar.to_string(),
            content: content.to_string(),
            timestamp: "Just now".to_string(),
            likes: 0,
        };
        episode.comments.insert(0, comment.clone());
        self.persist(&state).await?;
        Ok(comment)
    }

    // ── Communities ─────────────────────────────────────────────────────

    pub async fn communities(&self) -> Result<Vec<Community>> {
        self.lag().await;
        let state = self.state.lock().await;
        Ok(state.communities.clone())
    }

    /// Creates a community owned by the session user. The id is derived
    /// from the normalized name; id and name must be unique.
    pub async fn create_community(&self, draft: NewCommunity) -> Result<Community> {
        self.lag().await;
        let name = draft.name.trim();
        let description = draft.description.trim();
        if name.is_empty() || description.is_empty() {
            return Err(AppError::Validation(
                "community name and description must not be empty".into(),
            ));
        }

        let mut state = self.state.lock().await;
        let creator = session_user(&state)?.to_string();

        let id = community_id_from_name(name);
        if id.is_empty() {
            return Err(AppError::Validation(format!(
                "community name '{name}' produces an empty id"
            )));
        }
        if state
            .communities
            .iter()
            .any(|c| c.id == id || c.name.eq_ignore_ascii_case(name))
        {
            return Err(AppError::Conflict(format!(
                "a community named '{name}' already exists"
            )));
        }

        let community = Community {
            id: id.clone(),
            name: name.to_string(),
            description: description.to_string(),
            icon: draft.icon,
            color: draft.color,
            creator_id: Some(creator.clone()),
            moderators: vec![creator.clone()],
            member_count: 1,
        };
        state.communities.push(community.clone());

        // The creator joins their own community.
        if let Some(user) = find_user_mut(&mut state.users, &creator) {
            user.joined_communities.push(id);
        }
        log::info!("community '{name}' created by {creator}");
        self.persist(&state).await?;
        Ok(community)
    }

    /// Flips the session user's membership; returns the new state.
    pub async fn toggle_join_community(&self, community_id: &str) -> Result<bool> {
        self.lag().await;
        let mut state = self.state.lock().await;
        let username = session_user(&state)?.to_string();

        if community_id == "all" {
            return Err(AppError::Validation(
                "'all' is an aggregate, not a joinable community".into(),
            ));
        }
        if !state.communities.iter().any(|c| c.id == community_id) {
            return Err(AppError::NotFound("community", community_id.to_string()));
        }

        let user = find_user_mut(&mut state.users, &username)
            .ok_or_else(|| AppError::NotFound("user", username.clone()))?;

        let joined = if let Some(pos) = user
            .joined_communities
            .iter()
            .position(|id| id == community_id)
        {
            user.joined_communities.remove(pos);
            false
        } else {
            user.joined_communities.push(community_id.to_string());
            true
        };

        let community = state
            .communities
            .iter_mut()
            .find(|c| c.id == community_id)
            .expect("community checked above");
        if joined {
            community.member_count += 1;
        } else {
            community.member_count = community.member_count.saturating_sub(1);
        }

        self.persist(&state).await?;
        Ok(joined)
    }

    // ── Forum posts ─────────────────────────────────────────────────────

    /// Every post, annotated for the current session: display timestamp,
    /// vote state from the ledger, saved flag, poll selection.
    pub async fn posts(&self) -> Result<Vec<PostView>> {
        self.lag().await;
        let state = self.state.lock().await;
        let viewer = state
            .current_user
            .as_deref()
            .and_then(|name| find_user(&state.users, name));
        let now = Utc::now();
        Ok(state
            .posts
            .iter()
            .map(|p| view_of(p, viewer, now))
            .collect())
    }

    /// Creates a post authored by the session user and prepends it.
    pub async fn create_post(&self, draft: NewPost) -> Result<PostView> {
        self.lag().await;
        if draft.title.trim().is_empty() {
            return Err(AppError::Validation("post title must not be empty".into()));
        }

        let mut state = self.state.lock().await;
        let author = session_user(&state)?.to_string();
        if !state.communities.iter().any(|c| c.id == draft.community_id) {
            return Err(AppError::NotFound("community", draft.community_id));
        }
        if draft.kind == PostKind::Poll && draft.poll_options.len() < 2 {
            return Err(AppError::Validation(
                "a poll needs at least two options".into(),
            ));
        }

        let avatar = find_user(&state.users, &author)
            .map(|u| u.avatar.clone())
            .unwrap_or_default();
        let poll_options = (draft.kind == PostKind::Poll).then(|| {
            draft
                .poll_options
                .iter()
                .enumerate()
                .map(|(i, text)| PollOption {
                    id: format!("opt{}", i + 1),
                    text: text.clone(),
                    votes: 0,
                })
                .collect::<Vec<_>>()
        });

        let post = ForumPost {
            id: fresh_id(),
            community_id: draft.community_id,
            author,
            avatar,
            title: draft.title,
            content: draft.content,
            kind: draft.kind,
            image: draft.image,
            link_url: draft.link_url,
            poll_options,
            poll_total_votes: 0,
            is_nsfw: draft.is_nsfw,
            is_spoiler: draft.is_spoiler,
            is_pinned: false,
            likes: 0,
            replies: 0,
            tags: draft.tags,
            timestamp: Utc::now(),
            comments: vec![],
            awards: 0,
            awarded_by: vec![],
        };
        state.posts.insert(0, post.clone());
        self.persist(&state).await?;

        let viewer = state
            .current_user
            .as_deref()
            .and_then(|name| find_user(&state.users, name));
        Ok(view_of(&post, viewer, Utc::now()))
    }

    /// Removes a post. Only the author or a moderator of the post's
    /// community may delete it; the check happens here, not in the caller.
    pub async fn delete_post(&self, post_id: &str) -> Result<()> {
        self.lag().await;
        let mut state = self.state.lock().await;
        let username = session_user(&state)?.to_string();
        let post = find_post(&state.posts, post_id)?;

        if !may_moderate(&state, post, &username) {
            return Err(AppError::Unauthorized(format!(
                "{username} may not delete post {post_id}"
            )));
        }

        state.posts.retain(|p| p.id != post_id);
        log::info!("post {post_id} deleted by {username}");
        self.persist(&state).await
    }

    /// Flips the pinned flag; same authorization rule as deletion.
    pub async fn toggle_pin_post(&self, post_id: &str) -> Result<bool> {
        self.lag().await;
        let mut state = self.state.lock().await;
        let username = session_user(&state)?.to_string();
        let post = find_post(&state.posts, post_id)?;

        if !may_moderate(&state, post, &username) {
            return Err(AppError::Unauthorized(format!(
                "{username} may not pin post {post_id}"
            )));
        }

        let post = find_post_mut(&mut state.posts, post_id)?;
        post.is_pinned = !post.is_pinned;
        let pinned = post.is_pinned;
        self.persist(&state).await?;
        Ok(pinned)
    }

    /// Flips the post id in the session user's saved set.
    pub async fn toggle_save_post(&self, post_id: &str) -> Result<bool> {
        self.lag().await;
        let mut state = self.state.lock().await;
        let username = session_user(&state)?.to_string();
        find_post(&state.posts, post_id)?;

        let user = find_user_mut(&mut state.users, &username)
            .ok_or_else(|| AppError::NotFound("user", username.clone()))?;
        let saved = if let Some(pos) = user.saved_post_ids.iter().position(|id| id == post_id) {
            user.saved_post_ids.remove(pos);
            false
        } else {
            user.saved_post_ids.push(post_id.to_string());
            true
        };
        self.persist(&state).await?;
        Ok(saved)
    }

    /// Grants a Soul award. Silent no-op when there is no session or the
    /// user already awarded this post; otherwise the award counter, the
    /// awardedBy list and the author's notifications move together.
    pub async fn give_award(&self, post_id: &str) -> Result<PostView> {
        self.lag().await;
        let mut state = self.state.lock().await;
        let giver = state.current_user.clone();

        let post = find_post_mut(&mut state.posts, post_id)?;
        let author = post.author.clone();
        let title = post.title.clone();

        if let Some(giver) = giver {
            if !post.awarded_by.iter().any(|u| u == &giver) {
                post.awarded_by.push(giver.clone());
                post.awards = post.awarded_by.len() as u32;
                if giver != author {
                    notify(
                        &mut state.users,
                        &author,
                        NotificationKind::Award,
                        format!("🏆 {giver} gave your post \"{title}\" a Soul award!"),
                        Some(post_id.to_string()),
                    );
                }
                self.persist(&state).await?;
            }
        }

        let post = find_post(&state.posts, post_id)?.clone();
        let viewer = state
            .current_user
            .as_deref()
            .and_then(|name| find_user(&state.users, name));
        Ok(view_of(&post, viewer, Utc::now()))
    }

    /// Appends to the post's flat comment list, keeps the denormalized
    /// reply count in sync, and notifies the post author on replies from
    /// anyone else.
    pub async fn add_comment(&self, post_id: &str, draft: NewComment) -> Result<PostView> {
        self.lag().await;
        if draft.content.trim().is_empty() {
            return Err(AppError::Validation("comment must not be empty".into()));
        }

        let mut state = self.state.lock().await;
        let commenter = session_user(&state)?.to_string();
        let avatar = find_user(&state.users, &commenter)
            .map(|u| u.avatar.clone())
            .unwrap_or_default();

        let post = find_post_mut(&mut state.posts, post_id)?;
        let comment = Comment {
            id: fresh_id(),
            parent_id: draft.parent_id,
            author: commenter.clone(),
            avatar,
            content: draft.content,
            likes: 0,
            timestamp: Utc::now(),
            is_op: commenter == post.author,
        };
        post.comments.push(comment);
        post.replies = post.comments.len() as u32;

        let author = post.author.clone();
        let title = post.title.clone();
        if commenter != author {
            notify(
                &mut state.users,
                &author,
                NotificationKind::Reply,
                format!("💬 {commenter} replied to your post \"{title}\""),
                Some(post_id.to_string()),
            );
        }

        self.persist(&state).await?;
        let post = find_post(&state.posts, post_id)?.clone();
        let viewer = find_user(&state.users, &commenter);
        Ok(view_of(&post, viewer, Utc::now()))
    }

    /// Applies one vote action to a post for the session user. The service
    /// owns the three-state cycle: it reads the user's ledger entry,
    /// applies the transition, adjusts the score by the resulting delta and
    /// stores the new direction.
    pub async fn vote_post(&self, post_id: &str, action: VoteDirection) -> Result<PostView> {
        self.lag().await;
        let mut state = self.state.lock().await;
        let username = session_user(&state)?.to_string();
        find_post(&state.posts, post_id)?;

        let HubState { users, posts, .. } = &mut *state;
        let user = find_user_mut(users, &username)
            .ok_or_else(|| AppError::NotFound("user", username.clone()))?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .expect("post checked above");

        let current = user.votes.get(post_id).copied().unwrap_or(votes::NEUTRAL);
        let (next, delta) = votes::apply_vote(current, action);
        post.likes += delta;
        if next == votes::NEUTRAL {
            user.votes.remove(post_id);
        } else {
            user.votes.insert(post_id.to_string(), next);
        }
        log::debug!("{username} voted on {post_id}: {current} -> {next} ({delta:+})");

        self.persist(&state).await?;
        let post = find_post(&state.posts, post_id)?.clone();
        let viewer = find_user(&state.users, &username);
        Ok(view_of(&post, viewer, Utc::now()))
    }

    /// Same cycle as [`Self::vote_post`], applied to a comment in the
    /// post's flat list. Returns the updated comment snapshot.
    pub async fn vote_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        action: VoteDirection,
    ) -> Result<Comment> {
        self.lag().await;
        let mut state = self.state.lock().await;
        let username = session_user(&state)?.to_string();

        let HubState { users, posts, .. } = &mut *state;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| AppError::NotFound("post", post_id.to_string()))?;
        let comment = post
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| AppError::NotFound("comment", comment_id.to_string()))?;
        let user = find_user_mut(users, &username)
            .ok_or_else(|| AppError::NotFound("user", username.clone()))?;

        let current = user.votes.get(comment_id).copied().unwrap_or(votes::NEUTRAL);
        let (next, delta) = votes::apply_vote(current, action);
        comment.likes += delta;
        if next == votes::NEUTRAL {
            user.votes.remove(comment_id);
        } else {
            user.votes.insert(comment_id.to_string(), next);
        }
        let snapshot = comment.clone();

        self.persist(&state).await?;
        Ok(snapshot)
    }

    /// Records a one-shot poll vote for the session user. A second vote on
    /// the same poll is a conflict; the selection is durable and surfaced
    /// as `user_poll_selection` on reads.
    pub async fn vote_poll(&self, post_id: &str, option_id: &str) -> Result<PostView> {
        self.lag().await;
        let mut state = self.state.lock().await;
        let username = session_user(&state)?.to_string();

        let HubState { users, posts, .. } = &mut *state;
        let user = find_user_mut(users, &username)
            .ok_or_else(|| AppError::NotFound("user", username.clone()))?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| AppError::NotFound("post", post_id.to_string()))?;

        if user.poll_votes.contains_key(post_id) {
            return Err(AppError::Conflict(format!(
                "{username} already voted on poll {post_id}"
            )));
        }
        let options = post
            .poll_options
            .as_mut()
            .ok_or_else(|| AppError::Validation(format!("post {post_id} is not a poll")))?;
        let option = options
            .iter_mut()
            .find(|o| o.id == option_id)
            .ok_or_else(|| AppError::NotFound("poll option", option_id.to_string()))?;

        option.votes += 1;
        post.poll_total_votes += 1;
        user.poll_votes
            .insert(post_id.to_string(), option_id.to_string());

        self.persist(&state).await?;
        let post = find_post(&state.posts, post_id)?.clone();
        let viewer = find_user(&state.users, &username);
        Ok(view_of(&post, viewer, Utc::now()))
    }
}

// ── Internals ───────────────────────────────────────────────────────────

fn fresh_id() -> String {
    Uuid::now_v7().to_string()
}

/// Derives a community id from its display name: the "r/" prefix is
/// dropped and only lowercased alphanumerics survive ("r/VoxTek" -> "voxtek").
fn community_id_from_name(name: &str) -> String {
    name.trim()
        .strip_prefix("r/")
        .unwrap_or(name.trim())
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Reseeds any missing collection; returns whether the state changed.
/// Per-record back-fills are handled by serde defaults at load time.
fn migrate(state: &mut HubState) -> bool {
    let mut changed = false;
    if state.communities.is_empty() {
        state.communities = seed::communities();
        changed = true;
    }
    if state.episodes.is_empty() {
        state.episodes = seed::episodes();
        changed = true;
    }
    if state.posts.is_empty() {
        state.posts = seed::posts();
        changed = true;
    }
    changed
}

fn find_user<'a>(users: &'a [UserProfile], username: &str) -> Option<&'a UserProfile> {
    users
        .iter()
        .find(|u| u.username.eq_ignore_ascii_case(username))
}

fn find_user_mut<'a>(
    users: &'a mut [UserProfile],
    username: &str,
) -> Option<&'a mut UserProfile> {
    users
        .iter_mut()
        .find(|u| u.username.eq_ignore_ascii_case(username))
}

fn find_post<'a>(posts: &'a [ForumPost], post_id: &str) -> Result<&'a ForumPost> {
    posts
        .iter()
        .find(|p| p.id == post_id)
        .ok_or_else(|| AppError::NotFound("post", post_id.to_string()))
}

fn find_post_mut<'a>(posts: &'a mut [ForumPost], post_id: &str) -> Result<&'a mut ForumPost> {
    posts
        .iter_mut()
        .find(|p| p.id == post_id)
        .ok_or_else(|| AppError::NotFound("post", post_id.to_string()))
}

/// The session user's name, or Unauthorized when nobody is logged in.
fn session_user(state: &HubState) -> Result<&str> {
    state
        .current_user
        .as_deref()
        .ok_or_else(|| AppError::Unauthorized("no active session".into()))
}

/// Author-or-moderator rule for delete and pin.
fn may_moderate(state: &HubState, post: &ForumPost, username: &str) -> bool {
    if post.author == username {
        return true;
    }
    state
        .communities
        .iter()
        .find(|c| c.id == post.community_id)
        .is_some_and(|c| c.is_moderator(username))
}

fn view_of(
    post: &ForumPost,
    viewer: Option<&UserProfile>,
    now: chrono::DateTime<Utc>,
) -> PostView {
    PostView {
        timestamp_display: timefmt::relative(post.timestamp, now),
        user_vote: viewer
            .and_then(|u| u.votes.get(&post.id).copied())
            .unwrap_or(votes::NEUTRAL),
        is_saved: viewer.is_some_and(|u| u.saved_post_ids.iter().any(|id| id == &post.id)),
        user_poll_selection: viewer.and_then(|u| u.poll_votes.get(&post.id).cloned()),
        post: post.clone(),
    }
}

/// Prepends a notification to the recipient's list (newest first). Unknown
/// recipients (seed authors who never logged in) are skipped silently.
fn notify(
    users: &mut [UserProfile],
    to: &str,
    kind: NotificationKind,
    message: String,
    link_id: Option<String>,
) {
    if let Some(user) = users.iter_mut().find(|u| u.username == to) {
        user.notifications.insert(
            0,
            Notification {
                id: fresh_id(),
                kind,
                message,
                link_id,
                read: false,
                timestamp: Utc::now(),
            },
        );
    }
}
