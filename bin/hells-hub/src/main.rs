//! # Hell's Hub Binary
//!
//! Assembles the backend against the JSON file store and runs a short
//! smoke scenario. The presentation layer lives elsewhere; this binary
//! exists to exercise the service end to end against durable state.

use hh_backend::BackendService;
use hh_core::comments::{build_comment_tree, CommentSort};
use hh_store_json::JsonFileStore;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // 1. Initialize the blob store (HUB_DATA_DIR overrides the default)
    let data_dir: PathBuf = std::env::var("HUB_DATA_DIR")
        .unwrap_or_else(|_| "./data".to_string())
        .into();
    let store = JsonFileStore::new(data_dir);

    // 2. Load state, migrate and seed if needed
    let backend = BackendService::connect(Box::new(store)).await?;

    // 3. Smoke scenario: log in and read the forum back
    let user = backend.login("Guest").await?;
    log::info!("logged in as {} (joined {})", user.username, user.joined_date);

    let communities = backend.communities().await?;
    log::info!("{} communities available", communities.len());

    let posts = backend.posts().await?;
    for view in &posts {
        log::info!(
            "[{}] {} — {} ({}, {} replies, score {})",
            view.post.community_id,
            view.post.title,
            view.post.author,
            view.timestamp_display,
            view.post.replies,
            view.post.likes,
        );
        let thread = build_comment_tree(&view.post.comments, CommentSort::Best);
        for root in &thread {
            log::info!(
                "    {} ({}): {} [{} replies]",
                root.comment.author,
                root.comment.likes,
                root.comment.content,
                root.children.len(),
            );
        }
    }

    backend.logout().await?;
    Ok(())
}
