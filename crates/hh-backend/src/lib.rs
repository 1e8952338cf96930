//! # hh-backend
//!
//! The mock backend for Hell's Hub: a facade over a single persisted state
//! blob that stands in for a real API server. Views call these operations
//! for every state change and get plain snapshots back.

pub mod seed;
pub mod service;

pub use service::{BackendService, NewComment, NewCommunity, NewPost, ProfileUpdate};
