//! # Comment Threading
//!
//! Comments are stored flat (each carrying an optional `parent_id`) and
//! reassembled into a tree on every read. The sort is applied to the flat
//! list *before* linking, so sibling order at every depth reflects the same
//! global sort.

use crate::models::Comment;
use serde::Serialize;
use std::collections::HashMap;

/// Sort order for a comment thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSort {
    /// Highest score first.
    #[default]
    Best,
    /// Newest first.
    New,
    /// Oldest first.
    Old,
}

impl CommentSort {
    fn apply(self, comments: &mut [Comment]) {
        match self {
            // Stable sorts keep the stored order for ties.
            CommentSort::Best => comments.sort_by(|a, b| b.likes.cmp(&a.likes)),
            CommentSort::New => comments.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            CommentSort::Old => comments.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        }
    }
}

/// A comment resolved into its place in the thread.
#[derive(Debug, Clone, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub children: Vec<CommentNode>,
}

/// Builds an ordered forest from a flat comment list.
///
/// A comment whose `parent_id` does not resolve to another comment in the
/// list (parent missing or deleted) is treated as a root, so orphaned
/// replies are demoted to top-level instead of disappearing. A comment that
/// names itself as parent is treated the same way. Longer parent cycles are
/// undefined input; this implementation drops their members.
pub fn build_comment_tree(comments: &[Comment], sort: CommentSort) -> Vec<CommentNode> {
    let mut sorted: Vec<Comment> = comments.to_vec();
    sort.apply(&mut sorted);

    // id -> position in the sorted list
    let index: HashMap<&str, usize> = sorted
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.as_str(), i))
        .collect();

    // Link children to parents by position, preserving the sorted order.
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); sorted.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (i, c) in sorted.iter().enumerate() {
        match c.parent_id.as_deref().and_then(|p| index.get(p).copied()) {
            Some(parent) if parent != i => children_of[parent].push(i),
            _ => roots.push(i),
        }
    }

    fn assemble(i: usize, sorted: &[Comment], children_of: &[Vec<usize>]) -> CommentNode {
        CommentNode {
            comment: sorted[i].clone(),
            children: children_of[i]
                .iter()
                .map(|&child| assemble(child, sorted, children_of))
                .collect(),
        }
    }

    roots
        .into_iter()
        .map(|i| assemble(i, &sorted, &children_of))
        .collect()
}

/// Depth-first flattening of a forest back into a comment list.
pub fn flatten(forest: &[CommentNode]) -> Vec<Comment> {
    let mut out = Vec::new();
    fn walk(node: &CommentNode, out: &mut Vec<Comment>) {
        out.push(node.comment.clone());
        for child in &node.children {
            walk(child, out);
        }
    }
    for root in forest {
        walk(root, &mut out);
    }
    out
}
