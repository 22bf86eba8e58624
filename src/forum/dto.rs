use serde::{Deserialize, Serialize};

use crate::forum::repo::{Comment, Thread};

#[derive(Debug, Deserialize)]
pub struct CreateThreadRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

/// Thread with its comments, as returned by the detail endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDetails {
    #[serde(flatten)]
    pub thread: Thread,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub liked: bool,
    pub like_count: usize,
}
