//! Endpoint functions related to song comments

use serde::Deserialize;

use crate::client::{ClientResult, Netease};
use crate::endpoints::string_or_number;

pub struct Comments<'a>(pub &'a Netease);

/// Payload of `GET /comment/music?id=&limit=`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    pub hot_comments: Vec<CommentItem>,
    pub comments: Vec<CommentItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentItem {
    #[serde(deserialize_with = "string_or_number")]
    pub comment_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub time: String,
    pub content: String,
    #[serde(deserialize_with = "string_or_number")]
    pub liked_count: String,
    pub user: CommentUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentUser {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub nickname: String,
    pub avatar_url: Option<String>,
}

impl Comments<'_> {
    pub async fn music(&self, song_id: &str, limit: u32) -> ClientResult<CommentPayload> {
        let limit = limit.to_string();
        let result = self
            .0
            .get("/comment/music", &[("id", song_id), ("limit", limit.as_str())])
            .await?;
        Netease::convert_result::<CommentPayload>(&result)
    }
}
