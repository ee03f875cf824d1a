// Use 3rd party
use serde::{Deserialize, Serialize};

// Use local
use crate::model::album::Album;
use crate::model::comment::Comment;
use crate::model::user::User;

/// A hot song of an artist. Only `id` and `name` are known after the first
/// crawl stage, the rest is filled in by the later ones.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub name: String,
    pub singers: Option<Vec<User>>,
    pub album: Option<Album>,
    pub hot_comments: Vec<Comment>,
    pub comments: Vec<Comment>,
    /// Playable URL, `None` when the track is unavailable.
    pub source_url: Option<String>,
}

impl Song {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            ..Default::default()
        }
    }

    /// Hot comments first, then the regular ones.
    pub fn all_comments(&self) -> impl Iterator<Item = &Comment> {
        self.hot_comments.iter().chain(self.comments.iter())
    }
}
