// Use 3rd party
use serde::{Deserialize, Serialize};

// Use local
use crate::model::user::User;

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    /// Milliseconds since the epoch, kept as the catalog sent it.
    pub time: String,
    pub content: String,
    pub liked_count: String,
    pub user: User,
}
