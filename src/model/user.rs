// Use 3rd party
use serde::{Deserialize, Serialize};

/// A song singer or a comment author. Every occurrence is its own copy, the
/// same catalog user showing up twice yields two equal values.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub nickname: String,
    pub avatar_url: Option<String>,
}
