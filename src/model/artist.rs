// Use 3rd party
use serde::{Deserialize, Serialize};

// Use local
use crate::model::song::Song;

/// The artist aggregate: profile fields plus the enriched hot songs.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub alias: Vec<String>,
    pub brief_desc: Option<String>,
    pub pic_url: Option<String>,
    #[serde(rename = "img1v1Url")]
    pub img1v1_url: Option<String>,
    pub songs: Vec<Song>,
}

impl Artist {
    pub fn song(&self, song_id: &str) -> Option<&Song> {
        self.songs.iter().find(|song| song.id == song_id)
    }

    pub fn song_ids(&self) -> Vec<String> {
        self.songs.iter().map(|song| song.id.clone()).collect()
    }
}
