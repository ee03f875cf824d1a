//! Endpoint functions related to songs

use serde::Deserialize;

use crate::client::{ClientResult, Netease};
use crate::endpoints::string_or_number;

pub struct Songs<'a>(pub &'a Netease);

/// Payload of `GET /song/detail?ids=`.
#[derive(Debug, Deserialize)]
pub struct SongDetailPayload {
    pub songs: Vec<SongDetail>,
}

#[derive(Debug, Deserialize)]
pub struct SongDetail {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "ar")]
    pub singers: Vec<SingerRef>,
    #[serde(rename = "al")]
    pub album: AlbumRef,
}

#[derive(Debug, Deserialize)]
pub struct SingerRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub pic_url: Option<String>,
}

/// Payload of `GET /song/url?id=`.
#[derive(Debug, Deserialize)]
pub struct SongUrlPayload {
    pub data: Vec<SongUrl>,
}

#[derive(Debug, Deserialize)]
pub struct SongUrl {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub url: Option<String>,
}

impl Songs<'_> {
    pub async fn details(&self, ids: &[String]) -> ClientResult<SongDetailPayload> {
        let ids = ids.join(",");
        let result = self.0.get("/song/detail", &[("ids", ids.as_str())]).await?;
        Netease::convert_result::<SongDetailPayload>(&result)
    }

    pub async fn urls(&self, ids: &[String]) -> ClientResult<SongUrlPayload> {
        let ids = ids.join(",");
        let result = self.0.get("/song/url", &[("id", ids.as_str())]).await?;
        Netease::convert_result::<SongUrlPayload>(&result)
    }
}
