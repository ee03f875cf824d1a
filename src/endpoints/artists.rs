//! Endpoint functions related to artists

use serde::Deserialize;

use crate::client::{ClientResult, Netease};
use crate::endpoints::{null_as_default, string_or_number};

pub struct Artists<'a>(pub &'a Netease);

/// Payload of `GET /artists?id=`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotSongsPayload {
    pub artist: ArtistProfile,
    pub hot_songs: Vec<HotSong>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alias: Vec<String>,
    pub brief_desc: Option<String>,
    pub pic_url: Option<String>,
    #[serde(rename = "img1v1Url", alias = "img1V1Url")]
    pub img1v1_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HotSong {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

impl Artists<'_> {
    pub async fn hot_songs(&self, id: &str) -> ClientResult<HotSongsPayload> {
        let result = self.0.get("/artists", &[("id", id)]).await?;
        Netease::convert_result::<HotSongsPayload>(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client, mock_request_success_from_file};
    use mockito::Matcher;

    #[tokio::test]
    async fn hot_songs() {
        let _mock = mock_request_success_from_file(
            "GET",
            "/artists",
            vec![Matcher::UrlEncoded("id".into(), "6452".into())],
            "tests/files/artist.json",
        );

        let result: HotSongsPayload = client().artists().hot_songs("6452").await.unwrap();
        assert_eq!(result.artist.id, "6452");
        assert_eq!(result.artist.name, "周杰伦");
        assert_eq!(result.artist.alias, vec!["Jay Chou", "周董"]);
        assert_eq!(
            result.artist.img1v1_url.as_deref(),
            Some("http://p1.music.126.net/img1v1/jay.jpg")
        );
        assert_eq!(result.hot_songs.len(), 3);
        assert_eq!(result.hot_songs[0].id, "186016");
        assert_eq!(result.hot_songs[0].name, "晴天");
    }

    #[test]
    fn hot_songs_null_alias() {
        let result = Netease::convert_result::<HotSongsPayload>(
            r#"{"artist": {"id": 1, "name": "nobody", "alias": null}, "hotSongs": [], "code": 200}"#,
        )
        .unwrap();
        assert_eq!(result.artist.id, "1");
        assert!(result.artist.alias.is_empty());
    }

    #[tokio::test]
    async fn hot_songs_missing_field() {
        let _mock = mock_request_success_from_file(
            "GET",
            "/artists",
            vec![Matcher::UrlEncoded("id".into(), "6452".into())],
            "tests/files/artist_missing_hot_songs.json",
        );

        let result = client().artists().hot_songs("6452").await;
        assert!(result.unwrap_err().is_malformed_response());
    }
}
