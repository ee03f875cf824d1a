//! Projection of endpoint payloads onto the artist aggregate.
//!
//! Every function here is pure: the crawler fetches a payload, then hands it
//! to the matching mapper together with the part of the aggregate it fills.

// Use 3rd party
use log::warn;

// Use built-in library
use std::collections::{HashMap, HashSet};

// Use internal modules
use crate::endpoints::artists::HotSongsPayload;
use crate::endpoints::comments::{CommentItem, CommentPayload};
use crate::endpoints::songs::{SongDetailPayload, SongUrlPayload};
use crate::model::{Album, Artist, Comment, Song, User};

/// Builds an artist with its hot songs, none of them enriched yet.
///
/// A song id repeated in `hotSongs` is kept once, at its first position.
pub fn map_artist(payload: HotSongsPayload) -> Artist {
    let HotSongsPayload { artist, hot_songs } = payload;

    let mut seen = HashSet::new();
    let songs = hot_songs
        .into_iter()
        .filter(|song| {
            let fresh = seen.insert(song.id.clone());
            if !fresh {
                warn!("artist {} lists hot song {} twice", artist.id, song.id);
            }
            fresh
        })
        .map(|song| Song::new(&song.id, &song.name))
        .collect();

    Artist {
        id: artist.id,
        name: artist.name,
        alias: artist.alias,
        brief_desc: artist.brief_desc,
        pic_url: artist.pic_url,
        img1v1_url: artist.img1v1_url,
        songs,
    }
}

/// Fills singers and album of every song present in the batch; the others are
/// left untouched.
pub fn merge_song_details(songs: &mut [Song], payload: SongDetailPayload) {
    let mut details: HashMap<String, _> = payload
        .songs
        .into_iter()
        .map(|detail| (detail.id.clone(), detail))
        .collect();

    for song in songs.iter_mut() {
        let detail = match details.remove(&song.id) {
            Some(detail) => detail,
            None => {
                warn!("no detail returned for song {}", song.id);
                continue;
            }
        };

        song.singers = Some(
            detail
                .singers
                .into_iter()
                .map(|singer| User {
                    id: singer.id,
                    nickname: singer.name,
                    avatar_url: None,
                })
                .collect(),
        );
        song.album = Some(Album {
            id: detail.album.id,
            name: detail.album.name,
            pic_url: detail.album.pic_url,
        });
    }
}

/// Replaces both comment lists of `song`.
pub fn merge_comments(song: &mut Song, payload: CommentPayload) {
    song.hot_comments = map_comments(payload.hot_comments);
    song.comments = map_comments(payload.comments);
}

fn map_comments(items: Vec<CommentItem>) -> Vec<Comment> {
    items
        .into_iter()
        .map(|item| Comment {
            id: item.comment_id,
            time: item.time,
            content: item.content,
            liked_count: item.liked_count,
            user: User {
                id: item.user.user_id,
                nickname: item.user.nickname,
                avatar_url: item.user.avatar_url,
            },
        })
        .collect()
}

/// Sets the playable url of every song that has a non-null entry in the batch.
pub fn merge_song_urls(songs: &mut [Song], payload: SongUrlPayload) {
    let mut urls: HashMap<String, Option<String>> = payload
        .data
        .into_iter()
        .map(|entry| (entry.id, entry.url))
        .collect();

    for song in songs.iter_mut() {
        match urls.remove(&song.id) {
            Some(Some(url)) => song.source_url = Some(url),
            Some(None) => warn!("song {} is unavailable", song.id),
            None => warn!("no url entry returned for song {}", song.id),
        }
    }
}

/// Every comment text of the artist, song by song, hot comments first.
pub fn collect_comment_contents(artist: &Artist) -> Vec<String> {
    artist
        .songs
        .iter()
        .flat_map(|song| song.all_comments())
        .map(|comment| comment.content.clone())
        .collect()
}
