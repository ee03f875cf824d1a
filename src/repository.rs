// Use built-in library
use std::collections::HashMap;

// Use internal modules
use crate::model::{Artist, Song};

/// In-memory store of assembled artists, keyed by the artist id a crawl was
/// started with.
#[derive(Clone, Default, Debug)]
pub struct ArtistRepository {
    artists: HashMap<String, Artist>,
}

impl ArtistRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `artist`, returning the aggregate it replaces.
    pub fn put(&mut self, artist_id: &str, artist: Artist) -> Option<Artist> {
        self.artists.insert(artist_id.to_owned(), artist)
    }

    pub fn get(&self, artist_id: &str) -> Option<&Artist> {
        self.artists.get(artist_id)
    }

    pub fn get_mut(&mut self, artist_id: &str) -> Option<&mut Artist> {
        self.artists.get_mut(artist_id)
    }

    pub fn song(&self, artist_id: &str, song_id: &str) -> Option<&Song> {
        self.get(artist_id)?.song(song_id)
    }

    pub fn remove(&mut self, artist_id: &str) -> Option<Artist> {
        self.artists.remove(artist_id)
    }

    pub fn clear(&mut self) {
        self.artists.clear()
    }

    pub fn artist_ids(&self) -> impl Iterator<Item = &str> {
        self.artists.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }
}
