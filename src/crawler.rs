//! The crawl pipeline: artist and hot songs, song details, comments, play urls
//! and finally the word cloud input, one stage after the other.

// Use 3rd party
use log::{debug, info};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

// Use built-in library
use std::sync::Arc;

// Use internal modules
use crate::client::{ClientError, Netease};
use crate::config::CrawlerConfig;
use crate::endpoints::comments::CommentPayload;
use crate::mapper;
use crate::model::{Artist, Song};
use crate::repository::ArtistRepository;
use crate::wordcloud::{WordCloudError, WordCloudGenerator, WordFrequencyFile};

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    WordCloud(#[from] WordCloudError),
    #[error("comment worker failed: {0}")]
    Worker(#[from] JoinError),
    #[error("comment worker pool closed")]
    PoolClosed,
    #[error("artist {0} disappeared from the repository during the crawl")]
    ArtistMissing(String),
}

pub type CrawlResult<T> = Result<T, CrawlError>;

pub struct Crawler<W> {
    netease: Netease,
    repository: ArtistRepository,
    word_cloud: W,
    comment_limit: u32,
    concurrency: usize,
}

impl Crawler<WordFrequencyFile> {
    /// A crawler writing word frequency files where `config` says.
    pub fn from_config(config: &CrawlerConfig) -> CrawlResult<Self> {
        let word_cloud = WordFrequencyFile::new(&config.word_cloud_dir, config.word_cloud_top);
        Self::new(config, word_cloud)
    }
}

impl<W: WordCloudGenerator> Crawler<W> {
    pub fn new(config: &CrawlerConfig, word_cloud: W) -> CrawlResult<Self> {
        Ok(Self {
            netease: Netease::new(config)?,
            repository: ArtistRepository::new(),
            word_cloud,
            comment_limit: config.comment_limit,
            concurrency: config.concurrency.max(1),
        })
    }

    /// Crawls `artist_id` and stores the assembled aggregate.
    ///
    /// An absent or empty id is ignored. The previous aggregate of the same
    /// artist is dropped before the first request; other artists are kept.
    /// The first failing stage aborts the crawl and its error is returned.
    pub async fn run<'a>(&mut self, artist_id: impl Into<Option<&'a str>>) -> CrawlResult<()> {
        let artist_id = match artist_id.into() {
            Some(artist_id) if !artist_id.is_empty() => artist_id,
            _ => {
                debug!("no artist id given, nothing to crawl");
                return Ok(());
            }
        };

        info!("crawling artist {}", artist_id);
        self.repository.remove(artist_id);

        self.init_artist_hot_songs(artist_id).await?;
        self.assemble_song_details(artist_id).await?;
        self.assemble_song_comments(artist_id).await?;
        self.assemble_song_urls(artist_id).await?;
        self.generate_word_cloud(artist_id)?;

        info!("finished crawling artist {}", artist_id);
        Ok(())
    }

    pub fn artist(&self, artist_id: &str) -> Option<&Artist> {
        self.repository.get(artist_id)
    }

    pub fn song(&self, artist_id: &str, song_id: &str) -> Option<&Song> {
        self.repository.song(artist_id, song_id)
    }

    pub fn repository(&self) -> &ArtistRepository {
        &self.repository
    }

    pub fn word_cloud(&self) -> &W {
        &self.word_cloud
    }

    async fn init_artist_hot_songs(&mut self, artist_id: &str) -> CrawlResult<()> {
        let payload = self.netease.artists().hot_songs(artist_id).await?;
        let artist = mapper::map_artist(payload);
        debug!("artist {} has {} hot songs", artist_id, artist.songs.len());
        self.repository.put(artist_id, artist);
        Ok(())
    }

    async fn assemble_song_details(&mut self, artist_id: &str) -> CrawlResult<()> {
        let song_ids = self.song_ids(artist_id)?;
        if song_ids.is_empty() {
            return Ok(());
        }

        let payload = self.netease.songs().details(&song_ids).await?;
        mapper::merge_song_details(&mut self.artist_mut(artist_id)?.songs, payload);
        Ok(())
    }

    async fn assemble_song_comments(&mut self, artist_id: &str) -> CrawlResult<()> {
        let song_ids = self.song_ids(artist_id)?;
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut workers = JoinSet::new();

        for (index, song_id) in song_ids.iter().cloned().enumerate() {
            let netease = self.netease.clone();
            let permits = Arc::clone(&permits);
            let limit = self.comment_limit;
            workers.spawn(async move {
                let _permit = permits.acquire_owned().await.map_err(|_| CrawlError::PoolClosed)?;
                let payload = netease.comments().music(&song_id, limit).await?;
                Ok::<_, CrawlError>((index, payload))
            });
        }

        let mut payloads: Vec<Option<CommentPayload>> = song_ids.iter().map(|_| None).collect();
        while let Some(joined) = workers.join_next().await {
            let (index, payload) = joined??;
            payloads[index] = Some(payload);
        }

        // Merged in song order once every request is back.
        let artist = self.artist_mut(artist_id)?;
        for (song, payload) in artist.songs.iter_mut().zip(payloads) {
            if let Some(payload) = payload {
                mapper::merge_comments(song, payload);
            }
        }
        debug!("comments of {} songs merged for artist {}", song_ids.len(), artist_id);
        Ok(())
    }

    async fn assemble_song_urls(&mut self, artist_id: &str) -> CrawlResult<()> {
        let song_ids = self.song_ids(artist_id)?;
        if song_ids.is_empty() {
            return Ok(());
        }

        let payload = self.netease.songs().urls(&song_ids).await?;
        mapper::merge_song_urls(&mut self.artist_mut(artist_id)?.songs, payload);
        Ok(())
    }

    fn generate_word_cloud(&mut self, artist_id: &str) -> CrawlResult<()> {
        let artist = self
            .repository
            .get(artist_id)
            .ok_or_else(|| CrawlError::ArtistMissing(artist_id.to_owned()))?;
        let contents = mapper::collect_comment_contents(artist);
        debug!("{} comments collected for artist {}", contents.len(), artist_id);
        self.word_cloud.generate(artist_id, &contents)?;
        Ok(())
    }

    fn song_ids(&self, artist_id: &str) -> CrawlResult<Vec<String>> {
        self.repository
            .get(artist_id)
            .map(Artist::song_ids)
            .ok_or_else(|| CrawlError::ArtistMissing(artist_id.to_owned()))
    }

    fn artist_mut(&mut self, artist_id: &str) -> CrawlResult<&mut Artist> {
        self.repository
            .get_mut(artist_id)
            .ok_or_else(|| CrawlError::ArtistMissing(artist_id.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{config, mock_request_success, mock_request_success_from_file};
    use mockito::{mock, Matcher};

    const SONG_IDS: &str = "186016,418603077,186001";

    #[derive(Default)]
    struct RecordingWordCloud {
        calls: Vec<(String, Vec<String>)>,
    }

    impl WordCloudGenerator for RecordingWordCloud {
        fn generate(&mut self, artist_id: &str, contents: &[String]) -> Result<(), WordCloudError> {
            self.calls.push((artist_id.to_owned(), contents.to_vec()));
            Ok(())
        }
    }

    fn crawler(concurrency: usize) -> Crawler<RecordingWordCloud> {
        Crawler::new(&config().concurrency(concurrency), RecordingWordCloud::default()).unwrap()
    }

    fn mock_catalog() -> Vec<mockito::Mock> {
        let mut mocks = vec![
            mock_request_success_from_file(
                "GET",
                "/artists",
                vec![Matcher::UrlEncoded("id".into(), "6452".into())],
                "tests/files/artist.json",
            ),
            mock_request_success_from_file(
                "GET",
                "/song/detail",
                vec![Matcher::UrlEncoded("ids".into(), SONG_IDS.into())],
                "tests/files/song_detail.json",
            ),
            mock_request_success_from_file(
                "GET",
                "/song/url",
                vec![Matcher::UrlEncoded("id".into(), SONG_IDS.into())],
                "tests/files/song_url.json",
            ),
        ];
        for song_id in SONG_IDS.split(',') {
            mocks.push(mock_request_success_from_file(
                "GET",
                "/comment/music",
                vec![
                    Matcher::UrlEncoded("id".into(), song_id.into()),
                    Matcher::UrlEncoded("limit".into(), "5".into()),
                ],
                &format!("tests/files/comments_{}.json", song_id),
            ));
        }
        mocks
    }

    #[tokio::test]
    async fn run_assembles_artist() {
        let _mocks = mock_catalog();
        let mut crawler = crawler(4);
        crawler.run("6452").await.unwrap();

        let artist = crawler.artist("6452").unwrap();
        assert_eq!(artist.name, "周杰伦");
        assert_eq!(artist.alias, vec!["Jay Chou", "周董"]);
        assert_eq!(artist.brief_desc.as_deref(), Some("台湾华语流行歌手、音乐人。"));
        assert_eq!(artist.songs.len(), 3);
        assert_eq!(artist.song_ids(), SONG_IDS.split(',').collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn run_tolerates_missing_detail_and_url() {
        let _mocks = mock_catalog();
        let mut crawler = crawler(4);
        crawler.run("6452").await.unwrap();

        let sunny = crawler.song("6452", "186016").unwrap();
        assert_eq!(sunny.singers.as_ref().unwrap()[0].nickname, "周杰伦");
        assert_eq!(sunny.album.as_ref().unwrap().name, "叶惠美");
        assert_eq!(sunny.source_url.as_deref(), Some("http://m701.music.126.net/186016.mp3"));

        // url is null in the url batch
        let balloon = crawler.song("6452", "418603077").unwrap();
        assert_eq!(balloon.singers.as_ref().unwrap().len(), 2);
        assert_eq!(balloon.source_url, None);

        // absent from the detail batch
        let fragrance = crawler.song("6452", "186001").unwrap();
        assert_eq!(fragrance.singers, None);
        assert_eq!(fragrance.album, None);
        assert!(fragrance.source_url.is_some());
    }

    #[tokio::test]
    async fn run_hands_comments_to_word_cloud_in_order() {
        let _mocks = mock_catalog();
        let mut crawler = crawler(3);
        crawler.run("6452").await.unwrap();

        let calls = &crawler.word_cloud().calls;
        assert_eq!(calls.len(), 1);
        let (artist_id, contents) = &calls[0];
        assert_eq!(artist_id, "6452");
        assert_eq!(contents.len(), 3 * (2 + 3));
        assert_eq!(contents[0], "晴天 lyrics still hurt");
        assert_eq!(contents[2], "still listening in 2020");
        assert_eq!(contents[5], "balloon confession song");
        assert_eq!(contents[14], "memories");

        let song = crawler.song("6452", "186001").unwrap();
        assert_eq!(song.hot_comments[0].id, "1011");
        assert_eq!(song.comments[1].user.avatar_url, None);
    }

    #[tokio::test]
    async fn run_serially_matches_concurrent_run() {
        let _mocks = mock_catalog();
        let mut serial = crawler(1);
        let mut concurrent = crawler(8);
        serial.run("6452").await.unwrap();
        concurrent.run("6452").await.unwrap();

        assert_eq!(serial.artist("6452"), concurrent.artist("6452"));
        assert_eq!(serial.word_cloud().calls, concurrent.word_cloud().calls);
    }

    #[tokio::test]
    async fn run_twice_replaces_aggregate() {
        let _mocks = mock_catalog();
        let mut crawler = crawler(4);
        crawler.run("6452").await.unwrap();
        let first = crawler.artist("6452").cloned().unwrap();
        crawler.run(Some("6452")).await.unwrap();

        assert_eq!(crawler.artist("6452"), Some(&first));
        assert_eq!(crawler.repository().len(), 1);
        assert_eq!(crawler.word_cloud().calls.len(), 2);
    }

    #[tokio::test]
    async fn run_ignores_missing_artist_id() {
        let mut crawler = crawler(4);
        crawler.run("").await.unwrap();
        crawler.run(None::<&str>).await.unwrap();

        assert!(crawler.repository().is_empty());
        assert!(crawler.word_cloud().calls.is_empty());
    }

    #[tokio::test]
    async fn run_keeps_other_artists() {
        let _mocks = mock_catalog();
        let _other = mock_request_success(
            "GET",
            "/artists",
            vec![Matcher::UrlEncoded("id".into(), "1".into())],
            r#"{"artist": {"id": 1, "name": "nobody"}, "hotSongs": [], "code": 200}"#,
        );

        let mut crawler = crawler(4);
        crawler.run("6452").await.unwrap();
        crawler.run("1").await.unwrap();

        assert_eq!(crawler.artist("1").unwrap().songs.len(), 0);
        assert_eq!(crawler.artist("6452").unwrap().songs.len(), 3);
        assert_eq!(crawler.word_cloud().calls[1], ("1".to_owned(), vec![]));
    }

    #[tokio::test]
    async fn run_reports_malformed_response() {
        let _mock = mock_request_success_from_file(
            "GET",
            "/artists",
            vec![Matcher::UrlEncoded("id".into(), "6452".into())],
            "tests/files/artist_missing_hot_songs.json",
        );

        let mut crawler = crawler(4);
        match crawler.run("6452").await {
            Err(CrawlError::Client(err)) => assert!(err.is_malformed_response()),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(crawler.artist("6452").is_none());
    }

    #[tokio::test]
    async fn run_reports_failed_comment_request() {
        let _artist = mock_request_success_from_file(
            "GET",
            "/artists",
            vec![Matcher::UrlEncoded("id".into(), "6452".into())],
            "tests/files/artist.json",
        );
        let _detail = mock_request_success_from_file(
            "GET",
            "/song/detail",
            vec![Matcher::UrlEncoded("ids".into(), SONG_IDS.into())],
            "tests/files/song_detail.json",
        );
        let _comments = mock("GET", "/comment/music")
            .match_query(Matcher::Any)
            .with_status(503)
            .create();
        let urls = mock("GET", "/song/url").match_query(Matcher::Any).expect(0).create();

        let mut crawler = crawler(2);
        match crawler.run("6452").await {
            Err(CrawlError::Client(err)) => assert!(err.is_fetch_error()),
            other => panic!("unexpected result: {:?}", other),
        }
        urls.assert();
        assert!(crawler.word_cloud().calls.is_empty());

        // Stages before the failing one stay visible.
        let artist = crawler.artist("6452").unwrap();
        assert_eq!(artist.songs.len(), 3);
        let sunny = crawler.song("6452", "186016").unwrap();
        assert_eq!(sunny.album.as_ref().unwrap().name, "叶惠美");
        assert!(artist
            .songs
            .iter()
            .all(|song| song.hot_comments.is_empty() && song.comments.is_empty() && song.source_url.is_none()));
    }

    #[tokio::test]
    async fn run_reports_unreachable_catalog() {
        let config = CrawlerConfig::default().base_url("http://127.0.0.1:1");
        let mut crawler = Crawler::new(&config, RecordingWordCloud::default()).unwrap();
        match crawler.run("6452").await {
            Err(CrawlError::Client(ClientError::Request(_))) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
