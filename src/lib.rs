//! Rsnetease crawls an artist from a NetEase-compatible music catalog API.
//!
//! ## Configuration
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! rsnetease = "0.1.0"
//! ```
//!
//! Rsnetease uses asynchronous programming with `async` and `await`.
//!
//! ## Getting Started
//!
//! A crawl runs five stages for one artist id, in order:
//!
//! 1. the artist profile and its hot songs (`/artists`)
//! 2. singers and album of every hot song, in one batch (`/song/detail`)
//! 3. hot and regular comments of every song (`/comment/music`)
//! 4. the playable url of every song, in one batch (`/song/url`)
//! 5. the collected comment text is handed to a [`WordCloudGenerator`]
//!
//! The assembled [`Artist`] stays in memory and is read back with
//! [`Crawler::artist`] and [`Crawler::song`].
//!
//! The host, the comment page size and the number of comment requests in
//! flight come from [`CrawlerConfig`], which can also be read from
//! `RSNETEASE_*` environment variables (a `.env` file works with `dotenv`).
//!
//! ### Examples
//!
//! ```toml
//! [dependencies]
//! rsnetease = { version = "0.1.0" }
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! ```rust,no_run
//! use rsnetease::config::CrawlerConfig;
//! use rsnetease::crawler::Crawler;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = CrawlerConfig::default().comment_limit(5);
//!     let mut crawler = Crawler::from_config(&config).unwrap();
//!
//!     crawler.run("6452").await.unwrap();
//!     let song = crawler.song("6452", "186016");
//!     println!("{:?}", song);
//! }
//! ```
//!
//! [`WordCloudGenerator`]: crate::wordcloud::WordCloudGenerator
//! [`Artist`]: crate::model::Artist
//! [`Crawler::artist`]: crate::crawler::Crawler::artist
//! [`Crawler::song`]: crate::crawler::Crawler::song
//! [`CrawlerConfig`]: crate::config::CrawlerConfig

pub mod client;
pub mod config;
pub mod crawler;
pub mod endpoints;
pub mod mapper;
pub mod model;
pub mod repository;
pub mod wordcloud;
