//! Crawls every artist id given on the command line.
//!
//! ```text
//! rsnetease 6452 12138269
//! ```

use log::{error, info};
use rsnetease::config::CrawlerConfig;
use rsnetease::crawler::Crawler;

use std::env;
use std::process;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Info);
    clog.init();

    let artist_ids: Vec<String> = env::args().skip(1).collect();
    if artist_ids.is_empty() {
        eprintln!("usage: rsnetease <artist-id>...");
        process::exit(2);
    }

    let config = match CrawlerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            process::exit(2);
        }
    };

    let mut crawler = match Crawler::from_config(&config) {
        Ok(crawler) => crawler,
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    };

    let mut failed = false;
    for artist_id in &artist_ids {
        if let Err(err) = crawler.run(artist_id.as_str()).await {
            error!("crawling artist {} failed: {}", artist_id, err);
            failed = true;
            continue;
        }

        if let (Some(artist), Ok(path)) = (
            crawler.artist(artist_id),
            crawler.word_cloud().path_for(artist_id),
        ) {
            let playable = artist.songs.iter().filter(|song| song.source_url.is_some()).count();
            let comments: usize = artist
                .songs
                .iter()
                .map(|song| song.hot_comments.len() + song.comments.len())
                .sum();
            info!(
                "{} ({}): {} hot songs, {} playable, {} comments, word cloud input in {}",
                artist.name,
                artist.id,
                artist.songs.len(),
                playable,
                comments,
                path.display()
            );
        }
    }

    if failed {
        process::exit(1);
    }
}
