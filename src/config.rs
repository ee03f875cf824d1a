//! Crawler configuration, built in code or read from `RSNETEASE_*` variables

// Use 3rd party
use log::debug;
use thiserror::Error;

// Use built-in library
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://neteaseapi.youkeda.com:3000";
pub const DEFAULT_COMMENT_LIMIT: u32 = 5;
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_WORD_CLOUD_TOP: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct CrawlerConfig {
    pub base_url: String,
    /// Page size sent to the comment endpoint.
    pub comment_limit: u32,
    /// Maximum number of comment requests in flight at once.
    pub concurrency: usize,
    pub timeout: Option<Duration>,
    pub word_cloud_dir: PathBuf,
    pub word_cloud_top: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            comment_limit: DEFAULT_COMMENT_LIMIT,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: None,
            word_cloud_dir: PathBuf::from("wordcloud"),
            word_cloud_top: DEFAULT_WORD_CLOUD_TOP,
        }
    }
}

impl CrawlerConfig {
    /// Reads the configuration from the environment, falling back to the
    /// defaults for every unset variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("RSNETEASE_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(limit) = parse(&lookup, "RSNETEASE_COMMENT_LIMIT")? {
            config.comment_limit = limit;
        }
        if let Some(concurrency) = parse::<usize, _>(&lookup, "RSNETEASE_CONCURRENCY")? {
            if concurrency == 0 {
                return Err(ConfigError::Invalid {
                    key: "RSNETEASE_CONCURRENCY",
                    value: concurrency.to_string(),
                });
            }
            config.concurrency = concurrency;
        }
        if let Some(secs) = parse(&lookup, "RSNETEASE_TIMEOUT_SECS")? {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(dir) = lookup("RSNETEASE_WORDCLOUD_DIR") {
            config.word_cloud_dir = PathBuf::from(dir);
        }
        if let Some(top) = parse(&lookup, "RSNETEASE_WORDCLOUD_TOP")? {
            config.word_cloud_top = top;
        }

        debug!("crawler configuration: {:?}", config);
        Ok(config)
    }

    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_owned();
        self
    }

    pub fn comment_limit(mut self, comment_limit: u32) -> Self {
        self.comment_limit = comment_limit;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn word_cloud_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.word_cloud_dir = dir.into();
        self
    }

    pub fn word_cloud_top(mut self, top: usize) -> Self {
        self.word_cloud_top = top;
        self
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
