//! Word cloud input derived from comment text.
//!
//! Rendering a cloud is left to whatever consumes the output of a
//! [`WordCloudGenerator`]; [`WordFrequencyFile`] only prepares the word
//! frequencies such a renderer needs.

// Use 3rd party
use log::info;
use serde::Serialize;
use thiserror::Error;

// Use built-in library
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Debug, Error)]
pub enum WordCloudError {
    #[error("word cloud io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("word cloud serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("artist id {0:?} cannot be used as a file name")]
    InvalidArtistId(String),
}

pub trait WordCloudGenerator {
    /// Receives every comment text collected for `artist_id`, in crawl order.
    fn generate(&mut self, artist_id: &str, contents: &[String]) -> Result<(), WordCloudError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WordCloudInput<'a> {
    artist_id: &'a str,
    comments: usize,
    words: Vec<WordCount>,
}

/// Counts words across `contents`, most frequent first and alphabetical among
/// equal counts.
///
/// Words are runs of alphanumeric characters, lowercased; single characters are
/// dropped. Chinese, Japanese and Korean text carries no spaces, so a run of
/// those characters counts every pair of neighbouring characters instead.
pub fn word_frequencies(contents: &[String]) -> Vec<WordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for content in contents {
        for word in content.split(|c: char| !c.is_alphanumeric()) {
            for token in tokens(word) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}')
}

// Splits an alphanumeric run into latin words and CJK bigrams.
fn tokens(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut tokens = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let cjk = is_cjk(chars[start]);
        let end = chars[start..]
            .iter()
            .position(|&c| is_cjk(c) != cjk)
            .map_or(chars.len(), |offset| start + offset);
        let run = &chars[start..end];
        if run.len() >= 2 {
            if cjk {
                tokens.extend(run.windows(2).map(|pair| pair.iter().collect::<String>()));
            } else {
                tokens.push(run.iter().collect::<String>().to_lowercase());
            }
        }
        start = end;
    }
    tokens
}

/// Writes `<dir>/<artist_id>.json` with the `top` most frequent words.
#[derive(Clone, Debug)]
pub struct WordFrequencyFile {
    dir: PathBuf,
    top: usize,
}

impl WordFrequencyFile {
    pub fn new<P: Into<PathBuf>>(dir: P, top: usize) -> Self {
        Self { dir: dir.into(), top }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The output file of `artist_id`, which must stay inside `dir`.
    pub fn path_for(&self, artist_id: &str) -> Result<PathBuf, WordCloudError> {
        if artist_id.is_empty()
            || artist_id.contains("..")
            || artist_id.chars().any(|c| c == '/' || c == '\\' || c == '\0')
        {
            return Err(WordCloudError::InvalidArtistId(artist_id.to_owned()));
        }
        Ok(self.dir.join(format!("{}.json", artist_id)))
    }
}

impl WordCloudGenerator for WordFrequencyFile {
    fn generate(&mut self, artist_id: &str, contents: &[String]) -> Result<(), WordCloudError> {
        let mut words = word_frequencies(contents);
        words.truncate(self.top);

        let path = self.path_for(artist_id)?;
        fs::create_dir_all(&self.dir)?;
        let writer = BufWriter::new(File::create(&path)?);
        let input = WordCloudInput {
            artist_id,
            comments: contents.len(),
            words,
        };
        serde_json::to_writer_pretty(writer, &input)?;

        info!("word cloud input for artist {} written to {}", artist_id, path.display());
        Ok(())
    }
}
