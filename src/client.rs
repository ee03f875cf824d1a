// Use 3rd party
use log::{debug, error};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

// Use built-in library
use std::borrow::Cow;

// Use internal modules
use crate::config::CrawlerConfig;

// Possible errors returned from `rsnetease` client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("netease error: {0}")]
    Api(#[from] ApiError),
    #[error("malformed response: {0}")]
    ParseJSON(#[from] serde_json::Error),
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("status code: {0}")]
    StatusCode(StatusCode),
}

impl ClientError {
    async fn from_response(response: Response) -> Self {
        let status = response.status();
        match response.json::<Envelope>().await.ok().and_then(Envelope::into_api_error) {
            Some(api_error) => api_error.into(),
            None => status.into(),
        }
    }

    /// True when the request never produced a usable response (connection
    /// refused, timeout, broken body...).
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Request(_) | Self::StatusCode(_) | Self::Api(_))
    }

    /// True when a response arrived but did not have the expected shape.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, Self::ParseJSON(_))
    }
}

impl From<StatusCode> for ClientError {
    fn from(code: StatusCode) -> Self {
        Self::StatusCode(code)
    }
}

// NetEase error envelope, e.g. `{"code": 404, "msg": "not found"}`
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

// Every NetEase payload carries a `code` next to the data. The text comes as
// `msg`, `message` or both, in any shape.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: Option<i64>,
    msg: Option<Value>,
    message: Option<Value>,
}

impl Envelope {
    fn into_api_error(self) -> Option<ApiError> {
        let code = self.code?;
        let message = [self.msg, self.message]
            .iter()
            .flatten()
            .find_map(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        Some(ApiError { code, message })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

// NetEase API
#[derive(Clone, Debug)]
pub struct Netease {
    client: Client,
    base_url: String,
}

impl Netease {
    pub fn new(config: &CrawlerConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn api_call(&self, url: &str, query: &[(&str, &str)]) -> ClientResult<Response> {
        let mut url: Cow<str> = url.into();
        if !url.starts_with("http") {
            url = [self.base_url.as_str(), &url].concat().into();
        }
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&*url)
            .query(query)
            .send()
            .await
            .map_err(|err| {
                error!("request to {} failed: {}", url, err);
                ClientError::from(err)
            })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            error!("request to {} answered {}", url, response.status());
            Err(ClientError::from_response(response).await)
        }
    }

    pub async fn get(&self, url: &str, query: &[(&str, &str)]) -> ClientResult<String> {
        self.api_call(url, query).await?.text().await.map_err(Into::into)
    }

    pub(crate) fn convert_result<T: DeserializeOwned>(input: &str) -> ClientResult<T> {
        // An API level failure can come back with HTTP 200 and a non-200 `code`.
        let api_error = serde_json::from_str::<Envelope>(input)
            .ok()
            .and_then(Envelope::into_api_error);
        if let Some(api_error) = api_error {
            if api_error.code != 200 {
                return Err(api_error.into());
            }
        }
        serde_json::from_str::<T>(input).map_err(Into::into)
    }
}
