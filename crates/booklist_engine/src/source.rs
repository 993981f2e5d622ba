use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use serde::Deserialize;

use crate::{LoadError, RemoteBook};

/// Latency the fixture source simulates before resolving.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(2000);

#[async_trait::async_trait]
pub trait BookSource: Send + Sync {
    async fn fetch_books(&self) -> Result<Vec<RemoteBook>, LoadError>;
}

/// The two-book list the app ships with.
pub fn fixture_books() -> Vec<RemoteBook> {
    vec![
        RemoteBook {
            id: 0,
            title: "React".to_string(),
            author: "Jordan Walke".to_string(),
            url: "https://reactjs.org/".to_string(),
            num_comments: 3,
            points: 4,
        },
        RemoteBook {
            id: 1,
            title: "Redux".to_string(),
            author: "Dan Abramov, Andrew Clark".to_string(),
            url: "https://redux.js.org/".to_string(),
            num_comments: 2,
            points: 5,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixtureOutcome {
    #[default]
    Succeed,
    Fail,
}

/// Resolves with [`fixture_books`] after a fixed delay, or rejects when told to.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    delay: Duration,
    outcome: FixtureOutcome,
}

impl FixtureSource {
    pub fn new(delay: Duration, outcome: FixtureOutcome) -> Self {
        Self { delay, outcome }
    }
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_DELAY, FixtureOutcome::Succeed)
    }
}

#[async_trait::async_trait]
impl BookSource for FixtureSource {
    async fn fetch_books(&self) -> Result<Vec<RemoteBook>, LoadError> {
        tokio::time::sleep(self.delay).await;
        match self.outcome {
            FixtureOutcome::Succeed => Ok(fixture_books()),
            FixtureOutcome::Fail => Err(LoadError::Simulated),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://hn.algolia.com/api/v1/search?query=React".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: Vec<RemoteBook>,
}

/// Fetches books from a JSON endpoint shaped like `{ "hits": [...] }`.
#[derive(Debug, Clone)]
pub struct HttpBookSource {
    settings: SourceSettings,
}

impl HttpBookSource {
    pub fn new(settings: SourceSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, LoadError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| LoadError::Network(err.to_string()))
    }

    fn too_large(&self, actual: u64) -> LoadError {
        LoadError::TooLarge {
            max_bytes: self.settings.max_bytes,
            actual: Some(actual),
        }
    }
}

#[async_trait::async_trait]
impl BookSource for HttpBookSource {
    async fn fetch_books(&self) -> Result<Vec<RemoteBook>, LoadError> {
        let parsed = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| LoadError::InvalidUrl(err.to_string()))?;
        let client = self.build_client()?;

        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus(status.as_u16()));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            body.extend_from_slice(&chunk);
        }
        engine_debug!("Fetched {} bytes from {}", body.len(), self.settings.endpoint);

        let decoded: SearchResponse =
            serde_json::from_slice(&body).map_err(|err| LoadError::Decode(err.to_string()))?;
        Ok(decoded.hits)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> LoadError {
    if err.is_timeout() {
        return LoadError::Timeout;
    }
    LoadError::Network(err.to_string())
}
