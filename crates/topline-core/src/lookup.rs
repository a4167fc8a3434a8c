use std::collections::HashSet;
use std::env;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::domain::{ArticleSet, NewsItem, NewsPayload};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{LookupError, SourceId, ValidationError};

/// Articles endpoint queried when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v1/articles";

/// Value of the `sortBy` parameter sent with every request.
pub const SORT_BY: &str = "top";

/// Primary environment variable holding the news API key.
pub const API_KEY_ENV: &str = "TOPLINE_NEWSAPI_KEY";

/// Fallback environment variable holding the news API key.
pub const API_KEY_FALLBACK_ENV: &str = "NEWSAPI_KEY";

/// Outcome of a lookup together with the sources it touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupReport {
    pub item: Option<NewsItem>,
    pub selected_source: Option<SourceId>,
    /// Sources queried, in the order they were queried.
    pub source_chain: Vec<SourceId>,
    pub latency_ms: u64,
}

/// Latest-news lookup over an ordered list of sources.
///
/// Sources are queried one at a time in configured order. The first source
/// whose articles mention the topic wins; a transport or decode failure on
/// any source aborts the lookup without trying the rest.
pub struct NewsLookup {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    sources: Vec<SourceId>,
    api_key: String,
    timeout_ms: u64,
}

impl NewsLookup {
    pub fn builder() -> NewsLookupBuilder {
        NewsLookupBuilder::new()
    }

    pub fn sources(&self) -> &[SourceId] {
        &self.sources
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the lead article of the first source mentioning `topic`, or
    /// `None` once every source has been queried without a match.
    pub async fn latest_news_item(&self, topic: &str) -> Result<Option<NewsItem>, LookupError> {
        Ok(self.lookup(topic).await?.item)
    }

    #[instrument(level = "info", skip(self), fields(sources = self.sources.len()))]
    pub async fn lookup(&self, topic: &str) -> Result<LookupReport, LookupError> {
        let started = Instant::now();
        let mut source_chain = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            source_chain.push(source.clone());
            let articles = self.fetch_articles(source).await?;

            if let Some(item) = articles.select(topic) {
                let latency_ms = elapsed_ms(started);
                info!(source = %source, attempts = source_chain.len(), latency_ms, "topic matched");
                return Ok(LookupReport {
                    item: Some(item),
                    selected_source: Some(source.clone()),
                    source_chain,
                    latency_ms,
                });
            }

            debug!(source = %source, articles = articles.len(), "no title mentions topic");
        }

        let latency_ms = elapsed_ms(started);
        info!(attempts = source_chain.len(), latency_ms, "no source matched topic");
        Ok(LookupReport {
            item: None,
            selected_source: None,
            source_chain,
            latency_ms,
        })
    }

    async fn fetch_articles(&self, source: &SourceId) -> Result<ArticleSet, LookupError> {
        debug!(source = %source, url = %self.base_url, "querying source");
        let response = self.http_client.execute(self.request_for(source)).await?;

        // The body is decoded whatever the status says.
        if !response.is_success() {
            warn!(source = %source, status = response.status, "upstream returned non-success status");
        }

        NewsPayload::from_json(&response.body)
            .map(|payload| payload.articles)
            .map_err(|error| LookupError::Decode {
                source_id: source.clone(),
                source: error,
            })
    }

    fn request_for(&self, source: &SourceId) -> HttpRequest {
        HttpRequest::get(&self.base_url)
            .with_query("source", source.as_str())
            .with_query("sortBy", SORT_BY)
            .with_query("apiKey", &self.api_key)
            .with_timeout_ms(self.timeout_ms)
    }
}

impl Debug for NewsLookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsLookup")
            .field("base_url", &self.base_url)
            .field("sources", &self.sources)
            .field("api_key", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

/// Builder for [`NewsLookup`].
///
/// # Environment Variables
///
/// | Setting | Primary Env Var | Fallback Env Var |
/// |---------|-----------------|------------------|
/// | API key | `TOPLINE_NEWSAPI_KEY` | `NEWSAPI_KEY` |
///
/// # Example
///
/// ```rust,ignore
/// use topline_core::NewsLookup;
///
/// let lookup = NewsLookup::builder()
///     .with_env_credentials()
///     .build()?;
/// let item = lookup.latest_news_item("election").await?;
/// ```
#[derive(Default)]
pub struct NewsLookupBuilder {
    sources: Option<Vec<SourceId>>,
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_ms: Option<u64>,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl NewsLookupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the API key from the environment. An explicit key set earlier
    /// is kept when neither variable is present.
    pub fn with_env_credentials(mut self) -> Self {
        let from_env = env::var(API_KEY_ENV)
            .or_else(|_| env::var(API_KEY_FALLBACK_ENV))
            .ok();
        if from_env.is_some() {
            self.api_key = from_env;
        }
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replace the default source list. Order is fallback priority; each
    /// source may appear once.
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = SourceId>) -> Self {
        self.sources = Some(sources.into_iter().collect());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(self) -> Result<NewsLookup, ValidationError> {
        let sources = self.sources.unwrap_or_else(SourceId::defaults);
        if sources.is_empty() {
            return Err(ValidationError::EmptySourceList);
        }
        reject_duplicates(&sources)?;

        let api_key = self
            .api_key
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty())
            .ok_or(ValidationError::MissingApiKey)?;

        Ok(NewsLookup {
            http_client: self
                .http_client
                .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new())),
            base_url: self
                .base_url
                .unwrap_or_else(|| String::from(DEFAULT_BASE_URL)),
            sources,
            api_key,
            timeout_ms: self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
        })
    }
}

fn reject_duplicates(sources: &[SourceId]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(sources.len());
    match sources.iter().find(|source| !seen.insert(*source)) {
        Some(duplicate) => Err(ValidationError::DuplicateSource {
            value: duplicate.to_string(),
        }),
        None => Ok(()),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpResponse};
    use std::collections::VecDeque;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    struct ScriptedHttpClient {
        responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedHttpClient {
        fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for ScriptedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.requests
                .lock()
                .expect("request store should not be poisoned")
                .push(request);
            let response = self
                .responses
                .lock()
                .expect("response script should not be poisoned")
                .pop_front()
                .unwrap_or_else(|| Err(HttpError::new("no scripted response left")));
            Box::pin(async move { response })
        }
    }

    fn articles_body(titles: &[&str]) -> String {
        let articles = titles
            .iter()
            .map(|title| {
                serde_json::json!({
                    "title": title,
                    "description": "Text",
                    "publishedAt": "2017-06-02T14:52:59+00:00",
                })
            })
            .collect::<Vec<_>>();
        serde_json::json!({ "status": "ok", "articles": articles }).to_string()
    }

    fn lookup_with(client: Arc<ScriptedHttpClient>) -> NewsLookup {
        NewsLookup::builder()
            .with_api_key("test-key")
            .with_base_url("https://news.test/v1/articles")
            .with_http_client(client)
            .build()
            .expect("valid lookup configuration")
    }

    fn source(id: &str) -> SourceId {
        SourceId::parse(id).expect("valid source")
    }

    #[tokio::test]
    async fn every_request_is_exactly_source_sort_and_key() {
        let client = Arc::new(ScriptedHttpClient::new(vec![
            Ok(HttpResponse::ok_json(articles_body(&["Weather"]))),
            Ok(HttpResponse::ok_json(articles_body(&["Sport"]))),
        ]));
        let lookup = lookup_with(client.clone());

        let item = lookup
            .latest_news_item("election")
            .await
            .expect("lookup should succeed");
        assert_eq!(item, None);

        let expected = ["bbc-news", "the-telegraph"]
            .into_iter()
            .map(|id| {
                HttpRequest::get("https://news.test/v1/articles")
                    .with_query("source", id)
                    .with_query("sortBy", "top")
                    .with_query("apiKey", "test-key")
            })
            .collect::<Vec<_>>();
        assert_eq!(client.recorded_requests(), expected);
    }

    #[tokio::test]
    async fn non_success_status_body_is_still_decoded() {
        let client = Arc::new(ScriptedHttpClient::new(vec![Ok(HttpResponse::new(
            503,
            articles_body(&["Title manchester"]),
        ))]));
        let lookup = lookup_with(client.clone());

        let report = lookup
            .lookup("manchester")
            .await
            .expect("lookup should succeed");

        assert_eq!(report.selected_source, Some(source("bbc-news")));
        assert_eq!(client.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn malformed_payload_aborts_without_trying_next_source() {
        let client = Arc::new(ScriptedHttpClient::new(vec![
            Ok(HttpResponse::new(401, r#"{"status":"error","code":"apiKeyInvalid"}"#)),
            Ok(HttpResponse::ok_json(articles_body(&["Title election"]))),
        ]));
        let lookup = lookup_with(client.clone());

        let error = lookup
            .latest_news_item("election")
            .await
            .expect_err("must fail");

        assert!(error.is_decode());
        assert!(error.to_string().contains("bbc-news"));
        assert_eq!(client.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn report_lists_chain_up_to_selected_source() {
        let client = Arc::new(ScriptedHttpClient::new(vec![
            Ok(HttpResponse::ok_json(articles_body(&[]))),
            Ok(HttpResponse::ok_json(articles_body(&["Title election"]))),
        ]));
        let lookup = lookup_with(client);

        let report = lookup
            .lookup("election")
            .await
            .expect("lookup should succeed");

        assert_eq!(
            report.source_chain,
            vec![source("bbc-news"), source("the-telegraph")]
        );
        assert_eq!(report.selected_source, Some(source("the-telegraph")));
        assert_eq!(report.item.map(|item| item.title).as_deref(), Some("Title election"));
    }

    #[tokio::test]
    async fn custom_timeout_is_applied_to_requests() {
        let client = Arc::new(ScriptedHttpClient::new(vec![Ok(HttpResponse::ok_json(
            articles_body(&["Anything"]),
        ))]));
        let lookup = NewsLookup::builder()
            .with_api_key("k")
            .with_timeout_ms(750)
            .with_http_client(client.clone())
            .build()
            .expect("valid lookup configuration");

        lookup
            .latest_news_item("")
            .await
            .expect("lookup should succeed");

        let requests = client.recorded_requests();
        assert_eq!(requests[0].timeout_ms, 750);
        assert_eq!(requests[0].url, DEFAULT_BASE_URL);
    }

    #[test]
    fn builder_rejects_missing_or_blank_api_key() {
        let missing = NewsLookup::builder().build().expect_err("no key configured");
        assert_eq!(missing, ValidationError::MissingApiKey);

        let blank = NewsLookup::builder()
            .with_api_key("   ")
            .build()
            .expect_err("blank key");
        assert_eq!(blank, ValidationError::MissingApiKey);
    }

    #[test]
    fn builder_rejects_empty_source_list() {
        let error = NewsLookup::builder()
            .with_api_key("k")
            .with_sources(Vec::new())
            .build()
            .expect_err("empty sources");

        assert_eq!(error, ValidationError::EmptySourceList);
    }

    #[test]
    fn builder_rejects_repeated_source() {
        let error = NewsLookup::builder()
            .with_api_key("k")
            .with_sources([source("the-telegraph"), source("bbc-news"), source("the-telegraph")])
            .build()
            .expect_err("repeated source");

        assert_eq!(
            error,
            ValidationError::DuplicateSource {
                value: String::from("the-telegraph")
            }
        );
    }

    #[test]
    fn builder_keeps_configured_order() {
        let lookup = NewsLookup::builder()
            .with_api_key("k")
            .with_sources([source("the-telegraph"), source("bbc-news")])
            .build()
            .expect("valid lookup configuration");

        assert_eq!(lookup.sources(), [source("the-telegraph"), source("bbc-news")]);
    }

    #[test]
    fn debug_output_never_contains_api_key() {
        let lookup = NewsLookup::builder()
            .with_api_key("super-secret")
            .build()
            .expect("valid lookup configuration");

        let rendered = format!("{lookup:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
