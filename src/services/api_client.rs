use crate::models::context_dto::RequestContext;
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Thin JSON client for the app API. Identity travels in the
/// [`RequestContext`] given to each call, never in client defaults.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the body as JSON. The status code is not
    /// inspected, only whether the body decodes.
    pub async fn get_json<T>(&self, path: &str, ctx: &RequestContext) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = ctx
            .apply(self.http.get(&url))
            .send()
            .await
            .map_err(ApiError::Request)?;

        debug!("{} -> {}", url, response.status());
        response.json::<T>().await.map_err(ApiError::Decode)
    }
}
