use crate::config::Config;
use crate::core::{FetchError, LinkMetadata, NO_DESCRIPTION, UNTITLED};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self, url: &str) -> Result<LinkMetadata, FetchError>;
}

/// Raw body of the extraction service. Every field may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl ExtractResponse {
    pub fn into_metadata(self) -> LinkMetadata {
        LinkMetadata {
            title: non_empty(self.title).unwrap_or_else(|| UNTITLED.to_string()),
            description: non_empty(self.description)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            image: self
                .images
                .and_then(|images| images.into_iter().next())
                .and_then(|image| non_empty(Some(image))),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Client for a jsonlink-style `GET <endpoint>?url=<encoded>` extraction API.
pub struct JsonLinkFetcher {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl JsonLinkFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(FetchError::Request)?;

        Ok(Self::with_client(client, config))
    }

    /// Uses a caller-built client; endpoint and key still come from `config`.
    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn request_url(&self, url: &str) -> String {
        build_request_url(&self.endpoint, url, self.api_key.as_deref())
    }
}

pub fn build_request_url(endpoint: &str, url: &str, api_key: Option<&str>) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    let mut request = format!("{}{}url={}", endpoint, separator, urlencoding::encode(url));
    if let Some(key) = api_key {
        request.push_str("&api_key=");
        request.push_str(&urlencoding::encode(key));
    }
    request
}

#[async_trait]
impl MetadataFetcher for JsonLinkFetcher {
    fn name(&self) -> &'static str {
        "jsonlink"
    }

    async fn fetch(&self, url: &str) -> Result<LinkMetadata, FetchError> {
        let request_url = self.request_url(url);
        tracing::debug!("Fetching metadata for {}", url);

        let response = self
            .client
            .get(&request_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FetchError::Request)?;
        let parsed: ExtractResponse =
            serde_json::from_slice(&body).map_err(FetchError::Decode)?;

        Ok(parsed.into_metadata())
    }
}
