use crate::errors::{ClipResult, SourceError};
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com";

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
}

/// Finds the currently most popular video of a region via the YouTube Data API
pub struct TrendingLookup {
    client: Client,
    api_base: String,
    api_key: String,
    region: String,
}

impl TrendingLookup {
    pub fn new(api_key: impl Into<String>, region: impl Into<String>) -> ClipResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| SourceError::new(e.to_string()))?;

        Ok(Self {
            client,
            api_base: YOUTUBE_API_BASE.to_string(),
            api_key: api_key.into(),
            region: region.into(),
        })
    }

    /// Point the lookup at another API host
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Id of the most popular video
    pub async fn most_popular_id(&self) -> ClipResult<String> {
        let url = format!("{}/youtube/v3/videos", self.api_base);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("chart", "mostPopular"),
                ("maxResults", "1"),
                ("regionCode", self.region.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::new(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::new(e.to_string()))?;

        if !status.is_success() {
            debug!("Trending lookup body: {}", body);
            return Err(SourceError::new(format!(
                "trending lookup failed with HTTP {} (check API key and quota)",
                status
            ))
            .into());
        }

        let list: VideoListResponse = serde_json::from_str(&body)
            .map_err(|e| SourceError::new(format!("unexpected trending response: {}", e)))?;

        let id = list
            .items
            .into_iter()
            .next()
            .map(|item| item.id)
            .ok_or_else(|| {
                SourceError::new("no trending video returned (check API key and quota)")
            })?;

        info!("Most popular video in {}: {}", self.region, id);
        Ok(id)
    }

    /// Watch URL of the most popular video
    pub async fn most_popular_url(&self) -> ClipResult<String> {
        let id = self.most_popular_id().await?;
        Ok(watch_url(&id))
    }
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
