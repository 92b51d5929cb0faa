use crate::domain::model::{CreatedPlaylist, TrackHit};
use crate::domain::ports::{CatalogClient, CatalogResult, ConfigProvider, MAX_TRACKS_PER_REQUEST};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

#[derive(Debug, Deserialize)]
struct UserProfile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistResponse {
    id: String,
    external_urls: ExternalUrls,
}

#[derive(Debug, Default, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<TrackHit>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    tracks: TrackPage,
}

/// Spotify Web API client.
#[derive(Debug, Clone)]
pub struct SpotifyCatalog {
    client: Client,
    base_url: String,
}

impl SpotifyCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tubelist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CatalogError::from)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            Duration::from_secs(config.request_timeout_seconds()),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(operation: &'static str, response: Response) -> CatalogResult<Response> {
        let status = response.status();
        tracing::debug!("{} -> HTTP {}", operation, status);
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CatalogError::Status {
            operation,
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl CatalogClient for SpotifyCatalog {
    async fn current_user_id(&self, token: &str) -> CatalogResult<String> {
        let response = self
            .client
            .get(self.url("/me"))
            .bearer_auth(token)
            .send()
            .await?;
        let profile: UserProfile = Self::check("get user profile", response)
            .await?
            .json()
            .await?;
        Ok(profile.id)
    }

    async fn create_playlist(
        &self,
        token: &str,
        owner_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> CatalogResult<CreatedPlaylist> {
        let response = self
            .client
            .post(self.url(&format!("/users/{}/playlists", owner_id)))
            .bearer_auth(token)
            .json(&json!({
                "name": name,
                "description": description,
                "public": public,
            }))
            .send()
            .await?;
        let playlist: PlaylistResponse = Self::check("create playlist", response)
            .await?
            .json()
            .await?;
        Ok(CreatedPlaylist {
            id: playlist.id,
            url: playlist.external_urls.spotify,
        })
    }

    async fn search(&self, token: &str, query: &str, limit: u32) -> CatalogResult<Vec<TrackHit>> {
        let limit = limit.to_string();
        let response = self
            .client
            .get(self.url("/search"))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await?;
        let page: SearchResponse = Self::check("search", response).await?.json().await?;
        Ok(page.tracks.items)
    }

    async fn append_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> CatalogResult<()> {
        if uris.len() > MAX_TRACKS_PER_REQUEST {
            return Err(CatalogError::BatchTooLarge {
                len: uris.len(),
                limit: MAX_TRACKS_PER_REQUEST,
            });
        }
        let response = self
            .client
            .post(self.url(&format!("/playlists/{}/tracks", playlist_id)))
            .bearer_auth(token)
            .json(&json!({ "uris": uris }))
            .send()
            .await?;
        Self::check("append tracks", response).await?;
        Ok(())
    }
}
