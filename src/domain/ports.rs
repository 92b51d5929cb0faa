use crate::domain::model::{CreatedPlaylist, Credential, TrackHit};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;

/// Largest number of track URIs the catalog accepts in one append call.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Music catalog operations a playlist build needs. Every call carries the bearer token.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn current_user_id(&self, token: &str) -> CatalogResult<String>;

    async fn create_playlist(
        &self,
        token: &str,
        owner_id: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> CatalogResult<CreatedPlaylist>;

    async fn search(&self, token: &str, query: &str, limit: u32) -> CatalogResult<Vec<TrackHit>>;

    /// `uris.len()` must not exceed [`MAX_TRACKS_PER_REQUEST`].
    async fn append_tracks(&self, token: &str, playlist_id: &str, uris: &[String])
        -> CatalogResult<()>;
}

/// Track search with the credential already bound.
#[async_trait]
pub trait SearchCapability: Send + Sync {
    async fn search(&self, query: &str, limit: u32) -> CatalogResult<Vec<TrackHit>>;
}

pub trait CredentialStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Option<Credential>>> + Send;
    fn save(&self, credential: &Credential)
        -> impl std::future::Future<Output = Result<()>> + Send;
    fn clear(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn accounts_base_url(&self) -> &str;
    fn client_id(&self) -> Option<&str>;
    fn redirect_uri(&self) -> &str;
    fn token_path(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
    fn default_playlist_name(&self) -> &str;
    fn playlist_description(&self) -> &str;
}
