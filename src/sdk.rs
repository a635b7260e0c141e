//! The [`RhapsodySdk`] facade: authorization plus every catalog and member
//! operation, each returning a typed [`Result`].
//!
//! ```no_run
//! use rhapcli::{RhapsodySdk, SdkConfig};
//!
//! # async fn run() -> rhapcli::Result<()> {
//! let sdk = RhapsodySdk::new(SdkConfig::new("key", "secret")).await?;
//! sdk.authorize("member@example.com", "password").await?;
//! let albums = sdk.load_genre_new_releases("g.115", Some(10)).await?;
//! # Ok(())
//! # }
//! ```

use tracing::info;

use crate::{
    config::SdkConfig,
    error::Result,
    management::{AuthorizationStore, ResponseCache, TokenManager, TransientStore},
    rhapsody::RhapsodyApi,
    types::{
        AccountData, AlbumData, ArtistData, ArtistImageSize, ArtistRef, BioData, ChartRange,
        ChartsAlbum, ChartsArtist, ChartsTrack, Credential, GenreData,
    },
    utils,
};

/// Entry point of the SDK. `Send + Sync`; share it behind an `Arc`.
pub struct RhapsodySdk {
    api: RhapsodyApi,
    tokens: TokenManager,
    cache: ResponseCache,
    image_url: String,
}

impl RhapsodySdk {
    /// Creates an SDK whose authorization lives only as long as the value.
    pub async fn new(config: SdkConfig) -> Result<Self> {
        Self::with_store(config, Box::new(TransientStore)).await
    }

    /// Creates an SDK that restores and persists its authorization through
    /// `store`.
    pub async fn with_store(
        config: SdkConfig,
        store: Box<dyn AuthorizationStore>,
    ) -> Result<Self> {
        config.validate()?;
        let api = RhapsodyApi::new(&config.api_url)?;
        let tokens =
            TokenManager::load(api.clone(), &config.api_key, &config.api_secret, store).await?;

        Ok(Self {
            api,
            tokens,
            cache: ResponseCache::new(),
            image_url: config.image_url,
        })
    }

    /// Requests pretty printed JSON and logs response bodies at debug level.
    pub fn set_verbose_logging(&self, enabled: bool) {
        self.api.set_pretty(enabled);
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub async fn authorize(&self, username: &str, password: &str) -> Result<()> {
        self.tokens.authorize(username, password).await
    }

    pub async fn refresh_token(&self) -> Result<()> {
        self.tokens.refresh().await
    }

    pub async fn clear_authorization(&self) {
        self.tokens.clear().await
    }

    pub async fn is_authorized(&self) -> bool {
        self.tokens.is_authorized().await
    }

    pub async fn credential(&self) -> Credential {
        self.tokens.credential().await
    }

    pub async fn catalog(&self) -> Option<String> {
        self.tokens.catalog().await
    }

    pub async fn load_album(&self, album_id: &str) -> Result<AlbumData> {
        info!("Loading album {}", album_id);
        let bearer = self.tokens.bearer_header().await?;
        let catalog = self.tokens.catalog().await;
        self.api.album(&bearer, catalog.as_deref(), album_id).await
    }

    pub async fn load_artist_meta(&self, artist_id: &str) -> Result<ArtistData> {
        info!("Loading artist {}", artist_id);
        let bearer = self.tokens.bearer_header().await?;
        let catalog = self.tokens.catalog().await;
        self.api.artist(&bearer, catalog.as_deref(), artist_id).await
    }

    pub async fn load_artist_bio(&self, artist_id: &str) -> Result<BioData> {
        info!("Loading bio of artist {}", artist_id);
        let bearer = self.tokens.bearer_header().await?;
        let catalog = self.tokens.catalog().await;
        self.api
            .artist_bio(&bearer, catalog.as_deref(), artist_id)
            .await
    }

    pub async fn load_genres(&self) -> Result<Vec<GenreData>> {
        info!("Loading genres");
        let bearer = self.tokens.bearer_header().await?;
        let catalog = self.tokens.catalog().await;
        self.api.genres(&bearer, catalog.as_deref()).await
    }

    /// Curated new releases, personalized when `user_id` is given.
    ///
    /// Served from the cache when present; otherwise fetched and cached. An
    /// empty `user_id` is treated as none.
    pub async fn load_album_new_releases(&self, user_id: Option<&str>) -> Result<Vec<AlbumData>> {
        let user_id = user_id.filter(|id| !id.is_empty());
        let key = utils::curated_cache_key(user_id);
        if let Some(albums) = self.cache.get(&key) {
            info!("Curated new releases served from cache");
            return Ok(albums);
        }

        info!("Loading curated new releases");
        let bearer = self.tokens.bearer_header().await?;
        let catalog = self.tokens.catalog().await;
        let result = self
            .api
            .curated_new_releases(&bearer, catalog.as_deref(), user_id)
            .await;
        self.cache.put_and_forward(&key, result)
    }

    /// New releases of a genre, cached by genre id.
    ///
    /// A cache hit ignores `limit`.
    pub async fn load_genre_new_releases(
        &self,
        genre_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<AlbumData>> {
        if let Some(albums) = self.cache.get(genre_id) {
            info!("New releases of genre {} served from cache", genre_id);
            return Ok(albums);
        }

        info!("Loading new releases of genre {}", genre_id);
        let bearer = self.tokens.bearer_header().await?;
        let catalog = self.tokens.catalog().await;
        let result = self
            .api
            .genre_new_releases(&bearer, catalog.as_deref(), genre_id, limit)
            .await;
        self.cache.put_and_forward(genre_id, result)
    }

    pub async fn load_artist_new_releases(
        &self,
        artist_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<AlbumData>> {
        info!("Loading new releases of artist {}", artist_id);
        let bearer = self.tokens.bearer_header().await?;
        let catalog = self.tokens.catalog().await;
        self.api
            .artist_new_releases(&bearer, catalog.as_deref(), artist_id, limit)
            .await
    }

    /// URL of an artist image. No request is made.
    pub fn artist_image_url(&self, artist_id: &str, size: ArtistImageSize) -> String {
        utils::artist_image_url(&self.image_url, artist_id, size)
    }

    pub async fn load_account(&self) -> Result<AccountData> {
        info!("Loading account");
        let bearer = self.tokens.bearer_header().await?;
        self.api.account(&bearer).await
    }

    pub async fn load_library_artists(&self, limit: Option<u32>) -> Result<Vec<ArtistRef>> {
        info!("Loading library artists");
        let bearer = self.tokens.bearer_header().await?;
        self.api.library_artists(&bearer, limit).await
    }

    pub async fn load_library_albums_by_artist(
        &self,
        artist_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<AlbumData>> {
        info!("Loading library albums of artist {}", artist_id);
        let bearer = self.tokens.bearer_header().await?;
        self.api
            .library_albums_by_artist(&bearer, artist_id, limit)
            .await
    }

    pub async fn load_library_albums(&self, limit: Option<u32>) -> Result<Vec<AlbumData>> {
        info!("Loading library albums");
        let bearer = self.tokens.bearer_header().await?;
        self.api.library_albums(&bearer, limit).await
    }

    pub async fn load_top_tracks(
        &self,
        limit: Option<u32>,
        range: ChartRange,
    ) -> Result<Vec<ChartsTrack>> {
        info!("Loading top tracks ({})", range.as_str());
        let bearer = self.tokens.bearer_header().await?;
        self.api.top_tracks(&bearer, limit, range).await
    }

    pub async fn load_top_artists(
        &self,
        limit: Option<u32>,
        range: ChartRange,
    ) -> Result<Vec<ChartsArtist>> {
        info!("Loading top artists ({})", range.as_str());
        let bearer = self.tokens.bearer_header().await?;
        self.api.top_artists(&bearer, limit, range).await
    }

    pub async fn load_top_albums(
        &self,
        limit: Option<u32>,
        range: ChartRange,
    ) -> Result<Vec<ChartsAlbum>> {
        info!("Loading top albums ({})", range.as_str());
        let bearer = self.tokens.bearer_header().await?;
        self.api.top_albums(&bearer, limit, range).await
    }

    pub async fn add_album_to_library(&self, album_id: &str) -> Result<()> {
        info!("Adding album {} to library", album_id);
        let bearer = self.tokens.bearer_header().await?;
        let catalog = self.tokens.catalog().await;
        self.api
            .add_album_to_library(&bearer, catalog.as_deref(), album_id)
            .await
    }

    pub async fn remove_album_from_library(&self, album_id: &str) -> Result<()> {
        info!("Removing album {} from library", album_id);
        let bearer = self.tokens.bearer_header().await?;
        self.api.remove_album_from_library(&bearer, album_id).await
    }
}
