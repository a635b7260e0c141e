//! Catalog metadata endpoints: albums, artists and genres.
//!
//! All of them are scoped by the member's `catalog` (two-letter country code,
//! case-sensitive); it is omitted when unknown.

use super::RhapsodyApi;
use crate::{
    error::Result,
    types::{AlbumData, ArtistData, BioData, GenreData},
};

impl RhapsodyApi {
    /// `GET /v1/albums/{albumId}`, including the album's tracks.
    pub async fn album(
        &self,
        bearer: &str,
        catalog: Option<&str>,
        album_id: &str,
    ) -> Result<AlbumData> {
        let query = self.query().opt("catalog", catalog);
        self.get(&["v1", "albums", album_id], bearer, query).await
    }

    /// `GET /v1/albums/new`, curated by Rhapsody.
    ///
    /// Passing the member's `user_id` (the account id) personalizes the list
    /// based on recent listening history.
    pub async fn curated_new_releases(
        &self,
        bearer: &str,
        catalog: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<Vec<AlbumData>> {
        let query = self.query().opt("catalog", catalog).opt("guid", user_id);
        self.get(&["v1", "albums", "new"], bearer, query).await
    }

    /// `GET /v1/artists/{artistId}`: name, id and primary genre.
    pub async fn artist(
        &self,
        bearer: &str,
        catalog: Option<&str>,
        artist_id: &str,
    ) -> Result<ArtistData> {
        let query = self.query().opt("catalog", catalog);
        self.get(&["v1", "artists", artist_id], bearer, query).await
    }

    /// `GET /v1/artists/{artistId}/bio`.
    pub async fn artist_bio(
        &self,
        bearer: &str,
        catalog: Option<&str>,
        artist_id: &str,
    ) -> Result<BioData> {
        let query = self.query().opt("catalog", catalog);
        self.get(&["v1", "artists", artist_id, "bio"], bearer, query)
            .await
    }

    /// `GET /v1/artists/{artistId}/albums/new`, updated weekly.
    pub async fn artist_new_releases(
        &self,
        bearer: &str,
        catalog: Option<&str>,
        artist_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<AlbumData>> {
        let query = self.query().opt("catalog", catalog).opt("limit", limit);
        self.get(&["v1", "artists", artist_id, "albums", "new"], bearer, query)
            .await
    }

    /// `GET /v1/genres`: the genre hierarchy.
    pub async fn genres(&self, bearer: &str, catalog: Option<&str>) -> Result<Vec<GenreData>> {
        let query = self.query().opt("catalog", catalog);
        self.get(&["v1", "genres"], bearer, query).await
    }

    /// `GET /v1/genres/{genreId}/albums/new`.
    pub async fn genre_new_releases(
        &self,
        bearer: &str,
        catalog: Option<&str>,
        genre_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<AlbumData>> {
        let query = self.query().opt("catalog", catalog).opt("limit", limit);
        self.get(&["v1", "genres", genre_id, "albums", "new"], bearer, query)
            .await
    }
}
