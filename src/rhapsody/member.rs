//! Member endpoints under `/v1/me`: account, library and charts.

use serde::de::DeserializeOwned;

use super::RhapsodyApi;
use crate::{
    error::Result,
    types::{
        AccountData, AlbumData, ArtistRef, ChartRange, ChartsAlbum, ChartsArtist, ChartsTrack,
    },
};

impl RhapsodyApi {
    /// `GET /v1/me/account`.
    pub async fn account(&self, bearer: &str) -> Result<AccountData> {
        self.get(&["v1", "me", "account"], bearer, self.query())
            .await
    }

    /// `GET /v1/me/library/artists`.
    pub async fn library_artists(
        &self,
        bearer: &str,
        limit: Option<u32>,
    ) -> Result<Vec<ArtistRef>> {
        let query = self.query().opt("limit", limit);
        self.get(&["v1", "me", "library", "artists"], bearer, query)
            .await
    }

    /// `GET /v1/me/library/artists/{artistId}/albums`.
    pub async fn library_albums_by_artist(
        &self,
        bearer: &str,
        artist_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<AlbumData>> {
        let query = self.query().opt("limit", limit);
        self.get(
            &["v1", "me", "library", "artists", artist_id, "albums"],
            bearer,
            query,
        )
        .await
    }

    /// `GET /v1/me/library/albums`.
    pub async fn library_albums(
        &self,
        bearer: &str,
        limit: Option<u32>,
    ) -> Result<Vec<AlbumData>> {
        let query = self.query().opt("limit", limit);
        self.get(&["v1", "me", "library", "albums"], bearer, query)
            .await
    }

    /// `POST /v1/me/library/albums` (form encoded).
    pub async fn add_album_to_library(
        &self,
        bearer: &str,
        catalog: Option<&str>,
        album_id: &str,
    ) -> Result<()> {
        let mut form = Vec::with_capacity(2);
        if let Some(catalog) = catalog {
            form.push(("catalog", catalog));
        }
        form.push(("id", album_id));

        self.post_form(&["v1", "me", "library", "albums"], bearer, &form)
            .await
    }

    /// `DELETE /v1/me/library/albums/{albumId}`.
    pub async fn remove_album_from_library(&self, bearer: &str, album_id: &str) -> Result<()> {
        self.delete(&["v1", "me", "library", "albums", album_id], bearer)
            .await
    }

    /// `GET /v1/me/charts/tracks`, ordered by play count.
    pub async fn top_tracks(
        &self,
        bearer: &str,
        limit: Option<u32>,
        range: ChartRange,
    ) -> Result<Vec<ChartsTrack>> {
        self.chart("tracks", bearer, limit, range).await
    }

    /// `GET /v1/me/charts/artists`, ordered by play count.
    pub async fn top_artists(
        &self,
        bearer: &str,
        limit: Option<u32>,
        range: ChartRange,
    ) -> Result<Vec<ChartsArtist>> {
        self.chart("artists", bearer, limit, range).await
    }

    /// `GET /v1/me/charts/albums`, ordered by play count.
    pub async fn top_albums(
        &self,
        bearer: &str,
        limit: Option<u32>,
        range: ChartRange,
    ) -> Result<Vec<ChartsAlbum>> {
        self.chart("albums", bearer, limit, range).await
    }

    async fn chart<T: DeserializeOwned>(
        &self,
        kind: &str,
        bearer: &str,
        limit: Option<u32>,
        range: ChartRange,
    ) -> Result<Vec<T>> {
        let query = self
            .query()
            .opt("limit", limit)
            .opt("range", Some(range.as_str()));
        self.get(&["v1", "me", "charts", kind], bearer, query).await
    }
}
