use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// Authorization data of a logged in user.
///
/// All fields are `None` while logged out. `catalog` is only ever set by a
/// full password authorization; token refreshes leave it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub catalog: Option<String>,
}

impl Credential {
    /// Builds the credential returned by a successful password grant.
    pub fn from_grant(token: AccessToken) -> Self {
        Self {
            access_token: Some(token.access_token),
            refresh_token: token.refresh_token,
            catalog: token.catalog,
        }
    }

    /// Applies a refresh grant response.
    ///
    /// The refresh endpoint never returns a catalog, so it is kept. A
    /// response without a refresh token keeps the previous one.
    pub fn apply_refresh(&mut self, token: AccessToken) {
        self.access_token = Some(token.access_token);
        if token.refresh_token.is_some() {
            self.refresh_token = token.refresh_token;
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Response of the token endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Not contained in the refresh response.
    #[serde(default)]
    pub catalog: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Body of the username/password authorization request.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordGrant {
    pub username: String,
    pub password: String,
    pub grant_type: &'static str,
}

impl PasswordGrant {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            grant_type: "password",
        }
    }
}

/// Body of the token refresh request.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshGrant {
    pub client_id: String,
    pub client_secret: String,
    pub response_type: &'static str,
    pub grant_type: &'static str,
    pub refresh_token: Option<String>,
}

impl RefreshGrant {
    pub fn new(client_id: &str, client_secret: &str, refresh_token: Option<String>) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            response_type: "code",
            grant_type: "refresh_token",
            refresh_token,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlbumData {
    pub id: String,
    pub name: String,
    pub disc_count: Option<u32>,
    pub artist: Option<ArtistRef>,
    #[serde(rename = "type")]
    pub album_type: Option<AlbumType>,
    pub tags: Vec<String>,
    pub images: Vec<Image>,
    pub tracks: Vec<Track>,
    /// Release timestamp in milliseconds since the epoch.
    pub released: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumType {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub disc: Option<u32>,
    pub artist: Option<ArtistRef>,
    pub album: Option<AlbumRef>,
    pub genre: Option<GenreRef>,
    pub sample: Option<String>,
    /// Duration in seconds.
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenreRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistData {
    pub id: String,
    pub name: String,
    pub genre: Option<GenreRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BioData {
    pub bio: Option<String>,
    pub blurbs: Vec<String>,
}

/// A genre with its (recursively nested) subgenres.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenreData {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub subgenres: Vec<GenreData>,
}

/// The member account. Only the fields the SDK's users commonly need are
/// mapped, anything else in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountData {
    pub id: String,
    pub email: Option<String>,
    pub logon: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub locale: Option<String>,
    pub country: Option<String>,
    pub catalog: Option<String>,
    pub is_public: Option<bool>,
    pub is_suspended: Option<bool>,
    pub is_trial: Option<bool>,
    pub tier_code: Option<String>,
    pub tier_name: Option<String>,
    pub product_name: Option<String>,
    pub state: Option<String>,
    pub can_stream_on_web: Option<bool>,
    pub can_stream_on_mobile: Option<bool>,
    #[serde(rename = "canStreamOnPC")]
    pub can_stream_on_pc: Option<bool>,
    pub max_stream_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartsTrack {
    pub id: String,
    pub play_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartsArtist {
    pub id: String,
    pub play_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartsAlbum {
    pub id: String,
    pub play_count: Option<u64>,
}

/// The period a member chart is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartRange {
    Week,
    Month,
    Year,
    #[default]
    Life,
}

impl ChartRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartRange::Week => "week",
            ChartRange::Month => "month",
            ChartRange::Year => "year",
            ChartRange::Life => "life",
        }
    }
}

/// Valid sizes for artist images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArtistImageSize {
    #[value(name = "70x47")]
    Size70x47,
    #[value(name = "150x100")]
    Size150x100,
    #[value(name = "356x237")]
    Size356x237,
    #[value(name = "633x422")]
    Size633x422,
}

impl ArtistImageSize {
    pub const ALL: [ArtistImageSize; 4] = [
        ArtistImageSize::Size70x47,
        ArtistImageSize::Size150x100,
        ArtistImageSize::Size356x237,
        ArtistImageSize::Size633x422,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtistImageSize::Size70x47 => "70x47",
            ArtistImageSize::Size150x100 => "150x100",
            ArtistImageSize::Size356x237 => "356x237",
            ArtistImageSize::Size633x422 => "633x422",
        }
    }
}

impl std::fmt::Display for ArtistImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub id: String,
    pub released: String,
    pub name: String,
    pub artist: String,
}

impl From<&AlbumData> for AlbumTableRow {
    fn from(album: &AlbumData) -> Self {
        Self {
            id: album.id.clone(),
            released: utils::format_release_date(album.released),
            name: album.name.clone(),
            artist: album
                .artist
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub disc: String,
    pub name: String,
    pub duration: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        Self {
            disc: track.disc.map(|d| d.to_string()).unwrap_or_default(),
            name: track.name.clone(),
            duration: utils::format_duration(track.duration),
        }
    }
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub id: String,
    pub name: String,
}

#[derive(Tabled)]
pub struct GenreTableRow {
    pub id: String,
    pub name: String,
    pub subgenres: String,
}

#[derive(Tabled)]
pub struct ChartTableRow {
    pub rank: usize,
    pub id: String,
    pub plays: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(access: &str, refresh: Option<&str>, catalog: Option<&str>) -> AccessToken {
        AccessToken {
            access_token: access.to_string(),
            refresh_token: refresh.map(String::from),
            catalog: catalog.map(String::from),
            expires_in: Some(86399),
        }
    }

    #[test]
    fn grant_replaces_credential_wholesale() {
        let credential = Credential::from_grant(token("a1", Some("r1"), Some("DE")));
        assert_eq!(credential.access_token.as_deref(), Some("a1"));
        assert_eq!(credential.refresh_token.as_deref(), Some("r1"));
        assert_eq!(credential.catalog.as_deref(), Some("DE"));
        assert!(credential.is_authorized());
    }

    #[test]
    fn refresh_keeps_catalog() {
        let mut credential = Credential::from_grant(token("a1", Some("r1"), Some("US")));
        credential.apply_refresh(token("a2", Some("r2"), None));
        assert_eq!(credential.access_token.as_deref(), Some("a2"));
        assert_eq!(credential.refresh_token.as_deref(), Some("r2"));
        assert_eq!(credential.catalog.as_deref(), Some("US"));
    }

    #[test]
    fn refresh_without_refresh_token_keeps_previous_one() {
        let mut credential = Credential::from_grant(token("a1", Some("r1"), Some("US")));
        credential.apply_refresh(token("a2", None, None));
        assert_eq!(credential.refresh_token.as_deref(), Some("r1"));
    }

    #[test]
    fn default_credential_is_logged_out() {
        assert!(!Credential::default().is_authorized());
    }

    #[test]
    fn grant_bodies_serialize_with_wire_names() {
        let body = serde_json::to_value(PasswordGrant::new("user", "secret")).unwrap();
        assert_eq!(body["grant_type"], "password");
        assert_eq!(body["username"], "user");

        let body = serde_json::to_value(RefreshGrant::new("key", "sec", None)).unwrap();
        assert_eq!(body["client_id"], "key");
        assert_eq!(body["client_secret"], "sec");
        assert_eq!(body["response_type"], "code");
        assert_eq!(body["grant_type"], "refresh_token");
        assert!(body["refresh_token"].is_null());
    }

    #[test]
    fn album_payload_decodes_camel_case_fields() {
        let json = r#"{
            "id": "Alb.1",
            "name": "Blue Train",
            "discCount": 1,
            "artist": {"id": "Art.1", "name": "John Coltrane"},
            "type": {"id": 0, "name": "Main Release"},
            "released": 1356998400000,
            "tracks": [{"id": "Tra.1", "name": "Moment's Notice", "disc": 1, "duration": 550}]
        }"#;
        let album: AlbumData = serde_json::from_str(json).unwrap();
        assert_eq!(album.disc_count, Some(1));
        assert_eq!(album.artist.unwrap().name, "John Coltrane");
        assert_eq!(album.album_type.unwrap().name.as_deref(), Some("Main Release"));
        assert_eq!(album.tracks.len(), 1);
        assert!(album.images.is_empty());
    }

    #[test]
    fn account_maps_odd_field_names() {
        let json = r#"{"id":"M.1","firstName":"Ada","canStreamOnPC":true,"isTrial":false}"#;
        let account: AccountData = serde_json::from_str(json).unwrap();
        assert_eq!(account.first_name.as_deref(), Some("Ada"));
        assert_eq!(account.can_stream_on_pc, Some(true));
        assert_eq!(account.is_trial, Some(false));
    }

    #[test]
    fn chart_range_uses_lowercase_wire_names() {
        assert_eq!(ChartRange::default(), ChartRange::Life);
        assert_eq!(ChartRange::Month.as_str(), "month");
        assert_eq!(serde_json::to_value(ChartRange::Week).unwrap(), "week");
    }
}
