use std::cmp::Ordering;

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::DateTime;

use crate::types::{AlbumData, ArtistImageSize};

/// Prefix of the cache key under which curated new releases are stored.
pub const CURATED_CACHE_PREFIX: &str = "rhapsody";

/// Builds the HTTP Basic `Authorization` header value for the app credentials.
pub fn basic_auth_header(api_key: &str, api_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{api_key}:{api_secret}"));
    format!("Basic {encoded}")
}

/// Substitutes `{artist_id}` and `{size}` in the image URL template.
pub fn artist_image_url(template: &str, artist_id: &str, size: ArtistImageSize) -> String {
    template
        .replace("{artist_id}", artist_id)
        .replace("{size}", size.as_str())
}

/// Cache key of the curated new releases feed, personalized per user id.
pub fn curated_cache_key(user_id: Option<&str>) -> String {
    format!("{CURATED_CACHE_PREFIX}{}", user_id.unwrap_or_default())
}

/// Formats a release timestamp (milliseconds since the epoch) as `YYYY-MM-DD`.
pub fn format_release_date(released: Option<i64>) -> String {
    released
        .and_then(DateTime::from_timestamp_millis)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Formats a duration in seconds as `m:ss`.
pub fn format_duration(seconds: Option<u32>) -> String {
    match seconds {
        Some(s) => format!("{}:{:02}", s / 60, s % 60),
        None => String::new(),
    }
}

/// Sorts albums newest first, then by artist name.
pub fn sort_albums_by_release(albums: &mut [AlbumData]) {
    albums.sort_by(|a, b| {
        match b.released.cmp(&a.released) {
            Ordering::Equal => {
                let a_artist = a.artist.as_ref().map(|artist| &artist.name);
                let b_artist = b.artist.as_ref().map(|artist| &artist.name);
                a_artist.cmp(&b_artist)
            }
            other => other,
        }
    });
}
