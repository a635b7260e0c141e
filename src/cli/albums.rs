use tabled::Table;

use crate::{
    RhapsodySdk, info, success,
    types::{AlbumTableRow, TrackTableRow},
    utils, warning,
};

use super::{fail, spinner};

pub async fn album(sdk: &RhapsodySdk, album_id: &str) {
    let pb = spinner(format!("Loading album {album_id}..."));
    let result = sdk.load_album(album_id).await;
    pb.finish_and_clear();

    let album = result.unwrap_or_else(|e| fail("Cannot load album", e));

    success!("{}", album.name);
    if let Some(artist) = &album.artist {
        info!("Artist: {} ({})", artist.name, artist.id);
    }
    if album.released.is_some() {
        info!("Released: {}", utils::format_release_date(album.released));
    }
    if let Some(name) = album.album_type.as_ref().and_then(|t| t.name.as_deref()) {
        info!("Type: {}", name);
    }
    if !album.tags.is_empty() {
        info!("Tags: {}", album.tags.join(", "));
    }

    if album.tracks.is_empty() {
        warning!("No tracks listed for this album.");
        return;
    }

    let rows: Vec<TrackTableRow> = album.tracks.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(rows));
}

/// New releases of a genre, of an artist, or the curated feed.
pub async fn releases(
    sdk: &RhapsodySdk,
    genre: Option<String>,
    artist: Option<String>,
    user: Option<String>,
    limit: Option<u32>,
) {
    let pb = spinner("Loading new releases...");
    let result = match (genre, artist) {
        (Some(genre), _) => sdk.load_genre_new_releases(&genre, limit).await,
        (None, Some(artist)) => sdk.load_artist_new_releases(&artist, limit).await,
        (None, None) => sdk.load_album_new_releases(user.as_deref()).await,
    };
    pb.finish_and_clear();

    let mut albums = result.unwrap_or_else(|e| fail("Cannot load new releases", e));
    if albums.is_empty() {
        warning!("No new releases found.");
        return;
    }

    utils::sort_albums_by_release(&mut albums);
    let rows: Vec<AlbumTableRow> = albums.iter().map(AlbumTableRow::from).collect();
    println!("{}", Table::new(rows));
}
