use tabled::Table;

use crate::{
    RhapsodySdk, success,
    types::{AlbumTableRow, ArtistTableRow},
    warning,
};

use super::{fail, spinner};

pub async fn library_artists(sdk: &RhapsodySdk, limit: Option<u32>) {
    let pb = spinner("Loading library artists...");
    let result = sdk.load_library_artists(limit).await;
    pb.finish_and_clear();

    let mut artists = result.unwrap_or_else(|e| fail("Cannot load library artists", e));
    if artists.is_empty() {
        warning!("Your library has no artists.");
        return;
    }

    artists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    let rows: Vec<ArtistTableRow> = artists
        .into_iter()
        .map(|a| ArtistTableRow {
            id: a.id,
            name: a.name,
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub async fn library_albums(sdk: &RhapsodySdk, artist: Option<String>, limit: Option<u32>) {
    let pb = spinner("Loading library albums...");
    let result = match &artist {
        Some(artist_id) => sdk.load_library_albums_by_artist(artist_id, limit).await,
        None => sdk.load_library_albums(limit).await,
    };
    pb.finish_and_clear();

    let albums = result.unwrap_or_else(|e| fail("Cannot load library albums", e));
    if albums.is_empty() {
        warning!("No albums found in your library.");
        return;
    }

    let rows: Vec<AlbumTableRow> = albums.iter().map(AlbumTableRow::from).collect();
    println!("{}", Table::new(rows));
}

pub async fn add_album(sdk: &RhapsodySdk, album_id: &str) {
    let pb = spinner(format!("Adding album {album_id}..."));
    let result = sdk.add_album_to_library(album_id).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => success!("Album {} added to your library.", album_id),
        Err(e) => fail("Cannot add album", e),
    }
}

pub async fn remove_album(sdk: &RhapsodySdk, album_id: &str) {
    let pb = spinner(format!("Removing album {album_id}..."));
    let result = sdk.remove_album_from_library(album_id).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => success!("Album {} removed from your library.", album_id),
        Err(e) => fail("Cannot remove album", e),
    }
}
