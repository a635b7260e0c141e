use crate::{RhapsodySdk, info, success, types::ArtistImageSize, warning};

use super::{fail, spinner};

pub async fn artist(
    sdk: &RhapsodySdk,
    artist_id: &str,
    bio: bool,
    image_size: Option<ArtistImageSize>,
) {
    let pb = spinner(format!("Loading artist {artist_id}..."));
    let result = sdk.load_artist_meta(artist_id).await;
    pb.finish_and_clear();

    let artist = result.unwrap_or_else(|e| fail("Cannot load artist", e));

    success!("{} ({})", artist.name, artist.id);
    if let Some(genre) = &artist.genre {
        info!("Genre: {}", genre.id);
    }

    let size = image_size.unwrap_or(ArtistImageSize::Size356x237);
    info!("Image: {}", sdk.artist_image_url(&artist.id, size));

    if !bio {
        return;
    }

    let pb = spinner("Loading bio...");
    let result = sdk.load_artist_bio(artist_id).await;
    pb.finish_and_clear();

    let bio = result.unwrap_or_else(|e| fail("Cannot load artist bio", e));
    match bio.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        Some(text) => println!("\n{}\n", text.trim()),
        None => warning!("No bio available."),
    }
    for blurb in &bio.blurbs {
        println!("  \"{}\"", blurb);
    }
}
