use rhapcli::types::{
    AlbumData, AlbumTableRow, ArtistImageSize, ArtistRef, Track, TrackTableRow,
};
use rhapcli::utils::*;

const TEMPLATE: &str =
    "http://direct.rhapsody.com/imageserver/v2/artists/{artist_id}/images/{size}.png";

// Helper function to create a test album
fn create_test_album(id: &str, released: Option<i64>, artist_name: &str) -> AlbumData {
    AlbumData {
        id: id.to_string(),
        name: format!("Album {}", id),
        artist: Some(ArtistRef {
            id: format!("{}_artist_id", id),
            name: artist_name.to_string(),
        }),
        released,
        ..Default::default()
    }
}

#[test]
fn test_artist_image_url() {
    let url = artist_image_url(TEMPLATE, "123", ArtistImageSize::Size150x100);
    assert_eq!(
        url,
        "http://direct.rhapsody.com/imageserver/v2/artists/123/images/150x100.png"
    );
}

#[test]
fn test_artist_image_url_all_sizes() {
    let expected = ["70x47", "150x100", "356x237", "633x422"];

    for (size, name) in ArtistImageSize::ALL.iter().zip(expected) {
        let url = artist_image_url(TEMPLATE, "Art.954", *size);
        assert_eq!(
            url,
            format!(
                "http://direct.rhapsody.com/imageserver/v2/artists/Art.954/images/{}.png",
                name
            )
        );
        // same input, same output
        assert_eq!(url, artist_image_url(TEMPLATE, "Art.954", *size));
    }
}

#[test]
fn test_basic_auth_header() {
    // base64("key:secret")
    assert_eq!(basic_auth_header("key", "secret"), "Basic a2V5OnNlY3JldA==");
}

#[test]
fn test_curated_cache_key() {
    assert_eq!(curated_cache_key(None), "rhapsody");
    assert_eq!(curated_cache_key(Some("M.1234")), "rhapsodyM.1234");
}

#[test]
fn test_format_release_date() {
    // 2013-01-01T00:00:00Z
    assert_eq!(format_release_date(Some(1_356_998_400_000)), "2013-01-01");
    assert_eq!(format_release_date(None), "");
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Some(550)), "9:10");
    assert_eq!(format_duration(Some(59)), "0:59");
    assert_eq!(format_duration(Some(3600)), "60:00");
    assert_eq!(format_duration(None), "");
}

#[test]
fn test_sort_albums_by_release() {
    let mut albums = vec![
        create_test_album("old", Some(1_000), "Zappa"),
        create_test_album("new_b", Some(2_000), "Beck"),
        create_test_album("undated", None, "Abba"),
        create_test_album("new_a", Some(2_000), "Air"),
    ];

    sort_albums_by_release(&mut albums);

    let ids: Vec<&str> = albums.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["new_a", "new_b", "old", "undated"]);
}

#[test]
fn test_album_table_row_from_album() {
    let album = create_test_album("Alb.1", Some(1_356_998_400_000), "John Coltrane");
    let row = AlbumTableRow::from(&album);

    assert_eq!(row.id, "Alb.1");
    assert_eq!(row.released, "2013-01-01");
    assert_eq!(row.name, "Album Alb.1");
    assert_eq!(row.artist, "John Coltrane");
}

#[test]
fn test_album_table_row_without_artist() {
    let album = AlbumData {
        id: "Alb.2".to_string(),
        ..Default::default()
    };
    let row = AlbumTableRow::from(&album);

    assert_eq!(row.artist, "");
    assert_eq!(row.released, "");
}

#[test]
fn test_track_table_row_from_track() {
    let track = Track {
        id: "Tra.1".to_string(),
        name: "Moment's Notice".to_string(),
        disc: Some(1),
        duration: Some(550),
        ..Default::default()
    };
    let row = TrackTableRow::from(&track);

    assert_eq!(row.disc, "1");
    assert_eq!(row.name, "Moment's Notice");
    assert_eq!(row.duration, "9:10");
}
