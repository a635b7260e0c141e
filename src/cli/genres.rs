use tabled::Table;

use crate::{RhapsodySdk, types::GenreTableRow, warning};

use super::{fail, spinner};

pub async fn genres(sdk: &RhapsodySdk) {
    let pb = spinner("Loading genres...");
    let result = sdk.load_genres().await;
    pb.finish_and_clear();

    let genres = result.unwrap_or_else(|e| fail("Cannot load genres", e));
    if genres.is_empty() {
        warning!("No genres found.");
        return;
    }

    let rows: Vec<GenreTableRow> = genres
        .iter()
        .map(|g| GenreTableRow {
            id: g.id.clone(),
            name: g.name.clone(),
            subgenres: g
                .subgenres
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    println!("{}", Table::new(rows));
}
