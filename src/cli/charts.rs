use clap::ValueEnum;
use tabled::Table;

use crate::{
    RhapsodySdk, SdkError,
    types::{ChartRange, ChartTableRow},
    warning,
};

use super::{fail, spinner};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ChartKind {
    Tracks,
    Artists,
    Albums,
}

pub async fn charts(sdk: &RhapsodySdk, kind: ChartKind, range: ChartRange, limit: Option<u32>) {
    let pb = spinner(format!("Loading your top {:?}...", kind).to_lowercase());
    let result: Result<Vec<(String, Option<u64>)>, SdkError> = match kind {
        ChartKind::Tracks => sdk
            .load_top_tracks(limit, range)
            .await
            .map(|c| c.into_iter().map(|t| (t.id, t.play_count)).collect()),
        ChartKind::Artists => sdk
            .load_top_artists(limit, range)
            .await
            .map(|c| c.into_iter().map(|a| (a.id, a.play_count)).collect()),
        ChartKind::Albums => sdk
            .load_top_albums(limit, range)
            .await
            .map(|c| c.into_iter().map(|a| (a.id, a.play_count)).collect()),
    };
    pb.finish_and_clear();

    let entries = result.unwrap_or_else(|e| fail("Cannot load charts", e));
    if entries.is_empty() {
        warning!("Nothing played in this range yet.");
        return;
    }

    let rows: Vec<ChartTableRow> = entries
        .into_iter()
        .enumerate()
        .map(|(i, (id, plays))| ChartTableRow {
            rank: i + 1,
            id,
            plays: plays.map(|p| p.to_string()).unwrap_or_default(),
        })
        .collect();
    println!("{}", Table::new(rows));
}
