use std::fs;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use tracing::info;

use crate::cli::{Dataset, ReportArgs};
use crate::commands::ingest::DB_FILENAME;
use crate::util::{ensure_directory, now_utc_string, write_json_pretty};

use super::queries::{
    self, AlignmentAverages, AppearanceCount, AppearanceSummary, MediaSpread, PowerIndex,
};
use super::render;

/// Stable aggregate shapes for the external chart collaborators.
#[derive(Debug, Serialize)]
struct DisneyAggregates {
    generated_at: String,
    dataset: String,
    summary: AppearanceSummary,
    ranked: Vec<AppearanceCount>,
    media_spread: Vec<MediaSpread>,
}

#[derive(Debug, Serialize)]
struct HeroAggregates {
    generated_at: String,
    dataset: String,
    power_index: Vec<PowerIndex>,
    alignment_averages: Vec<AlignmentAverages>,
}

pub fn run(args: ReportArgs) -> Result<()> {
    let data_root = args.data_root.clone();
    let reports_dir = data_root.join("reports");

    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| data_root.join(DB_FILENAME));
    let summary_path = args
        .summary_path
        .clone()
        .unwrap_or_else(|| reports_dir.join(format!("{}_summary.txt", args.dataset.as_str())));
    let aggregates_path = args
        .aggregates_path
        .clone()
        .unwrap_or_else(|| reports_dir.join(format!("{}_aggregates.json", args.dataset.as_str())));

    let connection = Connection::open_with_flags(&db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("failed to open {}", db_path.display()))?;

    info!(
        dataset = args.dataset.as_str(),
        db = %db_path.display(),
        top_n = args.top_n,
        "running report"
    );

    let summary_text = match args.dataset {
        Dataset::Disney => {
            let ranked = queries::appearance_counts(&connection)?;
            let summary = queries::summarize_appearances(&ranked, args.top_n);
            let spread = queries::media_spread(&connection, args.top_n)?;

            info!(
                characters = summary.total_characters,
                mean = summary.mean_appearances,
                "computed appearance aggregates"
            );

            let text = render::disney_summary(&summary, args.top_n);
            write_json_pretty(
                &aggregates_path,
                &DisneyAggregates {
                    generated_at: now_utc_string(),
                    dataset: args.dataset.as_str().to_string(),
                    summary,
                    ranked,
                    media_spread: spread,
                },
            )?;
            text
        }
        Dataset::Heroes => {
            let power = queries::power_index(&connection, args.top_n)?;
            let averages = queries::alignment_averages(&connection)?;

            info!(
                ranked_heroes = power.len(),
                alignment_groups = averages.len(),
                "computed hero aggregates"
            );

            let text = render::hero_summary(&power, &averages, args.top_n);
            write_json_pretty(
                &aggregates_path,
                &HeroAggregates {
                    generated_at: now_utc_string(),
                    dataset: args.dataset.as_str().to_string(),
                    power_index: power,
                    alignment_averages: averages,
                },
            )?;
            text
        }
    };

    if let Some(parent) = summary_path.parent() {
        ensure_directory(parent)?;
    }
    fs::write(&summary_path, summary_text)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;

    info!(path = %summary_path.display(), "wrote text summary");
    info!(path = %aggregates_path.display(), "wrote aggregates document");

    Ok(())
}
