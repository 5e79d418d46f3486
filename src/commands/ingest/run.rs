use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use tracing::info;

use crate::cli::IngestArgs;
use crate::model::{IngestCounts, IngestPaths, IngestRunManifest};
use crate::util::{ensure_directory, now_utc_string, utc_compact_string, write_json_pretty};

use super::db_setup::{configure_connection, ensure_schema, load_known_ids, seed_media_types};
use super::paginate::collect_new_records;
use super::source::{HttpPagedSource, HttpSnapshotSource, RecordSource, build_client};
use super::writer::commit_records;
use super::{ApiShape, DB_FILENAME, DB_SCHEMA_VERSION, dataset_profile};

pub fn run(args: IngestArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let data_root = args.data_root.clone();
    let manifest_dir = data_root.join("manifests");
    ensure_directory(&manifest_dir)?;

    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| data_root.join(DB_FILENAME));
    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        manifest_dir.join(format!(
            "ingest_{}_{}.json",
            args.dataset.as_str(),
            utc_compact_string(started_ts)
        ))
    });

    let profile = dataset_profile(args.dataset);
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| profile.default_base_url.to_string());

    info!(
        dataset = args.dataset.as_str(),
        run_id = %run_id,
        db = %db_path.display(),
        quota = args.quota,
        "starting ingest"
    );

    let mut connection = Connection::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    configure_connection(&connection)?;
    ensure_schema(&connection)?;
    seed_media_types(&connection, profile.media_vocabulary)?;

    let mut known_ids = load_known_ids(&connection, args.dataset)?;
    info!(known = known_ids.len(), "loaded existing entity ids");

    let client = build_client(args.timeout_ms)?;
    let mut source: Box<dyn RecordSource> = match profile.shape {
        ApiShape::Paged { data_field } => {
            Box::new(HttpPagedSource::new(client, base_url.clone(), data_field))
        }
        ApiShape::Snapshot => Box::new(HttpSnapshotSource::new(client, base_url.clone())),
    };

    let outcome = collect_new_records(source.as_mut(), profile.id_field, &mut known_ids, args.quota);
    let commit = commit_records(&mut connection, args.dataset, &outcome.records)?;

    let status = if outcome.warnings.is_empty() {
        "completed"
    } else {
        "completed-with-warnings"
    };

    let manifest = IngestRunManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        dataset: args.dataset.as_str().to_string(),
        db_schema_version: DB_SCHEMA_VERSION.to_string(),
        status: status.to_string(),
        started_at,
        updated_at: now_utc_string(),
        base_url,
        quota: args.quota,
        paths: IngestPaths {
            data_root: data_root.display().to_string(),
            db_path: db_path.display().to_string(),
            manifest_path: manifest_path.display().to_string(),
        },
        counts: IngestCounts {
            pages_fetched: outcome.pages_fetched,
            records_seen: outcome.records_seen,
            duplicates_skipped: outcome.duplicates_skipped,
            missing_id_skipped: outcome.missing_id_skipped,
            records_accepted: outcome.records.len(),
            characters_inserted: commit.characters_inserted,
            appearance_rows_inserted: commit.appearance_rows_inserted,
            heroes_inserted: commit.heroes_inserted,
            powerstat_rows_inserted: commit.powerstat_rows_inserted,
            lookup_rows_created: commit.lookup_rows_created,
        },
        page_digests: outcome.page_digests,
        warnings: outcome.warnings,
    };

    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote ingest run manifest");
    info!(
        accepted = manifest.counts.records_accepted,
        lookups_created = manifest.counts.lookup_rows_created,
        status = status,
        "ingest completed"
    );

    Ok(())
}
