use std::collections::HashSet;

use serde_json::Value;
use tracing::{info, warn};

use crate::model::PageDigest;

use super::source::RecordSource;

#[derive(Debug, Default)]
pub(crate) struct PaginatorOutcome {
    pub records: Vec<Value>,
    pub pages_fetched: usize,
    pub records_seen: usize,
    pub duplicates_skipped: usize,
    pub missing_id_skipped: usize,
    pub page_digests: Vec<PageDigest>,
    pub warnings: Vec<String>,
}

/// Walks the remote collection page by page, accepting records whose
/// identity is not yet known to the store, until the collection is
/// exhausted, a fetch fails, or `quota` newly accepted records have been
/// collected. Duplicates do not count against the quota. Fetch failures are
/// soft: the run ends and already-collected records are kept.
pub(crate) fn collect_new_records(
    source: &mut dyn RecordSource,
    id_field: &str,
    known_ids: &mut HashSet<i64>,
    quota: usize,
) -> PaginatorOutcome {
    let mut outcome = PaginatorOutcome::default();
    if quota == 0 {
        return outcome;
    }

    let mut page = 1_u32;
    'pages: loop {
        let fetched = match source.fetch_page(page) {
            Ok(Some(fetched)) => fetched,
            Ok(None) => break,
            Err(err) => {
                warn!(page, error = %err, "page fetch failed, ending run with partial results");
                outcome
                    .warnings
                    .push(format!("page {page} fetch failed: {err:#}"));
                break;
            }
        };

        outcome.pages_fetched += 1;
        outcome.page_digests.push(PageDigest {
            page,
            record_count: fetched.records.len(),
            payload_sha256: fetched.payload_sha256,
        });

        if fetched.records.is_empty() {
            break;
        }

        for record in fetched.records {
            outcome.records_seen += 1;

            let Some(id) = record.get(id_field).and_then(Value::as_i64) else {
                outcome.missing_id_skipped += 1;
                continue;
            };
            if !known_ids.insert(id) {
                outcome.duplicates_skipped += 1;
                continue;
            }

            outcome.records.push(record);
            if outcome.records.len() >= quota {
                break 'pages;
            }
        }

        page += 1;
    }

    info!(
        accepted = outcome.records.len(),
        pages = outcome.pages_fetched,
        duplicates = outcome.duplicates_skipped,
        "pagination finished"
    );

    outcome
}
