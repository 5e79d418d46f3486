use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum LookupTable {
    MediaTypes,
    MediaTitles,
    HeroNames,
    Publishers,
    Alignments,
    Genders,
    Races,
}

impl LookupTable {
    pub(crate) fn table_name(self) -> &'static str {
        match self {
            Self::MediaTypes => "media_types",
            Self::MediaTitles => "media_titles",
            Self::HeroNames => "hero_names",
            Self::Publishers => "publishers",
            Self::Alignments => "alignments",
            Self::Genders => "genders",
            Self::Races => "races",
        }
    }
}

/// Maps free-text category values onto stable integer ids, inserting on
/// first sight. Ids are never reused or rewritten; the `UNIQUE` constraint
/// on each lookup table makes repeated resolution idempotent.
#[derive(Debug, Default)]
pub(crate) struct LookupRegistry {
    pub created: usize,
}

impl LookupRegistry {
    /// Empty and `"-"` placeholder values resolve to `None` without
    /// materializing a row; callers wanting an explicit category substitute
    /// a literal label first.
    pub(crate) fn resolve(
        &mut self,
        connection: &Connection,
        table: LookupTable,
        raw: Option<&str>,
    ) -> Result<Option<i64>> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        let text = raw.trim();
        if text.is_empty() || text == "-" {
            return Ok(None);
        }

        let select_sql = format!("SELECT id FROM {} WHERE name = ?1", table.table_name());
        let existing: Option<i64> = connection
            .query_row(&select_sql, params![text], |row| row.get(0))
            .optional()
            .with_context(|| format!("failed to look up {} value", table.table_name()))?;

        if let Some(id) = existing {
            return Ok(Some(id));
        }

        let insert_sql = format!("INSERT INTO {}(name) VALUES(?1)", table.table_name());
        connection
            .execute(&insert_sql, params![text])
            .with_context(|| format!("failed to insert {} value", table.table_name()))?;

        self.created += 1;
        Ok(Some(connection.last_insert_rowid()))
    }
}
