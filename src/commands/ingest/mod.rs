use crate::cli::Dataset;

pub(crate) mod db_setup;
pub(crate) mod lookup;
pub(crate) mod normalize;
pub(crate) mod paginate;
mod run;
pub(crate) mod source;
pub(crate) mod writer;

pub use run::run;

pub(crate) const DB_SCHEMA_VERSION: &str = "0.1.0";
pub(crate) const DB_FILENAME: &str = "chardex.sqlite";

/// Fixed media-type vocabulary; seeded into `media_types` at schema setup.
/// Titles, by contrast, grow unbounded as ingestion encounters them.
pub(crate) const MEDIA_TYPE_VOCABULARY: &[&str] = &[
    "films",
    "shortFilms",
    "tvShows",
    "videoGames",
    "parkAttractions",
];

#[derive(Copy, Clone, Debug)]
pub(crate) enum ApiShape {
    /// Collection served page by page via a `?page=N` query parameter; the
    /// response is an object whose `data_field` holds the record list.
    Paged { data_field: &'static str },
    /// Entire collection returned as one JSON array; quota and dedup bound
    /// the work locally.
    Snapshot,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct DatasetProfile {
    pub id_field: &'static str,
    pub default_base_url: &'static str,
    pub shape: ApiShape,
    pub media_vocabulary: &'static [&'static str],
}

pub(crate) fn dataset_profile(dataset: Dataset) -> DatasetProfile {
    match dataset {
        Dataset::Disney => DatasetProfile {
            id_field: "_id",
            default_base_url: "https://api.disneyapi.dev/character",
            shape: ApiShape::Paged { data_field: "data" },
            media_vocabulary: MEDIA_TYPE_VOCABULARY,
        },
        Dataset::Heroes => DatasetProfile {
            id_field: "id",
            default_base_url: "https://akabab.github.io/superhero-api/api/all.json",
            shape: ApiShape::Snapshot,
            media_vocabulary: &[],
        },
    }
}
