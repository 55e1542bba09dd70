/// Radarr API response types for deserialization.
///
/// These structures mirror the JSON returned by the movie lookup endpoint.
use super::MovieRecord;
use serde::Deserialize;

/// A single hit from `/api/v3/movie/lookup`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RadarrMovie {
    /// The movie title
    pub title: String,
    /// Release year (0 when unknown)
    #[serde(default)]
    pub year: Option<i32>,
    /// TMDB ID; missing for hits that are not matched upstream
    #[serde(default)]
    pub tmdb_id: Option<u64>,
    /// Plot summary (may be null)
    #[serde(default)]
    pub overview: Option<String>,
}

impl RadarrMovie {
    /// Converts the hit into a record, dropping hits without a TMDB ID.
    pub fn into_record(self) -> Option<MovieRecord> {
        let external_id = self.tmdb_id.filter(|id| *id > 0)?;

        Some(MovieRecord {
            external_id,
            title: self.title,
            year: self.year.filter(|year| *year > 0),
            overview: self.overview.filter(|text| !text.trim().is_empty()),
        })
    }
}
