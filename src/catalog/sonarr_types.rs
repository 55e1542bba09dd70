/// Sonarr API response types for deserialization.
///
/// These structures mirror the JSON returned by the series lookup endpoint.
/// Everything but the title is optional because lookup hits vary a lot in
/// completeness.
use super::{Image, SeasonSummary, SeriesDetails, SeriesRecord};
use serde::Deserialize;

/// A single hit from `/api/v3/series/lookup`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SonarrSeries {
    pub title: String,
    #[serde(default)]
    pub tvdb_id: Option<u64>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub seasons: Vec<SonarrSeason>,
    #[serde(default)]
    pub sort_title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub air_time: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub tv_rage_id: Option<i64>,
    #[serde(default)]
    pub tv_maze_id: Option<i64>,
    #[serde(default)]
    pub tmdb_id: Option<i64>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub first_aired: Option<String>,
    #[serde(default)]
    pub last_aired: Option<String>,
    #[serde(default)]
    pub series_type: Option<String>,
    #[serde(default)]
    pub clean_title: Option<String>,
    #[serde(default)]
    pub title_slug: Option<String>,
    #[serde(default)]
    pub certification: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// A season entry of a lookup hit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SonarrSeason {
    pub season_number: i64,
    #[serde(default)]
    pub monitored: bool,
    #[serde(default)]
    pub statistics: Option<SonarrSeasonStatistics>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SonarrSeasonStatistics {
    #[serde(default)]
    pub total_episode_count: Option<u32>,
}

impl SonarrSeries {
    /// Converts the hit into a record, dropping hits without a TVDB ID.
    ///
    /// Seasons with a negative number are skipped; the rest are sorted.
    pub fn into_record(self) -> Option<SeriesRecord> {
        let external_id = self.tvdb_id.filter(|id| *id > 0)?;

        let mut seasons: Vec<SeasonSummary> = self
            .seasons
            .into_iter()
            .filter_map(|season| {
                Some(SeasonSummary {
                    season_number: u32::try_from(season.season_number).ok()?,
                    episode_count: season.statistics.and_then(|s| s.total_episode_count),
                    monitored: season.monitored,
                })
            })
            .collect();
        seasons.sort_by_key(|s| s.season_number);

        Some(SeriesRecord {
            external_id,
            title: self.title,
            year: self.year.filter(|year| *year > 0),
            overview: self.overview.filter(|text| !text.trim().is_empty()),
            seasons,
            details: SeriesDetails {
                sort_title: self.sort_title,
                status: self.status,
                network: self.network,
                air_time: self.air_time,
                images: self.images,
                runtime: self.runtime,
                tv_rage_id: self.tv_rage_id,
                tv_maze_id: self.tv_maze_id,
                tmdb_id: self.tmdb_id,
                imdb_id: self.imdb_id,
                first_aired: self.first_aired,
                last_aired: self.last_aired,
                series_type: self.series_type,
                clean_title: self.clean_title,
                title_slug: self.title_slug,
                certification: self.certification,
                genres: self.genres,
            },
        })
    }
}
