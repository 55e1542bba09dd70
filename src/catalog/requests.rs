//! Add payloads sent to the library managers.
use super::{ExternalId, Image};
use serde::Serialize;

/// Which episodes the series manager should track after adding a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MonitorPolicy {
    /// Every season, including specials
    All,
    /// Only the first season
    FirstSeason,
    /// Nothing; monitoring is configured afterwards
    None,
}

impl MonitorPolicy {
    /// The value the series manager expects
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorPolicy::All => "all",
            MonitorPolicy::FirstSeason => "firstSeason",
            MonitorPolicy::None => "none",
        }
    }
}

/// Body of the movie add call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieRequest {
    pub title: String,
    /// Release year, 0 when unknown
    pub year: i32,
    pub tmdb_id: ExternalId,
    pub quality_profile_id: i64,
    pub root_folder_path: String,
    pub monitored: bool,
    pub minimum_availability: String,
    pub add_options: MovieAddOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieAddOptions {
    /// Start a search for the movie right after adding it
    pub search_for_movie: bool,
}

/// Body of the series add call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSeriesRequest {
    pub title: String,
    pub sort_title: String,
    pub status: String,
    pub overview: String,
    pub network: String,
    pub air_time: String,
    pub images: Vec<Image>,
    pub seasons: Vec<SeasonPayload>,
    /// Premiere year, 0 when unknown
    pub year: i32,
    pub path: String,
    pub quality_profile_id: i64,
    pub season_folder: bool,
    pub monitored: bool,
    pub use_scene_numbering: bool,
    pub runtime: u32,
    pub tvdb_id: ExternalId,
    pub tv_rage_id: i64,
    pub tv_maze_id: i64,
    pub tmdb_id: i64,
    pub first_aired: Option<String>,
    pub last_aired: Option<String>,
    pub series_type: String,
    pub clean_title: String,
    pub imdb_id: String,
    pub title_slug: String,
    pub root_folder_path: String,
    pub certification: String,
    pub genres: Vec<String>,
    pub tags: Vec<i64>,
    pub add_options: SeriesAddOptions,
}

/// A season entry inside the series add payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonPayload {
    pub season_number: u32,
    pub monitored: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesAddOptions {
    pub ignore_episodes_with_files: bool,
    pub ignore_episodes_without_files: bool,
    pub monitor: MonitorPolicy,
    pub search_for_missing_episodes: bool,
    pub search_for_cutoff_unmet_episodes: bool,
}
