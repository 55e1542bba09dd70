//! Catalog clients for the movie and series library managers.
//!
//! This module provides the record types a search yields, the traits the
//! selection workflow consumes, and concrete clients for Radarr (movies) and
//! Sonarr (series) speaking their v3 REST APIs.
mod radarr;
mod radarr_types;
mod requests;
mod sonarr;
mod sonarr_types;
mod transport;

pub use radarr::RadarrClient;
pub use requests::{
    AddMovieRequest, AddSeriesRequest, MonitorPolicy, MovieAddOptions, SeasonPayload,
    SeriesAddOptions,
};
pub use sonarr::SonarrClient;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// External catalog identifier (TMDB ID for movies, TVDB ID for series)
pub type ExternalId = u64;

/// The two catalog services the workflow talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// Movie catalog, managed by Radarr
    Movie,
    /// Series catalog, managed by Sonarr
    Series,
}

impl CatalogKind {
    /// Name of the library manager serving this catalog
    pub fn service_name(&self) -> &'static str {
        match self {
            CatalogKind::Movie => "Radarr",
            CatalogKind::Series => "Sonarr",
        }
    }

    /// Name of the upstream database the external IDs come from
    pub fn id_label(&self) -> &'static str {
        match self {
            CatalogKind::Movie => "TMDB",
            CatalogKind::Series => "TVDB",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_name())
    }
}

/// Errors that can occur while talking to a catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The service rejected the API key or the access-gateway credentials
    #[error("{service} rejected the request credentials (HTTP {status})")]
    Unauthorized { service: CatalogKind, status: u16 },

    /// The service (or the requested resource) could not be found
    #[error("{service} returned 404 Not Found for {path}")]
    NotFound { service: CatalogKind, path: String },

    /// The resource to create already exists
    #[error("{service} reports the item already exists: {message}")]
    Conflict {
        service: CatalogKind,
        message: String,
    },

    /// The request did not complete (network failure, timeout, server error)
    #[error("Request to {service} failed: {message}")]
    Transport {
        service: CatalogKind,
        message: String,
    },

    /// The response body could not be parsed
    #[error("Failed to parse {service} response: {message}")]
    Malformed {
        service: CatalogKind,
        message: String,
    },
}

impl CatalogError {
    /// The service that produced this error
    pub fn service(&self) -> CatalogKind {
        match self {
            CatalogError::Unauthorized { service, .. }
            | CatalogError::NotFound { service, .. }
            | CatalogError::Conflict { service, .. }
            | CatalogError::Transport { service, .. }
            | CatalogError::Malformed { service, .. } => *service,
        }
    }
}

/// Common view on a search hit, independent of the catalog it came from
pub trait CatalogRecord {
    /// The external ID, used as the result cache key
    fn external_id(&self) -> ExternalId;
    /// The display title
    fn title(&self) -> &str;
    /// The release or premiere year, if known
    fn year(&self) -> Option<i32>;
    /// A short description, if known
    fn overview(&self) -> Option<&str>;
}

/// A movie found in the movie catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    /// TMDB ID of the movie
    pub external_id: ExternalId,
    /// The movie title
    pub title: String,
    /// Release year
    pub year: Option<i32>,
    /// Plot summary
    pub overview: Option<String>,
}

impl CatalogRecord for MovieRecord {
    fn external_id(&self) -> ExternalId {
        self.external_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn overview(&self) -> Option<&str> {
        self.overview.as_deref()
    }
}

/// A season as listed in a series search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonSummary {
    /// The season number (0 for specials)
    pub season_number: u32,
    /// Total number of episodes, if the catalog knows it
    pub episode_count: Option<u32>,
    /// Monitoring flag as reported by the lookup
    pub monitored: bool,
}

/// A series found in the series catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRecord {
    /// TVDB ID of the series
    pub external_id: ExternalId,
    /// The series title
    pub title: String,
    /// Premiere year
    pub year: Option<i32>,
    /// Plot summary
    pub overview: Option<String>,
    /// Seasons, ordered by season number
    pub seasons: Vec<SeasonSummary>,
    /// Remaining lookup fields, carried into the add payload
    pub details: SeriesDetails,
}

impl CatalogRecord for SeriesRecord {
    fn external_id(&self) -> ExternalId {
        self.external_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn overview(&self) -> Option<&str> {
        self.overview.as_deref()
    }
}

/// Optional series metadata from the lookup that the add call accepts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesDetails {
    pub sort_title: Option<String>,
    pub status: Option<String>,
    pub network: Option<String>,
    pub air_time: Option<String>,
    pub images: Vec<Image>,
    pub runtime: Option<u32>,
    pub tv_rage_id: Option<i64>,
    pub tv_maze_id: Option<i64>,
    pub tmdb_id: Option<i64>,
    pub imdb_id: Option<String>,
    pub first_aired: Option<String>,
    pub last_aired: Option<String>,
    pub series_type: Option<String>,
    pub clean_title: Option<String>,
    pub title_slug: Option<String>,
    pub certification: Option<String>,
    pub genres: Vec<String>,
}

/// Artwork reference attached to a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default)]
    pub cover_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

/// A quality profile configured on the library manager
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileRef {
    pub id: i64,
    pub name: String,
}

/// A root folder configured on the library manager
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FolderRef {
    #[serde(default)]
    pub id: Option<i64>,
    pub path: String,
}

/// Version information reported by a library manager
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub version: String,
}

/// The series as created by the series manager
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddedSeries {
    /// Internal ID assigned by the series manager
    pub id: i64,
}

/// Monitoring state of one season of an already added series.
///
/// Every field the service returns is kept, so an update sends the complete
/// season back with only `monitored` changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonState {
    pub season_number: u32,
    #[serde(default)]
    pub monitored: bool,
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// Operations shared by both library managers.
pub trait CatalogService {
    /// Which catalog this service manages
    fn kind(&self) -> CatalogKind;

    /// Lists the configured quality profiles
    fn quality_profiles(&self) -> Result<Vec<ProfileRef>, CatalogError>;

    /// Lists the configured root folders
    fn root_folders(&self) -> Result<Vec<FolderRef>, CatalogError>;

    /// Fetches version information, used as a connection check
    fn system_status(&self) -> Result<SystemStatus, CatalogError>;
}

/// A movie library manager.
pub trait MovieCatalog: CatalogService {
    /// Searches the movie catalog, in the catalog's own ranking order
    fn search_movies(&self, term: &str) -> Result<Vec<MovieRecord>, CatalogError>;

    /// Adds a movie to the library
    fn add_movie(&self, request: &AddMovieRequest) -> Result<(), CatalogError>;
}

/// A series library manager.
pub trait SeriesCatalog: CatalogService {
    /// Searches the series catalog, in the catalog's own ranking order
    fn search_series(&self, term: &str) -> Result<Vec<SeriesRecord>, CatalogError>;

    /// Adds a series to the library.
    ///
    /// The created series is returned when the response could be read. A
    /// response without it does not fail the add, which has already happened.
    fn add_series(
        &self,
        request: &AddSeriesRequest,
    ) -> Result<Option<AddedSeries>, CatalogError>;

    /// Lists the seasons of an added series
    fn seasons(&self, series_id: i64) -> Result<Vec<SeasonState>, CatalogError>;

    /// Writes back the monitoring state of one season
    fn update_season(&self, season: &SeasonState) -> Result<(), CatalogError>;
}
