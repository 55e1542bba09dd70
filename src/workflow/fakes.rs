//! In-memory catalogs for workflow tests.
//!
//! `FakeCatalog` serves canned records and operator settings, can be told to
//! fail individual operations and records every call it receives.

use crate::catalog::{
    AddMovieRequest, AddSeriesRequest, AddedSeries, CatalogError, CatalogKind, CatalogService,
    ExternalId, FolderRef, MovieCatalog, MovieRecord, ProfileRef, SeasonState, SeasonSummary,
    SeriesCatalog, SeriesDetails, SeriesRecord, SystemStatus,
};
use std::sync::Mutex;

/// Internal ID the fake assigns to every added series
pub const ADDED_SERIES_ID: i64 = 42;

/// A call received by the fake
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SearchMovies(String),
    SearchSeries(String),
    QualityProfiles,
    RootFolders,
    SystemStatus,
    AddMovie(ExternalId),
    AddSeries(ExternalId),
    Seasons(i64),
    UpdateSeason { season_number: u32, monitored: bool },
}

pub struct FakeCatalog {
    kind: CatalogKind,
    movies: Vec<MovieRecord>,
    series: Vec<SeriesRecord>,
    profiles: Vec<ProfileRef>,
    folders: Vec<FolderRef>,
    season_states: Vec<SeasonState>,
    search_error: Option<CatalogError>,
    add_error: Option<CatalogError>,
    seasons_error: Option<CatalogError>,
    status_error: Option<CatalogError>,
    fail_update_at: Option<u32>,
    omit_series_id: bool,
    calls: Mutex<Vec<Call>>,
    added_movies: Mutex<Vec<AddMovieRequest>>,
    added_series: Mutex<Vec<AddSeriesRequest>>,
}

impl FakeCatalog {
    fn new(kind: CatalogKind, folder: &str) -> Self {
        Self {
            kind,
            movies: Vec::new(),
            series: Vec::new(),
            profiles: vec![ProfileRef {
                id: 1,
                name: "HD".to_string(),
            }],
            folders: vec![FolderRef {
                id: Some(1),
                path: folder.to_string(),
            }],
            season_states: Vec::new(),
            search_error: None,
            add_error: None,
            seasons_error: None,
            status_error: None,
            fail_update_at: None,
            omit_series_id: false,
            calls: Mutex::new(Vec::new()),
            added_movies: Mutex::new(Vec::new()),
            added_series: Mutex::new(Vec::new()),
        }
    }

    /// A movie catalog returning `records` for every search
    pub fn movies(records: Vec<MovieRecord>) -> Self {
        Self {
            movies: records,
            ..Self::new(CatalogKind::Movie, "/movies")
        }
    }

    /// A series catalog returning `records` for every search
    pub fn series(records: Vec<SeriesRecord>) -> Self {
        Self {
            series: records,
            ..Self::new(CatalogKind::Series, "/tv")
        }
    }

    pub fn with_profiles(mut self, profiles: Vec<ProfileRef>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_folders(mut self, folders: Vec<FolderRef>) -> Self {
        self.folders = folders;
        self
    }

    /// Seasons reported for an added series
    pub fn with_season_states(mut self, states: Vec<SeasonState>) -> Self {
        self.season_states = states;
        self
    }

    pub fn failing_search(mut self, error: CatalogError) -> Self {
        self.search_error = Some(error);
        self
    }

    pub fn failing_add(mut self, error: CatalogError) -> Self {
        self.add_error = Some(error);
        self
    }

    pub fn failing_seasons(mut self, error: CatalogError) -> Self {
        self.seasons_error = Some(error);
        self
    }

    pub fn failing_status(mut self, error: CatalogError) -> Self {
        self.status_error = Some(error);
        self
    }

    /// Answers series adds without the created series
    pub fn without_series_id(mut self) -> Self {
        self.omit_series_id = true;
        self
    }

    /// Fails the update of the given season, after recording it
    pub fn failing_update_at(mut self, season_number: u32) -> Self {
        self.fail_update_at = Some(season_number);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn added_movies(&self) -> Vec<AddMovieRequest> {
        self.added_movies.lock().unwrap().clone()
    }

    pub fn added_series(&self) -> Vec<AddSeriesRequest> {
        self.added_series.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn fail_with(error: &Option<CatalogError>) -> Result<(), CatalogError> {
        match error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl CatalogService for FakeCatalog {
    fn kind(&self) -> CatalogKind {
        self.kind
    }

    fn quality_profiles(&self) -> Result<Vec<ProfileRef>, CatalogError> {
        self.record(Call::QualityProfiles);
        Ok(self.profiles.clone())
    }

    fn root_folders(&self) -> Result<Vec<FolderRef>, CatalogError> {
        self.record(Call::RootFolders);
        Ok(self.folders.clone())
    }

    fn system_status(&self) -> Result<SystemStatus, CatalogError> {
        self.record(Call::SystemStatus);
        Self::fail_with(&self.status_error)?;
        Ok(SystemStatus {
            app_name: self.kind.service_name().to_string(),
            version: "5.2.6".to_string(),
        })
    }
}

impl MovieCatalog for FakeCatalog {
    fn search_movies(&self, term: &str) -> Result<Vec<MovieRecord>, CatalogError> {
        self.record(Call::SearchMovies(term.to_string()));
        Self::fail_with(&self.search_error)?;
        Ok(self.movies.clone())
    }

    fn add_movie(&self, request: &AddMovieRequest) -> Result<(), CatalogError> {
        self.record(Call::AddMovie(request.tmdb_id));
        Self::fail_with(&self.add_error)?;
        self.added_movies.lock().unwrap().push(request.clone());
        Ok(())
    }
}

impl SeriesCatalog for FakeCatalog {
    fn search_series(&self, term: &str) -> Result<Vec<SeriesRecord>, CatalogError> {
        self.record(Call::SearchSeries(term.to_string()));
        Self::fail_with(&self.search_error)?;
        Ok(self.series.clone())
    }

    fn add_series(
        &self,
        request: &AddSeriesRequest,
    ) -> Result<Option<AddedSeries>, CatalogError> {
        self.record(Call::AddSeries(request.tvdb_id));
        Self::fail_with(&self.add_error)?;
        self.added_series.lock().unwrap().push(request.clone());
        if self.omit_series_id {
            return Ok(None);
        }
        Ok(Some(AddedSeries {
            id: ADDED_SERIES_ID,
        }))
    }

    fn seasons(&self, series_id: i64) -> Result<Vec<SeasonState>, CatalogError> {
        self.record(Call::Seasons(series_id));
        Self::fail_with(&self.seasons_error)?;
        Ok(self.season_states.clone())
    }

    fn update_season(&self, season: &SeasonState) -> Result<(), CatalogError> {
        self.record(Call::UpdateSeason {
            season_number: season.season_number,
            monitored: season.monitored,
        });

        if self.fail_update_at == Some(season.season_number) {
            return Err(CatalogError::Transport {
                service: self.kind,
                message: "HTTP 500 Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

/// A movie released in 1982 with a short overview
pub fn movie(id: ExternalId, title: &str) -> MovieRecord {
    MovieRecord {
        external_id: id,
        title: title.to_string(),
        year: Some(1982),
        overview: Some(format!("Overview of {}", title)),
    }
}

/// A series premiering in 2015 with ten episodes per listed season
pub fn series(id: ExternalId, title: &str, seasons: &[u32]) -> SeriesRecord {
    SeriesRecord {
        external_id: id,
        title: title.to_string(),
        year: Some(2015),
        overview: None,
        seasons: seasons
            .iter()
            .map(|&season_number| SeasonSummary {
                season_number,
                episode_count: Some(10),
                monitored: true,
            })
            .collect(),
        details: SeriesDetails::default(),
    }
}

pub fn season_state(season_number: u32, monitored: bool) -> SeasonState {
    SeasonState {
        season_number,
        monitored,
        other: serde_json::Map::new(),
    }
}
