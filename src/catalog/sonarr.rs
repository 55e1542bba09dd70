/// Sonarr series catalog client.
use super::sonarr_types::SonarrSeries;
use super::transport::ArrTransport;
use super::{
    AddSeriesRequest, AddedSeries, CatalogError, CatalogKind, CatalogService, FolderRef,
    ProfileRef, SeasonState, SeriesCatalog, SeriesRecord, SystemStatus,
};
use crate::config::Config;

/// Client for the Sonarr v3 API.
pub struct SonarrClient {
    transport: ArrTransport,
}

impl SonarrClient {
    /// Creates a new Sonarr client from the connection configuration.
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        Ok(Self {
            transport: ArrTransport::new(
                CatalogKind::Series,
                &config.sonarr,
                config.access.as_ref(),
                config.timeout,
            )?,
        })
    }
}

impl CatalogService for SonarrClient {
    fn kind(&self) -> CatalogKind {
        CatalogKind::Series
    }

    fn quality_profiles(&self) -> Result<Vec<ProfileRef>, CatalogError> {
        self.transport.get_json("/api/v3/qualityprofile", &[])
    }

    fn root_folders(&self) -> Result<Vec<FolderRef>, CatalogError> {
        self.transport.get_json("/api/v3/rootfolder", &[])
    }

    fn system_status(&self) -> Result<SystemStatus, CatalogError> {
        self.transport.get_json("/api/v3/system/status", &[])
    }
}

impl SeriesCatalog for SonarrClient {
    fn search_series(&self, term: &str) -> Result<Vec<SeriesRecord>, CatalogError> {
        let hits: Vec<SonarrSeries> = self
            .transport
            .get_json("/api/v3/series/lookup", &[("term", term)])?;

        Ok(hits.into_iter().filter_map(SonarrSeries::into_record).collect())
    }

    fn add_series(
        &self,
        request: &AddSeriesRequest,
    ) -> Result<Option<AddedSeries>, CatalogError> {
        self.transport.post_json_lenient("/api/v3/series", request)
    }

    fn seasons(&self, series_id: i64) -> Result<Vec<SeasonState>, CatalogError> {
        let series_id = series_id.to_string();
        self.transport
            .get_json("/api/v3/season", &[("seriesId", series_id.as_str())])
    }

    fn update_season(&self, season: &SeasonState) -> Result<(), CatalogError> {
        self.transport.put("/api/v3/season", season)
    }
}
