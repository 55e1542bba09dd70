/// Radarr movie catalog client.
use super::radarr_types::RadarrMovie;
use super::transport::ArrTransport;
use super::{
    AddMovieRequest, CatalogError, CatalogKind, CatalogService, FolderRef, MovieCatalog,
    MovieRecord, ProfileRef, SystemStatus,
};
use crate::config::Config;

/// Client for the Radarr v3 API.
///
/// Talks to the instance configured in `Config::radarr`, adding the API key
/// and, if configured, the access-gateway token to every request.
pub struct RadarrClient {
    transport: ArrTransport,
}

impl RadarrClient {
    /// Creates a new Radarr client from the connection configuration.
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        Ok(Self {
            transport: ArrTransport::new(
                CatalogKind::Movie,
                &config.radarr,
                config.access.as_ref(),
                config.timeout,
            )?,
        })
    }
}

impl CatalogService for RadarrClient {
    fn kind(&self) -> CatalogKind {
        CatalogKind::Movie
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

impl MovieCatalog for RadarrClient {
    fn search_movies(&self, term: &str) -> Result<Vec<MovieRecord>, CatalogError> {
        let hits: Vec<RadarrMovie> = self
            .transport
            .get_json("/api/v3/movie/lookup", &[("term", term)])?;

        Ok(hits.into_iter().filter_map(RadarrMovie::into_record).collect())
    }

    fn add_movie(&self, request: &AddMovieRequest) -> Result<(), CatalogError> {
        self.transport.post("/api/v3/movie", request)
    }
}
