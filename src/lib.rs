//! arr_request - Request movies and TV shows for Radarr and Sonarr from a chat
//!
//! This library implements the selection workflow behind chat commands such
//! as `/movies <query>` and `/tvshows <query>`: search the library manager,
//! let the user pick a hit (and, for series, the seasons to monitor) through
//! interactive controls, and add the pick to the library.
//!
//! The entry point is [`RequestDesk`], which turns an [`Interaction`] into a
//! [`Reply`]. The chat front-end only has to render replies and hand control
//! identifiers back unchanged.

mod cache;
mod catalog;
mod config;
mod selection;
mod ui;
mod workflow;

pub use cache::ResultCache;
pub use catalog::{
    AddMovieRequest, AddSeriesRequest, AddedSeries, CatalogError, CatalogKind, CatalogRecord,
    CatalogService, ExternalId, FolderRef, MonitorPolicy, MovieCatalog, MovieRecord, ProfileRef,
    RadarrClient, SeasonState, SeasonSummary, SeriesCatalog, SeriesDetails, SeriesRecord,
    SonarrClient, SystemStatus,
};
pub use config::{AccessCredentials, Config, ConfigError, ConnectionArgs, ServiceConfig};
pub use selection::{ComponentId, MovieSelection, SeasonChoice, SelectionError, SeriesSelection};
pub use ui::{
    ActionRow, Button, ButtonStyle, Component, Embed, EmbedField, Reply, ReplyMode, SelectMenu,
    SelectOption,
};
pub use workflow::{
    AddOutcome, AddSummary, ComponentInteraction, MonitorPlan, MovieWorkflow, SeriesWorkflow,
    WorkflowError,
};

use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Top-level error type for setting up a `RequestDesk`
#[derive(Debug, Error)]
pub enum ArrRequestError {
    /// The connection configuration is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A catalog client could not be created
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Something the user did in the chat
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// A slash command with its free-text argument
    Command { name: String, query: String },
    /// A select menu pick or button press
    Component(ComponentInteraction),
}

/// Result of checking one library manager at start-up
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionReport {
    pub kind: CatalogKind,
    pub status: Result<SystemStatus, CatalogError>,
}

impl ConnectionReport {
    pub fn is_connected(&self) -> bool {
        self.status.is_ok()
    }
}

impl fmt::Display for ConnectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            Ok(status) => write!(
                f,
                "✓ {} connected: {} v{}",
                self.kind, status.app_name, status.version
            ),
            Err(error) => write!(f, "✗ {} connection failed: {}", self.kind, error),
        }
    }
}

/// Routes interactions to the movie and series workflows.
///
/// The desk owns both workflows and with them the result caches, so it should
/// live as long as the chat connection does.
pub struct RequestDesk<M, S> {
    movies: MovieWorkflow<M>,
    series: SeriesWorkflow<S>,
}

impl RequestDesk<RadarrClient, SonarrClient> {
    /// Creates a desk talking to the Radarr and Sonarr instances in `config`
    pub fn connect(config: &Config) -> Result<Self, ArrRequestError> {
        Ok(Self::new(
            RadarrClient::new(config)?,
            SonarrClient::new(config)?,
        ))
    }
}

impl<M: MovieCatalog, S: SeriesCatalog> RequestDesk<M, S> {
    pub fn new(movies: M, series: S) -> Self {
        Self {
            movies: MovieWorkflow::new(movies),
            series: SeriesWorkflow::new(series),
        }
    }

    pub fn movies(&self) -> &MovieWorkflow<M> {
        &self.movies
    }

    pub fn series(&self) -> &SeriesWorkflow<S> {
        &self.series
    }

    /// Handles one interaction and returns the reply to show.
    ///
    /// Never fails: workflow errors are turned into user-facing messages, an
    /// empty search as a normal message and everything else privately.
    pub fn handle(&self, interaction: &Interaction) -> Reply {
        match self.route(interaction) {
            Ok(reply) => reply,
            Err(error) if !error.is_failure() => Reply::message(error.user_message()),
            Err(error) => {
                warn!(error = %error, "Interaction failed");
                Reply::ephemeral(error.user_message())
            }
        }
    }

    /// Asks both library managers for their version
    pub fn check_connections(&self) -> Vec<ConnectionReport> {
        vec![
            ConnectionReport {
                kind: self.movies.catalog().kind(),
                status: self.movies.catalog().system_status(),
            },
            ConnectionReport {
                kind: self.series.catalog().kind(),
                status: self.series.catalog().system_status(),
            },
        ]
    }

    fn route(&self, interaction: &Interaction) -> Result<Reply, WorkflowError> {
        let component = match interaction {
            Interaction::Command { name, query } => return self.command(name, query),
            Interaction::Component(component) => component,
        };

        let id = ComponentId::decode(&component.custom_id)?;
        debug!(custom_id = %component.custom_id, "Routing component interaction");

        match id {
            ComponentId::MovieResults => self.movies.choose(component),
            ComponentId::PendingMovieAdd => Err(WorkflowError::NothingSelected(CatalogKind::Movie)),
            ComponentId::MovieAdd(selection) => {
                self.movies.confirm(selection).map(|outcome| outcome.to_reply())
            }
            ComponentId::SeriesResults => self.series.choose_series(component),
            ComponentId::PendingSeriesAdd => {
                Err(WorkflowError::NothingSelected(CatalogKind::Series))
            }
            ComponentId::SeasonSelect { external_id } => {
                self.series.choose_season(external_id, component)
            }
            ComponentId::SeriesAdd(selection) => {
                self.series.confirm(selection).map(|outcome| outcome.to_reply())
            }
        }
    }

    fn command(&self, name: &str, query: &str) -> Result<Reply, WorkflowError> {
        debug!(name, query, "Routing command");

        match name {
            "movies" => self.movies.search(query),
            "tvshows" => self.series.search(query),
            "ping" => Ok(Reply::message("pong")),
            other => Ok(Reply::ephemeral(format!("Unknown command: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::fakes::{FakeCatalog, movie, series};

    fn desk() -> RequestDesk<FakeCatalog, FakeCatalog> {
        RequestDesk::new(
            FakeCatalog::movies(vec![movie(78, "Blade Runner")]),
            FakeCatalog::series(vec![series(280619, "The Expanse", &[1, 2, 3])]),
        )
    }

    fn command(name: &str, query: &str) -> Interaction {
        Interaction::Command {
            name: name.to_string(),
            query: query.to_string(),
        }
    }

    fn component(custom_id: &str, values: &[&str], reply: &Reply) -> Interaction {
        Interaction::Component(ComponentInteraction {
            custom_id: custom_id.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
            message_components: reply.components.clone(),
        })
    }

    #[test]
    fn test_ping() {
        let reply = desk().handle(&command("ping", ""));
        assert_eq!(reply.mode, ReplyMode::Message);
        assert_eq!(reply.content.as_deref(), Some("pong"));
    }

    #[test]
    fn test_unknown_command() {
        let reply = desk().handle(&command("music", "abba"));
        assert_eq!(reply.mode, ReplyMode::Ephemeral);
        assert_eq!(reply.content.as_deref(), Some("Unknown command: music"));
    }

    #[test]
    fn test_empty_search_is_public() {
        let desk = RequestDesk::new(
            FakeCatalog::movies(Vec::new()),
            FakeCatalog::series(Vec::new()),
        );

        let reply = desk.handle(&command("tvshows", "nothing"));

        assert_eq!(reply.mode, ReplyMode::Message);
        assert_eq!(
            reply.content.as_deref(),
            Some("No TV shows found for \"nothing\"")
        );
    }

    #[test]
    fn test_malformed_identifier() {
        let reply = desk().handle(&component("movie-add:abc", &[], &Reply::message("")));
        assert_eq!(reply.mode, ReplyMode::Ephemeral);
        assert_eq!(
            reply.content.as_deref(),
            Some("❌ This selection could not be read. Please search again.")
        );
    }

    #[test]
    fn test_pending_button() {
        let reply = desk().handle(&component("series-add", &[], &Reply::message("")));
        assert_eq!(reply.mode, ReplyMode::Ephemeral);
        assert_eq!(
            reply.content.as_deref(),
            Some("Pick a show and its seasons first.")
        );
    }

    #[test]
    fn test_movie_flow() {
        let desk = desk();

        let listing = desk.handle(&command("movies", "blade runner"));
        assert_eq!(listing.mode, ReplyMode::Message);

        let picked = desk.handle(&component("movie-results", &["78"], &listing));
        assert_eq!(picked.mode, ReplyMode::Update);
        let confirm = picked.components[1].0[0].custom_id().to_string();

        let added = desk.handle(&component(&confirm, &[], &picked));
        assert_eq!(added.mode, ReplyMode::Ephemeral);
        assert_eq!(added.embeds[0].title, "✅ Movie Added Successfully");
        assert_eq!(desk.movies().catalog().added_movies().len(), 1);
    }

    #[test]
    fn test_series_flow() {
        let desk = desk();

        let listing = desk.handle(&command("tvshows", "expanse"));
        let picked = desk.handle(&component("series-results", &["280619"], &listing));
        let seasons = picked.components[1].0[0].custom_id().to_string();
        assert_eq!(seasons, "series-season:280619");

        let scoped = desk.handle(&component(&seasons, &["all"], &picked));
        let confirm = scoped.components[2].0[0].custom_id().to_string();
        assert_eq!(confirm, "series-add:280619:all");

        let added = desk.handle(&component(&confirm, &[], &scoped));
        assert_eq!(added.embeds[0].title, "📺 TV Series Added Successfully");
        assert_eq!(desk.series().catalog().added_series().len(), 1);
    }

    #[test]
    fn test_stale_confirmation() {
        let stale = component("series-add:280619:season:2", &[], &Reply::message(""));
        let reply = desk().handle(&stale);
        assert_eq!(reply.mode, ReplyMode::Ephemeral);
        assert_eq!(
            reply.content.as_deref(),
            Some("❌ Series not found in cache. Please search again.")
        );
    }

    #[test]
    fn test_check_connections() {
        let desk = RequestDesk::new(
            FakeCatalog::movies(Vec::new()),
            FakeCatalog::series(Vec::new()).failing_status(CatalogError::Unauthorized {
                service: CatalogKind::Series,
                status: 401,
            }),
        );

        let reports = desk.check_connections();

        assert!(reports[0].is_connected());
        assert_eq!(reports[0].to_string(), "✓ Radarr connected: Radarr v5.2.6");
        assert!(!reports[1].is_connected());
        assert_eq!(
            reports[1].to_string(),
            "✗ Sonarr connection failed: Sonarr rejected the request credentials (HTTP 401)"
        );
    }
}
