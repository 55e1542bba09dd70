//! Selection workflow
//!
//! This module drives a user from a search to an item added to the library.
//! Movies go through `search → pick → confirm`, series through
//! `search → pick series → pick seasons → confirm`. No step keeps state of its
//! own: progress travels in the control identifiers (see `selection`) and the
//! search records wait in a `ResultCache` until they are confirmed.

mod monitor;
mod movie;
mod render;
mod series;

#[cfg(test)]
pub(crate) mod fakes;

pub use monitor::MonitorPlan;
pub use movie::MovieWorkflow;
pub use series::SeriesWorkflow;

use crate::catalog::{CatalogError, CatalogKind, CatalogService, ExternalId, FolderRef, ProfileRef};
use crate::selection::SelectionError;
use crate::ui::{ActionRow, Reply};
use thiserror::Error;

/// Number of search hits offered for selection
pub const MAX_RESULTS: usize = 10;

/// Errors and non-success outcomes of a workflow step.
///
/// Every variant has its own user-facing message, see `user_message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The search returned nothing; a valid outcome rather than a failure
    #[error("No {kind} results for {query:?}")]
    NotFoundEmpty { kind: CatalogKind, query: String },

    /// The selected ID is no longer in the result cache
    #[error("{kind} selection {external_id} is not cached")]
    StaleSelection {
        kind: CatalogKind,
        external_id: ExternalId,
    },

    /// A control identifier or option value could not be decoded
    #[error("Malformed selection state: {0}")]
    MalformedState(#[from] SelectionError),

    /// A confirm control was used before anything was picked
    #[error("{0} confirmation used before a selection was made")]
    NothingSelected(CatalogKind),

    /// The library manager has no quality profile configured
    #[error("No quality profiles found in {0}")]
    NoProfileAvailable(CatalogKind),

    /// The library manager has no root folder configured
    #[error("No root folders found in {0}")]
    NoRootFolderAvailable(CatalogKind),

    /// The item is already part of the library
    #[error("Item already exists in {service}: {message}")]
    AlreadyExists {
        service: CatalogKind,
        message: String,
    },

    /// The library manager rejected the credentials
    #[error("{service} rejected the credentials (HTTP {status})")]
    Unauthorized { service: CatalogKind, status: u16 },

    /// The library manager could not be reached
    #[error("{service} is unreachable: {detail}")]
    BackendUnreachable {
        service: CatalogKind,
        detail: String,
    },

    /// The library manager answered with something unreadable
    #[error("{service} sent an unreadable response: {detail}")]
    UnexpectedResponse {
        service: CatalogKind,
        detail: String,
    },
}

impl From<CatalogError> for WorkflowError {
    fn from(error: CatalogError) -> Self {
        let detail = error.to_string();
        match error {
            CatalogError::Unauthorized { service, status } => {
                WorkflowError::Unauthorized { service, status }
            }
            CatalogError::NotFound { service, .. } | CatalogError::Transport { service, .. } => {
                WorkflowError::BackendUnreachable { service, detail }
            }
            CatalogError::Conflict { service, message } => {
                WorkflowError::AlreadyExists { service, message }
            }
            CatalogError::Malformed { service, message } => WorkflowError::UnexpectedResponse {
                service,
                detail: message,
            },
        }
    }
}

impl WorkflowError {
    /// False for outcomes that are answers rather than failures
    pub fn is_failure(&self) -> bool {
        !matches!(self, WorkflowError::NotFoundEmpty { .. })
    }

    /// The message shown to the user
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::NotFoundEmpty { kind, query } => match kind {
                CatalogKind::Movie => format!("No movies found for \"{}\"", query),
                CatalogKind::Series => format!("No TV shows found for \"{}\"", query),
            },
            WorkflowError::StaleSelection { kind, .. } => match kind {
                CatalogKind::Movie => {
                    "❌ Movie not found in cache. Please search again.".to_string()
                }
                CatalogKind::Series => {
                    "❌ Series not found in cache. Please search again.".to_string()
                }
            },
            WorkflowError::MalformedState(_) => {
                "❌ This selection could not be read. Please search again.".to_string()
            }
            WorkflowError::NothingSelected(kind) => match kind {
                CatalogKind::Movie => "Pick a movie from the list first.".to_string(),
                CatalogKind::Series => "Pick a show and its seasons first.".to_string(),
            },
            WorkflowError::NoProfileAvailable(service) => {
                format!("❌ No quality profiles found in {}", service)
            }
            WorkflowError::NoRootFolderAvailable(service) => {
                format!("❌ No root folders found in {}", service)
            }
            WorkflowError::AlreadyExists { service, .. } => match service {
                CatalogKind::Movie => {
                    format!("⚠️ This movie is already in your {} library", service)
                }
                CatalogKind::Series => {
                    format!("⚠️ This TV series is already in your {} library", service)
                }
            },
            WorkflowError::Unauthorized { service, .. } => {
                format!("❌ Unauthorized - check your {} API key", service)
            }
            WorkflowError::BackendUnreachable { service, detail } => {
                format!("❌ {} instance not reachable - check your URL: {}", service, detail)
            }
            WorkflowError::UnexpectedResponse { service, detail } => {
                format!("❌ {} sent a response that could not be read: {}", service, detail)
            }
        }
    }
}

/// What was added, with the operator choices that were applied
#[derive(Debug, Clone, PartialEq)]
pub struct AddSummary {
    pub title: String,
    pub year: Option<i32>,
    pub profile_name: String,
    pub folder_path: String,
    /// Human readable season scope, series only
    pub scope: Option<String>,
}

/// Terminal outcome of a confirmed selection
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The movie was added and a search started
    MovieAdded { summary: AddSummary },
    /// The series was added with the requested monitoring
    SeriesAdded { summary: AddSummary },
    /// The series was added, but restricting monitoring to the chosen season
    /// failed part way; some seasons may already be updated
    SeriesAddedMonitoringIncomplete {
        summary: AddSummary,
        reason: CatalogError,
    },
}

impl AddOutcome {
    pub fn summary(&self) -> &AddSummary {
        match self {
            AddOutcome::MovieAdded { summary }
            | AddOutcome::SeriesAdded { summary }
            | AddOutcome::SeriesAddedMonitoringIncomplete { summary, .. } => summary,
        }
    }

    /// Renders the outcome as a private reply
    pub fn to_reply(&self) -> Reply {
        render::outcome(self)
    }
}

/// A select menu or button interaction as delivered by the chat front-end
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInteraction {
    /// Identifier of the control that fired
    pub custom_id: String,
    /// Chosen option values (select menus only)
    pub values: Vec<String>,
    /// Controls currently shown on the message the interaction belongs to
    pub message_components: Vec<ActionRow>,
}

/// Picks the first quality profile and the first root folder.
///
/// Both are read fresh on every add, since the operator may have changed them.
fn operator_defaults<C>(catalog: &C) -> Result<(ProfileRef, FolderRef), WorkflowError>
where
    C: CatalogService + ?Sized,
{
    let kind = catalog.kind();

    let profile = catalog
        .quality_profiles()?
        .into_iter()
        .next()
        .ok_or(WorkflowError::NoProfileAvailable(kind))?;

    let folder = catalog
        .root_folders()?
        .into_iter()
        .next()
        .ok_or(WorkflowError::NoRootFolderAvailable(kind))?;

    Ok((profile, folder))
}
