/// Movie path: `search → pick → confirm`.
use super::{
    AddOutcome, AddSummary, ComponentInteraction, MAX_RESULTS, WorkflowError, operator_defaults,
    render,
};
use crate::cache::ResultCache;
use crate::catalog::{
    AddMovieRequest, CatalogKind, FolderRef, MovieAddOptions, MovieCatalog, MovieRecord,
    ProfileRef,
};
use crate::selection::{ComponentId, MovieSelection, decode_external_id, single_value};
use crate::ui::{ActionRow, Component, Reply};
use tracing::{debug, info, warn};

/// Availability stage from which Radarr may grab a release
const MINIMUM_AVAILABILITY: &str = "announced";

/// Drives the movie selection workflow against a movie catalog.
pub struct MovieWorkflow<C> {
    catalog: C,
    cache: ResultCache<MovieRecord>,
}

impl<C: MovieCatalog> MovieWorkflow<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            cache: ResultCache::new(),
        }
    }

    /// The catalog this workflow talks to
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Searches for movies and renders the first hits as a listing.
    ///
    /// The shown hits are cached so that a later confirmation can find them.
    pub fn search(&self, query: &str) -> Result<Reply, WorkflowError> {
        debug!(query, "Searching movies");

        let hits = self.catalog.search_movies(query)?;
        if hits.is_empty() {
            return Err(WorkflowError::NotFoundEmpty {
                kind: CatalogKind::Movie,
                query: query.to_string(),
            });
        }

        let total = hits.len();
        let shown: Vec<MovieRecord> = hits.into_iter().take(MAX_RESULTS).collect();
        for record in &shown {
            self.cache.put(record.external_id, record.clone());
        }

        debug!(total, shown = shown.len(), "Movie search complete");
        Ok(render::listing(CatalogKind::Movie, query, total, &shown))
    }

    /// Handles a pick in the results menu by enabling the confirm button.
    pub fn choose(&self, interaction: &ComponentInteraction) -> Result<Reply, WorkflowError> {
        let value = single_value(&interaction.values)?;
        let external_id = decode_external_id(value)?;
        debug!(external_id, "Movie picked");

        let confirm = ComponentId::MovieAdd(MovieSelection { external_id });
        let mut rows: Vec<ActionRow> =
            render::echo_selection(&interaction.message_components, 0, value, value)
                .into_iter()
                .collect();
        rows.push(ActionRow::single(Component::Button(render::confirm_button(
            CatalogKind::Movie,
            &confirm,
        ))));

        Ok(Reply::update(rows))
    }

    /// Adds the picked movie to the library and starts a search for it.
    pub fn confirm(&self, selection: MovieSelection) -> Result<AddOutcome, WorkflowError> {
        let external_id = selection.external_id;
        let record = self.cache.get(external_id).ok_or_else(|| {
            warn!(external_id, "Movie selection no longer cached");
            WorkflowError::StaleSelection {
                kind: CatalogKind::Movie,
                external_id,
            }
        })?;

        let (profile, folder) = operator_defaults(&self.catalog)?;
        let request = build_request(&record, &profile, &folder);
        self.catalog.add_movie(&request)?;

        info!(
            title = %record.title,
            profile = %profile.name,
            folder = %folder.path,
            "Movie added"
        );

        Ok(AddOutcome::MovieAdded {
            summary: AddSummary {
                title: record.title.clone(),
                year: record.year,
                profile_name: profile.name,
                folder_path: folder.path,
                scope: None,
            },
        })
    }
}

fn build_request(
    record: &MovieRecord,
    profile: &ProfileRef,
    folder: &FolderRef,
) -> AddMovieRequest {
    AddMovieRequest {
        title: record.title.clone(),
        year: record.year.unwrap_or(0),
        tmdb_id: record.external_id,
        quality_profile_id: profile.id,
        root_folder_path: folder.path.clone(),
        monitored: true,
        minimum_availability: MINIMUM_AVAILABILITY.to_string(),
        add_options: MovieAddOptions {
            search_for_movie: true,
        },
    }
}
