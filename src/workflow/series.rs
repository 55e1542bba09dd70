/// Series path: `search → pick series → pick seasons → confirm`.
use super::monitor::{MonitorPlan, isolate_season, scope_label};
use super::{
    AddOutcome, AddSummary, ComponentInteraction, MAX_RESULTS, WorkflowError, operator_defaults,
    render,
};
use crate::cache::ResultCache;
use crate::catalog::{
    AddSeriesRequest, CatalogError, CatalogKind, ExternalId, FolderRef, MonitorPolicy,
    ProfileRef, SeasonPayload, SeriesAddOptions, SeriesCatalog, SeriesRecord,
};
use crate::selection::{
    ComponentId, SeasonChoice, SeriesSelection, decode_external_id, single_value,
};
use crate::ui::{ActionRow, Component, Reply, SelectMenu};
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_STATUS: &str = "continuing";
const DEFAULT_SERIES_TYPE: &str = "standard";

/// Drives the series selection workflow against a series catalog.
pub struct SeriesWorkflow<C> {
    catalog: C,
    cache: ResultCache<SeriesRecord>,
}

impl<C: SeriesCatalog> SeriesWorkflow<C> {
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

    /// Searches for series and renders the first hits as a listing.
    pub fn search(&self, query: &str) -> Result<Reply, WorkflowError> {
        debug!(query, "Searching series");

        let hits = self.catalog.search_series(query)?;
        if hits.is_empty() {
            return Err(WorkflowError::NotFoundEmpty {
                kind: CatalogKind::Series,
                query: query.to_string(),
            });
        }

        let total = hits.len();
        let shown: Vec<SeriesRecord> = hits.into_iter().take(MAX_RESULTS).collect();
        for record in &shown {
            self.cache.put(record.external_id, record.clone());
        }

        debug!(total, shown = shown.len(), "Series search complete");
        Ok(render::listing(CatalogKind::Series, query, total, &shown))
    }

    /// Handles a pick in the results menu by offering the series' seasons.
    pub fn choose_series(
        &self,
        interaction: &ComponentInteraction,
    ) -> Result<Reply, WorkflowError> {
        let value = single_value(&interaction.values)?;
        let external_id = decode_external_id(value)?;
        let record = self.cached(external_id)?;
        debug!(external_id, seasons = record.seasons.len(), "Series picked");

        let menu = SelectMenu::new(
            ComponentId::SeasonSelect { external_id }.encode(),
            "Select seasons to download",
            render::season_options(&record.seasons),
        );

        let mut rows: Vec<ActionRow> =
            render::echo_selection(&interaction.message_components, 0, value, &record.title)
                .into_iter()
                .collect();
        rows.push(ActionRow::single(Component::Select(menu)));

        Ok(Reply::update(rows))
    }

    /// Handles a pick in the season menu by enabling the confirm button.
    pub fn choose_season(
        &self,
        external_id: ExternalId,
        interaction: &ComponentInteraction,
    ) -> Result<Reply, WorkflowError> {
        let value = single_value(&interaction.values)?;
        let season: SeasonChoice = value.parse()?;
        self.cached(external_id)?;
        debug!(external_id, %season, "Season scope picked");

        let confirm = ComponentId::SeriesAdd(SeriesSelection {
            external_id,
            season,
        });

        let mut rows: Vec<ActionRow> = interaction
            .message_components
            .first()
            .cloned()
            .into_iter()
            .collect();
        rows.extend(render::echo_selection(
            &interaction.message_components,
            1,
            value,
            &scope_label(season),
        ));
        rows.push(ActionRow::single(Component::Button(render::confirm_button(
            CatalogKind::Series,
            &confirm,
        ))));

        Ok(Reply::update(rows))
    }

    /// Adds the picked series and restricts monitoring to the chosen scope.
    ///
    /// A failure after the add call succeeded does not fail the confirmation;
    /// it is reported as `AddOutcome::SeriesAddedMonitoringIncomplete`.
    pub fn confirm(&self, selection: SeriesSelection) -> Result<AddOutcome, WorkflowError> {
        let record = self.cached(selection.external_id)?;
        let (profile, folder) = operator_defaults(&self.catalog)?;

        let plan = MonitorPlan::resolve(selection.season);
        let request = build_request(&record, &profile, &folder, plan.policy);
        let series_id = self.catalog.add_series(&request)?.map(|added| added.id);

        info!(
            title = %record.title,
            profile = %profile.name,
            folder = %folder.path,
            monitor = plan.policy.as_str(),
            series_id = ?series_id,
            "Series added"
        );

        let summary = AddSummary {
            title: record.title.clone(),
            year: record.year,
            profile_name: profile.name,
            folder_path: folder.path,
            scope: Some(scope_label(selection.season)),
        };

        let Some(target) = plan.isolate_season else {
            return Ok(AddOutcome::SeriesAdded { summary });
        };

        let restricted = match series_id {
            Some(series_id) => self.monitor_only(series_id, target),
            None => Err(CatalogError::Malformed {
                service: CatalogKind::Series,
                message: "add response carried no series id".to_string(),
            }),
        };

        match restricted {
            Ok(()) => Ok(AddOutcome::SeriesAdded { summary }),
            Err(reason) => {
                warn!(
                    title = %summary.title,
                    season = target,
                    error = %reason,
                    "Series added but monitoring could not be restricted"
                );
                Ok(AddOutcome::SeriesAddedMonitoringIncomplete { summary, reason })
            }
        }
    }

    /// Updates every season of an added series so that only `target` stays
    /// monitored. Seasons are written one at a time and the first failure
    /// stops the pass.
    fn monitor_only(&self, series_id: i64, target: u32) -> Result<(), CatalogError> {
        let seasons = self.catalog.seasons(series_id)?;

        for season in isolate_season(seasons, target) {
            debug!(
                series_id,
                season = season.season_number,
                monitored = season.monitored,
                "Updating season monitoring"
            );
            self.catalog.update_season(&season)?;
        }

        Ok(())
    }

    fn cached(&self, external_id: ExternalId) -> Result<Arc<SeriesRecord>, WorkflowError> {
        self.cache.get(external_id).ok_or_else(|| {
            warn!(external_id, "Series selection no longer cached");
            WorkflowError::StaleSelection {
                kind: CatalogKind::Series,
                external_id,
            }
        })
    }
}

/// Builds the add payload from the cached lookup record and the operator
/// defaults. Fields the lookup did not provide get neutral defaults.
fn build_request(
    record: &SeriesRecord,
    profile: &ProfileRef,
    folder: &FolderRef,
    monitor: MonitorPolicy,
) -> AddSeriesRequest {
    let details = &record.details;
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    AddSeriesRequest {
        title: record.title.clone(),
        sort_title: details
            .sort_title
            .clone()
            .unwrap_or_else(|| record.title.clone()),
        status: details
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        overview: record.overview.clone().unwrap_or_default(),
        network: text(&details.network),
        air_time: text(&details.air_time),
        images: details.images.clone(),
        seasons: record
            .seasons
            .iter()
            .map(|season| SeasonPayload {
                season_number: season.season_number,
                monitored: season.monitored,
            })
            .collect(),
        year: record.year.unwrap_or(0),
        path: series_path(&folder.path, &record.title),
        quality_profile_id: profile.id,
        season_folder: true,
        monitored: true,
        use_scene_numbering: false,
        runtime: details.runtime.unwrap_or(0),
        tvdb_id: record.external_id,
        tv_rage_id: details.tv_rage_id.unwrap_or(0),
        tv_maze_id: details.tv_maze_id.unwrap_or(0),
        tmdb_id: details.tmdb_id.unwrap_or(0),
        first_aired: details.first_aired.clone(),
        last_aired: details.last_aired.clone(),
        series_type: details
            .series_type
            .clone()
            .unwrap_or_else(|| DEFAULT_SERIES_TYPE.to_string()),
        clean_title: details
            .clean_title
            .clone()
            .unwrap_or_else(|| record.title.clone()),
        imdb_id: text(&details.imdb_id),
        title_slug: text(&details.title_slug),
        root_folder_path: folder.path.clone(),
        certification: text(&details.certification),
        genres: details.genres.clone(),
        tags: Vec::new(),
        add_options: SeriesAddOptions {
            ignore_episodes_with_files: false,
            ignore_episodes_without_files: false,
            monitor,
            search_for_missing_episodes: true,
            search_for_cutoff_unmet_episodes: false,
        },
    }
}

/// Joins the root folder and the series title into the series directory.
///
/// Path separators in the title are replaced so that the series always ends
/// up directly below the root folder.
fn series_path(root: &str, title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();

    format!(
        "{}/{}",
        root.trim_end_matches('/'),
        name.trim_matches(|c: char| c.is_whitespace() || c == '.')
    )
}
