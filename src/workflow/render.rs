/// Rendering of listings, option lists and outcomes into replies.
use super::{AddOutcome, AddSummary};
use crate::catalog::{CatalogKind, CatalogRecord, SeasonSummary};
use crate::selection::{ComponentId, SeasonChoice};
use crate::ui::{
    ActionRow, Button, ButtonStyle, COLOR_INFO, COLOR_SUCCESS, COLOR_WARNING, Component, Embed,
    Reply, SelectMenu, SelectOption, truncate_chars,
};

/// Number of overview characters shown per listing entry
const OVERVIEW_EXCERPT_CHARS: usize = 100;

/// Renders a search listing.
///
/// `shown` holds the hits offered for selection, `total` the number of hits
/// the catalog returned.
pub(super) fn listing<R: CatalogRecord>(
    kind: CatalogKind,
    query: &str,
    total: usize,
    shown: &[R],
) -> Reply {
    let (title, noun, placeholder, results_id, pending_id) = match kind {
        CatalogKind::Movie => (
            format!("🎬 Movie Search Results for \"{}\"", query),
            "movies",
            "Select a movie to download",
            ComponentId::MovieResults,
            ComponentId::PendingMovieAdd,
        ),
        CatalogKind::Series => (
            format!("📺 TV Show Search Results for \"{}\"", query),
            "shows",
            "Select a TV show to download",
            ComponentId::SeriesResults,
            ComponentId::PendingSeriesAdd,
        ),
    };

    let mut embed = Embed::new(title, COLOR_INFO).description(format!(
        "Found {} {} (showing first {})",
        total,
        noun,
        shown.len()
    ));

    for (index, record) in shown.iter().enumerate() {
        embed = embed.field(
            format!("{}. {}", index + 1, record_label(record)),
            format!(
                "**{} ID:** {}\n**Overview:** {}",
                kind.id_label(),
                record.external_id(),
                overview_excerpt(record.overview())
            ),
            false,
        );
    }

    let options = shown
        .iter()
        .map(|record| {
            SelectOption::new(
                record_label(record),
                format!("{}: {}", kind.id_label(), record.external_id()),
                record.external_id().to_string(),
            )
        })
        .collect();

    let menu = SelectMenu::new(results_id.encode(), placeholder, options);
    let button =
        Button::new(pending_id.encode(), confirm_label(kind), ButtonStyle::Primary).disabled();

    Reply::listing(
        embed,
        vec![
            ActionRow::single(Component::Select(menu)),
            ActionRow::single(Component::Button(button)),
        ],
    )
}

/// The button that triggers the add, bound to `id`
pub(super) fn confirm_button(kind: CatalogKind, id: &ComponentId) -> Button {
    Button::new(id.encode(), confirm_label(kind), ButtonStyle::Success)
}

fn confirm_label(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Movie => "📥 Download Selected Movie",
        CatalogKind::Series => "📥 Download Selected Seasons",
    }
}

/// Options of the season menu, "All Seasons" first.
///
/// A series without known seasons still gets a "Season 1" option so that it
/// can be added.
pub(super) fn season_options(seasons: &[SeasonSummary]) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new(
        "📺 All Seasons",
        "Download all available seasons",
        SeasonChoice::All.to_string(),
    )];

    if seasons.is_empty() {
        options.push(SelectOption::new(
            "Season 1",
            "First season",
            SeasonChoice::Season(1).to_string(),
        ));
        return options;
    }

    options.extend(seasons.iter().map(|season| {
        let label = match season.season_number {
            0 => "Specials".to_string(),
            number => format!("Season {}", number),
        };
        let episodes = season
            .episode_count
            .map(|count| count.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        SelectOption::new(
            label,
            format!("Episodes: {}", episodes),
            SeasonChoice::Season(season.season_number).to_string(),
        )
    }));

    options
}

/// Copies the select menu in row `row` of the message, echoing the picked
/// option in its placeholder.
///
/// Returns `None` if the message did not carry such a menu; the update then
/// only contains the rows that follow.
pub(super) fn echo_selection(
    components: &[ActionRow],
    row: usize,
    value: &str,
    fallback_label: &str,
) -> Option<ActionRow> {
    let menu = components.get(row)?.select_menu()?;
    let label = menu.label_for(value).unwrap_or(fallback_label);

    Some(ActionRow::single(Component::Select(
        menu.with_placeholder(format!("Selected: {}", label)),
    )))
}

/// Renders a terminal add outcome
pub(super) fn outcome(outcome: &AddOutcome) -> Reply {
    let embed = match outcome {
        AddOutcome::MovieAdded { summary } => summary_fields(
            Embed::new("✅ Movie Added Successfully", COLOR_SUCCESS)
                .description(added_description(summary, "Radarr")),
            summary,
        ),
        AddOutcome::SeriesAdded { summary } => summary_fields(
            Embed::new("📺 TV Series Added Successfully", COLOR_SUCCESS)
                .description(added_description(summary, "Sonarr")),
            summary,
        ),
        AddOutcome::SeriesAddedMonitoringIncomplete { summary, reason } => summary_fields(
            Embed::new("⚠️ TV Series Added, Monitoring Incomplete", COLOR_WARNING)
                .description(format!(
                    "{}, but limiting monitoring to {} failed: {}\nSome seasons may still be \
                     monitored. Adjust them in Sonarr.",
                    added_description(summary, "Sonarr"),
                    summary.scope.as_deref().unwrap_or("the chosen season"),
                    reason
                )),
            summary,
        ),
    };

    Reply::ephemeral_embed(embed)
}

fn added_description(summary: &AddSummary, service: &str) -> String {
    format!(
        "**{} ({})** has been added to {}",
        summary.title,
        year_text(summary.year),
        service
    )
}

fn summary_fields(embed: Embed, summary: &AddSummary) -> Embed {
    let mut embed = embed
        .field("Quality Profile", summary.profile_name.as_str(), true)
        .field("Root Folder", summary.folder_path.as_str(), true);

    if let Some(scope) = &summary.scope {
        embed = embed.field("Seasons", scope.as_str(), true);
    }

    embed.field("Auto Search", "Enabled", true)
}

/// "Title (Year)", the label used in listings and menus
fn record_label<R: CatalogRecord>(record: &R) -> String {
    format!("{} ({})", record.title(), year_text(record.year()))
}

fn year_text(year: Option<i32>) -> String {
    year.map(|y| y.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn overview_excerpt(overview: Option<&str>) -> String {
    match overview {
        Some(text) => format!("{}...", truncate_chars(text, OVERVIEW_EXCERPT_CHARS)),
        None => "No overview available".to_string(),
    }
}
