/// Resolution of a season choice into series monitoring.
///
/// The series add call only understands a handful of monitoring presets. A
/// single season other than the first cannot be expressed at add time, so the
/// series is added unmonitored and every season is updated afterwards.
use crate::catalog::{MonitorPolicy, SeasonState};
use crate::selection::SeasonChoice;

/// How a season choice is carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorPlan {
    /// Preset sent with the add call
    pub policy: MonitorPolicy,
    /// Season to monitor exclusively once the series exists, if any
    pub isolate_season: Option<u32>,
}

impl MonitorPlan {
    /// Resolves a season choice.
    ///
    /// Specials fall back to monitoring everything: the add call has no
    /// preset for them, and the user can narrow monitoring later.
    pub fn resolve(choice: SeasonChoice) -> Self {
        match choice {
            SeasonChoice::All | SeasonChoice::Season(0) => Self {
                policy: MonitorPolicy::All,
                isolate_season: None,
            },
            SeasonChoice::Season(1) => Self {
                policy: MonitorPolicy::FirstSeason,
                isolate_season: None,
            },
            SeasonChoice::Season(number) => Self {
                policy: MonitorPolicy::None,
                isolate_season: Some(number),
            },
        }
    }
}

/// Describes a season choice for the user
pub fn scope_label(choice: SeasonChoice) -> String {
    match choice {
        SeasonChoice::All => "All seasons".to_string(),
        SeasonChoice::Season(0) => "Specials".to_string(),
        SeasonChoice::Season(number) => format!("Season {}", number),
    }
}

/// Sets every season to monitored iff it is the `target` season
pub fn isolate_season(seasons: Vec<SeasonState>, target: u32) -> Vec<SeasonState> {
    seasons
        .into_iter()
        .map(|mut season| {
            season.monitored = season.season_number == target;
            season
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(number: u32, monitored: bool) -> SeasonState {
        SeasonState {
            season_number: number,
            monitored,
            other: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_resolve() {
        assert_eq!(MonitorPlan::resolve(SeasonChoice::All).policy, MonitorPolicy::All);
        assert_eq!(
            MonitorPlan::resolve(SeasonChoice::Season(1)),
            MonitorPlan {
                policy: MonitorPolicy::FirstSeason,
                isolate_season: None
            }
        );
        assert_eq!(
            MonitorPlan::resolve(SeasonChoice::Season(0)),
            MonitorPlan {
                policy: MonitorPolicy::All,
                isolate_season: None
            }
        );
        assert_eq!(
            MonitorPlan::resolve(SeasonChoice::Season(5)),
            MonitorPlan {
                policy: MonitorPolicy::None,
                isolate_season: Some(5)
            }
        );
    }

    #[test]
    fn test_scope_label() {
        assert_eq!(scope_label(SeasonChoice::All), "All seasons");
        assert_eq!(scope_label(SeasonChoice::Season(0)), "Specials");
        assert_eq!(scope_label(SeasonChoice::Season(1)), "Season 1");
        assert_eq!(scope_label(SeasonChoice::Season(12)), "Season 12");
    }

    #[test]
    fn test_isolate_season() {
        let seasons = vec![state(0, true), state(1, true), state(5, false), state(6, true)];

        let updated = isolate_season(seasons, 5);

        let flags: Vec<(u32, bool)> = updated
            .iter()
            .map(|s| (s.season_number, s.monitored))
            .collect();
        assert_eq!(flags, vec![(0, false), (1, false), (5, true), (6, false)]);
    }
}
