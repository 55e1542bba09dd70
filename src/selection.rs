//! Selection state codec
//!
//! A chat message offers no place to keep workflow progress between two user
//! actions. The only thing that survives the round trip is the identifier
//! attached to each control, so the progress of a selection is encoded into
//! that identifier and decoded again when the control fires.
//!
//! Identifiers are `:`-separated fields:
//!
//! - `movie-results`, `series-results` for the result menus
//! - `movie-add`, `series-add` for confirm buttons that are still disabled
//! - `movie-add:<id>` to confirm a movie
//! - `series-season:<id>` for the season menu of a series
//! - `series-add:<id>:all` or `series-add:<id>:season:<n>` to confirm a series

use crate::catalog::ExternalId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MOVIE_RESULTS: &str = "movie-results";
const MOVIE_ADD: &str = "movie-add";
const SERIES_RESULTS: &str = "series-results";
const SERIES_SEASON: &str = "series-season";
const SERIES_ADD: &str = "series-add";

const DELIMITER: char = ':';
const ALL_TOKEN: &str = "all";
const SEASON_TOKEN: &str = "season";

/// Errors that can occur while decoding identifiers or option values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The control identifier does not follow the identifier grammar
    #[error("Malformed control identifier: {0:?}")]
    MalformedIdentifier(String),

    /// A select option value could not be interpreted
    #[error("Malformed option value: {0:?}")]
    MalformedValue(String),

    /// A select interaction arrived without any chosen value
    #[error("Select interaction carried no value")]
    MissingValue,
}

/// Which seasons of a series the user wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonChoice {
    /// Every season of the series
    All,
    /// A single season (0 are the specials)
    Season(u32),
}

impl fmt::Display for SeasonChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeasonChoice::All => f.write_str(ALL_TOKEN),
            SeasonChoice::Season(number) => write!(f, "{SEASON_TOKEN}{DELIMITER}{number}"),
        }
    }
}

impl FromStr for SeasonChoice {
    type Err = SelectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = value.split(DELIMITER).collect();
        parse_season_fields(&fields)
            .ok_or_else(|| SelectionError::MalformedValue(value.to_string()))
    }
}

/// A movie the user has picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieSelection {
    pub external_id: ExternalId,
}

/// A series plus the season scope the user has picked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSelection {
    pub external_id: ExternalId,
    pub season: SeasonChoice,
}

/// The identifier of an interactive control, decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentId {
    /// Menu listing movie search results
    MovieResults,
    /// Movie confirm button before anything was picked
    PendingMovieAdd,
    /// Movie confirm button bound to a picked movie
    MovieAdd(MovieSelection),
    /// Menu listing series search results
    SeriesResults,
    /// Series confirm button before a season scope was picked
    PendingSeriesAdd,
    /// Season menu of a picked series
    SeasonSelect { external_id: ExternalId },
    /// Series confirm button bound to a series and season scope
    SeriesAdd(SeriesSelection),
}

impl ComponentId {
    /// Encodes this control into its identifier string
    pub fn encode(&self) -> String {
        match self {
            ComponentId::MovieResults => MOVIE_RESULTS.to_string(),
            ComponentId::PendingMovieAdd => MOVIE_ADD.to_string(),
            ComponentId::MovieAdd(selection) => {
                format!("{MOVIE_ADD}{DELIMITER}{}", selection.external_id)
            }
            ComponentId::SeriesResults => SERIES_RESULTS.to_string(),
            ComponentId::PendingSeriesAdd => SERIES_ADD.to_string(),
            ComponentId::SeasonSelect { external_id } => {
                format!("{SERIES_SEASON}{DELIMITER}{external_id}")
            }
            ComponentId::SeriesAdd(selection) => format!(
                "{SERIES_ADD}{DELIMITER}{}{DELIMITER}{}",
                selection.external_id, selection.season
            ),
        }
    }

    /// Decodes an identifier string
    ///
    /// Anything that does not match the grammar exactly is rejected with
    /// `SelectionError::MalformedIdentifier`.
    pub fn decode(identifier: &str) -> Result<Self, SelectionError> {
        let malformed = || SelectionError::MalformedIdentifier(identifier.to_string());
        let fields: Vec<&str> = identifier.split(DELIMITER).collect();

        let decoded = match fields.as_slice() {
            [MOVIE_RESULTS] => ComponentId::MovieResults,
            [MOVIE_ADD] => ComponentId::PendingMovieAdd,
            [MOVIE_ADD, id] => ComponentId::MovieAdd(MovieSelection {
                external_id: parse_id(id).ok_or_else(malformed)?,
            }),
            [SERIES_RESULTS] => ComponentId::SeriesResults,
            [SERIES_ADD] => ComponentId::PendingSeriesAdd,
            [SERIES_SEASON, id] => ComponentId::SeasonSelect {
                external_id: parse_id(id).ok_or_else(malformed)?,
            },
            [SERIES_ADD, id, season @ ..] => ComponentId::SeriesAdd(SeriesSelection {
                external_id: parse_id(id).ok_or_else(malformed)?,
                season: parse_season_fields(season).ok_or_else(malformed)?,
            }),
            _ => return Err(malformed()),
        };

        Ok(decoded)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Decodes the value of a result-menu option into the external ID it carries
pub fn decode_external_id(value: &str) -> Result<ExternalId, SelectionError> {
    parse_id(value).ok_or_else(|| SelectionError::MalformedValue(value.to_string()))
}

/// Returns the single chosen value of a select interaction
pub fn single_value(values: &[String]) -> Result<&str, SelectionError> {
    values
        .first()
        .map(String::as_str)
        .ok_or(SelectionError::MissingValue)
}

/// Parses an external ID
fn parse_id(field: &str) -> Option<ExternalId> {
    parse_digits(field)
}

/// Parses a number written as plain ASCII digits, without sign or spacing
fn parse_digits<T: FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parses the already split fields of a season token
fn parse_season_fields(fields: &[&str]) -> Option<SeasonChoice> {
    match fields {
        [ALL_TOKEN] => Some(SeasonChoice::All),
        [SEASON_TOKEN, number] => parse_digits(number).map(SeasonChoice::Season),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<ComponentId> {
        vec![
            ComponentId::MovieResults,
            ComponentId::PendingMovieAdd,
            ComponentId::MovieAdd(MovieSelection { external_id: 78 }),
            ComponentId::SeriesResults,
            ComponentId::PendingSeriesAdd,
            ComponentId::SeasonSelect {
                external_id: 81189,
            },
            ComponentId::SeriesAdd(SeriesSelection {
                external_id: 81189,
                season: SeasonChoice::All,
            }),
            ComponentId::SeriesAdd(SeriesSelection {
                external_id: 81189,
                season: SeasonChoice::Season(0),
            }),
            ComponentId::SeriesAdd(SeriesSelection {
                external_id: 0,
                season: SeasonChoice::Season(12),
            }),
        ]
    }

    #[test]
    fn test_decode_reverses_encode() {
        for id in all_variants() {
            assert_eq!(ComponentId::decode(&id.encode()), Ok(id), "{id}");
        }
    }

    #[test]
    fn test_encoded_forms() {
        assert_eq!(
            ComponentId::MovieAdd(MovieSelection { external_id: 78 }).encode(),
            "movie-add:78"
        );
        assert_eq!(
            ComponentId::SeasonSelect { external_id: 5 }.encode(),
            "series-season:5"
        );
        assert_eq!(
            ComponentId::SeriesAdd(SeriesSelection {
                external_id: 5,
                season: SeasonChoice::Season(3)
            })
            .encode(),
            "series-add:5:season:3"
        );
        assert_eq!(
            ComponentId::SeriesAdd(SeriesSelection {
                external_id: 5,
                season: SeasonChoice::All
            })
            .encode(),
            "series-add:5:all"
        );
    }

    #[test]
    fn test_decode_rejects_malformed_identifiers() {
        let inputs = [
            "",
            ":",
            "movie-add:",
            "movie-add:abc",
            "movie-add:-1",
            "movie-add:+7",
            "movie-add:7:all",
            "movie-results:7",
            "series-season:",
            "series-season:5:all",
            "series-add:5",
            "series-add:5:",
            "series-add:5:season",
            "series-add:5:season:",
            "series-add:5:season:x",
            "series-add:5:season:3:4",
            "series-add:5:all:extra",
            "series-add::all",
            "download_movie_78",
            "unknown:5",
            "movie-add:99999999999999999999999",
        ];

        for input in inputs {
            assert!(
                matches!(
                    ComponentId::decode(input),
                    Err(SelectionError::MalformedIdentifier(_))
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_season_choice_tokens() {
        assert_eq!("all".parse::<SeasonChoice>(), Ok(SeasonChoice::All));
        assert_eq!("season:0".parse::<SeasonChoice>(), Ok(SeasonChoice::Season(0)));
        assert_eq!("season:3".parse::<SeasonChoice>(), Ok(SeasonChoice::Season(3)));
        assert_eq!(SeasonChoice::Season(3).to_string(), "season:3");
        assert!("season_3".parse::<SeasonChoice>().is_err());
        assert!("ALL".parse::<SeasonChoice>().is_err());
        assert!("season:-1".parse::<SeasonChoice>().is_err());
    }

    #[test]
    fn test_option_values() {
        assert_eq!(decode_external_id("603"), Ok(603));
        assert!(decode_external_id("tt0083658").is_err());
        assert_eq!(single_value(&["603".to_string()]), Ok("603"));
        assert_eq!(single_value(&[]), Err(SelectionError::MissingValue));
    }
}
