//! Endpoint templates and request URL composition.
//!
//! The endpoint paths are stable provider contracts; everything else about a
//! URL (query fragment, formatting options, credential, endpoint-specific
//! suffixes) is composed here.

use crate::request::error::RequestError;
use crate::request::query::LatLon;
use crate::types::params::{HistoryGranularity, HistoryRange, Mode, Units};
use chrono::{DateTime, Utc};

pub(crate) const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub(crate) const WEATHER_GROUP_URL: &str = "https://api.openweathermap.org/data/2.5/group";
pub(crate) const HOURLY_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";
pub(crate) const DAILY_FORECAST_URL: &str =
    "https://api.openweathermap.org/data/2.5/forecast/daily";
pub(crate) const HISTORY_URL: &str = "https://history.openweathermap.org/data/2.5/history/city";
pub(crate) const UV_INDEX_URL: &str = "https://api.openweathermap.org/v3/uvi";

/// Composes the common URL form shared by every query-parameter endpoint:
/// `{endpoint}?{fragment}&units=..&lang=..&mode=..&appid=..`.
///
/// The fragment must already be percent-encoded (the query encoder's job).
/// The credential is taken as-is; falling back from an empty per-call
/// override to the stored key happens in the client.
pub(crate) fn build_query_url(
    endpoint: &str,
    fragment: &str,
    units: Units,
    language: &str,
    mode: Mode,
    api_key: &str,
) -> String {
    format!(
        "{endpoint}?{fragment}&units={units}&lang={language}&mode={mode}&appid={api_key}",
        units = units.as_str(),
        mode = mode.as_str(),
    )
}

/// Builds the history-specific suffix: `&type=..&start=..` followed by
/// either `&end=..` (point in time) or `&cnt=..` (positive record count).
pub(crate) fn history_suffix(
    granularity: HistoryGranularity,
    start: DateTime<Utc>,
    range: &HistoryRange,
) -> Result<String, RequestError> {
    let tail = match range {
        HistoryRange::Until(end) => format!("&end={}", end.timestamp()),
        HistoryRange::Count(0) => {
            return Err(RequestError::InvalidArgument(
                "the history record count must be positive".to_string(),
            ))
        }
        HistoryRange::Count(count) => format!("&cnt={count}"),
    };
    Ok(format!(
        "&type={}&start={}{tail}",
        granularity.as_str(),
        start.timestamp()
    ))
}

/// Builds a UV index URL: `{base}/{lat},{lon}/{stamp}.json?appid=..`.
///
/// `stamp` is either the literal `current` or a precision-truncated UTC
/// timestamp produced by [`crate::UvPrecision`].
pub(crate) fn build_uv_url(coordinates: LatLon, stamp: &str, api_key: &str) -> String {
    let LatLon(lat, lon) = coordinates;
    format!("{UV_INDEX_URL}/{lat},{lon}/{stamp}.json?appid={api_key}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn common_url_carries_every_formatting_option() {
        let url = build_query_url(
            WEATHER_URL,
            "q=Berlin",
            Units::Metric,
            "de",
            Mode::Xml,
            "abc123",
        );
        assert_eq!(
            url,
            "https://api.openweathermap.org/data/2.5/weather?q=Berlin&units=metric&lang=de&mode=xml&appid=abc123"
        );
    }

    #[test]
    fn history_suffix_with_end_instant() {
        let start = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2017, 1, 2, 0, 0, 0).unwrap();
        let suffix =
            history_suffix(HistoryGranularity::Hour, start, &HistoryRange::Until(end)).unwrap();
        assert_eq!(suffix, "&type=hour&start=1483228800&end=1483315200");
    }

    #[test]
    fn history_suffix_with_count() {
        let start = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
        let suffix =
            history_suffix(HistoryGranularity::Day, start, &HistoryRange::Count(3)).unwrap();
        assert_eq!(suffix, "&type=day&start=1483228800&cnt=3");
    }

    #[test]
    fn zero_history_count_is_rejected() {
        let start = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
        let err = history_suffix(HistoryGranularity::Tick, start, &HistoryRange::Count(0))
            .unwrap_err();
        assert!(matches!(err, RequestError::InvalidArgument(_)));
    }

    #[test]
    fn uv_url_embeds_coordinates_and_stamp() {
        let url = build_uv_url(LatLon(37.75, -122.37), "current", "k");
        assert_eq!(
            url,
            "https://api.openweathermap.org/v3/uvi/37.75,-122.37/current.json?appid=k"
        );
    }
}
