//! Request parameter enums: unit systems, response modes, history and UV
//! index options, and how each serializes into the request URL.

use crate::request::error::RequestError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// The unit system the provider should convert measurements to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    /// Celsius, meters per second, and friends.
    Metric,
    /// Fahrenheit and miles per hour. The provider default.
    #[default]
    Imperial,
}

impl Units {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The response format requested from the provider.
///
/// `Html` is pass-through only: it can be requested through the raw-data
/// methods but is never parsed by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Xml,
    Json,
    Html,
}

impl Mode {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Mode::Xml => "xml",
            Mode::Json => "json",
            Mode::Html => "html",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Granularity of historical weather records.
///
/// The provider accepts exactly three values; anything else never reaches
/// the network. Parsing an unknown string fails with
/// [`RequestError::InvalidArgument`]:
///
/// ```
/// use openweather::HistoryGranularity;
///
/// assert!("hour".parse::<HistoryGranularity>().is_ok());
/// assert!("week".parse::<HistoryGranularity>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryGranularity {
    /// Raw measurement ticks.
    Tick,
    /// One record per hour.
    Hour,
    /// One record per day.
    Day,
}

impl HistoryGranularity {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            HistoryGranularity::Tick => "tick",
            HistoryGranularity::Hour => "hour",
            HistoryGranularity::Day => "day",
        }
    }
}

impl fmt::Display for HistoryGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HistoryGranularity {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tick" => Ok(HistoryGranularity::Tick),
            "hour" => Ok(HistoryGranularity::Hour),
            "day" => Ok(HistoryGranularity::Day),
            other => Err(RequestError::InvalidArgument(format!(
                "history granularity must be one of tick, hour, day; got '{other}'"
            ))),
        }
    }
}

/// The end of a history request: either a point in time or a record count.
///
/// Serialized as `end={unix-seconds}` or `cnt={count}`. A zero count is
/// rejected with [`RequestError::InvalidArgument`] before the URL is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HistoryRange {
    /// Records up to this instant.
    Until(DateTime<Utc>),
    /// A fixed number of records from the start of the range.
    Count(u32),
}

/// How much of a timestamp is sent to the point-in-time UV index endpoint.
///
/// Coarser precisions truncate the finer fields: `Month` sends `2017-06`,
/// `Hour` sends `2017-06-26T12`, and so on. Parsing an unknown string fails
/// with [`RequestError::InvalidArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UvPrecision {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl UvPrecision {
    /// Serializes a UTC instant, truncated to this precision, with the
    /// trailing `Z` qualifier the provider requires.
    pub(crate) fn format_stamp(&self, at: DateTime<Utc>) -> String {
        let pattern = match self {
            UvPrecision::Year => "%Y",
            UvPrecision::Month => "%Y-%m",
            UvPrecision::Day => "%Y-%m-%d",
            UvPrecision::Hour => "%Y-%m-%dT%H",
            UvPrecision::Minute => "%Y-%m-%dT%H:%M",
            UvPrecision::Second => "%Y-%m-%dT%H:%M:%S",
        };
        format!("{}Z", at.format(pattern))
    }
}

impl FromStr for UvPrecision {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(UvPrecision::Year),
            "month" => Ok(UvPrecision::Month),
            "day" => Ok(UvPrecision::Day),
            "hour" => Ok(UvPrecision::Hour),
            "minute" => Ok(UvPrecision::Minute),
            "second" => Ok(UvPrecision::Second),
            other => Err(RequestError::InvalidArgument(format!(
                "UV index precision must be one of year, month, day, hour, minute, second; got '{other}'"
            ))),
        }
    }
}
