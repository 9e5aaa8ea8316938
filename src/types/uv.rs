//! UV index results.

use crate::request::query::LatLon;
use crate::types::into_utc::IntoUtcDateTime;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A UV index reading for a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct UvIndex {
    pub coordinates: LatLon,
    /// The instant the reading applies to, when the provider reports one.
    pub time: Option<DateTime<Utc>>,
    /// The index value itself, e.g. `10.06`.
    pub value: f64,
}

impl UvIndex {
    pub(crate) fn from_json(envelope: UvEnvelope) -> Self {
        let time = envelope
            .date
            .and_then(|unix| DateTime::from_timestamp(unix, 0))
            .or_else(|| {
                envelope
                    .date_iso
                    .as_deref()
                    .and_then(|iso| DateTime::parse_from_rfc3339(iso).ok())
                    .map(IntoUtcDateTime::into_utc)
            });
        UvIndex {
            coordinates: LatLon(envelope.lat, envelope.lon),
            time,
            value: envelope.value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UvEnvelope {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(default)]
    pub date_iso: Option<String>,
    pub value: f64,
}
