//! Historical weather records, hydrated from the history endpoint's JSON.

use crate::types::current::{
    precipitation_from_json, CloudsJson, ConditionJson, MainJson, Temperature, VolumeJson, Wind,
    WindJson,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single historical measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPoint {
    /// When the measurement was taken, UTC.
    pub time: DateTime<Utc>,
    pub temperature: Option<Temperature>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind: Option<Wind>,
    pub cloud_cover: Option<f64>,
    pub precipitation: Option<f64>,
    pub precipitation_kind: Option<String>,
    pub description: String,
    pub condition_id: Option<i64>,
    pub icon: Option<String>,
}

/// An ordered run of historical records for one place.
///
/// Points are materialized at construction and retained for the object's
/// lifetime; iterate as often as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherHistory {
    /// The provider-assigned id of the queried city, when reported.
    pub city_id: Option<u64>,
    /// Server-side computation time, as reported by the provider.
    pub calctime: Option<f64>,
    points: Vec<HistoryPoint>,
}

impl WeatherHistory {
    pub(crate) fn from_json(envelope: HistoryEnvelope) -> Self {
        WeatherHistory {
            city_id: envelope.city_id,
            calctime: envelope.calctime,
            points: envelope
                .list
                .into_iter()
                .filter_map(HistoryPoint::from_json)
                .collect(),
        }
    }

    pub fn points(&self) -> &[HistoryPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl IntoIterator for WeatherHistory {
    type Item = HistoryPoint;
    type IntoIter = std::vec::IntoIter<HistoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a WeatherHistory {
    type Item = &'a HistoryPoint;
    type IntoIter = std::slice::Iter<'a, HistoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl HistoryPoint {
    fn from_json(entry: HistoryEntryJson) -> Option<HistoryPoint> {
        let time = DateTime::from_timestamp(entry.dt, 0)?;
        let (precipitation, precipitation_kind) = precipitation_from_json(entry.rain, entry.snow);
        let condition = entry.weather.into_iter().next();
        let main = entry.main;
        Some(HistoryPoint {
            time,
            temperature: main.as_ref().map(|m| Temperature {
                value: m.temp,
                min: m.temp_min,
                max: m.temp_max,
                unit: None,
            }),
            humidity: main.as_ref().and_then(|m| m.humidity),
            pressure: main.and_then(|m| m.pressure),
            wind: entry.wind.map(Wind::from_json),
            cloud_cover: entry.clouds.and_then(|c| c.all),
            precipitation,
            precipitation_kind,
            description: condition
                .as_ref()
                .map(|c| c.description.clone())
                .unwrap_or_default(),
            condition_id: condition.as_ref().and_then(|c| c.id),
            icon: condition.and_then(|c| c.icon),
        })
    }
}

// --- JSON envelope ---

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryEnvelope {
    #[serde(default)]
    pub city_id: Option<u64>,
    #[serde(default)]
    pub calctime: Option<f64>,
    #[serde(default)]
    pub list: Vec<HistoryEntryJson>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryEntryJson {
    pub dt: i64,
    #[serde(default)]
    pub main: Option<MainJson>,
    #[serde(default)]
    pub wind: Option<WindJson>,
    #[serde(default)]
    pub clouds: Option<CloudsJson>,
    #[serde(default)]
    pub rain: Option<VolumeJson>,
    #[serde(default)]
    pub snow: Option<VolumeJson>,
    #[serde(default)]
    pub weather: Vec<ConditionJson>,
}
