//! Weather forecasts: an ordered, fully materialized sequence of forecast
//! points, hydrated from the provider's forecast XML.
//!
//! The same envelope covers both forecast flavors: three-hourly points
//! carry `from`/`to` attributes, daily points carry a `day` attribute plus
//! the day/night/morning/evening temperature spread.

use crate::request::query::LatLon;
use crate::types::current::{parse_naive_stamp, City, Sun, SunXml, Temperature, ValueXml, Wind};
use crate::types::into_utc::IntoUtcDateTime;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// A single forecast slot: three hours of an hourly forecast, or one day of
/// a daily forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    /// Start of the slot, UTC.
    pub from: DateTime<Utc>,
    /// End of the slot, UTC.
    pub to: DateTime<Utc>,
    pub temperature: Option<Temperature>,
    /// Daily forecasts only: the morning reading.
    pub morning_temperature: Option<f64>,
    /// Daily forecasts only: the evening reading.
    pub evening_temperature: Option<f64>,
    /// Daily forecasts only: the night reading.
    pub night_temperature: Option<f64>,
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

/// An ordered weather forecast, bounded by the requested day count.
///
/// Points are materialized entirely at construction, so the sequence can be
/// iterated any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherForecast {
    pub city: City,
    pub sun: Option<Sun>,
    points: Vec<ForecastPoint>,
}

impl WeatherForecast {
    /// Hydrates the envelope, keeping at most `max_points` points.
    pub(crate) fn from_xml(envelope: ForecastEnvelope, max_points: usize) -> Self {
        let location = envelope.location;
        let coordinates = location.point.as_ref().and_then(|p| {
            Some(LatLon(p.latitude?, p.longitude?))
        });
        let city = City {
            id: location
                .point
                .and_then(|p| p.geobaseid)
                .unwrap_or(0),
            name: location.name.unwrap_or_default(),
            coordinates,
            country: location.country,
            sun: None,
        };
        let mut points: Vec<ForecastPoint> = envelope
            .forecast
            .times
            .into_iter()
            .filter_map(ForecastPoint::from_xml)
            .collect();
        points.truncate(max_points);
        WeatherForecast {
            city,
            sun: envelope.sun.as_ref().and_then(Sun::from_xml),
            points,
        }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl IntoIterator for WeatherForecast {
    type Item = ForecastPoint;
    type IntoIter = std::vec::IntoIter<ForecastPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a WeatherForecast {
    type Item = &'a ForecastPoint;
    type IntoIter = std::slice::Iter<'a, ForecastPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl ForecastPoint {
    /// Builds a point from one `<time>` element. Points without a resolvable
    /// time span are dropped.
    fn from_xml(time: TimeXml) -> Option<ForecastPoint> {
        let (from, to) = match (&time.from, &time.to, &time.day) {
            (Some(from), Some(to), _) => {
                (parse_naive_stamp(from)?, parse_naive_stamp(to)?)
            }
            (_, _, Some(day)) => {
                let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
                (
                    date.and_hms_opt(0, 0, 0)?.into_utc(),
                    date.and_hms_opt(23, 59, 59)?.into_utc(),
                )
            }
            _ => return None,
        };

        let temperature = time.temperature.as_ref().and_then(|t| {
            let value = t.value.or(t.day)?;
            Some(Temperature {
                value,
                min: t.min,
                max: t.max,
                unit: t.unit.clone(),
            })
        });
        let spread = time.temperature.unwrap_or_default();

        let wind = if time.wind_speed.is_some() || time.wind_direction.is_some() {
            Some(Wind {
                speed: time.wind_speed.as_ref().and_then(|w| w.mps),
                speed_name: time.wind_speed.and_then(|w| w.name),
                direction_degrees: time.wind_direction.as_ref().and_then(|w| w.deg),
                direction_code: time.wind_direction.and_then(|w| w.code),
            })
        } else {
            None
        };

        let symbol = time.symbol.unwrap_or_default();

        Some(ForecastPoint {
            from,
            to,
            temperature,
            morning_temperature: spread.morn,
            evening_temperature: spread.eve,
            night_temperature: spread.night,
            humidity: time.humidity.map(|v| v.value),
            pressure: time.pressure.map(|v| v.value),
            wind,
            cloud_cover: time.clouds.and_then(|c| c.all),
            precipitation: time.precipitation.as_ref().and_then(|p| p.value),
            precipitation_kind: time.precipitation.and_then(|p| p.kind),
            description: symbol.name.unwrap_or_default(),
            condition_id: symbol.number,
            icon: symbol.var,
        })
    }
}

// --- XML envelope ---

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastEnvelope {
    pub location: LocationXml,
    #[serde(default)]
    pub sun: Option<SunXml>,
    pub forecast: ForecastListXml,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocationXml {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// The nested `<location>` element carrying coordinates and the geobase id.
    #[serde(rename = "location", default)]
    pub point: Option<GeoPointXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeoPointXml {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub geobaseid: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastListXml {
    #[serde(rename = "time", default)]
    pub times: Vec<TimeXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimeXml {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub symbol: Option<SymbolXml>,
    #[serde(default)]
    pub precipitation: Option<ForecastPrecipitationXml>,
    #[serde(rename = "windDirection", default)]
    pub wind_direction: Option<WindDirectionXml>,
    #[serde(rename = "windSpeed", default)]
    pub wind_speed: Option<WindSpeedXml>,
    #[serde(default)]
    pub temperature: Option<ForecastTemperatureXml>,
    #[serde(default)]
    pub pressure: Option<ValueXml>,
    #[serde(default)]
    pub humidity: Option<ValueXml>,
    #[serde(default)]
    pub clouds: Option<ForecastCloudsXml>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SymbolXml {
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub var: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastPrecipitationXml {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindDirectionXml {
    #[serde(default)]
    pub deg: Option<f64>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindSpeedXml {
    #[serde(default)]
    pub mps: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ForecastTemperatureXml {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub day: Option<f64>,
    #[serde(default)]
    pub night: Option<f64>,
    #[serde(default)]
    pub eve: Option<f64>,
    #[serde(default)]
    pub morn: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastCloudsXml {
    #[serde(default)]
    pub all: Option<f64>,
}
