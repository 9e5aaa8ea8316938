//! Current weather conditions and the value objects shared by every
//! weather result: city, sun times, temperature and wind.
//!
//! The private `*Xml`/`*Json` structs mirror the provider's two response
//! shapes for the same data; hydration into the domain structs is a plain
//! field copy with optional-field defaults.

use crate::request::query::LatLon;
use crate::types::into_utc::IntoUtcDateTime;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// The place a weather result belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    /// The provider-assigned city id, 0 when the response carries none.
    pub id: u64,
    pub name: String,
    pub coordinates: Option<LatLon>,
    /// ISO country code, e.g. `"GB"`.
    pub country: Option<String>,
    pub sun: Option<Sun>,
}

/// Sunrise and sunset, in UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sun {
    pub rise: DateTime<Utc>,
    pub set: DateTime<Utc>,
}

/// A temperature reading with the optional spread the provider reports.
///
/// Values are in the unit system the request asked for; no local conversion
/// happens in this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct Temperature {
    pub value: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// The unit label from the response, when one was given (XML only).
    pub unit: Option<String>,
}

/// Wind speed and direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Wind {
    pub speed: Option<f64>,
    /// Human-readable speed description, e.g. `"Gentle Breeze"` (XML only).
    pub speed_name: Option<String>,
    pub direction_degrees: Option<f64>,
    /// Compass code, e.g. `"WSW"` (XML only).
    pub direction_code: Option<String>,
}

/// Current weather conditions for a single place.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub city: City,
    pub temperature: Temperature,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Pressure in hPa.
    pub pressure: Option<f64>,
    pub wind: Option<Wind>,
    /// Cloud cover in percent.
    pub cloud_cover: Option<f64>,
    /// Visibility in meters.
    pub visibility: Option<f64>,
    /// Precipitation volume over the reporting window.
    pub precipitation: Option<f64>,
    /// What fell, e.g. `"rain"` or `"snow"`.
    pub precipitation_kind: Option<String>,
    /// Condition description in the requested language.
    pub description: String,
    /// The provider's numeric condition id.
    pub condition_id: Option<i64>,
    /// Icon identifier, e.g. `"09d"`.
    pub icon: Option<String>,
    /// When the provider last refreshed this reading.
    pub last_update: Option<DateTime<Utc>>,
}

/// Current conditions for several cities, fetched in one request.
///
/// The backing list is materialized at construction; iterating it never
/// consumes it, so re-iteration is always possible.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeatherGroup {
    weather: Vec<CurrentWeather>,
}

impl CurrentWeatherGroup {
    pub fn weather(&self) -> &[CurrentWeather] {
        &self.weather
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CurrentWeather> {
        self.weather.iter()
    }

    pub fn len(&self) -> usize {
        self.weather.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weather.is_empty()
    }
}

impl IntoIterator for CurrentWeatherGroup {
    type Item = CurrentWeather;
    type IntoIter = std::vec::IntoIter<CurrentWeather>;

    fn into_iter(self) -> Self::IntoIter {
        self.weather.into_iter()
    }
}

impl<'a> IntoIterator for &'a CurrentWeatherGroup {
    type Item = &'a CurrentWeather;
    type IntoIter = std::slice::Iter<'a, CurrentWeather>;

    fn into_iter(self) -> Self::IntoIter {
        self.weather.iter()
    }
}

// --- XML envelope ---

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentEnvelope {
    pub city: CityXml,
    pub temperature: TemperatureXml,
    pub humidity: Option<ValueXml>,
    pub pressure: Option<ValueXml>,
    pub wind: Option<WindXml>,
    pub clouds: Option<CloudsXml>,
    pub visibility: Option<ValueXml>,
    pub precipitation: Option<PrecipitationXml>,
    pub weather: ConditionXml,
    pub lastupdate: Option<StampXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CityXml {
    pub id: u64,
    pub name: String,
    pub coord: CoordXml,
    pub country: Option<String>,
    pub sun: Option<SunXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoordXml {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SunXml {
    pub rise: String,
    pub set: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TemperatureXml {
    pub value: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValueXml {
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindXml {
    pub speed: Option<SpeedXml>,
    pub direction: Option<DirectionXml>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpeedXml {
    pub value: f64,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectionXml {
    pub value: Option<f64>,
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CloudsXml {
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrecipitationXml {
    pub value: Option<f64>,
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionXml {
    pub number: Option<i64>,
    pub value: String,
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StampXml {
    pub value: String,
}

/// Parses the provider's unqualified ISO-8601 stamps, which are UTC.
pub(crate) fn parse_naive_stamp(stamp: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(IntoUtcDateTime::into_utc)
}

impl Sun {
    pub(crate) fn from_xml(sun: &SunXml) -> Option<Sun> {
        Some(Sun {
            rise: parse_naive_stamp(&sun.rise)?,
            set: parse_naive_stamp(&sun.set)?,
        })
    }

    fn from_timestamps(rise: Option<i64>, set: Option<i64>) -> Option<Sun> {
        Some(Sun {
            rise: DateTime::from_timestamp(rise?, 0)?,
            set: DateTime::from_timestamp(set?, 0)?,
        })
    }
}

impl Wind {
    pub(crate) fn from_xml(wind: WindXml) -> Wind {
        Wind {
            speed: wind.speed.as_ref().map(|s| s.value),
            speed_name: wind.speed.and_then(|s| s.name),
            direction_degrees: wind.direction.as_ref().and_then(|d| d.value),
            direction_code: wind.direction.and_then(|d| d.code),
        }
    }

    pub(crate) fn from_json(wind: WindJson) -> Wind {
        Wind {
            speed: wind.speed,
            speed_name: None,
            direction_degrees: wind.deg,
            direction_code: None,
        }
    }
}

impl CurrentWeather {
    pub(crate) fn from_xml(envelope: CurrentEnvelope) -> Self {
        let city = City {
            id: envelope.city.id,
            name: envelope.city.name,
            coordinates: Some(LatLon(envelope.city.coord.lat, envelope.city.coord.lon)),
            country: envelope.city.country,
            sun: envelope.city.sun.as_ref().and_then(Sun::from_xml),
        };
        let (precipitation, precipitation_kind) = match envelope.precipitation {
            Some(p) => (p.value, p.mode.filter(|mode| mode != "no")),
            None => (None, None),
        };
        CurrentWeather {
            city,
            temperature: Temperature {
                value: envelope.temperature.value,
                min: envelope.temperature.min,
                max: envelope.temperature.max,
                unit: envelope.temperature.unit,
            },
            humidity: envelope.humidity.map(|v| v.value),
            pressure: envelope.pressure.map(|v| v.value),
            wind: envelope.wind.map(Wind::from_xml),
            cloud_cover: envelope.clouds.map(|c| c.value),
            visibility: envelope.visibility.map(|v| v.value),
            precipitation,
            precipitation_kind,
            description: envelope.weather.value,
            condition_id: envelope.weather.number,
            icon: envelope.weather.icon,
            last_update: envelope
                .lastupdate
                .and_then(|stamp| parse_naive_stamp(&stamp.value)),
        }
    }

    pub(crate) fn from_json(entry: CurrentJson) -> Self {
        let sys = entry.sys.unwrap_or_default();
        let city = City {
            id: entry.id.unwrap_or(0),
            name: entry.name.unwrap_or_default(),
            coordinates: entry.coord.map(|c| LatLon(c.lat, c.lon)),
            country: sys.country,
            sun: Sun::from_timestamps(sys.sunrise, sys.sunset),
        };
        let (precipitation, precipitation_kind) = precipitation_from_json(entry.rain, entry.snow);
        let condition = entry.weather.into_iter().next();
        CurrentWeather {
            city,
            temperature: Temperature {
                value: entry.main.temp,
                min: entry.main.temp_min,
                max: entry.main.temp_max,
                unit: None,
            },
            humidity: entry.main.humidity,
            pressure: entry.main.pressure,
            wind: entry.wind.map(Wind::from_json),
            cloud_cover: entry.clouds.and_then(|c| c.all),
            visibility: entry.visibility,
            precipitation,
            precipitation_kind,
            description: condition
                .as_ref()
                .map(|c| c.description.clone())
                .unwrap_or_default(),
            condition_id: condition.as_ref().and_then(|c| c.id),
            icon: condition.and_then(|c| c.icon),
            last_update: DateTime::from_timestamp(entry.dt, 0),
        }
    }
}

impl CurrentWeatherGroup {
    pub(crate) fn from_json(envelope: GroupEnvelope) -> Self {
        CurrentWeatherGroup {
            weather: envelope
                .list
                .into_iter()
                .map(CurrentWeather::from_json)
                .collect(),
        }
    }
}

// --- JSON envelope, shared with the history types ---

#[derive(Debug, Deserialize)]
pub(crate) struct GroupEnvelope {
    #[serde(default)]
    pub list: Vec<CurrentJson>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentJson {
    #[serde(default)]
    pub coord: Option<CoordJson>,
    #[serde(default)]
    pub weather: Vec<ConditionJson>,
    pub main: MainJson,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub wind: Option<WindJson>,
    #[serde(default)]
    pub clouds: Option<CloudsJson>,
    #[serde(default)]
    pub rain: Option<VolumeJson>,
    #[serde(default)]
    pub snow: Option<VolumeJson>,
    pub dt: i64,
    #[serde(default)]
    pub sys: Option<SysJson>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoordJson {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionJson {
    #[serde(default)]
    pub id: Option<i64>,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainJson {
    pub temp: f64,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindJson {
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CloudsJson {
    #[serde(default)]
    pub all: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VolumeJson {
    #[serde(rename = "3h", default)]
    pub three_hours: Option<f64>,
    #[serde(rename = "1h", default)]
    pub one_hour: Option<f64>,
}

impl VolumeJson {
    fn amount(&self) -> Option<f64> {
        self.three_hours.or(self.one_hour)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SysJson {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

pub(crate) fn precipitation_from_json(
    rain: Option<VolumeJson>,
    snow: Option<VolumeJson>,
) -> (Option<f64>, Option<String>) {
    if let Some(volume) = rain.as_ref().and_then(VolumeJson::amount) {
        return (Some(volume), Some("rain".to_string()));
    }
    if let Some(volume) = snow.as_ref().and_then(VolumeJson::amount) {
        return (Some(volume), Some("snow".to_string()));
    }
    (None, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::parser::parse_xml;
    use chrono::TimeZone;

    const CURRENT_XML: &str = r#"<current>
        <city id="2643743" name="London">
            <coord lon="-0.13" lat="51.51"/>
            <country>GB</country>
            <sun rise="2017-01-30T07:40:36" set="2017-01-30T16:47:56"/>
        </city>
        <temperature value="280.15" min="278.15" max="282.15" unit="kelvin"/>
        <humidity value="81" unit="%"/>
        <pressure value="1012" unit="hPa"/>
        <wind>
            <speed value="4.1" unit="m/s" name="Gentle Breeze"/>
            <gusts/>
            <direction value="80" code="E" name="East"/>
        </wind>
        <clouds value="90" name="overcast clouds"/>
        <visibility value="10000"/>
        <precipitation mode="no"/>
        <weather number="701" value="mist" icon="50d"/>
        <lastupdate value="2017-01-30T15:50:00"/>
    </current>"#;

    #[test]
    fn hydrates_from_the_xml_shape() {
        let envelope: CurrentEnvelope = parse_xml(CURRENT_XML).unwrap();
        let weather = CurrentWeather::from_xml(envelope);

        assert_eq!(weather.city.id, 2643743);
        assert_eq!(weather.city.name, "London");
        assert_eq!(weather.city.coordinates, Some(LatLon(51.51, -0.13)));
        assert_eq!(weather.city.country.as_deref(), Some("GB"));
        let sun = weather.city.sun.unwrap();
        assert_eq!(sun.rise, Utc.with_ymd_and_hms(2017, 1, 30, 7, 40, 36).unwrap());
        assert_eq!(weather.temperature.value, 280.15);
        assert_eq!(weather.temperature.unit.as_deref(), Some("kelvin"));
        assert_eq!(weather.humidity, Some(81.0));
        assert_eq!(weather.pressure, Some(1012.0));
        let wind = weather.wind.unwrap();
        assert_eq!(wind.speed, Some(4.1));
        assert_eq!(wind.direction_code.as_deref(), Some("E"));
        assert_eq!(weather.cloud_cover, Some(90.0));
        assert_eq!(weather.visibility, Some(10000.0));
        assert_eq!(weather.precipitation, None);
        assert_eq!(weather.precipitation_kind, None);
        assert_eq!(weather.description, "mist");
        assert_eq!(weather.condition_id, Some(701));
        assert_eq!(
            weather.last_update,
            Some(Utc.with_ymd_and_hms(2017, 1, 30, 15, 50, 0).unwrap())
        );
    }

    #[test]
    fn hydrates_from_the_json_shape() {
        let body = r#"{
            "coord": {"lon": -0.13, "lat": 51.51},
            "weather": [{"id": 300, "main": "Drizzle", "description": "light intensity drizzle", "icon": "09d"}],
            "main": {"temp": 280.32, "temp_min": 279.15, "temp_max": 281.15, "pressure": 1012, "humidity": 81},
            "visibility": 10000,
            "wind": {"speed": 4.1, "deg": 80},
            "clouds": {"all": 90},
            "rain": {"3h": 0.3},
            "dt": 1485789600,
            "sys": {"country": "GB", "sunrise": 1485762037, "sunset": 1485794875},
            "id": 2643743,
            "name": "London"
        }"#;
        let entry: CurrentJson = serde_json::from_str(body).unwrap();
        let weather = CurrentWeather::from_json(entry);

        assert_eq!(weather.city.id, 2643743);
        assert_eq!(weather.city.country.as_deref(), Some("GB"));
        assert!(weather.city.sun.is_some());
        assert_eq!(weather.temperature.value, 280.32);
        assert_eq!(weather.precipitation, Some(0.3));
        assert_eq!(weather.precipitation_kind.as_deref(), Some("rain"));
        assert_eq!(weather.description, "light intensity drizzle");
        assert_eq!(
            weather.last_update,
            Some(Utc.with_ymd_and_hms(2017, 1, 30, 15, 20, 0).unwrap())
        );
    }

    #[test]
    fn group_hydration_keeps_every_entry_in_order() {
        let body = r#"{"cnt": 2, "list": [
            {"main": {"temp": 10.0}, "dt": 1485789600, "id": 1, "name": "A"},
            {"main": {"temp": 12.0}, "dt": 1485789600, "id": 2, "name": "B"}
        ]}"#;
        let envelope: GroupEnvelope = serde_json::from_str(body).unwrap();
        let group = CurrentWeatherGroup::from_json(envelope);

        assert_eq!(group.len(), 2);
        let names: Vec<_> = group.iter().map(|w| w.city.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        // Re-iteration works; the backing list is retained.
        assert_eq!(group.iter().count(), 2);
    }
}
