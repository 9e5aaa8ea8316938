//! Place specifiers and their encoding into provider query-string fragments.

use crate::request::error::RequestError;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use openweather::LatLon;
///
/// let berlin_center = LatLon(52.5200, 13.4050);
/// assert_eq!(berlin_center.0, 52.5200); // Latitude
/// assert_eq!(berlin_center.1, 13.4050); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// A place specifier for weather lookups.
///
/// Exactly one variant is active per call. Validation happens when the query
/// is encoded, before any network activity: empty place names, empty id lists
/// and non-finite coordinates are all rejected with
/// [`RequestError::InvalidQuery`].
///
/// # Examples
///
/// ```
/// use openweather::{LatLon, Query};
///
/// let by_name = Query::place("Berlin,DE");
/// let by_zip = Query::place("zip:10115,DE"); // becomes a zip query
/// let by_id = Query::Id(2950159);
/// let by_coord = Query::Coordinates(LatLon(52.52, 13.40));
/// # let _ = (by_name, by_zip, by_id, by_coord);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// A free-form place name, e.g. `"London"` or `"Berlin,DE"`.
    City(String),
    /// A single provider-assigned city id.
    Id(u64),
    /// Several city ids, queried in one request.
    Ids(Vec<u64>),
    /// A latitude/longitude pair.
    Coordinates(LatLon),
    /// A postal code, optionally qualified with a country code.
    Zip {
        /// The postal code itself.
        code: String,
        /// Optional ISO country code, e.g. `"DE"`.
        country: Option<String>,
    },
}

impl Query {
    /// Builds a query from free-form text.
    ///
    /// Text starting with the literal prefix `zip:` is treated as a postal
    /// code (the prefix is stripped); any other text is a place name. This
    /// mirrors the encoder's dispatch precedence: a zip query never falls
    /// through to a `q=` lookup.
    pub fn place(text: &str) -> Self {
        match text.strip_prefix("zip:") {
            Some(rest) => Query::Zip {
                code: rest.to_string(),
                country: None,
            },
            None => Query::City(text.to_string()),
        }
    }

    /// Shorthand for [`Query::Coordinates`].
    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Query::Coordinates(LatLon(lat, lon))
    }

    /// Encodes the specifier into a query-string fragment.
    ///
    /// Dispatch precedence, first match wins: coordinates (`lat=..&lon=..`),
    /// id list (`id=1,2,3`), single id (`id=..`), zip (`zip=..`), place name
    /// (`q=..`). The encoder is pure; the same query always yields the same
    /// fragment.
    pub(crate) fn encode(&self) -> Result<String, RequestError> {
        match self {
            Query::Coordinates(LatLon(lat, lon)) => {
                if !lat.is_finite() || !lon.is_finite() {
                    return Err(RequestError::InvalidQuery(format!(
                        "coordinates must be finite numbers, got {lat},{lon}"
                    )));
                }
                Ok(format!("lat={lat}&lon={lon}"))
            }
            Query::Ids(ids) => {
                if ids.is_empty() {
                    return Err(RequestError::InvalidQuery(
                        "the id list is empty".to_string(),
                    ));
                }
                let joined = ids
                    .iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                Ok(format!("id={joined}"))
            }
            Query::Id(id) => Ok(format!("id={id}")),
            Query::Zip { code, country } => {
                if code.trim().is_empty() {
                    return Err(RequestError::InvalidQuery(
                        "the zip code is empty".to_string(),
                    ));
                }
                let value = match country {
                    Some(country) => format!("{code},{country}"),
                    None => code.clone(),
                };
                Ok(format!("zip={}", urlencoding::encode(&value)))
            }
            Query::City(name) => {
                if name.trim().is_empty() {
                    return Err(RequestError::InvalidQuery(
                        "the place name is empty".to_string(),
                    ));
                }
                Ok(format!("q={}", urlencoding::encode(name)))
            }
        }
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Query::place(text)
    }
}

impl From<u64> for Query {
    fn from(id: u64) -> Self {
        Query::Id(id)
    }
}

impl From<Vec<u64>> for Query {
    fn from(ids: Vec<u64>) -> Self {
        Query::Ids(ids)
    }
}

impl From<LatLon> for Query {
    fn from(coordinates: LatLon) -> Self {
        Query::Coordinates(coordinates)
    }
}
