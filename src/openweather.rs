//! The main entry point for talking to the weather provider. The
//! [`OpenWeather`] client owns the stored credential, the default
//! formatting options and the injected fetch/cache capabilities, and
//! exposes one pipeline per feature: encode the query, build the URL,
//! resolve through the cache gate, parse the body, hydrate the result.

use crate::error::OpenWeatherError;
use crate::request::error::RequestError;
use crate::request::query::{LatLon, Query};
use crate::request::url;
use crate::response::parser;
use crate::transport::cache::ResponseCache;
use crate::transport::fetch::{Fetch, HttpFetcher};
use crate::transport::gate::CachedFetcher;
use crate::types::current::{
    CurrentEnvelope, CurrentWeather, CurrentWeatherGroup, GroupEnvelope,
};
use crate::types::forecast::{ForecastEnvelope, WeatherForecast};
use crate::types::history::{HistoryEnvelope, WeatherHistory};
use crate::types::into_utc::IntoUtcDateTime;
use crate::types::params::{HistoryGranularity, HistoryRange, Mode, Units, UvPrecision};
use crate::types::uv::{UvEnvelope, UvIndex};
use bon::bon;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Forecasts further out than this are rejected before any network call.
const MAX_FORECAST_DAYS: u32 = 16;
/// Horizons up to this many days are served by the three-hourly endpoint.
const HOURLY_FORECAST_DAYS: u32 = 5;
/// Three-hourly slots per forecast day.
const POINTS_PER_DAY: u32 = 8;
/// The status code a successful history envelope carries.
const HISTORY_SUCCESS_CODE: i64 = 200;

/// The OpenWeatherMap client.
///
/// Construct one with the builder; every option has a sensible default, so
/// the minimal setup is just an API key:
///
/// ```
/// use openweather::OpenWeather;
///
/// let client = OpenWeather::builder()
///     .api_key("my-api-key".to_string())
///     .build();
/// # let _ = client;
/// ```
///
/// The fetch and cache capabilities are injectable, which is how tests
/// substitute canned responses for the network:
///
/// ```
/// use openweather::{MemoryCache, OpenWeather, Units};
/// use std::sync::Arc;
///
/// let client = OpenWeather::builder()
///     .api_key("my-api-key".to_string())
///     .units(Units::Metric)
///     .language("de".to_string())
///     .cache(Arc::new(MemoryCache::new()))
///     .cache_ttl(600)
///     .build();
/// # let _ = client;
/// ```
pub struct OpenWeather {
    api_key: String,
    units: Units,
    language: String,
    fetcher: CachedFetcher,
    served_from_cache: AtomicBool,
}

#[bon]
impl OpenWeather {
    /// Creates a client.
    ///
    /// # Arguments (builder methods)
    ///
    /// * `.api_key(String)`: the stored credential. Defaults to empty; most
    ///   endpoints pass an empty key through and let the provider reject it,
    ///   only the UV index endpoints fail fast locally.
    /// * `.units(Units)`: default unit system, [`Units::Imperial`] if unset.
    /// * `.language(String)`: default language code, `"en"` if unset.
    /// * `.fetcher(Arc<dyn Fetch>)`: the fetch capability. Defaults to the
    ///   reqwest-backed [`HttpFetcher`].
    /// * `.cache(Arc<dyn ResponseCache>)`: optional response cache. Without
    ///   one every call fetches.
    /// * `.cache_ttl(u64)`: freshness window in seconds, 600 if unset. A
    ///   TTL of 0 disables caching even when a cache is configured.
    #[builder]
    pub fn new(
        api_key: Option<String>,
        units: Option<Units>,
        language: Option<String>,
        fetcher: Option<Arc<dyn Fetch>>,
        cache: Option<Arc<dyn ResponseCache>>,
        cache_ttl: Option<u64>,
    ) -> Self {
        let fetcher = fetcher.unwrap_or_else(|| Arc::new(HttpFetcher::new()));
        Self {
            api_key: api_key.unwrap_or_default(),
            units: units.unwrap_or_default(),
            language: language.unwrap_or_else(|| "en".to_string()),
            fetcher: CachedFetcher::new(fetcher, cache, cache_ttl.unwrap_or(600)),
            served_from_cache: AtomicBool::new(false),
        }
    }

    /// The stored API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Replaces the stored API key. It is consulted on every URL build for
    /// which no per-call override is supplied.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Whether the most recently completed call was served from cache.
    ///
    /// Last-call-wins: the flag is overwritten on every call, so with
    /// interleaved concurrent calls it may not reflect your own. Callers
    /// needing per-call provenance must serialize calls.
    pub fn was_cached(&self) -> bool {
        self.served_from_cache.load(Ordering::Relaxed)
    }

    /// Fetches current weather conditions for a place.
    ///
    /// * `.query(Query)`: **Required.** The place specifier.
    /// * `.units(Units)` / `.language(String)` / `.api_key(String)`:
    ///   optional per-call overrides of the client defaults.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use openweather::{OpenWeather, OpenWeatherError, Query, Units};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), OpenWeatherError> {
    /// let client = OpenWeather::builder().api_key("key".to_string()).build();
    /// let weather = client
    ///     .current_weather()
    ///     .query(Query::place("Berlin,DE"))
    ///     .units(Units::Metric)
    ///     .call()
    ///     .await?;
    /// println!("{} {:.1}", weather.city.name, weather.temperature.value);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn current_weather(
        &self,
        query: Query,
        units: Option<Units>,
        language: Option<String>,
        api_key: Option<String>,
    ) -> Result<CurrentWeather, OpenWeatherError> {
        let body = self
            .fetch_endpoint(url::WEATHER_URL, &query, units, language, Mode::Xml, api_key, "")
            .await?;
        let envelope = parser::parse_xml::<CurrentEnvelope>(&body)?;
        Ok(CurrentWeather::from_xml(envelope))
    }

    /// Fetches current conditions for several city ids in one request.
    ///
    /// This endpoint only speaks JSON; units, language and credential
    /// overrides behave like everywhere else.
    #[builder]
    pub async fn current_weather_group(
        &self,
        ids: Vec<u64>,
        units: Option<Units>,
        language: Option<String>,
        api_key: Option<String>,
    ) -> Result<CurrentWeatherGroup, OpenWeatherError> {
        let query = Query::Ids(ids);
        let body = self
            .fetch_endpoint(
                url::WEATHER_GROUP_URL,
                &query,
                units,
                language,
                Mode::Json,
                api_key,
                "",
            )
            .await?;
        let envelope = parser::parse_json_as::<GroupEnvelope>(&body)?;
        Ok(CurrentWeatherGroup::from_json(envelope))
    }

    /// Fetches a forecast for the given horizon.
    ///
    /// Horizons up to 5 days are served by the three-hourly endpoint and
    /// truncated to `days × 8` points; 6 to 16 days use the daily endpoint
    /// (one point per day). Anything above 16 fails with
    /// [`RequestError::InvalidArgument`] before any network call.
    ///
    /// ```no_run
    /// # use openweather::{OpenWeather, OpenWeatherError, Query};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), OpenWeatherError> {
    /// let client = OpenWeather::builder().api_key("key".to_string()).build();
    /// let forecast = client
    ///     .forecast()
    ///     .query(Query::Id(2950159))
    ///     .days(3)
    ///     .call()
    ///     .await?;
    /// for point in &forecast {
    ///     println!("{}: {:?}", point.from, point.temperature);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn forecast(
        &self,
        query: Query,
        days: u32,
        units: Option<Units>,
        language: Option<String>,
        api_key: Option<String>,
    ) -> Result<WeatherForecast, OpenWeatherError> {
        if days > MAX_FORECAST_DAYS {
            return Err(RequestError::InvalidArgument(format!(
                "the forecast horizon is at most {MAX_FORECAST_DAYS} days, got {days}"
            ))
            .into());
        }
        let (endpoint, suffix, max_points) = if days <= HOURLY_FORECAST_DAYS {
            (
                url::HOURLY_FORECAST_URL,
                String::new(),
                (days * POINTS_PER_DAY) as usize,
            )
        } else {
            (url::DAILY_FORECAST_URL, format!("&cnt={days}"), days as usize)
        };
        let body = self
            .fetch_endpoint(endpoint, &query, units, language, Mode::Xml, api_key, &suffix)
            .await?;
        let envelope = parser::parse_xml::<ForecastEnvelope>(&body)?;
        Ok(WeatherForecast::from_xml(envelope, max_points))
    }

    /// Fetches historical records for a place.
    ///
    /// * `.granularity(HistoryGranularity)`: **Required.** Tick, hour or day
    ///   records.
    /// * `.start(DateTime<Utc>)`: **Required.** Beginning of the range.
    /// * `.range(HistoryRange)`: **Required.** Either an end instant or a
    ///   positive record count.
    ///
    /// The history envelope reports a benign `message` on success, so its
    /// status code is checked explicitly; anything but 200 raises the
    /// envelope's own message and code as a provider error.
    #[builder]
    pub async fn weather_history(
        &self,
        query: Query,
        granularity: HistoryGranularity,
        start: DateTime<Utc>,
        range: HistoryRange,
        units: Option<Units>,
        language: Option<String>,
        api_key: Option<String>,
    ) -> Result<WeatherHistory, OpenWeatherError> {
        let body = self
            .raw_history_body(query, granularity, start, range, units, language, api_key)
            .await?;
        let envelope =
            parser::parse_status_json_as::<HistoryEnvelope>(&body, HISTORY_SUCCESS_CODE)?;
        Ok(WeatherHistory::from_json(envelope))
    }

    /// Fetches the current UV index for a coordinate.
    ///
    /// The UV endpoints require a stored API key and fail fast with
    /// [`RequestError::MissingApiKey`] before composing the URL.
    pub async fn current_uv_index(
        &self,
        coordinates: LatLon,
    ) -> Result<UvIndex, OpenWeatherError> {
        let body = self.raw_current_uv_index(coordinates).await?;
        let envelope = parser::parse_json_as::<UvEnvelope>(&body)?;
        Ok(UvIndex::from_json(envelope))
    }

    /// Fetches the UV index for a coordinate at a point in time.
    ///
    /// The instant is normalized to UTC, then truncated to `precision`
    /// before it is serialized into the request.
    pub async fn uv_index(
        &self,
        coordinates: LatLon,
        at: impl IntoUtcDateTime,
        precision: UvPrecision,
    ) -> Result<UvIndex, OpenWeatherError> {
        let body = self.raw_uv_index(coordinates, at, precision).await?;
        let envelope = parser::parse_json_as::<UvEnvelope>(&body)?;
        Ok(UvIndex::from_json(envelope))
    }

    /// Fetches the raw current-weather body, in any response mode.
    ///
    /// `Html` is pass-through: the body comes back exactly as the provider
    /// sent it and is never parsed.
    #[builder]
    pub async fn raw_weather(
        &self,
        query: Query,
        units: Option<Units>,
        language: Option<String>,
        mode: Option<Mode>,
        api_key: Option<String>,
    ) -> Result<String, OpenWeatherError> {
        self.fetch_endpoint(
            url::WEATHER_URL,
            &query,
            units,
            language,
            mode.unwrap_or_default(),
            api_key,
            "",
        )
        .await
    }

    /// Fetches the raw grouped current-weather body (JSON only).
    #[builder]
    pub async fn raw_weather_group(
        &self,
        ids: Vec<u64>,
        units: Option<Units>,
        language: Option<String>,
        api_key: Option<String>,
    ) -> Result<String, OpenWeatherError> {
        let query = Query::Ids(ids);
        self.fetch_endpoint(
            url::WEATHER_GROUP_URL,
            &query,
            units,
            language,
            Mode::Json,
            api_key,
            "",
        )
        .await
    }

    /// Fetches the raw three-hourly forecast body.
    #[builder]
    pub async fn raw_hourly_forecast(
        &self,
        query: Query,
        units: Option<Units>,
        language: Option<String>,
        mode: Option<Mode>,
        api_key: Option<String>,
    ) -> Result<String, OpenWeatherError> {
        self.fetch_endpoint(
            url::HOURLY_FORECAST_URL,
            &query,
            units,
            language,
            mode.unwrap_or_default(),
            api_key,
            "",
        )
        .await
    }

    /// Fetches the raw daily forecast body for up to 16 days.
    #[builder]
    pub async fn raw_daily_forecast(
        &self,
        query: Query,
        days: u32,
        units: Option<Units>,
        language: Option<String>,
        mode: Option<Mode>,
        api_key: Option<String>,
    ) -> Result<String, OpenWeatherError> {
        if days > MAX_FORECAST_DAYS {
            return Err(RequestError::InvalidArgument(format!(
                "the forecast horizon is at most {MAX_FORECAST_DAYS} days, got {days}"
            ))
            .into());
        }
        self.fetch_endpoint(
            url::DAILY_FORECAST_URL,
            &query,
            units,
            language,
            mode.unwrap_or_default(),
            api_key,
            &format!("&cnt={days}"),
        )
        .await
    }

    /// Fetches the raw history body (JSON only).
    #[builder]
    pub async fn raw_weather_history(
        &self,
        query: Query,
        granularity: HistoryGranularity,
        start: DateTime<Utc>,
        range: HistoryRange,
        units: Option<Units>,
        language: Option<String>,
        api_key: Option<String>,
    ) -> Result<String, OpenWeatherError> {
        self.raw_history_body(query, granularity, start, range, units, language, api_key)
            .await
    }

    /// Fetches the raw current UV index body.
    pub async fn raw_current_uv_index(
        &self,
        coordinates: LatLon,
    ) -> Result<String, OpenWeatherError> {
        let url = self.uv_url(coordinates, "current")?;
        self.resolve(&url).await
    }

    /// Fetches the raw UV index body for a point in time.
    pub async fn raw_uv_index(
        &self,
        coordinates: LatLon,
        at: impl IntoUtcDateTime,
        precision: UvPrecision,
    ) -> Result<String, OpenWeatherError> {
        let stamp = precision.format_stamp(at.into_utc());
        let url = self.uv_url(coordinates, &stamp)?;
        self.resolve(&url).await
    }

    async fn raw_history_body(
        &self,
        query: Query,
        granularity: HistoryGranularity,
        start: DateTime<Utc>,
        range: HistoryRange,
        units: Option<Units>,
        language: Option<String>,
        api_key: Option<String>,
    ) -> Result<String, OpenWeatherError> {
        let suffix = url::history_suffix(granularity, start, &range)?;
        self.fetch_endpoint(
            url::HISTORY_URL,
            &query,
            units,
            language,
            Mode::Json,
            api_key,
            &suffix,
        )
        .await
    }

    /// Builds the URL for a query-parameter endpoint and resolves it
    /// through the cache gate. An empty per-call credential falls back to
    /// the stored key.
    async fn fetch_endpoint(
        &self,
        endpoint: &str,
        query: &Query,
        units: Option<Units>,
        language: Option<String>,
        mode: Mode,
        api_key: Option<String>,
        suffix: &str,
    ) -> Result<String, OpenWeatherError> {
        let fragment = query.encode()?;
        let units = units.unwrap_or(self.units);
        let language = language.unwrap_or_else(|| self.language.clone());
        let api_key = match api_key {
            Some(key) if !key.is_empty() => key,
            _ => self.api_key.clone(),
        };
        let mut url = url::build_query_url(endpoint, &fragment, units, &language, mode, &api_key);
        url.push_str(suffix);
        self.resolve(&url).await
    }

    fn uv_url(&self, coordinates: LatLon, stamp: &str) -> Result<String, RequestError> {
        if self.api_key.is_empty() {
            return Err(RequestError::MissingApiKey);
        }
        Ok(url::build_uv_url(coordinates, stamp, &self.api_key))
    }

    async fn resolve(&self, url: &str) -> Result<String, OpenWeatherError> {
        let (body, served_from_cache) = self.fetcher.resolve(url).await?;
        self.served_from_cache
            .store(served_from_cache, Ordering::Relaxed);
        Ok(body)
    }
}
