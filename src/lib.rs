//! A client for the OpenWeatherMap API: current weather, grouped current
//! weather, forecasts, historical records and UV index, normalized from the
//! provider's mixed XML/JSON response shapes into a small set of domain
//! objects.
//!
//! ```no_run
//! use openweather::{OpenWeather, OpenWeatherError, Query, Units};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), OpenWeatherError> {
//!     let client = OpenWeather::builder()
//!         .api_key("my-api-key".to_string())
//!         .units(Units::Metric)
//!         .build();
//!
//!     let weather = client
//!         .current_weather()
//!         .query(Query::place("Berlin,DE"))
//!         .call()
//!         .await?;
//!     println!("{}: {:.1}", weather.city.name, weather.temperature.value);
//!     Ok(())
//! }
//! ```

mod error;
mod openweather;
mod request;
mod response;
mod transport;
mod types;

pub use error::OpenWeatherError;
pub use openweather::*;

pub use request::error::RequestError;
pub use request::query::{LatLon, Query};
pub use response::error::ResponseError;
pub use transport::cache::{MemoryCache, ResponseCache};
pub use transport::error::TransportError;
pub use transport::fetch::{Fetch, HttpFetcher};

pub use types::current::{City, CurrentWeather, CurrentWeatherGroup, Sun, Temperature, Wind};
pub use types::forecast::{ForecastPoint, WeatherForecast};
pub use types::history::{HistoryPoint, WeatherHistory};
pub use types::into_utc::IntoUtcDateTime;
pub use types::params::{HistoryGranularity, HistoryRange, Mode, Units, UvPrecision};
pub use types::uv::UvIndex;
