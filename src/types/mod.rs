pub mod current;
pub mod forecast;
pub mod history;
pub mod into_utc;
pub mod params;
pub mod uv;
