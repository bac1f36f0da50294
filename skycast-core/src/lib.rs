//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Report request validation and the backend wire contract
//! - The HTTP client for the external weather-analysis service
//! - The adapter reshaping backend responses into the `WeatherData` view
//!   model consumed by presentation layers
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or
//! services that need the same backend adapter.

pub mod backend;
pub mod config;
pub mod error;
pub mod model;
pub mod report;

pub use backend::{AnalysisRequest, AnalysisResponse, HttpBackend, WeatherBackend};
pub use config::Config;
pub use error::{FailureResult, FetchError};
pub use model::{FeatureId, ReportRequest, WeatherData};
pub use report::fetch_weather_report;
