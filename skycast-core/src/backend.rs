use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::{
    error::FetchError,
    model::{Conditions, Thresholds},
};

pub mod http;

pub use http::HttpBackend;

/// Wire request for the backend's `/weather` analysis endpoint.
///
/// Coordinates the user never supplied are omitted from the JSON body rather
/// than sent as null.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub date: String,
}

impl AnalysisRequest {
    /// Build the wire payload from validated input. The backend expects
    /// zero-padded `MM/DD/YYYY` dates.
    pub fn new(latitude: Option<f64>, longitude: Option<f64>, date: NaiveDate) -> Self {
        Self {
            latitude,
            longitude,
            date: date.format("%m/%d/%Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Averages {
    pub temperature_avg: f64,
    pub wind_avg: f64,
    pub humidity_avg: f64,
}

/// Parsed backend response. `source` and `num_years` are optional on the
/// wire; a response that misspells the years field (the historical
/// `num_años` hazard) simply deserializes it as absent.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    pub averages: Averages,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub num_years: Option<u32>,
    pub conditions: Conditions,
    pub thresholds: Thresholds,
}

/// The single external collaborator of the adapter. Abstracted so tests can
/// substitute a canned or counting implementation.
#[async_trait]
pub trait WeatherBackend: Send + Sync + Debug {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, FetchError>;
}
