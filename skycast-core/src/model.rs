use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

use crate::error::FetchError;

/// Weather attribute the user wants visualized.
///
/// Only `Temperature`, `WindSpeed` and `Humidity` have backend-derived
/// metric values; the remaining features are selectable but chart as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureId {
    #[serde(rename = "temperature")]
    Temperature,
    #[serde(rename = "wind speed")]
    WindSpeed,
    #[serde(rename = "humidity")]
    Humidity,
    #[serde(rename = "cloud amount")]
    CloudAmount,
    #[serde(rename = "sky clearness")]
    SkyClearness,
    #[serde(rename = "frost day")]
    FrostDay,
}

impl FeatureId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureId::Temperature => "temperature",
            FeatureId::WindSpeed => "wind speed",
            FeatureId::Humidity => "humidity",
            FeatureId::CloudAmount => "cloud amount",
            FeatureId::SkyClearness => "sky clearness",
            FeatureId::FrostDay => "frost day",
        }
    }

    pub const fn all() -> &'static [FeatureId] {
        &[
            FeatureId::Temperature,
            FeatureId::WindSpeed,
            FeatureId::Humidity,
            FeatureId::CloudAmount,
            FeatureId::SkyClearness,
            FeatureId::FrostDay,
        ]
    }

    /// Name used for chart entries. Backend-mapped features carry their
    /// proper names; unmapped ones are the wire name with the first
    /// character capitalized.
    pub fn display_name(&self) -> &'static str {
        match self {
            FeatureId::Temperature => "Temperature",
            FeatureId::WindSpeed => "Wind Speed",
            FeatureId::Humidity => "Humidity",
            FeatureId::CloudAmount => "Cloud amount",
            FeatureId::SkyClearness => "Sky clearness",
            FeatureId::FrostDay => "Frost day",
        }
    }

    /// Label used when listing selectable features to the user.
    pub fn label(&self) -> &'static str {
        match self {
            FeatureId::Temperature => "Temperature",
            FeatureId::WindSpeed => "Wind Speed",
            FeatureId::Humidity => "Humidity",
            FeatureId::CloudAmount => "Cloud Amount",
            FeatureId::SkyClearness => "Sky Clearness",
            FeatureId::FrostDay => "Frost Day",
        }
    }

    /// Whether the backend produces a metric value for this feature.
    pub fn backend_mapped(&self) -> bool {
        matches!(
            self,
            FeatureId::Temperature | FeatureId::WindSpeed | FeatureId::Humidity
        )
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for FeatureId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "temperature" => Ok(FeatureId::Temperature),
            "wind speed" => Ok(FeatureId::WindSpeed),
            "humidity" => Ok(FeatureId::Humidity),
            "cloud amount" => Ok(FeatureId::CloudAmount),
            "sky clearness" => Ok(FeatureId::SkyClearness),
            "frost day" => Ok(FeatureId::FrostDay),
            _ => Err(anyhow::anyhow!(
                "Unknown feature '{value}'. Supported features: temperature, wind speed, \
                 humidity, cloud amount, sky clearness, frost day."
            )),
        }
    }
}

/// Raw report request as it comes off the form, one per submission.
///
/// The adapter re-validates it with [`ReportRequest::validate`] before doing
/// anything else, regardless of what the caller already checked.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub location: String,
    pub date: Option<NaiveDate>,
    pub features: Vec<FeatureId>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ReportRequest {
    /// Validate raw form values: location length, required date, non-empty
    /// feature set, geographic bounds on the optional coordinates.
    ///
    /// Returns the confirmed date so downstream code never re-checks the
    /// `Option`. No side effects on failure.
    pub fn validate(&self) -> Result<NaiveDate, FetchError> {
        if self.location.chars().count() < 2 {
            return Err(FetchError::InvalidInput);
        }

        let date = self.date.ok_or(FetchError::InvalidInput)?;

        if self.features.is_empty() {
            return Err(FetchError::InvalidInput);
        }

        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(FetchError::InvalidInput);
            }
        }
        if let Some(lon) = self.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(FetchError::InvalidInput);
            }
        }

        Ok(date)
    }
}

/// One bar of the chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationPoint {
    pub name: String,
    pub value: f64,
}

/// The three backend-covered metrics, populated on every report regardless
/// of which features were requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub temperature: f64,
    pub wind: f64,
    pub humidity: f64,
}

/// Adverse-condition flags, passed through from the backend verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    pub very_hot: bool,
    pub very_cold: bool,
    pub very_windy: bool,
    pub very_wet: bool,
}

/// Thresholds the backend applied when deriving [`Conditions`]; the field
/// names match the backend's wire format exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(rename = "VERY_HOT")]
    pub very_hot: f64,
    #[serde(rename = "VERY_COLD")]
    pub very_cold: f64,
    #[serde(rename = "VERY_WINDY")]
    pub very_windy: f64,
    #[serde(rename = "VERY_WET")]
    pub very_wet: f64,
}

/// Normalized view model handed to presentation layers.
///
/// Invariant: `visualization_data.len() == features.len()`, one chart entry
/// per requested feature in request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub location: String,
    /// Request date serialized as ISO-8601.
    pub date: String,
    pub report: String,
    pub analysis: String,
    pub visualization_data: Vec<VisualizationPoint>,
    pub metrics: Metrics,
    pub features: Vec<FeatureId>,
    pub conditions: Conditions,
    pub thresholds: Thresholds,
}
