//! The report retrieval adapter: validate the request, call the backend
//! once, reshape the response into the dashboard view model.

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    backend::{AnalysisRequest, AnalysisResponse, WeatherBackend},
    error::{FailureResult, FetchError},
    model::{FeatureId, Metrics, ReportRequest, VisualizationPoint, WeatherData},
};

/// Fetch a weather report for `request` from `backend`.
///
/// The only operation this crate exposes to callers. Every failure path —
/// bad input, unreachable backend, non-2xx response, unparseable body —
/// resolves to the [`FailureResult`] alternative; nothing panics and no
/// transport or decode error escapes raw.
pub async fn fetch_weather_report(
    backend: &dyn WeatherBackend,
    request: &ReportRequest,
) -> Result<WeatherData, FailureResult> {
    fetch_inner(backend, request).await.map_err(FailureResult::from)
}

async fn fetch_inner(
    backend: &dyn WeatherBackend,
    request: &ReportRequest,
) -> Result<WeatherData, FetchError> {
    // Re-validate regardless of caller-side checks; an invalid request
    // never reaches the network.
    let date = request.validate()?;

    let wire = AnalysisRequest::new(request.latitude, request.longitude, date);
    debug!(location = %request.location, date = %wire.date, "requesting weather analysis");

    let response = backend.analyze(&wire).await?;

    Ok(build_weather_data(request, date, &response))
}

/// Pure reshaping of a parsed backend response into [`WeatherData`].
fn build_weather_data(
    request: &ReportRequest,
    date: NaiveDate,
    response: &AnalysisResponse,
) -> WeatherData {
    let averages = response.averages;

    let visualization_data = request
        .features
        .iter()
        .map(|feature| {
            let value = match feature {
                FeatureId::Temperature => averages.temperature_avg,
                FeatureId::WindSpeed => averages.wind_avg,
                FeatureId::Humidity => averages.humidity_avg,
                // Features the backend does not model chart as zero.
                _ => 0.0,
            };
            VisualizationPoint {
                name: feature.display_name().to_string(),
                value,
            }
        })
        .collect();

    let report = match response.source.as_deref() {
        Some(source) if !source.is_empty() => source.to_string(),
        _ => "No report available.".to_string(),
    };

    let analysis = match response.num_years {
        Some(years) => format!("Analysis based on {years} years of data"),
        None => "No analysis available.".to_string(),
    };

    WeatherData {
        location: request.location.clone(),
        date: date.to_string(),
        report,
        analysis,
        visualization_data,
        metrics: Metrics {
            temperature: averages.temperature_avg,
            wind: averages.wind_avg,
            humidity: averages.humidity_avg,
        },
        features: request.features.clone(),
        conditions: response.conditions,
        thresholds: response.thresholds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Averages;
    use crate::model::{Conditions, Thresholds};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned backend that counts how many calls actually hit it.
    #[derive(Debug)]
    struct StubBackend {
        calls: AtomicUsize,
        response: Option<AnalysisResponse>,
    }

    impl StubBackend {
        fn returning(response: AnalysisResponse) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: Some(response),
            }
        }

        fn unreachable() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: None,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherBackend for StubBackend {
        async fn analyze(
            &self,
            _request: &AnalysisRequest,
        ) -> Result<AnalysisResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Some(response) => Ok(response.clone()),
                None => Err(FetchError::Backend {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: "internal error".to_string(),
                }),
            }
        }
    }

    fn canonical_response() -> AnalysisResponse {
        AnalysisResponse {
            averages: Averages {
                temperature_avg: 22.5,
                wind_avg: 10.1,
                humidity_avg: 60.0,
            },
            source: Some("NASA POWER".to_string()),
            num_years: Some(30),
            conditions: Conditions {
                very_hot: false,
                very_cold: false,
                very_windy: true,
                very_wet: false,
            },
            thresholds: Thresholds {
                very_hot: 35.0,
                very_cold: 0.0,
                very_windy: 20.0,
                very_wet: 50.0,
            },
        }
    }

    fn request(features: Vec<FeatureId>) -> ReportRequest {
        ReportRequest {
            location: "Madrid".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 7),
            features,
            latitude: Some(40.4),
            longitude: Some(-3.7),
        }
    }

    #[tokio::test]
    async fn happy_path_produces_full_view_model() {
        let backend = StubBackend::returning(canonical_response());
        let req = request(vec![FeatureId::Temperature, FeatureId::WindSpeed]);

        let data = fetch_weather_report(&backend, &req).await.unwrap();

        assert_eq!(backend.call_count(), 1);
        assert_eq!(data.location, "Madrid");
        assert_eq!(
            data.visualization_data,
            vec![
                VisualizationPoint {
                    name: "Temperature".to_string(),
                    value: 22.5
                },
                VisualizationPoint {
                    name: "Wind Speed".to_string(),
                    value: 10.1
                },
            ]
        );
        assert_eq!(data.metrics.temperature, 22.5);
        assert_eq!(data.metrics.wind, 10.1);
        assert_eq!(data.metrics.humidity, 60.0);
        assert_eq!(data.report, "NASA POWER");
        assert_eq!(data.analysis, "Analysis based on 30 years of data");
        assert!(data.conditions.very_windy);
        assert_eq!(data.thresholds.very_windy, 20.0);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_backend() {
        let backend = StubBackend::returning(canonical_response());

        let mut short_location = request(vec![FeatureId::Temperature]);
        short_location.location = "M".to_string();

        let no_features = request(vec![]);

        let mut bad_latitude = request(vec![FeatureId::Temperature]);
        bad_latitude.latitude = Some(91.0);

        let mut bad_longitude = request(vec![FeatureId::Temperature]);
        bad_longitude.longitude = Some(200.0);

        let mut no_date = request(vec![FeatureId::Temperature]);
        no_date.date = None;

        for req in [
            short_location,
            no_features,
            bad_latitude,
            bad_longitude,
            no_date,
        ] {
            let failure = fetch_weather_report(&backend, &req).await.unwrap_err();
            assert_eq!(failure.error, "Invalid input data.");
        }

        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn backend_failure_maps_to_failure_result() {
        let backend = StubBackend::unreachable();
        let req = request(vec![FeatureId::Temperature]);

        let failure = fetch_weather_report(&backend, &req).await.unwrap_err();

        assert!(failure.error.contains("internal error"));
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn unmapped_feature_charts_as_zero() {
        let backend = StubBackend::returning(canonical_response());
        let req = request(vec![FeatureId::CloudAmount]);

        let data = fetch_weather_report(&backend, &req).await.unwrap();

        assert_eq!(
            data.visualization_data,
            vec![VisualizationPoint {
                name: "Cloud amount".to_string(),
                value: 0.0
            }]
        );
        // Metrics stay fully populated even when no mapped feature was asked for.
        assert_eq!(data.metrics.humidity, 60.0);
    }

    #[tokio::test]
    async fn one_chart_entry_per_requested_feature_in_order() {
        let backend = StubBackend::returning(canonical_response());
        let req = request(FeatureId::all().to_vec());

        let data = fetch_weather_report(&backend, &req).await.unwrap();

        assert_eq!(data.visualization_data.len(), data.features.len());
        let names: Vec<&str> = data
            .visualization_data
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Temperature",
                "Wind Speed",
                "Humidity",
                "Cloud amount",
                "Sky clearness",
                "Frost day"
            ]
        );
    }

    #[tokio::test]
    async fn missing_source_and_years_use_fallback_text() {
        let mut response = canonical_response();
        response.source = Some(String::new());
        response.num_years = None;

        let backend = StubBackend::returning(response);
        let req = request(vec![FeatureId::Humidity]);

        let data = fetch_weather_report(&backend, &req).await.unwrap();

        assert_eq!(data.report, "No report available.");
        assert_eq!(data.analysis, "No analysis available.");
    }

    #[tokio::test]
    async fn view_model_date_round_trips_iso8601() {
        let backend = StubBackend::returning(canonical_response());
        let req = request(vec![FeatureId::Temperature]);

        let data = fetch_weather_report(&backend, &req).await.unwrap();

        let parsed = NaiveDate::parse_from_str(&data.date, "%Y-%m-%d").unwrap();
        assert_eq!(Some(parsed), req.date);
    }
}
