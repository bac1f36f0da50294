use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use skycast_core::{Config, FeatureId, HttpBackend, ReportRequest, WeatherData, fetch_weather_report};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a weather report for a location and date.
    Report {
        /// Location name shown on the report.
        location: String,

        /// Report date, `YYYY-MM-DD`.
        #[arg(long)]
        date: String,

        /// Features to chart, comma-separated (e.g. "temperature,wind speed").
        /// Defaults to temperature, wind speed and humidity.
        #[arg(long, value_delimiter = ',')]
        features: Vec<String>,

        /// Latitude in degrees, -90 to 90.
        #[arg(long)]
        latitude: Option<f64>,

        /// Longitude in degrees, -180 to 180.
        #[arg(long)]
        longitude: Option<f64>,

        /// Print the raw view model as JSON instead of formatted text.
        #[arg(long)]
        json: bool,
    },

    /// List the selectable weather features.
    Features,

    /// Configure the weather-analysis backend endpoint.
    Configure {
        /// Backend base URL; prompts interactively when omitted.
        #[arg(long)]
        url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Report {
                location,
                date,
                features,
                latitude,
                longitude,
                json,
            } => {
                let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date '{date}', expected YYYY-MM-DD"))?;
                let features = parse_features(&features)?;

                let request = ReportRequest {
                    location,
                    date: Some(date),
                    features,
                    latitude,
                    longitude,
                };

                let config = Config::load()?;
                let backend = HttpBackend::new(config.backend_url);

                match fetch_weather_report(&backend, &request).await {
                    Ok(data) if json => {
                        println!("{}", serde_json::to_string_pretty(&data)?);
                    }
                    Ok(data) => print_report(&data),
                    Err(failure) => bail!("{failure}"),
                }
            }

            Command::Features => {
                println!("Selectable features:");
                for feature in FeatureId::all() {
                    let note = if feature.backend_mapped() {
                        ""
                    } else {
                        " (no backend metric, charts as zero)"
                    };
                    println!("  {:<14} {}{note}", feature.as_str(), feature.label());
                }
            }

            Command::Configure { url } => {
                let mut config = Config::load()?;

                let url = match url {
                    Some(url) => url,
                    None => inquire::Text::new("Backend URL:")
                        .with_default(&config.backend_url)
                        .prompt()
                        .context("Failed to read backend URL")?,
                };

                config.backend_url = url;
                config.save()?;

                println!(
                    "Backend set to {} ({})",
                    config.backend_url,
                    Config::config_file_path()?.display()
                );
            }
        }

        Ok(())
    }
}

/// Parse the `--features` values, defaulting to the three backend-mapped
/// features when none were given.
fn parse_features(raw: &[String]) -> Result<Vec<FeatureId>> {
    if raw.is_empty() {
        return Ok(vec![
            FeatureId::Temperature,
            FeatureId::WindSpeed,
            FeatureId::Humidity,
        ]);
    }

    raw.iter().map(|s| FeatureId::try_from(s.as_str())).collect()
}

fn print_report(data: &WeatherData) {
    println!("Weather report for {} on {}", data.location, data.date);
    println!("Source: {}", data.report);
    println!("{}", data.analysis);
    println!();

    for point in &data.visualization_data {
        println!("  {:<14} {:>8.1}", point.name, point.value);
    }
    println!();

    println!(
        "Metrics: temperature {:.1}, wind {:.1}, humidity {:.1}",
        data.metrics.temperature, data.metrics.wind, data.metrics.humidity
    );

    let mut flagged = Vec::new();
    if data.conditions.very_hot {
        flagged.push(format!("very hot (threshold {})", data.thresholds.very_hot));
    }
    if data.conditions.very_cold {
        flagged.push(format!("very cold (threshold {})", data.thresholds.very_cold));
    }
    if data.conditions.very_windy {
        flagged.push(format!("very windy (threshold {})", data.thresholds.very_windy));
    }
    if data.conditions.very_wet {
        flagged.push(format!("very wet (threshold {})", data.thresholds.very_wet));
    }

    if flagged.is_empty() {
        println!("Conditions: none flagged");
    } else {
        println!("Conditions: {}", flagged.join(", "));
    }
}
