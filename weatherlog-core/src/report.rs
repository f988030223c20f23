use crate::model::WeatherReport;
use chrono::{DateTime, Local};

/// Strip trailing commas from each requested city token.
///
/// City names are passed on the command line and may carry the list
/// separator; nothing else about the token is altered.
pub fn trim_trailing_commas(cities: &[String]) -> Vec<String> {
    cities
        .iter()
        .map(|c| c.trim_end_matches(',').to_string())
        .collect()
}

/// Render one weather report as the block written to the operator stream
/// and the report file.
pub fn format_report(report: &WeatherReport, now: DateTime<Local>) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "{} --- Weather in {}:\n",
        now.format("%Y-%m-%d %H:%M:%S"),
        report.city
    ));
    out.push_str(&format!("\tTemperature: {}°C", report.temperature));
    out.push_str(&format!("\tPrecipitation: {}mm", report.precipitation));
    out.push_str(&format!("\tWind Speed: {}m/s", report.wind_speed));
    out.push_str(&format!("\tIn summary - {}", report.summary));
    out.push('\n');
    out
}
